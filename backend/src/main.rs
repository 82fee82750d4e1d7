//! Backend entry-point: loads settings, prepares persistence, and serves the
//! REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use membership_backend::inbound::http::health::HealthState;
use membership_backend::outbound::persistence::{
    DbPool, DieselMembershipRepository, PoolConfig, run_pending_migrations,
};
use membership_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn build_server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let token_ttl = settings.token_ttl().map_err(std::io::Error::other)?;
    let secret = settings.jwt_secret().map_err(std::io::Error::other)?;
    if secret.is_ephemeral() {
        warn!("using ephemeral JWT secret; tokens will not survive a restart");
    }

    let mut config = ServerConfig::new(bind_addr, secret.as_bytes(), token_ttl);
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let max_size = settings.db_max_connections();
        let pool_config = PoolConfig::new(database_url)
            .with_max_size(max_size)
            .with_min_idle(Some(max_size.min(2)));
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        info!("database pool ready");
        config = config.with_repository(Arc::new(DieselMembershipRepository::new(pool)));
    }
    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

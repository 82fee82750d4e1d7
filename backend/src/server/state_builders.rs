//! Builders for the HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use membership_backend::domain::ports::MembershipRepository;
use membership_backend::domain::{AccountService, MembershipService};
use membership_backend::inbound::http::state::{HttpState, HttpStatePorts};
use membership_backend::outbound::memory::InMemoryMembershipRepository;
use membership_backend::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

use super::ServerConfig;

fn select_repository(config: &ServerConfig) -> Arc<dyn MembershipRepository> {
    match &config.repository {
        Some(repository) => repository.clone(),
        None => {
            warn!("no database configured; using in-memory membership store");
            Arc::new(InMemoryMembershipRepository::default())
        }
    }
}

/// Wire services and adapters into shared handler state.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = select_repository(config);
    let tokens = Arc::new(JwtTokenIssuer::new(
        &config.jwt_secret,
        config.token_ttl,
        Arc::new(DefaultClock),
    ));
    let auth = AccountService::new(
        repository.clone(),
        Arc::new(Argon2PasswordHasher::default()),
        tokens.clone(),
    );
    let memberships = Arc::new(MembershipService::new(repository));

    web::Data::new(HttpState::new(HttpStatePorts {
        auth: Arc::new(auth),
        profiles: memberships.clone(),
        organisations: memberships.clone(),
        memberships,
        tokens,
    }))
}

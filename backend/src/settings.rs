//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `MEMBERSHIP_*` environment variables, command-line flags,
//! or a configuration file, in OrthoConfig's usual precedence.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::outbound::security::DEFAULT_TOKEN_TTL_HOURS;

const DEFAULT_PORT: u16 = 6969;
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Configuration errors detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `MEMBERSHIP_BIND_HOST` is not an IP address.
    #[error("invalid bind host {host:?}")]
    InvalidBindHost { host: String },
    /// No signing secret was configured and ephemeral secrets are disabled.
    #[error("MEMBERSHIP_JWT_SECRET must be set (or MEMBERSHIP_ALLOW_EPHEMERAL_SECRET=true)")]
    MissingJwtSecret,
    /// Token lifetime must be positive.
    #[error("token TTL must be a positive number of hours, got {hours}")]
    InvalidTokenTtl { hours: i64 },
}

/// Signing secret plus where it came from.
pub struct JwtSecret {
    bytes: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl JwtSecret {
    /// Raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the secret was generated for this process only.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSecret")
            .field("bytes", &"<redacted>")
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// Runtime settings for the membership service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEMBERSHIP")]
pub struct AppSettings {
    /// Interface to bind, for example `127.0.0.1`.
    pub bind_host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without it the service keeps state in
    /// memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in hours.
    pub token_ttl_hours: Option<i64>,
    /// Permit a per-process random secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("allow_ephemeral_secret", &self.allow_ephemeral_secret)
            .finish()
    }
}

impl AppSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindHost`] when the host does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.bind_host.as_deref() {
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidBindHost {
                host: raw.to_owned(),
            })?,
            None => DEFAULT_BIND_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, never below one.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Access token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidTokenTtl`] for zero or negative hours,
    /// or a value too large to represent.
    pub fn token_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        let hours = self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        if hours <= 0 {
            return Err(SettingsError::InvalidTokenTtl { hours });
        }
        chrono::Duration::try_hours(hours).ok_or(SettingsError::InvalidTokenTtl { hours })
    }

    /// Resolve the token signing secret.
    ///
    /// Debug builds fall back to a random secret when none is configured;
    /// release builds only do so when `allow_ephemeral_secret` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingJwtSecret`] when no secret is
    /// available.
    pub fn jwt_secret(&self) -> Result<JwtSecret, SettingsError> {
        self.resolve_jwt_secret(cfg!(debug_assertions))
    }

    fn resolve_jwt_secret(&self, debug_build: bool) -> Result<JwtSecret, SettingsError> {
        if let Some(secret) = self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            return Ok(JwtSecret {
                bytes: Zeroizing::new(secret.as_bytes().to_vec()),
                ephemeral: false,
            });
        }
        if !(debug_build || self.allow_ephemeral_secret) {
            return Err(SettingsError::MissingJwtSecret);
        }
        let mut bytes = Vec::with_capacity(32);
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
        Ok(JwtSecret {
            bytes: Zeroizing::new(bytes),
            ephemeral: true,
        })
    }
}

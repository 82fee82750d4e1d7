//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use zeroize::Zeroizing;

use membership_backend::domain::ports::MembershipRepository;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) repository: Option<Arc<dyn MembershipRepository>>,
}

impl ServerConfig {
    /// Construct a configuration with the in-memory repository.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: &[u8], token_ttl: chrono::Duration) -> Self {
        Self {
            bind_addr,
            jwt_secret: Zeroizing::new(jwt_secret.to_vec()),
            token_ttl,
            repository: None,
        }
    }

    /// Use `repository` instead of the in-memory store.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn MembershipRepository>) -> Self {
        self.repository = Some(repository);
        self
    }
}

//! Driving port for registration and login.
//!
//! Inbound adapters call it without knowing how passwords are hashed, where
//! accounts live, or how tokens are signed.

use async_trait::async_trait;

use crate::domain::{AuthSession, DomainError, LoginCredentials, Registration};

/// Domain use-case port for account authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create the account and its default organisation, then issue a token.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, DomainError>;

    /// Verify credentials and issue a token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, DomainError>;
}

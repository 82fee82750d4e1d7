//! Port for issuing and verifying stateless bearer tokens.

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum TokenError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, forged, or expired.
        Rejected { message: String } => "token rejected: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token bound to `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenError>;

    /// Verify `token` and return the identity it carries.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}

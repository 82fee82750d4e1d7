//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps every kind to a
//! fixed status code and envelope; unrecognised failures are collapsed into
//! [`DomainError::Internal`] so internal details never reach clients.

use std::fmt;

/// Stable machine-readable classification of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// One or more request fields failed validation.
    ValidationFailed,
    /// Registration collided with an existing email address.
    UserAlreadyExists,
    /// Credentials did not match a known user.
    AuthenticationFailed,
    /// The user does not exist or is not visible to the caller.
    UserNotFound,
    /// The organisation does not exist or the caller is not a member.
    OrgNotFound,
    /// The request was malformed in a way unrelated to field validation.
    ClientError,
    /// No bearer token accompanied a protected request.
    MissingToken,
    /// The bearer token failed verification or has expired.
    InvalidToken,
    /// An unexpected failure inside the service.
    InternalError,
}

/// A single failing request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    /// Build a field error from its wire name and human-readable message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field as the client sent it.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Explanation shown to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Why a protected request was rejected before reaching a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    /// No `Authorization` header, or an empty one.
    MissingToken,
    /// The token was malformed, forged, or expired.
    InvalidToken,
}

/// Tagged failure kinds surfaced by the services.
///
/// # Examples
/// ```
/// use membership_backend::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::user_not_found();
/// assert_eq!(err.code(), ErrorCode::UserNotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Request validation failed for one or more fields.
    #[error("validation failed for {} field(s)", errors.len())]
    Validation {
        /// Every failing field, in the order it was checked.
        errors: Vec<FieldError>,
    },
    /// The email address is already registered.
    #[error("user already exists")]
    UserAlreadyExists,
    /// Unknown email or wrong password.
    #[error("authentication failed")]
    AuthenticationFailed,
    /// Target user is missing or not visible.
    #[error("user not found")]
    UserNotFound,
    /// Organisation is missing or the caller is not a member.
    #[error("organisation not found")]
    OrgNotFound,
    /// Malformed request outside field validation.
    #[error("client error: {message}")]
    Client {
        /// Message returned to the client.
        message: String,
    },
    /// Bearer authentication rejected the request.
    #[error("unauthorised: {reason:?}")]
    Unauthorized {
        /// Which check failed.
        reason: UnauthorizedReason,
    },
    /// Unexpected failure; the message is logged, never returned.
    #[error("internal error: {message}")]
    Internal {
        /// Diagnostic detail for logs.
        message: String,
    },
}

impl DomainError {
    /// Stable classification for adapters.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::UserAlreadyExists => ErrorCode::UserAlreadyExists,
            Self::AuthenticationFailed => ErrorCode::AuthenticationFailed,
            Self::UserNotFound => ErrorCode::UserNotFound,
            Self::OrgNotFound => ErrorCode::OrgNotFound,
            Self::Client { .. } => ErrorCode::ClientError,
            Self::Unauthorized {
                reason: UnauthorizedReason::MissingToken,
            } => ErrorCode::MissingToken,
            Self::Unauthorized {
                reason: UnauthorizedReason::InvalidToken,
            } => ErrorCode::InvalidToken,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Validation failure carrying every failing field.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    /// Duplicate email on registration.
    pub fn user_already_exists() -> Self {
        Self::UserAlreadyExists
    }

    /// Credentials rejected.
    pub fn authentication_failed() -> Self {
        Self::AuthenticationFailed
    }

    /// User missing or not visible.
    pub fn user_not_found() -> Self {
        Self::UserNotFound
    }

    /// Organisation missing or caller not a member.
    pub fn org_not_found() -> Self {
        Self::OrgNotFound
    }

    /// Malformed request with a client-facing message.
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Protected request without a token.
    pub fn missing_token() -> Self {
        Self::Unauthorized {
            reason: UnauthorizedReason::MissingToken,
        }
    }

    /// Protected request with a bad or expired token.
    pub fn invalid_token() -> Self {
        Self::Unauthorized {
            reason: UnauthorizedReason::InvalidToken,
        }
    }

    /// Unexpected failure; `message` is for logs only.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

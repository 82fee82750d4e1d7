//! Bearer token extraction for protected routes.
//!
//! Handlers take [`AuthenticatedUser`] as an argument; the request is
//! rejected before the handler runs when the token is absent or invalid.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{DomainError, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    /// The caller's user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, DomainError> {
    let raw = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| DomainError::invalid_token())?,
        None => return Err(DomainError::missing_token()),
    };
    if raw.trim().is_empty() {
        return Err(DomainError::missing_token());
    }
    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(DomainError::invalid_token)?;

    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| DomainError::internal("http state is not registered"))?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            DomainError::invalid_token()
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

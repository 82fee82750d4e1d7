//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Authentication routes are mounted both at `/auth` and `/api/auth`. Every
//! other route lives under `/api` and requires a bearer token.

use actix_web::{ResponseError, web};
use tracing::debug;

use crate::domain::DomainError;

pub mod auth;
pub mod bearer;
pub mod envelope;
pub mod error;
pub mod health;
pub mod organisations;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        let error = DomainError::client(validation::INVALID_JSON_MESSAGE);
        actix_web::error::InternalError::from_response(err, error.error_response()).into()
    })
}

fn auth_scope() -> actix_web::Scope {
    web::scope("/auth")
        .service(auth::register)
        .service(auth::login)
}

/// Register every API route on `cfg`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use membership_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(auth_scope()).service(
        web::scope("/api")
            .service(auth_scope())
            .service(users::get_user)
            .service(organisations::list_organisations)
            .service(organisations::create_organisation)
            .service(organisations::get_organisation)
            .service(organisations::add_member),
    );
}

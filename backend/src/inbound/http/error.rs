//! HTTP adapter mapping for domain errors.
//!
//! Every [`DomainError`] kind maps to a fixed status code and envelope.
//! Internal errors are logged with the trace id and replaced by a fixed
//! message before they reach the client.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use super::envelope::{ErrorBody, FieldErrorBody, ValidationErrorBody};
use crate::domain::{DomainError, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

/// Message returned in place of any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::UserAlreadyExists => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::AuthenticationFailed | ErrorCode::MissingToken | ErrorCode::InvalidToken => {
            StatusCode::UNAUTHORIZED
        }
        ErrorCode::UserNotFound | ErrorCode::OrgNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ClientError => StatusCode::BAD_REQUEST,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn envelope_text(error: &DomainError) -> (&'static str, String) {
    match error {
        DomainError::UserAlreadyExists => (
            "User already exists",
            "A user with this email already exists".to_owned(),
        ),
        DomainError::AuthenticationFailed => ("Bad request", "Authentication failed".to_owned()),
        DomainError::UserNotFound => ("Not Found", "User not found".to_owned()),
        DomainError::OrgNotFound => ("Not found", "Organisation not found".to_owned()),
        DomainError::Client { message } => ("Bad request", message.clone()),
        DomainError::Unauthorized { .. } if error.code() == ErrorCode::MissingToken => (
            "Unauthorized",
            "Not authorised to access this resource".to_owned(),
        ),
        DomainError::Unauthorized { .. } => (
            "Invalid jwt token",
            "JWT token is invalid or expired".to_owned(),
        ),
        DomainError::Validation { .. } | DomainError::Internal { .. } => {
            (INTERNAL_ERROR_MESSAGE, INTERNAL_ERROR_MESSAGE.to_owned())
        }
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current();
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }

        match self {
            Self::Validation { errors } => builder.json(ValidationErrorBody {
                errors: errors
                    .iter()
                    .map(|err| FieldErrorBody {
                        field: err.field().to_owned(),
                        message: err.message().to_owned(),
                    })
                    .collect(),
            }),
            other => {
                if let Self::Internal { message } = other {
                    let trace_id = trace_id.map(|id| id.to_string());
                    error!(trace_id = trace_id.as_deref(), %message, "internal error");
                }
                let (status, message) = envelope_text(other);
                builder.json(ErrorBody {
                    status: status.to_owned(),
                    message,
                    status_code: self.status_code().as_u16(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::FieldError;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn body_of(error: &DomainError) -> Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(DomainError::user_already_exists(), 422, "User already exists", "A user with this email already exists")]
    #[case(DomainError::authentication_failed(), 401, "Bad request", "Authentication failed")]
    #[case(DomainError::user_not_found(), 404, "Not Found", "User not found")]
    #[case(DomainError::org_not_found(), 404, "Not found", "Organisation not found")]
    #[case(DomainError::client("Invalid json data"), 400, "Bad request", "Invalid json data")]
    #[case(DomainError::missing_token(), 401, "Unauthorized", "Not authorised to access this resource")]
    #[case(DomainError::invalid_token(), 401, "Invalid jwt token", "JWT token is invalid or expired")]
    #[actix_web::test]
    async fn kinds_map_to_fixed_envelopes(
        #[case] error: DomainError,
        #[case] status: u16,
        #[case] label: &str,
        #[case] message: &str,
    ) {
        assert_eq!(error.status_code().as_u16(), status);
        assert_eq!(
            body_of(&error).await,
            json!({ "status": label, "message": message, "statusCode": status })
        );
    }

    #[actix_web::test]
    async fn internal_details_are_redacted() {
        let error = DomainError::internal("connection string postgres://secret@db");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(&error).await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("secret"));
    }

    #[actix_web::test]
    async fn validation_lists_every_field() {
        let error = DomainError::validation(vec![
            FieldError::new("email", "email is invalid"),
            FieldError::new("firstName", "first name must be provided"),
        ]);
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_of(&error).await,
            json!({ "errors": [
                { "field": "email", "message": "email is invalid" },
                { "field": "firstName", "message": "first name must be provided" },
            ]})
        );
    }

    #[actix_web::test]
    async fn trace_id_header_is_attached_in_scope() {
        let trace_id = TraceId::generate();
        let response = TraceId::scope(trace_id, async {
            DomainError::user_not_found().error_response()
        })
        .await;
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(header, Some(trace_id.to_string()));
    }
}

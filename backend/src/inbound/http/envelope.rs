//! JSON envelopes shared by every endpoint.
//!
//! Success bodies look like `{"status":"success","message":...,"data":...}`.
//! Failures use either [`ErrorBody`] or, for field validation,
//! [`ValidationErrorBody`].

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Success wrapper around an optional payload.
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    status: &'static str,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> SuccessBody<T> {
    /// Envelope carrying `data`.
    pub fn with_data(message: &'static str, data: T) -> Self {
        Self {
            status: "success",
            message,
            data: Some(data),
        }
    }

    /// Render the envelope with `status`.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl SuccessBody<()> {
    /// Envelope without a payload.
    pub fn message_only(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
            data: None,
        }
    }
}

/// Status/message failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Short failure label.
    #[schema(example = "Not Found")]
    pub status: String,
    /// Human-readable explanation.
    #[schema(example = "User not found")]
    pub message: String,
    /// HTTP status code repeated in the body.
    #[schema(example = 404)]
    pub status_code: u16,
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldErrorBody {
    /// Field name as sent by the client.
    #[schema(example = "firstName")]
    pub field: String,
    /// Why the field was rejected.
    #[schema(example = "first name must be provided")]
    pub message: String,
}

/// Field validation failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    /// Every failing field.
    pub errors: Vec<FieldErrorBody>,
}

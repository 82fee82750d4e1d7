//! Registration and login handlers.
//!
//! ```text
//! POST /auth/register {"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","password":"engines"}
//! POST /auth/login {"email":"ada@example.com","password":"engines"}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DomainError, FieldError, LoginCredentials, LoginValidationError, Registration,
    RegistrationInput, RegistrationValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ErrorBody, SuccessBody, ValidationErrorBody};
use crate::inbound::http::schemas::AuthBody;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /auth/register`.
///
/// Absent fields deserialise as `None` and surface as field validation
/// errors rather than JSON errors.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "engines")]
    pub password: Option<String>,
    #[schema(example = "08012345678")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<Registration, DomainError> {
        Registration::try_from_parts(RegistrationInput {
            email: self.email.as_deref().unwrap_or_default(),
            first_name: self.first_name.as_deref().unwrap_or_default(),
            last_name: self.last_name.as_deref().unwrap_or_default(),
            password: self.password.as_deref().unwrap_or_default(),
            phone: self.phone.as_deref(),
        })
        .map_err(|errors| {
            DomainError::validation(errors.into_iter().map(registration_field_error).collect())
        })
    }
}

/// Login body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "engines")]
    pub password: Option<String>,
}

impl LoginRequest {
    fn validate(&self) -> Result<LoginCredentials, DomainError> {
        LoginCredentials::try_from_parts(
            self.email.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )
        .map_err(|errors| {
            DomainError::validation(errors.into_iter().map(login_field_error).collect())
        })
    }
}

fn registration_field_error(err: RegistrationValidationError) -> FieldError {
    let field = match err {
        RegistrationValidationError::EmptyEmail | RegistrationValidationError::InvalidEmail => {
            "email"
        }
        RegistrationValidationError::EmptyFirstName => "firstName",
        RegistrationValidationError::EmptyLastName => "lastName",
        RegistrationValidationError::EmptyPassword => "password",
    };
    FieldError::new(field, err.to_string())
}

fn login_field_error(err: LoginValidationError) -> FieldError {
    let field = match err {
        LoginValidationError::EmptyEmail | LoginValidationError::InvalidEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    FieldError::new(field, err.to_string())
}

/// Register a user and their default organisation.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful; `data` holds the token and profile", body = AuthBody),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 422, description = "Validation failed or email already registered", body = ValidationErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = payload.validate()?;
    let session = state.auth.register(&registration).await?;
    Ok(
        SuccessBody::with_data("Registration successful", AuthBody::from(&session))
            .respond(StatusCode::CREATED),
    )
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; `data` holds the token and profile", body = AuthBody),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 401, description = "Authentication failed", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = payload.validate()?;
    let session = state.auth.login(&credentials).await?;
    Ok(SuccessBody::with_data("Login successful", AuthBody::from(&session)).respond(StatusCode::OK))
}

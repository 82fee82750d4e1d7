//! Organisation handlers.
//!
//! ```text
//! GET  /api/organisations
//! GET  /api/organisations/{orgId}
//! POST /api/organisations {"name":"Analytical Engines","description":"..."}
//! POST /api/organisations/{orgId}/users {"userId":"..."}
//! ```
//!
//! Every route requires a bearer token.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, FieldError, NewOrganisation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{ErrorBody, SuccessBody, ValidationErrorBody};
use crate::inbound::http::schemas::{OrganisationBody, OrganisationListBody};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{non_blank, parse_organisation_id, parse_user_id};

/// Body for `POST /api/organisations`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateOrganisationRequest {
    #[schema(example = "Analytical Engines")]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateOrganisationRequest {
    fn validate(&self) -> Result<NewOrganisation, DomainError> {
        let name = self.name.as_deref().unwrap_or_default();
        NewOrganisation::try_from_parts(name, self.description.as_deref()).map_err(|_| {
            DomainError::validation(vec![FieldError::new("name", "name must be provided")])
        })
    }
}

/// Body for `POST /api/organisations/{orgId}/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: Option<String>,
}

/// List every organisation the caller belongs to.
#[utoipa::path(
    get,
    path = "/api/organisations",
    responses(
        (status = 200, description = "Successfully retrieved user organisations", body = OrganisationListBody),
        (status = 400, description = "Listing failed", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tags = ["organisations"],
    operation_id = "listOrganisations"
)]
#[get("/organisations")]
pub async fn list_organisations(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let organisations = state.organisations.list_for_member(caller.user_id()).await?;
    let data = OrganisationListBody {
        organisations: organisations.iter().map(OrganisationBody::from).collect(),
    };
    Ok(
        SuccessBody::with_data("Successfully retrieved user organisations", data)
            .respond(StatusCode::OK),
    )
}

/// Fetch one organisation the caller belongs to.
#[utoipa::path(
    get,
    path = "/api/organisations/{orgId}",
    params(("orgId" = String, Path, description = "Organisation identifier")),
    responses(
        (status = 200, description = "Successfully retrieved organisation", body = OrganisationBody),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Organisation not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["organisations"],
    operation_id = "getOrganisation"
)]
#[get("/organisations/{org_id}")]
pub async fn get_organisation(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let organisation_id = parse_organisation_id(&path.into_inner())?;
    let organisation = state
        .organisations
        .fetch_for_member(caller.user_id(), &organisation_id)
        .await?;
    Ok(SuccessBody::with_data(
        "Successfully retrieved organisation",
        OrganisationBody::from(&organisation),
    )
    .respond(StatusCode::OK))
}

/// Create an organisation owned by the caller.
#[utoipa::path(
    post,
    path = "/api/organisations",
    request_body = CreateOrganisationRequest,
    responses(
        (status = 201, description = "Organisation created successfully", body = OrganisationBody),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["organisations"],
    operation_id = "createOrganisation"
)]
#[post("/organisations")]
pub async fn create_organisation(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrganisationRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.validate()?;
    let organisation = state.memberships.create(caller.user_id(), draft).await?;
    Ok(SuccessBody::with_data(
        "Organisation created successfully",
        OrganisationBody::from(&organisation),
    )
    .respond(StatusCode::CREATED))
}

/// Add an existing user to an existing organisation.
#[utoipa::path(
    post,
    path = "/api/organisations/{orgId}/users",
    params(("orgId" = String, Path, description = "Organisation identifier")),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "User added to organisation successfully"),
        (status = 400, description = "Malformed identifier or JSON", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "User or organisation not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["organisations"],
    operation_id = "addOrganisationMember"
)]
#[post("/organisations/{org_id}/users")]
pub async fn add_member(
    _caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddMemberRequest>,
) -> ApiResult<HttpResponse> {
    let organisation_id = parse_organisation_id(&path.into_inner())?;
    let raw_user_id = non_blank(payload.user_id.as_deref()).ok_or_else(|| {
        DomainError::validation(vec![FieldError::new("userId", "userId must be provided")])
    })?;
    let user_id = parse_user_id(raw_user_id)?;
    state
        .memberships
        .add_member(&organisation_id, &user_id)
        .await?;
    Ok(SuccessBody::message_only("User added to organisation successfully").respond(StatusCode::OK))
}

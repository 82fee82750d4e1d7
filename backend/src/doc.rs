//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the envelope and payload
//! schemas, and the bearer token security scheme. The document is served by
//! Swagger UI in debug builds and exported via `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::envelope::{ErrorBody, FieldErrorBody, ValidationErrorBody};
use crate::inbound::http::organisations::{AddMemberRequest, CreateOrganisationRequest};
use crate::inbound::http::schemas::{AuthBody, OrganisationBody, OrganisationListBody, UserBody};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by register or login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Membership backend API",
        description = "Registration, login, and organisation membership."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::get_user,
        crate::inbound::http::organisations::list_organisations,
        crate::inbound::http::organisations::get_organisation,
        crate::inbound::http::organisations::create_organisation,
        crate::inbound::http::organisations::add_member,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        CreateOrganisationRequest,
        AddMemberRequest,
        AuthBody,
        UserBody,
        OrganisationBody,
        OrganisationListBody,
        ErrorBody,
        FieldErrorBody,
        ValidationErrorBody,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User profiles"),
        (name = "organisations", description = "Organisations and membership"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! JSON payloads returned inside success envelopes.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AuthSession, Organisation, User};

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "08012345678")]
    pub phone: Option<String>,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().to_string(),
            first_name: user.first_name().as_str().to_owned(),
            last_name: user.last_name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            phone: user.phone().map(|phone| phone.as_str().to_owned()),
        }
    }
}

/// Public view of an organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationBody {
    #[schema(example = "9b2f31c4-9f1e-4f5e-a551-6c5de07cbd1a")]
    pub org_id: String,
    #[schema(example = "Ada's Organisation")]
    pub name: String,
    pub description: Option<String>,
}

impl From<&Organisation> for OrganisationBody {
    fn from(org: &Organisation) -> Self {
        Self {
            org_id: org.id().to_string(),
            name: org.name().as_str().to_owned(),
            description: org.description().map(str::to_owned),
        }
    }
}

/// Token and profile returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthBody {
    pub access_token: String,
    pub user: UserBody,
}

impl From<&AuthSession> for AuthBody {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: session.access_token.as_str().to_owned(),
            user: UserBody::from(&session.user),
        }
    }
}

/// Every organisation the caller belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrganisationListBody {
    pub organisations: Vec<OrganisationBody>,
}

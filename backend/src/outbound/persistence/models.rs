//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-run validation so a corrupt row surfaces as a query error instead
//! of a malformed value.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{organisations, user_organisations, users};
use crate::domain::{
    EmailAddress, Organisation, OrganisationId, OrganisationName, PasswordHash, PersonName,
    PhoneNumber, User, UserAccount, UserId,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email).map_err(|err| format!("user {}: {err}", row.id))?;
        let first_name =
            PersonName::new(row.first_name).map_err(|err| format!("user {}: {err}", row.id))?;
        let last_name =
            PersonName::new(row.last_name).map_err(|err| format!("user {}: {err}", row.id))?;
        let user = User::new(
            UserId::from_uuid(row.id),
            email,
            first_name,
            last_name,
            PhoneNumber::parse_optional(row.phone.as_deref()),
        );
        Ok(Self::new(user, PasswordHash::new(row.password_hash)))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
    pub phone: Option<&'a str>,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        let user = account.user();
        Self {
            id: *user.id().as_uuid(),
            email: user.email().as_str(),
            first_name: user.first_name().as_str(),
            last_name: user.last_name().as_str(),
            password_hash: account.password_hash().as_str(),
            phone: user.phone().map(PhoneNumber::as_str),
        }
    }
}

/// Row struct for reading from the organisations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organisations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganisationRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl TryFrom<OrganisationRow> for Organisation {
    type Error = String;

    fn try_from(row: OrganisationRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let name = OrganisationName::new(row.name)
            .map_err(|err| format!("organisation {id}: {err}"))?;
        Ok(Self::new(OrganisationId::from_uuid(id), name, row.description))
    }
}

/// Insertable struct for creating organisations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = organisations)]
pub(crate) struct NewOrganisationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a Organisation> for NewOrganisationRow<'a> {
    fn from(organisation: &'a Organisation) -> Self {
        Self {
            id: *organisation.id().as_uuid(),
            name: organisation.name().as_str(),
            description: organisation.description(),
        }
    }
}

/// Insertable membership link.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = user_organisations)]
pub(crate) struct NewMembershipRow {
    pub user_id: Uuid,
    pub organisation_id: Uuid,
}

impl NewMembershipRow {
    pub fn new(user_id: &UserId, organisation_id: &OrganisationId) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            organisation_id: *organisation_id.as_uuid(),
        }
    }
}

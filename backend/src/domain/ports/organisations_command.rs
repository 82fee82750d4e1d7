//! Driving port for organisation mutations.

use async_trait::async_trait;

use crate::domain::{DomainError, NewOrganisation, Organisation, OrganisationId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganisationsCommand: Send + Sync {
    /// Create an organisation with `creator` as its first member.
    async fn create(
        &self,
        creator: &UserId,
        draft: NewOrganisation,
    ) -> Result<Organisation, DomainError>;

    /// Add `user_id` to `organisation_id`.
    ///
    /// Any authenticated caller may add any existing user to any existing
    /// organisation.
    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), DomainError>;
}

//! Driving port for reading a member's organisations.

use async_trait::async_trait;

use crate::domain::{DomainError, Organisation, OrganisationId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganisationsQuery: Send + Sync {
    /// Every organisation `member` belongs to.
    async fn list_for_member(&self, member: &UserId) -> Result<Vec<Organisation>, DomainError>;

    /// A single organisation, hidden as [`DomainError::OrgNotFound`] unless
    /// `member` belongs to it.
    async fn fetch_for_member(
        &self,
        member: &UserId,
        organisation_id: &OrganisationId,
    ) -> Result<Organisation, DomainError>;
}

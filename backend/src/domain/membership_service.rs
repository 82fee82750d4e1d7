//! Membership-aware queries and organisation mutations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::membership::can_view_profile;
use super::ports::{
    MembershipRepository, MembershipRepositoryError, OrganisationsCommand, OrganisationsQuery,
    UserProfileQuery,
};
use super::{DomainError, NewOrganisation, Organisation, OrganisationId, User, UserId};

/// Implements the profile and organisation driving ports.
#[derive(Clone)]
pub struct MembershipService {
    repository: Arc<dyn MembershipRepository>,
}

impl MembershipService {
    /// Create the service over a repository.
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    async fn organisation_ids(&self, user_id: &UserId) -> Result<Vec<OrganisationId>, DomainError> {
        let organisations = self
            .repository
            .organisations_for_user(user_id)
            .await
            .map_err(internal)?;
        Ok(organisations.iter().map(|org| *org.id()).collect())
    }
}

fn internal(error: MembershipRepositoryError) -> DomainError {
    DomainError::internal(error.to_string())
}

#[async_trait]
impl UserProfileQuery for MembershipService {
    async fn fetch_user(&self, viewer: &UserId, target: &UserId) -> Result<User, DomainError> {
        let account = self
            .repository
            .find_user_by_id(target)
            .await
            .map_err(internal)?
            .ok_or_else(DomainError::user_not_found)?;

        if viewer != target {
            let viewer_orgs = self.organisation_ids(viewer).await?;
            let target_orgs = self.organisation_ids(target).await?;
            if !can_view_profile(viewer, &viewer_orgs, target, &target_orgs) {
                debug!(%viewer, %target, "profile hidden: no shared organisation");
                return Err(DomainError::user_not_found());
            }
        }

        Ok(account.into_user())
    }
}

#[async_trait]
impl OrganisationsQuery for MembershipService {
    async fn list_for_member(&self, member: &UserId) -> Result<Vec<Organisation>, DomainError> {
        self.repository
            .organisations_for_user(member)
            .await
            .map_err(|err| {
                debug!(%member, error = %err, "listing organisations failed");
                DomainError::client("Client error")
            })
    }

    async fn fetch_for_member(
        &self,
        member: &UserId,
        organisation_id: &OrganisationId,
    ) -> Result<Organisation, DomainError> {
        self.repository
            .organisation_for_member(member, organisation_id)
            .await
            .map_err(internal)?
            .ok_or_else(DomainError::org_not_found)
    }
}

#[async_trait]
impl OrganisationsCommand for MembershipService {
    async fn create(
        &self,
        creator: &UserId,
        draft: NewOrganisation,
    ) -> Result<Organisation, DomainError> {
        let organisation = draft.into_organisation();
        self.repository
            .create_organisation(&organisation, creator)
            .await
            .map_err(|err| match err {
                MembershipRepositoryError::UserMissing { .. } => DomainError::user_not_found(),
                other => internal(other),
            })?;
        info!(organisation_id = %organisation.id(), %creator, "organisation created");
        Ok(organisation)
    }

    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), DomainError> {
        self.repository
            .find_user_by_id(user_id)
            .await
            .map_err(internal)?
            .ok_or_else(DomainError::user_not_found)?;

        self.repository
            .add_member(organisation_id, user_id)
            .await
            .map_err(|err| match err {
                MembershipRepositoryError::OrganisationMissing { .. } => {
                    DomainError::org_not_found()
                }
                MembershipRepositoryError::UserMissing { .. } => DomainError::user_not_found(),
                other => internal(other),
            })?;
        info!(%organisation_id, %user_id, "member added to organisation");
        Ok(())
    }
}

//! In-memory [`MembershipRepository`] used for tests and database-less runs.
//!
//! Each operation holds the state mutex for its whole duration, so
//! multi-step writes become visible all at once or not at all.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{MembershipRepository, MembershipRepositoryError};
use crate::domain::{EmailAddress, Organisation, OrganisationId, UserAccount, UserId};

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, UserAccount>,
    organisations: HashMap<OrganisationId, Organisation>,
    memberships: HashSet<(UserId, OrganisationId)>,
}

/// Mutex-guarded maps standing in for the relational store.
#[derive(Debug, Default)]
pub struct InMemoryMembershipRepository {
    state: Mutex<State>,
}

impl InMemoryMembershipRepository {
    fn lock(&self) -> Result<MutexGuard<'_, State>, MembershipRepositoryError> {
        self.state
            .lock()
            .map_err(|_| MembershipRepositoryError::connection("in-memory state poisoned"))
    }

    /// Number of stored organisations.
    pub fn organisation_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.organisations.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn register(
        &self,
        account: &UserAccount,
        default_organisation: &Organisation,
    ) -> Result<(), MembershipRepositoryError> {
        let mut state = self.lock()?;
        let email = account.user().email();
        if state
            .users
            .values()
            .any(|existing| existing.user().email() == email)
        {
            return Err(MembershipRepositoryError::duplicate_email(email.as_str()));
        }

        let user_id = *account.user().id();
        let organisation_id = *default_organisation.id();
        state.users.insert(user_id, account.clone());
        state
            .organisations
            .insert(organisation_id, default_organisation.clone());
        state.memberships.insert((user_id, organisation_id));
        Ok(())
    }

    async fn find_user_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, MembershipRepositoryError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, MembershipRepositoryError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|account| account.user().email() == email)
            .cloned())
    }

    async fn organisations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Organisation>, MembershipRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .memberships
            .iter()
            .filter(|(member, _)| member == user_id)
            .filter_map(|(_, org_id)| state.organisations.get(org_id).cloned())
            .collect())
    }

    async fn organisation_for_member(
        &self,
        user_id: &UserId,
        organisation_id: &OrganisationId,
    ) -> Result<Option<Organisation>, MembershipRepositoryError> {
        let state = self.lock()?;
        if !state.memberships.contains(&(*user_id, *organisation_id)) {
            return Ok(None);
        }
        Ok(state.organisations.get(organisation_id).cloned())
    }

    async fn create_organisation(
        &self,
        organisation: &Organisation,
        creator: &UserId,
    ) -> Result<(), MembershipRepositoryError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(creator) {
            return Err(MembershipRepositoryError::user_missing(creator.to_string()));
        }
        let organisation_id = *organisation.id();
        state
            .organisations
            .insert(organisation_id, organisation.clone());
        state.memberships.insert((*creator, organisation_id));
        Ok(())
    }

    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), MembershipRepositoryError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(user_id) {
            return Err(MembershipRepositoryError::user_missing(user_id.to_string()));
        }
        if !state.organisations.contains_key(organisation_id) {
            return Err(MembershipRepositoryError::organisation_missing(
                organisation_id.to_string(),
            ));
        }
        state.memberships.insert((*user_id, *organisation_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{OrganisationName, PasswordHash, PersonName, User};
    use rstest::{fixture, rstest};

    fn account(email: &str) -> UserAccount {
        UserAccount::new(
            User::new(
                UserId::random(),
                EmailAddress::new(email).expect("email"),
                PersonName::new("Ada").expect("name"),
                PersonName::new("Lovelace").expect("name"),
                None,
            ),
            PasswordHash::new("hash"),
        )
    }

    fn organisation(name: &str) -> Organisation {
        Organisation::new(
            OrganisationId::random(),
            OrganisationName::new(name).expect("name"),
            None,
        )
    }

    #[fixture]
    fn repository() -> InMemoryMembershipRepository {
        InMemoryMembershipRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn register_links_user_to_default_organisation(repository: InMemoryMembershipRepository) {
        let ada = account("ada@example.com");
        let org = organisation("Ada's Organisation");
        repository.register(&ada, &org).await.expect("stored");

        let orgs = repository
            .organisations_for_user(ada.user().id())
            .await
            .expect("listed");
        assert_eq!(orgs, vec![org]);
        let found = repository
            .find_user_by_email(ada.user().email())
            .await
            .expect("lookup");
        assert_eq!(found, Some(ada));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_writes_nothing(repository: InMemoryMembershipRepository) {
        repository
            .register(&account("ada@example.com"), &organisation("First"))
            .await
            .expect("stored");

        let duplicate = account("ada@example.com");
        let err = repository
            .register(&duplicate, &organisation("Second"))
            .await
            .expect_err("duplicate");
        assert_eq!(
            err,
            MembershipRepositoryError::duplicate_email("ada@example.com")
        );
        assert_eq!(repository.organisation_count(), 1);
        assert!(
            repository
                .find_user_by_id(duplicate.user().id())
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn organisation_for_member_requires_membership(repository: InMemoryMembershipRepository) {
        let ada = account("ada@example.com");
        let grace = account("grace@example.com");
        let org = organisation("Engines");
        repository.register(&ada, &org).await.expect("stored");
        repository
            .register(&grace, &organisation("Compilers"))
            .await
            .expect("stored");

        let hidden = repository
            .organisation_for_member(grace.user().id(), org.id())
            .await
            .expect("lookup");
        assert!(hidden.is_none());
        let visible = repository
            .organisation_for_member(ada.user().id(), org.id())
            .await
            .expect("lookup");
        assert_eq!(visible, Some(org));
    }

    #[rstest]
    #[tokio::test]
    async fn create_organisation_requires_existing_creator(
        repository: InMemoryMembershipRepository,
    ) {
        let creator = UserId::random();
        let err = repository
            .create_organisation(&organisation("Ghosts"), &creator)
            .await
            .expect_err("missing creator");
        assert_eq!(
            err,
            MembershipRepositoryError::user_missing(creator.to_string())
        );
        assert_eq!(repository.organisation_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn add_member_reports_missing_organisation(repository: InMemoryMembershipRepository) {
        let ada = account("ada@example.com");
        repository
            .register(&ada, &organisation("Engines"))
            .await
            .expect("stored");

        let missing = OrganisationId::random();
        let err = repository
            .add_member(&missing, ada.user().id())
            .await
            .expect_err("missing organisation");
        assert_eq!(
            err,
            MembershipRepositoryError::organisation_missing(missing.to_string())
        );
    }
}

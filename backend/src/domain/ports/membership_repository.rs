//! Port abstraction for user and organisation persistence.
//!
//! Multi-step writes (`register`, `create_organisation`) are single calls so
//! the adapter can run them inside one transaction: either every row lands
//! or none does.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Organisation, OrganisationId, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by membership repository adapters.
    pub enum MembershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "membership repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "membership repository query failed: {message}",
        /// The email address is already registered.
        DuplicateEmail { email: String } => "email {email} is already registered",
        /// A referenced user does not exist.
        UserMissing { user_id: String } => "user {user_id} does not exist",
        /// A referenced organisation does not exist.
        OrganisationMissing { organisation_id: String } => "organisation {organisation_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Atomically insert the account, its default organisation, and the
    /// membership linking them.
    ///
    /// Fails with [`MembershipRepositoryError::DuplicateEmail`] when the
    /// email is taken, leaving no rows behind.
    async fn register(
        &self,
        account: &UserAccount,
        default_organisation: &Organisation,
    ) -> Result<(), MembershipRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_user_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, MembershipRepositoryError>;

    /// Fetch a user by exact email address.
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, MembershipRepositoryError>;

    /// Every organisation `user_id` belongs to, in no particular order.
    async fn organisations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Organisation>, MembershipRepositoryError>;

    /// The organisation, only when `user_id` is a member of it.
    async fn organisation_for_member(
        &self,
        user_id: &UserId,
        organisation_id: &OrganisationId,
    ) -> Result<Option<Organisation>, MembershipRepositoryError>;

    /// Atomically insert the organisation and the creator's membership.
    async fn create_organisation(
        &self,
        organisation: &Organisation,
        creator: &UserId,
    ) -> Result<(), MembershipRepositoryError>;

    /// Link a user to an organisation. Re-adding an existing member succeeds
    /// without change.
    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), MembershipRepositoryError>;
}

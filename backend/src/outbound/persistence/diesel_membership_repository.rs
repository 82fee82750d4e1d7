//! PostgreSQL-backed membership adapter.
//!
//! Registration and organisation creation each run inside one transaction;
//! any error returned from the transaction body rolls every insert back.
//! Constraint violations are classified by constraint name so callers see
//! `DuplicateEmail`, `UserMissing`, or `OrganisationMissing` instead of a
//! generic query failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{MembershipRepository, MembershipRepositoryError};
use crate::domain::{EmailAddress, Organisation, OrganisationId, UserAccount, UserId};

use super::models::{NewMembershipRow, NewOrganisationRow, NewUserRow, OrganisationRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{organisations, user_organisations, users};

/// Unique index on `users.email`.
pub(crate) const USERS_EMAIL_KEY: &str = "users_email_key";
/// Foreign key from the membership link to `users`.
pub(crate) const MEMBERSHIP_USER_FKEY: &str = "user_organisations_user_id_fkey";
/// Foreign key from the membership link to `organisations`.
pub(crate) const MEMBERSHIP_ORGANISATION_FKEY: &str = "user_organisations_organisation_id_fkey";

/// Diesel-backed implementation of [`MembershipRepository`].
#[derive(Clone)]
pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    /// Create a repository over the shared pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use membership_backend::outbound::persistence::{
    ///     DbPool, DieselMembershipRepository, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/membership")).await?;
    /// let repository = DieselMembershipRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Identifiers involved in a write, used to label constraint violations.
#[derive(Debug, Default, Clone, Copy)]
struct WriteKeys<'a> {
    email: Option<&'a EmailAddress>,
    user_id: Option<&'a UserId>,
    organisation_id: Option<&'a OrganisationId>,
}

fn label<T: ToString>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

fn map_pool_error(error: PoolError) -> MembershipRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            MembershipRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError, keys: WriteKeys<'_>) -> MembershipRepositoryError {
    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                constraint = info.constraint_name(),
                message = info.message(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(USERS_EMAIL_KEY) =>
        {
            MembershipRepositoryError::duplicate_email(
                keys.email.map(EmailAddress::as_str).unwrap_or_default(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info)
            if info.constraint_name() == Some(MEMBERSHIP_USER_FKEY) =>
        {
            MembershipRepositoryError::user_missing(label(keys.user_id))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info)
            if info.constraint_name() == Some(MEMBERSHIP_ORGANISATION_FKEY) =>
        {
            MembershipRepositoryError::organisation_missing(label(keys.organisation_id))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            MembershipRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            MembershipRepositoryError::query(info.message().to_owned())
        }
        _ => MembershipRepositoryError::query(error_message),
    }
}

fn read_error(error: DieselError) -> MembershipRepositoryError {
    map_diesel_error(error, WriteKeys::default())
}

fn user_from_row(row: UserRow) -> Result<UserAccount, MembershipRepositoryError> {
    UserAccount::try_from(row).map_err(MembershipRepositoryError::query)
}

fn organisation_from_row(row: OrganisationRow) -> Result<Organisation, MembershipRepositoryError> {
    Organisation::try_from(row).map_err(MembershipRepositoryError::query)
}

#[async_trait]
impl MembershipRepository for DieselMembershipRepository {
    async fn register(
        &self,
        account: &UserAccount,
        default_organisation: &Organisation,
    ) -> Result<(), MembershipRepositoryError> {
        let user_row = NewUserRow::from(account);
        let organisation_row = NewOrganisationRow::from(default_organisation);
        let membership_row =
            NewMembershipRow::new(account.user().id(), default_organisation.id());
        let keys = WriteKeys {
            email: Some(account.user().email()),
            user_id: Some(account.user().id()),
            organisation_id: Some(default_organisation.id()),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(organisations::table)
                    .values(&organisation_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(user_organisations::table)
                    .values(&membership_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, keys))
    }

    async fn find_user_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_error)?;

        row.map(user_from_row).transpose()
    }

    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_error)?;

        row.map(user_from_row).transpose()
    }

    async fn organisations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Organisation>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OrganisationRow> = user_organisations::table
            .inner_join(organisations::table)
            .filter(user_organisations::user_id.eq(user_id.as_uuid()))
            .select(OrganisationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(organisation_from_row).collect()
    }

    async fn organisation_for_member(
        &self,
        user_id: &UserId,
        organisation_id: &OrganisationId,
    ) -> Result<Option<Organisation>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrganisationRow> = user_organisations::table
            .inner_join(organisations::table)
            .filter(user_organisations::user_id.eq(user_id.as_uuid()))
            .filter(user_organisations::organisation_id.eq(organisation_id.as_uuid()))
            .select(OrganisationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_error)?;

        row.map(organisation_from_row).transpose()
    }

    async fn create_organisation(
        &self,
        organisation: &Organisation,
        creator: &UserId,
    ) -> Result<(), MembershipRepositoryError> {
        let organisation_row = NewOrganisationRow::from(organisation);
        let membership_row = NewMembershipRow::new(creator, organisation.id());
        let keys = WriteKeys {
            email: None,
            user_id: Some(creator),
            organisation_id: Some(organisation.id()),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(organisations::table)
                    .values(&organisation_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(user_organisations::table)
                    .values(&membership_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, keys))
    }

    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), MembershipRepositoryError> {
        let membership_row = NewMembershipRow::new(user_id, organisation_id);
        let keys = WriteKeys {
            email: None,
            user_id: Some(user_id),
            organisation_id: Some(organisation_id),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_organisations::table)
            .values(&membership_row)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, keys))
    }
}

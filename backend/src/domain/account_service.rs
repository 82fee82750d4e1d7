//! Registration and login orchestration.
//!
//! Registration hashes the password, hands the account plus its default
//! organisation to the repository as one atomic write, then signs a token.
//! Token issuance happens after the write commits; a signing failure at that
//! point surfaces as an internal error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::ports::{
    AuthService, MembershipRepository, MembershipRepositoryError, PasswordHasher, TokenIssuer,
};
use super::{
    AuthSession, DomainError, LoginCredentials, Organisation, OrganisationId, OrganisationName,
    Registration, User, UserAccount, UserId,
};

/// [`AuthService`] implementation over the driven ports.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn MembershipRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    /// Create the service from its collaborators.
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    fn issue_session(&self, user: User) -> Result<AuthSession, DomainError> {
        let access_token = self.tokens.issue(user.id()).map_err(|err| {
            error!(user_id = %user.id(), error = %err, "failed to issue access token");
            DomainError::internal(err.to_string())
        })?;
        Ok(AuthSession { access_token, user })
    }
}

fn map_registration_error(error: MembershipRepositoryError) -> DomainError {
    match error {
        MembershipRepositoryError::DuplicateEmail { .. } => DomainError::user_already_exists(),
        other => DomainError::internal(other.to_string()),
    }
}

#[async_trait]
impl AuthService for AccountService {
    async fn register(&self, registration: &Registration) -> Result<AuthSession, DomainError> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?;

        let user = User::new(
            UserId::random(),
            registration.email().clone(),
            registration.first_name().clone(),
            registration.last_name().clone(),
            registration.phone().cloned(),
        );
        let organisation = Organisation::new(
            OrganisationId::random(),
            OrganisationName::default_for(registration.first_name()),
            None,
        );
        let account = UserAccount::new(user, password_hash);

        self.repository
            .register(&account, &organisation)
            .await
            .map_err(map_registration_error)?;

        info!(
            user_id = %account.user().id(),
            organisation_id = %organisation.id(),
            "user registered"
        );
        self.issue_session(account.into_user())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, DomainError> {
        let account = self
            .repository
            .find_user_by_email(credentials.email())
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?
            .ok_or_else(|| {
                debug!("login rejected: unknown email");
                DomainError::authentication_failed()
            })?;

        let verified = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(|err| {
                error!(
                    user_id = %account.user().id(),
                    error = %err,
                    "password verification failed"
                );
                DomainError::internal(err.to_string())
            })?;
        if !verified {
            debug!(user_id = %account.user().id(), "login rejected: wrong password");
            return Err(DomainError::authentication_failed());
        }

        info!(user_id = %account.user().id(), "user logged in");
        self.issue_session(account.into_user())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockMembershipRepository, MockPasswordHasher, MockTokenIssuer, TokenError,
    };
    use crate::domain::{AccessToken, EmailAddress, PasswordHash, PersonName, RegistrationInput};
    use crate::outbound::memory::InMemoryMembershipRepository;
    use rstest::{fixture, rstest};

    /// Deterministic hasher so tests do not pay for a slow KDF.
    struct PrefixHasher;

    #[async_trait]
    impl PasswordHasher for PrefixHasher {
        async fn hash(
            &self,
            password: &str,
        ) -> Result<PasswordHash, crate::domain::ports::PasswordHasherError> {
            Ok(PasswordHash::new(format!("hashed:{password}")))
        }

        async fn verify(
            &self,
            password: &str,
            hash: &PasswordHash,
        ) -> Result<bool, crate::domain::ports::PasswordHasherError> {
            Ok(hash.as_str() == format!("hashed:{password}"))
        }
    }

    fn token_stub() -> MockTokenIssuer {
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .returning(|id| Ok(AccessToken::new(format!("token-for-{id}"))));
        tokens
    }

    fn registration(email: &str, first_name: &str) -> Registration {
        Registration::try_from_parts(RegistrationInput {
            email,
            first_name,
            last_name: "Lovelace",
            password: "engines",
            phone: None,
        })
        .expect("valid registration")
    }

    #[fixture]
    fn repository() -> Arc<InMemoryMembershipRepository> {
        Arc::new(InMemoryMembershipRepository::default())
    }

    fn service(repository: Arc<InMemoryMembershipRepository>) -> AccountService {
        AccountService::new(repository, Arc::new(PrefixHasher), Arc::new(token_stub()))
    }

    #[rstest]
    #[tokio::test]
    async fn register_creates_user_with_default_organisation(
        repository: Arc<InMemoryMembershipRepository>,
    ) {
        let service = service(repository.clone());
        let session = service
            .register(&registration("ada@example.com", "ada"))
            .await
            .expect("registration succeeds");

        let id = session.user.id();
        assert_eq!(session.access_token.as_str(), format!("token-for-{id}"));
        let organisations = repository
            .organisations_for_user(id)
            .await
            .expect("organisations load");
        assert_eq!(organisations.len(), 1);
        let org = organisations.first().expect("default organisation");
        assert_eq!(org.name().as_str(), "Ada's Organisation");
        assert_eq!(org.description(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn register_duplicate_email_maps_to_user_already_exists(
        repository: Arc<InMemoryMembershipRepository>,
    ) {
        let service = service(repository.clone());
        service
            .register(&registration("ada@example.com", "Ada"))
            .await
            .expect("first registration succeeds");

        let err = service
            .register(&registration("ada@example.com", "Augusta"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err, DomainError::UserAlreadyExists);
        assert_eq!(repository.organisation_count(), 1);
    }

    #[tokio::test]
    async fn register_storage_failure_is_internal() {
        let mut repo = MockMembershipRepository::new();
        repo.expect_register()
            .times(1)
            .return_once(|_, _| Err(MembershipRepositoryError::query("commit failed")));
        let service = AccountService::new(
            Arc::new(repo),
            Arc::new(PrefixHasher),
            Arc::new(MockTokenIssuer::new()),
        );

        let err = service
            .register(&registration("ada@example.com", "Ada"))
            .await
            .expect_err("storage failure");
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[tokio::test]
    async fn register_does_not_touch_storage_when_hashing_fails() {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().times(1).return_once(|_| {
            Err(crate::domain::ports::PasswordHasherError::hashing("out of memory"))
        });
        let mut repo = MockMembershipRepository::new();
        repo.expect_register().never();
        let service = AccountService::new(
            Arc::new(repo),
            Arc::new(hasher),
            Arc::new(MockTokenIssuer::new()),
        );

        let err = service
            .register(&registration("ada@example.com", "Ada"))
            .await
            .expect_err("hashing failure");
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn token_failure_after_commit_is_internal(repository: Arc<InMemoryMembershipRepository>) {
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .times(1)
            .return_once(|_| Err(TokenError::signing("key unavailable")));
        let service = AccountService::new(repository, Arc::new(PrefixHasher), Arc::new(tokens));

        let err = service
            .register(&registration("ada@example.com", "Ada"))
            .await
            .expect_err("signing failure");
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn login_returns_session_for_valid_credentials(
        repository: Arc<InMemoryMembershipRepository>,
    ) {
        let service = service(repository);
        let registered = service
            .register(&registration("ada@example.com", "Ada"))
            .await
            .expect("registration succeeds");

        let credentials =
            LoginCredentials::try_from_parts("ada@example.com", "engines").expect("valid");
        let session = service.login(&credentials).await.expect("login succeeds");
        assert_eq!(session.user, registered.user);
    }

    #[rstest]
    #[case("ada@example.com", "wrong")]
    #[case("nobody@example.com", "engines")]
    #[tokio::test]
    async fn login_failures_are_indistinguishable(
        repository: Arc<InMemoryMembershipRepository>,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let service = service(repository);
        service
            .register(&registration("ada@example.com", "Ada"))
            .await
            .expect("registration succeeds");

        let credentials = LoginCredentials::try_from_parts(email, password).expect("valid");
        let err = service.login(&credentials).await.expect_err("rejected");
        assert_eq!(err, DomainError::AuthenticationFailed);
    }

    #[tokio::test]
    async fn login_with_malformed_stored_hash_is_internal() {
        let account = UserAccount::new(
            User::new(
                UserId::random(),
                EmailAddress::new("ada@example.com").expect("email"),
                PersonName::new("Ada").expect("name"),
                PersonName::new("Lovelace").expect("name"),
                None,
            ),
            PasswordHash::new("garbage"),
        );
        let mut repo = MockMembershipRepository::new();
        repo.expect_find_user_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(account)));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().times(1).return_once(|_, _| {
            Err(crate::domain::ports::PasswordHasherError::malformed_hash("bad phc"))
        });
        let service = AccountService::new(
            Arc::new(repo),
            Arc::new(hasher),
            Arc::new(MockTokenIssuer::new()),
        );

        let credentials =
            LoginCredentials::try_from_parts("ada@example.com", "engines").expect("valid");
        let err = service.login(&credentials).await.expect_err("internal");
        assert!(matches!(err, DomainError::Internal { .. }));
    }
}

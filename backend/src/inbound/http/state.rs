//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthService, OrganisationsCommand, OrganisationsQuery, TokenIssuer, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub auth: Arc<dyn AuthService>,
    /// Membership-filtered profile reads.
    pub profiles: Arc<dyn UserProfileQuery>,
    /// Organisation reads scoped to the caller.
    pub organisations: Arc<dyn OrganisationsQuery>,
    /// Organisation creation and membership writes.
    pub memberships: Arc<dyn OrganisationsCommand>,
    /// Bearer token verification for protected routes.
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Parameter object used to build [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthService>,
    pub profiles: Arc<dyn UserProfileQuery>,
    pub organisations: Arc<dyn OrganisationsQuery>,
    pub memberships: Arc<dyn OrganisationsCommand>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use membership_backend::domain::{AccountService, MembershipService};
    /// use membership_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use membership_backend::outbound::memory::InMemoryMembershipRepository;
    /// use membership_backend::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};
    ///
    /// let repo = Arc::new(InMemoryMembershipRepository::default());
    /// let tokens = Arc::new(JwtTokenIssuer::new(
    ///     b"change-me",
    ///     chrono::Duration::hours(24),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let auth = AccountService::new(repo.clone(), Arc::new(Argon2PasswordHasher::default()), tokens.clone());
    /// let memberships = Arc::new(MembershipService::new(repo));
    /// let state = HttpState::new(HttpStatePorts {
    ///     auth: Arc::new(auth),
    ///     profiles: memberships.clone(),
    ///     organisations: memberships.clone(),
    ///     memberships,
    ///     tokens,
    /// });
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            profiles,
            organisations,
            memberships,
            tokens,
        } = ports;
        Self {
            auth,
            profiles,
            organisations,
            memberships,
            tokens,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

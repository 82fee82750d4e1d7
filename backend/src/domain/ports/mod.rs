//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AuthService`, `UserProfileQuery`, `OrganisationsQuery`,
//! `OrganisationsCommand`) are called by inbound adapters. Driven ports
//! (`MembershipRepository`, `PasswordHasher`, `TokenIssuer`) are implemented
//! by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod membership_repository;
mod organisations_command;
mod organisations_query;
mod password_hasher;
mod token_issuer;
mod user_profile_query;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::AuthService;
#[cfg(test)]
pub use membership_repository::MockMembershipRepository;
pub use membership_repository::{MembershipRepository, MembershipRepositoryError};
#[cfg(test)]
pub use organisations_command::MockOrganisationsCommand;
pub use organisations_command::OrganisationsCommand;
#[cfg(test)]
pub use organisations_query::MockOrganisationsQuery;
pub use organisations_query::OrganisationsQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;

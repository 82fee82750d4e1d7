//! Domain primitives, membership rules, and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters, plus the services that orchestrate registration, login, and
//! membership-filtered reads. Nothing here depends on actix or diesel.
//!
//! Public surface:
//! - `DomainError` / `ErrorCode` — tagged failure kinds.
//! - `User`, `UserAccount`, `Organisation` and their validated fields.
//! - `Registration`, `LoginCredentials`, `AuthSession` — authentication inputs
//!   and outputs.
//! - `AccountService`, `MembershipService` — implementations of the driving
//!   ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod error;
pub mod membership;
pub mod membership_service;
pub mod organisation;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, AuthSession, LoginCredentials, LoginValidationError, Registration,
    RegistrationInput, RegistrationValidationError,
};
pub use self::error::{DomainError, ErrorCode, FieldError, UnauthorizedReason};
pub use self::membership::{can_view_profile, shares_organisation};
pub use self::membership_service::MembershipService;
pub use self::organisation::{
    NewOrganisation, Organisation, OrganisationId, OrganisationName, OrganisationValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordHash, PersonName, PhoneNumber, User, UserAccount, UserId,
    UserValidationError,
};

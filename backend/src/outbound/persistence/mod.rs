//! PostgreSQL persistence adapters built on Diesel.
//!
//! - [`pool`]: bb8 pool of `diesel-async` connections.
//! - [`DieselMembershipRepository`]: the [`crate::domain::ports::MembershipRepository`]
//!   implementation.
//! - [`run_pending_migrations`]: embedded schema migrations.
//!
//! Row structs in `models` and the `schema` tables stay private to this
//! module.

mod diesel_membership_repository;
mod migrations;
mod models;
pub mod pool;
mod schema;

pub use diesel_membership_repository::DieselMembershipRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! In-process adapters that satisfy the driven ports without external
//! infrastructure.

mod membership_repository;

pub use membership_repository::InMemoryMembershipRepository;

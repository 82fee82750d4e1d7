//! Driving port for membership-filtered profile reads.

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Fetch `target` as seen by `viewer`.
    ///
    /// Fails with [`DomainError::UserNotFound`] when the target does not
    /// exist or shares no organisation with the viewer.
    async fn fetch_user(&self, viewer: &UserId, target: &UserId) -> Result<User, DomainError>;
}

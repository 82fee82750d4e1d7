//! Membership-based visibility rules.
//!
//! A user may see another user's profile only when both belong to at least
//! one common organisation, or when viewer and target are the same user.

use std::collections::HashSet;

use super::organisation::OrganisationId;
use super::user::UserId;

/// True when the two organisation lists intersect.
///
/// # Examples
/// ```
/// use membership_backend::domain::{shares_organisation, OrganisationId};
///
/// let shared = OrganisationId::random();
/// let other = OrganisationId::random();
/// assert!(shares_organisation(&[shared, other], &[shared]));
/// assert!(!shares_organisation(&[other], &[shared]));
/// ```
pub fn shares_organisation(left: &[OrganisationId], right: &[OrganisationId]) -> bool {
    let (smaller, larger) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    let lookup: HashSet<&OrganisationId> = smaller.iter().collect();
    larger.iter().any(|id| lookup.contains(id))
}

/// Decide whether `viewer` may read `target`'s profile.
pub fn can_view_profile(
    viewer: &UserId,
    viewer_organisations: &[OrganisationId],
    target: &UserId,
    target_organisations: &[OrganisationId],
) -> bool {
    viewer == target || shares_organisation(viewer_organisations, target_organisations)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn empty_lists_share_nothing() {
        assert!(!shares_organisation(&[], &[]));
        assert!(!shares_organisation(&[OrganisationId::random()], &[]));
    }

    #[test]
    fn viewer_always_sees_self() {
        let user = UserId::random();
        assert!(can_view_profile(&user, &[], &user, &[]));
    }

    #[test]
    fn strangers_are_hidden() {
        let viewer = UserId::random();
        let target = UserId::random();
        assert!(!can_view_profile(
            &viewer,
            &[OrganisationId::random()],
            &target,
            &[OrganisationId::random()],
        ));
    }

    #[test]
    fn colleagues_are_visible_regardless_of_order() {
        let shared = OrganisationId::random();
        let viewer_orgs = [OrganisationId::random(), OrganisationId::random(), shared];
        let target_orgs = [shared];
        let viewer = UserId::random();
        let target = UserId::random();
        assert!(can_view_profile(&viewer, &viewer_orgs, &target, &target_orgs));
        assert!(can_view_profile(&target, &target_orgs, &viewer, &viewer_orgs));
    }
}

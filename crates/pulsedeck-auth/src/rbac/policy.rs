//! Role matching for route requirements.

use std::collections::BTreeSet;

use pulsedeck_entity::user::Role;

/// Pure role-matching policy.
///
/// A requirement is satisfied when it is empty or when the user holds at
/// least one of the required roles. Roles are flat; there is no hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// `required.is_empty() || user_roles ∩ required ≠ ∅`.
    pub fn matches(user_roles: &BTreeSet<Role>, required: &[Role]) -> bool {
        required.is_empty() || required.iter().any(|role| user_roles.contains(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every subset of the known roles.
    fn all_role_sets() -> Vec<Vec<Role>> {
        (0..1u8 << Role::ALL.len())
            .map(|mask| {
                Role::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, r)| *r)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_examples() {
        let user = BTreeSet::from([Role::TenantUser]);
        assert!(AccessPolicy::matches(&user, &[Role::Admin, Role::TenantUser]));
        assert!(!AccessPolicy::matches(&user, &[Role::Admin]));
        assert!(AccessPolicy::matches(&user, &[]));
        assert!(AccessPolicy::matches(&BTreeSet::new(), &[]));
        assert!(!AccessPolicy::matches(&BTreeSet::new(), &[Role::Viewer]));
    }

    #[test]
    fn test_matches_iff_empty_or_intersecting() {
        for user_roles in all_role_sets() {
            let user: BTreeSet<Role> = user_roles.iter().copied().collect();
            for required in all_role_sets() {
                let required_set: BTreeSet<Role> = required.iter().copied().collect();
                let expected = required.is_empty() || !user.is_disjoint(&required_set);
                assert_eq!(
                    AccessPolicy::matches(&user, &required),
                    expected,
                    "user={user:?} required={required:?}"
                );
            }
        }
    }
}

//! Authenticated user model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// The identity held by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// User identifier (token subject).
    pub id: String,
    /// Login email.
    pub email: String,
    /// Roles granted to the user. Order is irrelevant.
    pub roles: BTreeSet<Role>,
    /// Tenant the user belongs to.
    pub tenant_id: String,
    /// Current bearer token.
    pub token: String,
}

impl AuthUser {
    /// Check whether the user holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check whether the user holds at least one of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.roles.contains(r))
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Return a copy of this user carrying a different token.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }
}

//! Demo login directory entries.

use std::collections::BTreeSet;

use pulsedeck_core::config::DemoUserConfig;
use pulsedeck_core::error::AppError;

use super::model::AuthUser;
use super::role::Role;

/// A demo identity accepted by `login`. Not hashed; demo-grade only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCredential {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// User identifier.
    pub id: String,
    /// Granted roles.
    pub roles: BTreeSet<Role>,
    /// Tenant the user belongs to.
    pub tenant_id: String,
}

impl DemoCredential {
    /// Exact string match on both email and password.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Build the authenticated user for this identity.
    pub fn to_auth_user(&self, token: String) -> AuthUser {
        AuthUser {
            id: self.id.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
            tenant_id: self.tenant_id.clone(),
            token,
        }
    }
}

impl TryFrom<&DemoUserConfig> for DemoCredential {
    type Error = AppError;

    fn try_from(config: &DemoUserConfig) -> Result<Self, Self::Error> {
        let roles = config
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            email: config.email.clone(),
            password: config.password.clone(),
            id: config.id.clone(),
            roles,
            tenant_id: config.tenant_id.clone(),
        })
    }
}

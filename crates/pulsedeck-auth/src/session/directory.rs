//! Fixed directory of demo identities.

use std::collections::BTreeSet;

use pulsedeck_core::config::AuthConfig;
use pulsedeck_core::result::AppResult;
use pulsedeck_entity::user::{DemoCredential, Role};

/// Demo identities checked by exact email and password equality.
#[derive(Debug, Clone)]
pub struct LoginDirectory {
    /// Known identities.
    entries: Vec<DemoCredential>,
}

impl LoginDirectory {
    /// Create a directory from explicit credentials.
    pub fn new(entries: Vec<DemoCredential>) -> Self {
        Self { entries }
    }

    /// Build the directory from auth configuration.
    ///
    /// Fails if an entry names an unknown role.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        let entries = config
            .demo_users
            .iter()
            .map(DemoCredential::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    /// The built-in admin, tenant-user and viewer identities.
    pub fn demo() -> Self {
        let entry = |email: &str, id: &str, role: Role| DemoCredential {
            email: email.to_string(),
            password: "password123".to_string(),
            id: id.to_string(),
            roles: BTreeSet::from([role]),
            tenant_id: "tenant-1".to_string(),
        };

        Self::new(vec![
            entry("admin@example.com", "admin-1", Role::Admin),
            entry("user@example.com", "user-1", Role::TenantUser),
            entry("viewer@example.com", "viewer-1", Role::Viewer),
        ])
    }

    /// Find the identity matching both `email` and `password`.
    pub fn find(&self, email: &str, password: &str) -> Option<&DemoCredential> {
        self.entries.iter().find(|c| c.matches(email, password))
    }

    /// All known identities.
    pub fn entries(&self) -> &[DemoCredential] {
        &self.entries
    }
}

impl Default for LoginDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let directory = LoginDirectory::demo();
        let admin = directory.find("admin@example.com", "password123").unwrap();
        assert_eq!(admin.id, "admin-1");

        assert!(directory.find("admin@example.com", "Password123").is_none());
        assert!(directory.find("ADMIN@example.com", "password123").is_none());
        assert!(directory.find("admin@example.com ", "password123").is_none());
    }

    #[test]
    fn test_config_directory_matches_builtin() {
        let from_config = LoginDirectory::from_config(&AuthConfig::default()).unwrap();
        assert_eq!(from_config.entries(), LoginDirectory::demo().entries());
    }

    #[test]
    fn test_config_rejects_unknown_roles() {
        let mut config = AuthConfig::default();
        config.demo_users[0].roles = vec!["superuser".to_string()];
        assert!(LoginDirectory::from_config(&config).is_err());
    }
}

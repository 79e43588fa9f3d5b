//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token issuance and login directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of an issued bearer token in seconds.
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_seconds: i64,
    /// Fixed directory of demo identities accepted by `login`.
    #[serde(default = "default_demo_users")]
    pub demo_users: Vec<DemoUserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_lifetime_seconds: default_token_lifetime(),
            demo_users: default_demo_users(),
        }
    }
}

/// One entry of the demo login directory.
///
/// Passwords are compared verbatim; this directory is demo-grade only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUserConfig {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// User identifier placed in the token subject.
    pub id: String,
    /// Role names (`admin`, `tenant-user`, `viewer`).
    pub roles: Vec<String>,
    /// Tenant the user belongs to.
    pub tenant_id: String,
}

impl DemoUserConfig {
    fn new(email: &str, id: &str, role: &str) -> Self {
        Self {
            email: email.to_string(),
            password: "password123".to_string(),
            id: id.to_string(),
            roles: vec![role.to_string()],
            tenant_id: "tenant-1".to_string(),
        }
    }
}

fn default_token_lifetime() -> i64 {
    86_400
}

fn default_demo_users() -> Vec<DemoUserConfig> {
    vec![
        DemoUserConfig::new("admin@example.com", "admin-1", "admin"),
        DemoUserConfig::new("user@example.com", "user-1", "tenant-user"),
        DemoUserConfig::new("viewer@example.com", "viewer-1", "viewer"),
    ]
}

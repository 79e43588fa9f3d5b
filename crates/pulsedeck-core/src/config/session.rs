//! Session persistence and routing configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key under which the session record is persisted.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// File backing the durable store used by the CLI.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Route of the login page.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Route shown when a user lacks the required role.
    #[serde(default = "default_unauthorized_route")]
    pub unauthorized_route: String,
    /// Landing route after login when no `returnUrl` was given.
    #[serde(default = "default_landing_route")]
    pub default_landing_route: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            storage_path: default_storage_path(),
            login_route: default_login_route(),
            unauthorized_route: default_unauthorized_route(),
            default_landing_route: default_landing_route(),
        }
    }
}

fn default_storage_key() -> String {
    "auth_user".to_string()
}

fn default_storage_path() -> String {
    "data/session.json".to_string()
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_unauthorized_route() -> String {
    "/unauthorized".to_string()
}

fn default_landing_route() -> String {
    "/dashboard/view".to_string()
}

//! Role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse permission tags attached to users and to route requirements.
///
/// Roles are flat: there is no hierarchy, a route is satisfied by any one
/// of its listed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Full administrator of a tenant's dashboards.
    Admin,
    /// Regular tenant member; may customize dashboards.
    TenantUser,
    /// Read-only access to dashboards.
    Viewer,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 3] = [Self::Admin, Self::TenantUser, Self::Viewer];

    /// Return the role as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::TenantUser => "tenant-user",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = pulsedeck_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "tenant-user" => Ok(Self::TenantUser),
            "viewer" => Ok(Self::Viewer),
            _ => Err(pulsedeck_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, tenant-user, viewer"
            ))),
        }
    }
}

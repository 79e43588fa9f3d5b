//! Route declarations.

use std::collections::BTreeMap;

use serde::Serialize;

use pulsedeck_entity::user::Role;

/// Access class of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum RouteAccess {
    /// Only for signed-out users; signed-in users are sent on.
    Public,
    /// Requires a session and, if non-empty, one of the listed roles.
    Protected {
        /// Roles any one of which grants access. Empty means any user.
        required_roles: Vec<Role>,
    },
    /// No guard.
    Open,
}

impl RouteAccess {
    /// Protected route open to every authenticated user.
    pub fn authenticated() -> Self {
        Self::Protected {
            required_roles: Vec::new(),
        }
    }

    /// Protected route restricted to `roles`.
    pub fn roles(roles: &[Role]) -> Self {
        Self::Protected {
            required_roles: roles.to_vec(),
        }
    }
}

/// Maps normalized paths to their [`RouteAccess`].
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, RouteAccess>,
}

impl RouteTable {
    /// Empty table; every path is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's route set.
    pub fn dashboard() -> Self {
        Self::new()
            .route("/login", RouteAccess::Public)
            .route("/dashboard/view", RouteAccess::authenticated())
            .route("/dashboard/alerts", RouteAccess::authenticated())
            .route(
                "/dashboard/customize",
                RouteAccess::roles(&[Role::Admin, Role::TenantUser]),
            )
            .route("/admin/metrics", RouteAccess::roles(&[Role::Admin]))
            .route("/unauthorized", RouteAccess::Open)
    }

    /// Adds or replaces a route.
    pub fn route(mut self, path: &str, access: RouteAccess) -> Self {
        self.routes.insert(normalize(path).to_string(), access);
        self
    }

    /// Access class of the path part of `url`. `None` for unknown paths.
    pub fn resolve(&self, url: &str) -> Option<&RouteAccess> {
        let (path, _) = split_url(url);
        self.routes.get(normalize(path))
    }

    /// All declared routes in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteAccess)> {
        self.routes.iter().map(|(path, access)| (path.as_str(), access))
    }

    /// Number of declared routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are declared.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Splits a URL into its path and optional query (fragment dropped).
pub(crate) fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split_once('#').map_or(url, |(head, _)| head);
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_routes() {
        let table = RouteTable::dashboard();
        assert_eq!(table.len(), 6);
        assert_eq!(table.resolve("/login"), Some(&RouteAccess::Public));
        assert_eq!(
            table.resolve("/admin/metrics"),
            Some(&RouteAccess::roles(&[Role::Admin]))
        );
        assert_eq!(table.resolve("/unauthorized"), Some(&RouteAccess::Open));
        assert_eq!(table.resolve("/"), None);
        assert_eq!(table.resolve("/nope"), None);
    }

    #[test]
    fn test_resolve_ignores_query_and_trailing_slash() {
        let table = RouteTable::dashboard();
        assert_eq!(
            table.resolve("/dashboard/view/?range=1h#top"),
            Some(&RouteAccess::authenticated())
        );
        assert_eq!(
            table.resolve("/login?returnUrl=%2Fadmin%2Fmetrics"),
            Some(&RouteAccess::Public)
        );
    }

    #[test]
    fn test_split_url() {
        assert_eq!(split_url("/a?b=c#d"), ("/a", Some("b=c")));
        assert_eq!(split_url("/a#d?x"), ("/a", None));
        assert_eq!(split_url("/a"), ("/a", None));
    }
}

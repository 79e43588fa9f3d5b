//! Guard decision values.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use pulsedeck_core::config::SessionConfig;

/// Characters escaped in a `returnUrl` query value (everything except
/// RFC 3986 unreserved characters).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Navigation proceeds.
    Allow,
    /// Navigate to the login route, optionally remembering where the user
    /// was going.
    RedirectLogin {
        /// The attempted URL.
        return_url: Option<String>,
    },
    /// Navigate to the unauthorized route.
    RedirectUnauthorized,
    /// Already signed in; navigate away from a public route.
    RedirectAuthenticated {
        /// Destination route.
        target: String,
    },
}

impl GuardDecision {
    /// Redirect to login carrying the attempted URL.
    pub fn login_with_return(url: &str) -> Self {
        Self::RedirectLogin {
            return_url: Some(url.to_string()),
        }
    }

    /// Whether navigation proceeds.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The URL to navigate to, or `None` for [`GuardDecision::Allow`].
    ///
    /// The return URL of a login redirect is encoded as a `returnUrl` query
    /// parameter on the configured login route.
    pub fn location(&self, routes: &SessionConfig) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::RedirectLogin { return_url: None } => Some(routes.login_route.clone()),
            Self::RedirectLogin {
                return_url: Some(url),
            } => Some(format!(
                "{}?returnUrl={}",
                routes.login_route,
                utf8_percent_encode(url, QUERY_VALUE)
            )),
            Self::RedirectUnauthorized => Some(routes.unauthorized_route.clone()),
            Self::RedirectAuthenticated { target } => Some(target.clone()),
        }
    }
}

impl std::fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::RedirectLogin { .. } => write!(f, "redirect-login"),
            Self::RedirectUnauthorized => write!(f, "redirect-unauthorized"),
            Self::RedirectAuthenticated { .. } => write!(f, "redirect-authenticated"),
        }
    }
}

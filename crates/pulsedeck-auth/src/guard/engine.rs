//! Guard evaluation against the session store.

use std::panic::{AssertUnwindSafe, catch_unwind};

use percent_encoding::percent_decode_str;
use tracing::{debug, error};

use pulsedeck_entity::user::Role;

use crate::session::SessionStore;

use super::decision::GuardDecision;
use super::route::{RouteAccess, RouteTable, split_url};

/// Decides whether a navigation attempt may proceed.
#[derive(Debug, Clone)]
pub struct GuardDecisionEngine {
    /// Session consulted for every decision.
    session: SessionStore,
    /// Declared routes for [`guard_url`](Self::guard_url).
    routes: RouteTable,
}

impl GuardDecisionEngine {
    /// Creates a new engine.
    pub fn new(session: SessionStore, routes: RouteTable) -> Self {
        Self { session, routes }
    }

    /// The session this engine evaluates against.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The declared routes.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Evaluates a protected route. Fails closed: any panic during
    /// evaluation yields a login redirect carrying `url`.
    pub fn check_protected(&self, url: &str, required_roles: &[Role]) -> GuardDecision {
        let decision = catch_unwind(AssertUnwindSafe(|| {
            self.evaluate_protected(url, required_roles)
        }))
        .unwrap_or_else(|_| {
            error!(url, "Guard evaluation failed, redirecting to login");
            GuardDecision::login_with_return(url)
        });

        debug!(url, decision = %decision, "Protected route checked");
        decision
    }

    /// Evaluates a public route such as the login page.
    pub fn check_public(&self, url: &str) -> GuardDecision {
        let decision = self.evaluate_public(url);
        debug!(url, decision = %decision, "Public route checked");
        decision
    }

    /// Resolves `url` against the route table and evaluates it. Unknown
    /// paths redirect to login without a return URL.
    pub fn guard_url(&self, url: &str) -> GuardDecision {
        match self.routes.resolve(url) {
            Some(RouteAccess::Public) => self.check_public(url),
            Some(RouteAccess::Protected { required_roles }) => {
                self.check_protected(url, required_roles)
            }
            Some(RouteAccess::Open) => GuardDecision::Allow,
            None => {
                debug!(url, "Unknown route, redirecting to login");
                GuardDecision::RedirectLogin { return_url: None }
            }
        }
    }

    /// Like [`guard_url`](Self::guard_url), but first waits until session
    /// hydration has settled so a slow durable store cannot cause a
    /// spurious login redirect.
    pub async fn decide_settled(&self, url: &str) -> GuardDecision {
        self.session.settled().await;
        self.guard_url(url)
    }

    fn evaluate_protected(&self, url: &str, required_roles: &[Role]) -> GuardDecision {
        if !self.session.store_available() {
            debug!(url, "Durable store unavailable");
            return GuardDecision::login_with_return(url);
        }
        if !self.session.has_stored_session() {
            debug!(url, "No stored session");
            return GuardDecision::login_with_return(url);
        }

        self.session.initialize();
        let snapshot = self.session.snapshot();

        if !snapshot.initialized {
            return GuardDecision::login_with_return(url);
        }
        if !snapshot.authenticated || snapshot.current_user.is_none() {
            debug!(url, "Not authenticated");
            return GuardDecision::login_with_return(url);
        }

        if !self.session.is_token_valid() {
            debug!(url, "Token invalid, refreshing");
            self.session.refresh_token();
        }

        if !required_roles.is_empty() && !self.session.has_access(required_roles) {
            debug!(url, ?required_roles, "Insufficient role");
            return GuardDecision::RedirectUnauthorized;
        }

        GuardDecision::Allow
    }

    fn evaluate_public(&self, url: &str) -> GuardDecision {
        if !self.session.store_available() || !self.session.has_stored_session() {
            return GuardDecision::Allow;
        }

        self.session.initialize();
        let snapshot = self.session.snapshot();

        if !snapshot.initialized {
            return GuardDecision::Allow;
        }
        if snapshot.authenticated && snapshot.current_user.is_some() {
            let target = return_url(url)
                .unwrap_or_else(|| self.session.config().default_landing_route.clone());
            return GuardDecision::RedirectAuthenticated { target };
        }

        GuardDecision::Allow
    }
}

/// Decoded `returnUrl` query parameter of `url`, kept only when it names
/// an in-app path. `+` decodes to a space as in form-encoded queries.
fn return_url(url: &str) -> Option<String> {
    let (_, query) = split_url(url);
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == "returnUrl")
        .map(|(_, value)| {
            percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned()
        })
        .filter(|value| is_in_app_path(value))
}

/// An absolute path on this origin: starts with one `/`, and carries no
/// scheme or backslash that a browser could read as another host.
fn is_in_app_path(target: &str) -> bool {
    let path = split_url(target).0;
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !path.contains(':')
        && !target.chars().any(char::is_control)
}

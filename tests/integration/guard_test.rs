//! Integration tests for route guard decisions.

mod helpers;

use std::sync::Arc;

use pulsedeck_auth::{GuardDecision, GuardDecisionEngine, RouteTable, SessionStore, TokenManager};
use pulsedeck_core::traits::PersistentStore;
use pulsedeck_entity::user::Role;

use helpers::{KEY, LaggingStore, TestApp};

const ATTEMPTS: &[&str] = &[
    "/dashboard/view",
    "/dashboard/customize",
    "/admin/metrics",
    "/dashboard/alerts?severity=critical",
    "/reports/2024/q1",
    "/",
    "",
    "/ünïcödé path",
];

#[test]
fn test_fail_closed_without_session() {
    let app = TestApp::new();
    let engine = app.engine();

    let role_sets: [&[Role]; 3] = [&[], &[Role::Admin], &[Role::Admin, Role::TenantUser]];
    for url in ATTEMPTS {
        for roles in role_sets {
            assert_eq!(
                engine.check_protected(url, roles),
                GuardDecision::RedirectLogin {
                    return_url: Some(url.to_string())
                },
                "url = {url:?}, roles = {roles:?}"
            );
        }
    }
}

#[test]
fn test_access_truth_table() {
    let cases = [
        ("admin@example.com", "/dashboard/view", GuardDecision::Allow),
        ("admin@example.com", "/dashboard/alerts", GuardDecision::Allow),
        ("admin@example.com", "/dashboard/customize", GuardDecision::Allow),
        ("admin@example.com", "/admin/metrics", GuardDecision::Allow),
        ("user@example.com", "/dashboard/view", GuardDecision::Allow),
        ("user@example.com", "/dashboard/customize", GuardDecision::Allow),
        ("user@example.com", "/admin/metrics", GuardDecision::RedirectUnauthorized),
        ("viewer@example.com", "/dashboard/view", GuardDecision::Allow),
        ("viewer@example.com", "/dashboard/alerts", GuardDecision::Allow),
        ("viewer@example.com", "/dashboard/customize", GuardDecision::RedirectUnauthorized),
        ("viewer@example.com", "/admin/metrics", GuardDecision::RedirectUnauthorized),
    ];

    for (email, url, expected) in cases {
        let app = TestApp::new();
        app.sign_in(email);
        assert_eq!(app.engine().guard_url(url), expected, "{email} -> {url}");
    }
}

#[test]
fn test_expired_token_refreshed_but_allowed() {
    let app = TestApp::new();
    let stale = helpers::stale_token("admin-1");
    app.store().set(KEY, &helpers::admin_record(&stale));

    let engine = app.engine();
    assert_eq!(engine.guard_url("/admin/metrics"), GuardDecision::Allow);
    assert!(engine.session().is_token_valid());
}

#[test]
fn test_login_page_redirects_signed_in_user() {
    let app = TestApp::new();
    app.sign_in("user@example.com");
    let engine = app.engine();

    assert_eq!(
        engine.guard_url("/login"),
        GuardDecision::RedirectAuthenticated {
            target: "/dashboard/view".into()
        }
    );
    assert_eq!(
        engine.guard_url("/login?returnUrl=%2Fdashboard%2Fcustomize%3Frange%3D1h"),
        GuardDecision::RedirectAuthenticated {
            target: "/dashboard/customize?range=1h".into()
        }
    );
}

#[test]
fn test_redirect_round_trips_through_login_page() {
    let app = TestApp::new();
    let decision = app.engine().guard_url("/dashboard/alerts?severity=critical");
    let location = decision.location(&app.config.session).unwrap();
    assert_eq!(
        location,
        "/login?returnUrl=%2Fdashboard%2Falerts%3Fseverity%3Dcritical"
    );

    app.sign_in("viewer@example.com");
    assert_eq!(
        app.engine().guard_url(&location),
        GuardDecision::RedirectAuthenticated {
            target: "/dashboard/alerts?severity=critical".into()
        }
    );
}

#[test]
fn test_login_page_never_redirects_off_site() {
    let app = TestApp::new();
    app.sign_in("admin@example.com");
    let engine = app.engine();

    for return_url in [
        "https%3A%2F%2Fevil.example",
        "https%3A%2F%2Fevil.example%2Fphish",
        "%2F%2Fevil.example%2Fdashboard",
    ] {
        let decision = engine.guard_url(&format!("/login?returnUrl={return_url}"));
        assert_eq!(
            decision.location(&app.config.session).as_deref(),
            Some("/dashboard/view"),
            "returnUrl = {return_url}"
        );
    }
}

#[test]
fn test_logout_then_guard_redirects() {
    let app = TestApp::new();
    app.sign_in("admin@example.com");
    let engine = app.engine();
    assert_eq!(engine.guard_url("/admin/metrics"), GuardDecision::Allow);

    engine.session().logout();

    assert_eq!(
        engine.guard_url("/admin/metrics"),
        GuardDecision::RedirectLogin {
            return_url: Some("/admin/metrics".into())
        }
    );
}

#[tokio::test]
async fn test_decide_settled_waits_for_hydration() {
    let store = Arc::new(LaggingStore::new(1));
    store.set(KEY, &helpers::admin_record(&TokenManager::default().issue("admin-1")));
    let engine = GuardDecisionEngine::new(SessionStore::with_store(store), RouteTable::dashboard());

    assert_eq!(engine.decide_settled("/admin/metrics").await, GuardDecision::Allow);
}

#[tokio::test]
async fn test_decide_settled_without_session() {
    let app = TestApp::new();
    assert_eq!(
        app.engine().decide_settled("/dashboard/view").await,
        GuardDecision::RedirectLogin {
            return_url: Some("/dashboard/view".into())
        }
    );
}

//! Integration tests for the session lifecycle.

mod helpers;

use std::collections::BTreeSet;
use std::sync::Arc;

use pulsedeck_auth::{AuthError, HydrationPhase, SessionStore, TokenManager};
use pulsedeck_core::error::ErrorKind;
use pulsedeck_core::events::SessionEvent;
use pulsedeck_core::traits::PersistentStore;
use pulsedeck_entity::session::SessionRecord;
use pulsedeck_entity::user::Role;

use helpers::{KEY, LaggingStore, TestApp};

#[test]
fn test_session_survives_restart() {
    let app = TestApp::new();
    let first = app.open();
    first.login("admin@example.com", "password123").unwrap();
    let expected = first.current_user().unwrap();

    let second = app.open();
    second.initialize();

    let restored = second.current_user().unwrap();
    assert_eq!(restored.roles, BTreeSet::from([Role::Admin]));
    assert_eq!(restored.tenant_id, "tenant-1");
    assert_eq!(restored, expected);
    assert!(second.is_authenticated());
    assert!(second.is_token_valid());
}

#[test]
fn test_unusable_token_lifetime_rejected_at_startup() {
    for seconds in [0, -86_400, i64::MAX] {
        let mut app = TestApp::new();
        app.config.auth.token_lifetime_seconds = seconds;

        let err = SessionStore::from_config(&app.config, Arc::new(app.store())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration, "lifetime = {seconds}");
    }
}

#[test]
fn test_initialize_idempotent_for_any_n() {
    let app = TestApp::new();
    app.sign_in("user@example.com");

    let once = app.open();
    once.initialize();
    let expected = once.snapshot();

    for n in 1..=8 {
        let session = app.open();
        for _ in 0..n {
            session.initialize();
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.authenticated, expected.authenticated, "n = {n}");
        assert_eq!(snapshot.current_user, expected.current_user, "n = {n}");
        assert!(snapshot.initialized);
    }
}

#[test]
fn test_failed_login_keeps_signed_out() {
    let app = TestApp::new();
    let session = app.open();

    let err = session.login("admin@example.com", "nope").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!session.is_authenticated());
    assert!(!session.has_stored_session());
}

#[test]
fn test_expired_stored_token_is_refreshed() {
    let app = TestApp::new();
    let stale = helpers::stale_token("admin-1");
    app.store().set(KEY, &helpers::admin_record(&stale));

    let session = app.open();
    session.initialize();

    assert!(session.is_authenticated());
    assert!(session.is_token_valid());

    let raw = app.store().get(KEY).unwrap();
    let persisted = SessionRecord::decode(&raw).unwrap();
    assert_ne!(persisted.token, stale);
    assert!(TokenManager::default().is_valid(&persisted.token));
}

#[test]
fn test_invalid_record_is_deleted() {
    let app = TestApp::new();
    app.store()
        .set(KEY, r#"{"id":"admin-1","email":"","roles":["admin"]}"#);

    let session = app.open();
    session.initialize();

    assert!(!session.is_authenticated());
    assert_eq!(app.store().get(KEY), None);
}

#[test]
fn test_unknown_role_is_rejected() {
    let app = TestApp::new();
    app.store().set(
        KEY,
        r#"{"id":"x","email":"x@example.com","roles":["root"],"tenantId":"t","token":"a.b.c"}"#,
    );

    let session = app.open();
    session.initialize();

    assert!(!session.is_authenticated());
    assert!(!session.has_stored_session());
}

#[test]
fn test_logout_deletes_record() {
    let app = TestApp::new();
    app.sign_in("viewer@example.com");

    let session = app.open();
    session.initialize();
    assert!(session.is_authenticated());

    assert_eq!(session.logout(), "/login");

    let next = app.open();
    next.initialize();
    assert!(!next.is_authenticated());
}

#[test]
fn test_refresh_token_repersists() {
    let (store, session) = helpers::memory_session();
    session.login("admin@example.com", "password123").unwrap();
    store.set(KEY, "tampered");

    session.refresh_token();

    let persisted = SessionRecord::decode(&store.get(KEY).unwrap()).unwrap();
    assert_eq!(persisted, session.current_user().unwrap());
}

#[test]
fn test_derived_queries() {
    let (_, session) = helpers::memory_session();
    assert!(!session.is_admin());
    assert_eq!(session.tenant_id(), None);

    session.login("user@example.com", "password123").unwrap();
    assert!(session.has_role(Role::TenantUser));
    assert!(session.has_any_role(&[Role::Viewer, Role::TenantUser]));
    assert!(!session.is_admin());
    assert!(session.can_edit_dashboard());
    assert_eq!(session.tenant_id().as_deref(), Some("tenant-1"));
}

#[tokio::test]
async fn test_events_follow_lifecycle() {
    let (_, session) = helpers::memory_session();
    let mut events = session.subscribe();

    session.login("admin@example.com", "password123").unwrap();
    session.refresh_token();
    session.logout();

    let payloads: Vec<SessionEvent> = (0..3)
        .map(|_| events.try_recv().unwrap().payload)
        .collect();
    assert_eq!(
        payloads,
        vec![
            SessionEvent::LoggedIn {
                user_id: "admin-1".into()
            },
            SessionEvent::TokenRefreshed {
                user_id: "admin-1".into()
            },
            SessionEvent::LoggedOut {
                user_id: "admin-1".into()
            },
        ]
    );
}

#[tokio::test]
async fn test_lagging_store_settles_authenticated() {
    let store = Arc::new(LaggingStore::new(1));
    store.set(KEY, &helpers::admin_record(&TokenManager::default().issue("admin-1")));
    let session = SessionStore::with_store(store);
    let mut phase = session.watch_phase();

    session.initialize();
    assert!(session.is_initialized());
    assert!(!session.is_authenticated());

    phase.wait_for(|p| p.is_settled()).await.unwrap();

    assert_eq!(session.phase(), HydrationPhase::Settled);
    assert!(session.is_authenticated());
    assert!(session.is_admin());
}

#[tokio::test]
async fn test_settled_initializes_lazily() {
    let app = TestApp::new();
    app.sign_in("admin@example.com");

    let session = app.open();
    assert_eq!(session.phase(), HydrationPhase::Uninitialized);

    session.settled().await;

    assert!(session.is_initialized());
    assert!(session.is_authenticated());
}

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::DateTime;
use tempfile::TempDir;

use pulsedeck_auth::{
    FileStore, GuardDecisionEngine, MemoryStore, RouteTable, SessionStore, TokenManager,
};
use pulsedeck_core::config::AppConfig;
use pulsedeck_core::traits::PersistentStore;

/// Default storage key for the session record
pub const KEY: &str = "auth_user";

/// Test context with a file-backed session in a temp directory
pub struct TestApp {
    /// Keeps the temp directory alive
    pub dir: TempDir,
    /// Application config pointing at the temp directory
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test context
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = AppConfig::default();
        config.session.storage_path = dir
            .path()
            .join("session.json")
            .to_string_lossy()
            .into_owned();
        Self { dir, config }
    }

    /// The durable store shared by every session opened from this context
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.config.session.storage_path)
    }

    /// Open a fresh session instance, as a new process would
    pub fn open(&self) -> SessionStore {
        SessionStore::from_config(&self.config, Arc::new(self.store()))
            .expect("Failed to build session store")
    }

    /// Open a guard engine over a fresh session instance
    pub fn engine(&self) -> GuardDecisionEngine {
        GuardDecisionEngine::new(self.open(), RouteTable::dashboard())
    }

    /// Sign in with a demo identity and drop the session
    pub fn sign_in(&self, email: &str) {
        self.open()
            .login(email, "password123")
            .expect("Demo login failed");
    }
}

/// In-memory session for tests that do not need a file
pub fn memory_session() -> (Arc<MemoryStore>, SessionStore) {
    let store = Arc::new(MemoryStore::new());
    let session = SessionStore::with_store(store.clone());
    (store, session)
}

/// A token that expired long ago
pub fn stale_token(user_id: &str) -> String {
    TokenManager::default().issue_at(user_id, DateTime::from_timestamp(1_000_000, 0).unwrap())
}

/// A persisted admin record carrying `token`
pub fn admin_record(token: &str) -> String {
    format!(
        r#"{{"id":"admin-1","email":"admin@example.com","roles":["admin"],"tenantId":"tenant-1","token":"{token}"}}"#
    )
}

/// Durable store whose contents stay hidden for the first `lag` reads,
/// like storage that becomes reachable shortly after start-up
#[derive(Debug)]
pub struct LaggingStore {
    inner: MemoryStore,
    lag: AtomicUsize,
}

impl LaggingStore {
    /// Create an empty lagging store
    pub fn new(lag: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            lag: AtomicUsize::new(lag),
        }
    }
}

impl PersistentStore for LaggingStore {
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<String> {
        let hidden = self
            .lag
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if hidden { None } else { self.inner.get(key) }
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key)
    }
}

//! Durable key/value store contract used for session persistence.

use std::sync::Arc;

/// A string-keyed durable surface (browser-storage equivalent).
///
/// Implementations never surface errors: an unreadable or unavailable
/// medium behaves as if the key were absent, and failed writes are logged
/// by the implementation. Callers treat "no storage" exactly like
/// "no session found".
pub trait PersistentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the medium is reachable from the current host.
    fn is_available(&self) -> bool;

    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove `key` if present.
    fn remove(&self, key: &str);
}

impl<S: PersistentStore + ?Sized> PersistentStore for Arc<S> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

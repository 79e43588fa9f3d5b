//! Store for hosts with no durable storage access.

use pulsedeck_core::traits::PersistentStore;

/// A store that is never available, e.g. a server-side render context.
///
/// Reads find nothing and writes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedStore;

impl PersistentStore for DetachedStore {
    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

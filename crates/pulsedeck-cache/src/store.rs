//! TTL + LRU cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use pulsedeck_core::config::CacheConfig;

use crate::entry::CacheEntry;
use crate::maintenance::CacheMaintenance;
use crate::stats::{CacheCounters, CacheStats, SweepReport};

/// Capacity used by [`ExpiringCache::default`].
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// TTL used by [`ExpiringCache::set_default`] unless configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Everything guarded by the cache mutex.
struct CacheState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    counters: CacheCounters,
    /// Logical clock bumped on every insert and hit.
    clock: u64,
}

impl<T> CacheState<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::default(),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Removes the least recently accessed entry.
    fn evict_lru(&mut self) -> Option<String> {
        let key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.lru_key())
            .map(|(key, _)| key.clone())?;
        self.entries.remove(&key);
        self.counters.evictions += 1;
        Some(key)
    }

    fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }
}

/// Generic in-memory cache with per-entry TTL, LRU eviction at a fixed
/// capacity, tag invalidation, and hit/miss statistics.
///
/// Cloning yields another handle to the same cache.
pub struct ExpiringCache<T> {
    state: Arc<Mutex<CacheState<T>>>,
    max_entries: usize,
    default_ttl: Duration,
}

impl<T> Clone for ExpiringCache<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            max_entries: self.max_entries,
            default_ttl: self.default_ttl,
        }
    }
}

impl<T: Clone> std::fmt::Debug for ExpiringCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("len", &self.len())
            .field("max_entries", &self.max_entries)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl<T: Clone> Default for ExpiringCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

impl<T: Clone> ExpiringCache<T> {
    /// Create a cache holding at most `max_entries` (at least one).
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState::new())),
            max_entries: max_entries.max(1),
            default_ttl,
        }
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            config.max_entries,
            Duration::from_millis(config.default_ttl_ms),
        )
    }

    /// Maximum number of entries.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// TTL applied by [`set_default`](Self::set_default).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Insert or overwrite `key`.
    ///
    /// Inserting a new key into a full cache first evicts the least
    /// recently accessed entry. Overwriting an existing key never evicts.
    pub fn set(&self, key: impl Into<String>, value: T, ttl: Duration, tags: &[&str]) {
        let key = key.into();
        let now = Instant::now();
        let mut state = self.lock();

        if !state.entries.contains_key(&key) && state.entries.len() >= self.max_entries {
            if let Some(evicted) = state.evict_lru() {
                debug!(key = %evicted, "Evicted least recently used cache entry");
            }
        }

        let seq = state.tick();
        state
            .entries
            .insert(key, CacheEntry::new(value, ttl, tags, now, seq));
    }

    /// Insert with the default TTL and no tags.
    pub fn set_default(&self, key: impl Into<String>, value: T) {
        self.set(key, value, self.default_ttl, &[]);
    }

    /// Read `key`. Absent and expired keys count as misses; expired entries
    /// are removed. A hit refreshes the entry's LRU position.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        let mut state = self.lock();

        let expired = match state.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                state.counters.misses += 1;
                return None;
            }
        };

        if expired {
            state.entries.remove(key);
            state.counters.misses += 1;
            trace!(key, "Cache entry expired");
            return None;
        }

        let seq = state.tick();
        let entry = state.entries.get_mut(key)?;
        entry.touch(now, seq);
        let value = entry.value.clone();
        state.counters.hits += 1;
        Some(value)
    }

    /// Whether `key` holds a live entry. Expired entries are removed, but
    /// neither statistics nor LRU order change.
    pub fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut state = self.lock();

        match state.entries.get(key).map(|entry| entry.is_expired_at(now)) {
            Some(false) => true,
            Some(true) => {
                state.entries.remove(key);
                false
            }
            None => false,
        }
    }

    /// Return the cached value for `key` or compute, store and return it.
    ///
    /// `f` runs without the cache lock held.
    pub fn get_or_insert_with<F>(&self, key: &str, ttl: Duration, tags: &[&str], f: F) -> T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = f();
        self.set(key, value.clone(), ttl, tags);
        value
    }

    /// Async, fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    /// Errors are returned and nothing is cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        tags: &[&str],
        fetch: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = fetch().await?;
        self.set(key, value.clone(), ttl, tags);
        Ok(value)
    }

    /// Remove `key`. Returns whether it was present.
    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    /// Remove every entry tagged `tag`. Returns the number removed.
    pub fn invalidate_by_tag(&self, tag: &str) -> usize {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.has_tag(tag));
        let removed = before - state.entries.len();
        debug!(tag, removed, "Invalidated cache entries by tag");
        removed
    }

    /// Remove all entries and reset statistics.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.counters = CacheCounters::default();
    }

    /// Keys whose entries have expired but not yet been removed.
    pub fn expired_keys(&self) -> Vec<String> {
        let now = Instant::now();
        let state = self.lock();
        let mut keys: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Remove expired entries, then evict while over capacity.
    pub fn sweep(&self) -> SweepReport {
        let now = Instant::now();
        let mut state = self.lock();

        let expired = state.purge_expired(now);
        let mut evicted = 0;
        while state.entries.len() > self.max_entries && state.evict_lru().is_some() {
            evicted += 1;
        }

        debug!(expired, evicted, remaining = state.entries.len(), "Cache sweep complete");
        SweepReport { expired, evicted }
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        state.counters.report(state.entries.len())
    }

    /// Number of entries held, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successful reads of `key` since it was inserted.
    pub fn access_count(&self, key: &str) -> Option<u64> {
        self.lock().entries.get(key).map(|entry| entry.access_count)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Clone + Send + 'static> ExpiringCache<T> {
    /// Run [`sweep`](Self::sweep) every `interval` on the current tokio
    /// runtime until `shutdown` turns true or its sender is dropped.
    pub fn spawn_maintenance(
        &self,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let maintenance = CacheMaintenance::new(self.clone(), interval);
        tokio::spawn(async move { maintenance.run(shutdown).await })
    }
}

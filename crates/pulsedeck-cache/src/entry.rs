//! Cache entries.

use std::collections::BTreeSet;
use std::time::Duration;

use tokio::time::Instant;

/// A cached value with its expiry and access metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value.
    pub value: T,
    /// When the entry was inserted.
    pub created_at: Instant,
    /// Lifetime measured from `created_at`.
    pub ttl: Duration,
    /// Successful reads since insertion.
    pub access_count: u64,
    /// Insertion time or time of the last successful read.
    pub last_access: Instant,
    /// Logical access order; breaks ties between equal `last_access`.
    pub access_seq: u64,
    /// Labels for bulk invalidation.
    pub tags: BTreeSet<String>,
}

impl<T> CacheEntry<T> {
    /// Create a fresh entry.
    pub fn new(value: T, ttl: Duration, tags: &[&str], now: Instant, access_seq: u64) -> Self {
        Self {
            value,
            created_at: now,
            ttl,
            access_count: 0,
            last_access: now,
            access_seq,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    /// An entry is expired once strictly more than `ttl` has elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.ttl
    }

    /// Record a successful read.
    pub fn touch(&mut self, now: Instant, access_seq: u64) {
        self.access_count += 1;
        self.last_access = now;
        self.access_seq = access_seq;
    }

    /// Whether the entry carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// LRU ordering key; the smallest is evicted first.
    pub(crate) fn lru_key(&self) -> (Instant, u64) {
        (self.last_access, self.access_seq)
    }
}

//! # pulsedeck-cache
//!
//! In-process cache used by data-fetching collaborators to memoize metric
//! payloads:
//!
//! - per-entry TTL, checked lazily on read and eagerly by a periodic sweep
//! - least-recently-used eviction at a fixed capacity
//! - tag-based bulk invalidation
//! - hit/miss/eviction statistics
//!
//! Each [`ExpiringCache`] serializes every mutation behind its own mutex and
//! is independent of the session components.

pub mod entry;
pub mod keys;
pub mod maintenance;
pub mod stats;
pub mod store;

pub use maintenance::CacheMaintenance;
pub use stats::{CacheStats, SweepReport};
pub use store::ExpiringCache;

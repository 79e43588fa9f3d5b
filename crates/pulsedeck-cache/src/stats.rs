//! Cache statistics.

use serde::Serialize;

/// Raw counters. Reset only by `clear()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Successful reads.
    pub hits: u64,
    /// Reads of absent or expired keys.
    pub misses: u64,
    /// Entries removed by LRU eviction.
    pub evictions: u64,
}

impl CacheCounters {
    /// Derive the reported statistics for a cache of `total_size` entries.
    pub fn report(&self, total_size: usize) -> CacheStats {
        let total = self.hits + self.misses;
        let (hit_rate, miss_rate) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                self.hits as f64 / total as f64 * 100.0,
                self.misses as f64 / total as f64 * 100.0,
            )
        };

        CacheStats {
            total_size,
            hit_rate,
            miss_rate,
            eviction_count: self.evictions,
        }
    }
}

/// Point-in-time cache statistics. Rates are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, expired or not.
    pub total_size: usize,
    /// `hits / (hits + misses) * 100`, or `0.0` before any read.
    pub hit_rate: f64,
    /// `misses / (hits + misses) * 100`, or `0.0` before any read.
    pub miss_rate: f64,
    /// Entries evicted to respect capacity.
    pub eviction_count: u64,
}

/// Result of one maintenance sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Expired entries removed.
    pub expired: usize,
    /// Entries evicted to get back under capacity.
    pub evicted: usize,
}

//! Expiring cache configuration.

use serde::{Deserialize, Serialize};

/// Configuration for expiring cache instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries before LRU eviction kicks in.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// TTL applied by `set_default`, in milliseconds.
    #[serde(default = "default_ttl_ms")]
    pub default_ttl_ms: u64,
    /// Interval between background maintenance sweeps, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            default_ttl_ms: default_ttl_ms(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_max_entries() -> usize {
    100
}

fn default_ttl_ms() -> u64 {
    60_000
}

fn default_sweep_interval() -> u64 {
    60
}

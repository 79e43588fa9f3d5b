//! Periodic cache maintenance.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::store::ExpiringCache;

/// Service that periodically sweeps a cache.
pub struct CacheMaintenance<T> {
    /// Cache handle
    cache: ExpiringCache<T>,
    /// Sweep interval
    interval: Duration,
}

impl<T: Clone> CacheMaintenance<T> {
    /// Create a new maintenance service
    pub fn new(cache: ExpiringCache<T>, interval: Duration) -> Self {
        Self { cache, interval }
    }

    /// Run the sweep loop until `cancel` turns true or its sender is dropped
    pub async fn run(&self, cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Cache maintenance started, interval={}s",
            self.interval.as_secs()
        );

        let mut interval = time::interval(self.interval);
        let mut cancel = cancel;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let report = self.cache.sweep();
                    tracing::trace!(
                        expired = report.expired,
                        evicted = report.evicted,
                        "Cache maintenance tick"
                    );
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Cache maintenance shutting down");
                        break;
                    }
                }
            }
        }
    }
}

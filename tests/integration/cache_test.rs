//! Integration tests for the expiring cache.

use std::time::Duration;

use tokio::sync::watch;

use pulsedeck_cache::{ExpiringCache, SweepReport, keys};
use pulsedeck_core::config::CacheConfig;

#[derive(Debug, Clone, PartialEq)]
struct MetricPayload {
    id: String,
    value: f64,
}

fn payload(id: &str, value: f64) -> MetricPayload {
    MetricPayload {
        id: id.to_string(),
        value,
    }
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let cache = ExpiringCache::from_config(&CacheConfig::default());
    cache.set("k", "v", Duration::from_millis(100), &[]);

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.get("k"), None);
    assert_eq!(cache.stats().miss_rate, 100.0);
}

#[tokio::test(start_paused = true)]
async fn test_default_ttl_from_config() {
    let config = CacheConfig {
        default_ttl_ms: 500,
        ..CacheConfig::default()
    };
    let cache = ExpiringCache::from_config(&config);
    cache.set_default("k", 1);

    tokio::time::advance(Duration::from_millis(400)).await;
    assert!(cache.has("k"));
    tokio::time::advance(Duration::from_millis(200)).await;
    assert!(!cache.has("k"));
}

#[test]
fn test_lru_capacity_two() {
    let cache = ExpiringCache::new(2, Duration::from_secs(60));
    cache.set("a", 1, Duration::from_secs(60), &[]);
    cache.set("b", 2, Duration::from_secs(60), &[]);
    assert_eq!(cache.get("a"), Some(1));
    cache.set("c", 3, Duration::from_secs(60), &[]);

    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.get("c"), Some(3));

    let stats = cache.stats();
    assert_eq!(stats.total_size, 2);
    assert_eq!(stats.eviction_count, 1);
}

#[test]
fn test_tag_invalidation_with_key_builders() {
    let cache = ExpiringCache::new(10, Duration::from_secs(60));
    let cpu = keys::metric_family_tag("cpu");
    let mem = keys::metric_family_tag("memory");
    let tenant = keys::tenant_tag("tenant-1");

    cache.set(
        keys::metric("cpu-usage"),
        payload("cpu-usage", 42.0),
        Duration::from_secs(60),
        &[cpu.as_str(), tenant.as_str()],
    );
    cache.set(
        keys::metric("mem-usage"),
        payload("mem-usage", 61.5),
        Duration::from_secs(60),
        &[mem.as_str(), tenant.as_str()],
    );

    assert_eq!(cache.invalidate_by_tag(&cpu), 1);
    assert!(!cache.has(&keys::metric("cpu-usage")));
    assert!(cache.has(&keys::metric("mem-usage")));

    assert_eq!(cache.invalidate_by_tag(&tenant), 1);
    assert!(cache.is_empty());
}

#[test]
fn test_stats_reset_by_clear() {
    let cache = ExpiringCache::new(10, Duration::from_secs(60));
    cache.set_default("a", 1);
    cache.get("a");
    cache.get("b");

    let stats = cache.stats();
    assert_eq!(stats.hit_rate, 50.0);
    assert_eq!(stats.miss_rate, 50.0);

    assert!(cache.invalidate("a"));
    assert!(!cache.invalidate("a"));

    cache.clear();
    let stats = cache.stats();
    assert_eq!((stats.hit_rate, stats.miss_rate, stats.eviction_count), (0.0, 0.0, 0));
}

#[tokio::test(start_paused = true)]
async fn test_memoized_fetch() {
    let cache = ExpiringCache::new(10, Duration::from_secs(60));
    let key = keys::metric_history("cpu-usage", "1h");
    let mut fetches = 0;

    for _ in 0..3 {
        let value: Result<MetricPayload, String> = cache
            .get_or_fetch(&key, Duration::from_secs(30), &[], || {
                fetches += 1;
                async { Ok(payload("cpu-usage", 12.5)) }
            })
            .await;
        assert_eq!(value.unwrap().value, 12.5);
    }
    assert_eq!(fetches, 1);

    tokio::time::advance(Duration::from_secs(31)).await;
    let _: Result<MetricPayload, String> = cache
        .get_or_fetch(&key, Duration::from_secs(30), &[], || {
            fetches += 1;
            async { Ok(payload("cpu-usage", 13.0)) }
        })
        .await;
    assert_eq!(fetches, 2);
}

#[tokio::test(start_paused = true)]
async fn test_background_sweep() {
    let config = CacheConfig::default();
    let cache = ExpiringCache::from_config(&config);
    for i in 0..5 {
        cache.set(format!("short-{i}"), i, Duration::from_secs(1), &[]);
    }
    cache.set("long", 99, Duration::from_secs(3600), &[]);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = cache.spawn_maintenance(
        Duration::from_secs(config.sweep_interval_seconds),
        shutdown_rx,
    );

    tokio::time::sleep(Duration::from_secs(config.sweep_interval_seconds + 1)).await;
    tokio::task::yield_now().await;

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.sweep(), SweepReport::default());

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

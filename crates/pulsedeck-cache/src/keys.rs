//! Cache key and tag builders for metric payloads.
//!
//! Centralising key construction keeps every collaborator memoizing
//! the same payload under the same key.

/// Prefix for metric payload keys.
const METRIC: &str = "metric";

/// Prefix for metric family tags.
const METRIC_FAMILY: &str = "metric-family";

/// Prefix for tenant tags.
const TENANT: &str = "tenant";

// ── Keys ───────────────────────────────────────────────────

/// Cache key for a metric payload by ID.
pub fn metric(metric_id: &str) -> String {
    format!("{METRIC}:{metric_id}")
}

/// Cache key for a metric's history over a time range label (e.g. `1h`).
pub fn metric_history(metric_id: &str, range: &str) -> String {
    format!("{METRIC}:{metric_id}:history:{range}")
}

// ── Tags ───────────────────────────────────────────────────

/// Tag shared by all metrics of one family (`cpu`, `memory`, ...).
pub fn metric_family_tag(family: &str) -> String {
    format!("{METRIC_FAMILY}:{}", family.to_lowercase())
}

/// Tag shared by all payloads of one tenant.
pub fn tenant_tag(tenant_id: &str) -> String {
    format!("{TENANT}:{tenant_id}")
}

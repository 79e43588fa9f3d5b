//! Hydration phase of a session store.

use serde::{Deserialize, Serialize};

/// Progress of restoring a persisted session.
///
/// ```text
/// Uninitialized ──initialize()──→ SyncChecked ──deferred retry──→ Settled
///                       │                                           ▲
///                       └───────── authenticated or no retry ───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationPhase {
    /// `initialize()` has not run yet.
    #[default]
    Uninitialized,
    /// The synchronous restore ran; a deferred retry is still pending.
    SyncChecked,
    /// No restore attempt is outstanding.
    Settled,
}

impl HydrationPhase {
    /// Whether session state can no longer change through hydration.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

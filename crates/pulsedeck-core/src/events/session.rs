//! Session-related domain events.

use serde::{Deserialize, Serialize};

/// Events related to the client-held session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A user logged in with credentials from the login directory.
    LoggedIn {
        /// The user ID.
        user_id: String,
    },
    /// The user logged out and the persisted record was removed.
    LoggedOut {
        /// The user ID.
        user_id: String,
    },
    /// A session was restored from the durable store.
    Restored {
        /// The user ID.
        user_id: String,
        /// Whether the restore happened in the deferred retry.
        deferred: bool,
    },
    /// A bearer token was reissued for the current user.
    TokenRefreshed {
        /// The user ID.
        user_id: String,
    },
    /// A persisted record failed validation and was deleted.
    RecordDiscarded {
        /// Why the record was rejected.
        reason: String,
    },
}

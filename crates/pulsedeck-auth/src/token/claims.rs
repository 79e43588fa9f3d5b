//! Token header and claims structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header segment of an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Nominal algorithm name. Not verified.
    pub alg: String,
    /// Token type.
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Claims payload embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user ID.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl TokenClaims {
    /// Returns the expiration as a `DateTime<Utc>`, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is valid while `exp` lies strictly in the future.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.exp > now.timestamp()
    }

    /// Returns the remaining lifetime in seconds (0 if expired).
    pub fn remaining_seconds_at(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.exp.saturating_sub(now.timestamp());
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}

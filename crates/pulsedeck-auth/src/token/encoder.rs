//! Token creation with a fixed lifetime.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};

use super::claims::{TokenClaims, TokenHeader};

/// Placeholder signature segment. Tokens are unsigned.
const PLACEHOLDER_SIGNATURE: &str = "mock-signature";

/// Creates tokens whose `exp` is always `iat + lifetime`.
#[derive(Debug, Clone)]
pub struct TokenEncoder {
    /// Token lifetime.
    lifetime: Duration,
}

impl TokenEncoder {
    /// Creates a new encoder issuing tokens valid for `lifetime`.
    pub fn new(lifetime: Duration) -> Self {
        Self { lifetime }
    }

    /// The fixed lifetime applied at issuance.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Builds the claims for `subject` issued at `now`.
    pub fn claims_at(&self, subject: &str, now: DateTime<Utc>) -> TokenClaims {
        let iat = now.timestamp();
        TokenClaims {
            sub: subject.to_string(),
            iat,
            exp: iat.saturating_add(self.lifetime.num_seconds()),
        }
    }

    /// Encodes claims into the three-segment wire form.
    pub fn encode(&self, claims: &TokenClaims) -> String {
        let header = encode_segment(&TokenHeader::default());
        let payload = encode_segment(claims);
        let signature = STANDARD.encode(PLACEHOLDER_SIGNATURE);
        format!("{header}.{payload}.{signature}")
    }
}

fn encode_segment<T: serde::Serialize>(value: &T) -> String {
    // Plain structs of strings and integers always serialize.
    let json = serde_json::to_vec(value).unwrap_or_default();
    STANDARD.encode(json)
}

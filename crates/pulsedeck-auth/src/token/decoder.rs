//! Token decoding. Validation callers collapse every failure to "invalid".

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::claims::TokenClaims;

/// Why a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token does not have exactly three dot-separated segments.
    #[error("expected 3 token segments, found {0}")]
    Malformed(usize),
    /// The payload segment is not valid base64.
    #[error("invalid token encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// The payload is not JSON or lacks required claims.
    #[error("invalid token payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Decodes the claims segment of a token without verifying the signature.
#[derive(Debug, Clone, Default)]
pub struct TokenDecoder;

impl TokenDecoder {
    /// Creates a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decodes a token string into its claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::Malformed(segments.len()));
        }

        let payload = STANDARD.decode(segments[1])?;
        let claims = serde_json::from_slice(&payload)?;
        Ok(claims)
    }
}

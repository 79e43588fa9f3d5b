//! Token lifecycle: issue, validate, refresh.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use pulsedeck_core::config::AuthConfig;
use pulsedeck_core::error::AppError;
use pulsedeck_core::result::AppResult;
use pulsedeck_entity::user::AuthUser;

use super::claims::TokenClaims;
use super::decoder::{TokenDecoder, TokenError};
use super::encoder::TokenEncoder;

/// Issues and validates the bearer tokens carried by [`AuthUser`].
#[derive(Debug, Clone)]
pub struct TokenManager {
    /// Token creation.
    encoder: TokenEncoder,
    /// Token parsing.
    decoder: TokenDecoder,
}

impl TokenManager {
    /// Creates a manager issuing tokens valid for `lifetime_seconds`.
    ///
    /// # Errors
    /// Returns a configuration error unless the lifetime is positive and
    /// representable as a [`Duration`].
    pub fn new(lifetime_seconds: i64) -> AppResult<Self> {
        if lifetime_seconds <= 0 {
            return Err(AppError::configuration(format!(
                "Token lifetime must be positive, got {lifetime_seconds}s"
            )));
        }
        let lifetime = Duration::try_seconds(lifetime_seconds).ok_or_else(|| {
            AppError::configuration(format!("Token lifetime {lifetime_seconds}s is out of range"))
        })?;
        Ok(Self::with_lifetime(lifetime))
    }

    /// Creates a manager from auth configuration.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        Self::new(config.token_lifetime_seconds)
    }

    fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            encoder: TokenEncoder::new(lifetime),
            decoder: TokenDecoder::new(),
        }
    }

    /// Issues a token for `user_id` valid from now.
    pub fn issue(&self, user_id: &str) -> String {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token for `user_id` with `iat = now`.
    pub fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> String {
        let claims = self.encoder.claims_at(user_id, now);
        self.encoder.encode(&claims)
    }

    /// Decodes a token into its claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.decoder.decode(token)
    }

    /// Whether `token` is well-formed and unexpired right now.
    pub fn is_valid(&self, token: &str) -> bool {
        self.is_valid_at(token, Utc::now())
    }

    /// Whether `token` is well-formed and unexpired at `now`.
    ///
    /// Fails closed: any decode error yields `false`.
    pub fn is_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.decoder.decode(token) {
            Ok(claims) => claims.is_valid_at(now),
            Err(e) => {
                debug!(error = %e, "Token rejected");
                false
            }
        }
    }

    /// Returns `user` with a freshly issued token for the same subject.
    pub fn refresh(&self, user: &AuthUser) -> AuthUser {
        user.with_token(self.issue(&user.id))
    }
}

impl Default for TokenManager {
    /// Tokens valid for 24 hours, the `auth.token_lifetime_seconds` default.
    fn default() -> Self {
        Self::with_lifetime(Duration::hours(24))
    }
}

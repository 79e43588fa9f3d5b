//! Error types for the session layer.

use pulsedeck_core::error::{AppError, ErrorKind};
use pulsedeck_entity::session::RecordError;

/// Errors produced while authenticating or restoring a session.
///
/// Only [`AuthError::InvalidCredentials`] crosses the session store
/// boundary; the other variants are recovered from locally and logged.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No demo identity matches the supplied email and password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The persisted session record failed validation.
    #[error("corrupt persisted session: {0}")]
    CorruptSession(#[from] RecordError),

    /// The durable store cannot be reached from this host.
    #[error("durable storage is unavailable")]
    StorageUnavailable,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = match &err {
            AuthError::InvalidCredentials => ErrorKind::Authentication,
            AuthError::CorruptSession(_) => ErrorKind::Session,
            AuthError::StorageUnavailable => ErrorKind::Storage,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

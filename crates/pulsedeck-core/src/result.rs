//! Convenience result type alias for PulseDeck.

use crate::error::AppError;

/// A specialized `Result` type for PulseDeck operations.
pub type AppResult<T> = Result<T, AppError>;

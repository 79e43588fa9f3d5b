//! # pulsedeck-core
//!
//! Core crate for PulseDeck. Contains the persistent store contract,
//! configuration schemas, session domain events, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other PulseDeck crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;

//! # pulsedeck-entity
//!
//! Domain value types for PulseDeck: roles, the authenticated user held by
//! a session, the demo login directory entries, and the persisted session
//! record with its typed decode step.

pub mod session;
pub mod user;

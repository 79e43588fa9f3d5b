//! Session domain entities.

pub mod record;

pub use record::{RecordError, SessionRecord};

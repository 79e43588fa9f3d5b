//! Core traits defined in `pulsedeck-core` and implemented by other crates.

pub mod store;

pub use store::PersistentStore;

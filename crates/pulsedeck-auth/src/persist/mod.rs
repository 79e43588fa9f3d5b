//! [`PersistentStore`] adapters.
//!
//! [`PersistentStore`]: pulsedeck_core::traits::PersistentStore

pub mod detached;
pub mod file;
pub mod memory;

pub use detached::DetachedStore;
pub use file::FileStore;
pub use memory::MemoryStore;

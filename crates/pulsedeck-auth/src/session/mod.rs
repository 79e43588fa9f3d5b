//! Session lifecycle: hydration, login, logout, token refresh.

pub mod directory;
pub mod phase;
pub mod store;

pub use directory::LoginDirectory;
pub use phase::HydrationPhase;
pub use store::{SessionSnapshot, SessionStore};

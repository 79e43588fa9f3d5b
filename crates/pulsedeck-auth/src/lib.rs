//! # pulsedeck-auth
//!
//! Client-held session authentication and authorization for PulseDeck.
//!
//! ## Modules
//!
//! - `token`: self-issued bearer token creation, decoding, and validation
//! - `session`: session lifecycle (initialize, login, logout, refresh) and
//!   hydration phase tracking
//! - `rbac`: role matching policy
//! - `guard`: route guard decisions and the route table
//! - `persist`: `PersistentStore` adapters (memory, file, detached)

pub mod error;
pub mod guard;
pub mod persist;
pub mod rbac;
pub mod session;
pub mod token;

pub use error::AuthError;
pub use guard::{GuardDecision, GuardDecisionEngine, RouteAccess, RouteTable};
pub use persist::{DetachedStore, FileStore, MemoryStore};
pub use rbac::AccessPolicy;
pub use session::{HydrationPhase, LoginDirectory, SessionSnapshot, SessionStore};
pub use token::{TokenClaims, TokenError, TokenManager};

//! User domain entities.

pub mod credential;
pub mod model;
pub mod role;

pub use credential::DemoCredential;
pub use model::AuthUser;
pub use role::Role;

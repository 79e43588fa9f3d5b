//! Route guard decisions.
//!
//! The engine evaluates a navigation attempt against the session and
//! returns a [`GuardDecision`]; it never raises. The [`RouteTable`] maps
//! paths to their access class.

pub mod decision;
pub mod engine;
pub mod route;

pub use decision::GuardDecision;
pub use engine::GuardDecisionEngine;
pub use route::{RouteAccess, RouteTable};

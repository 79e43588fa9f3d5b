//! Self-issued bearer tokens: claims, encoding, decoding, and lifecycle.
//!
//! Tokens have the familiar three-segment `header.payload.signature`
//! layout, but the signature is an opaque placeholder. Nothing here is a
//! cryptographic guarantee; validity is purely a matter of expiry.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod manager;

pub use claims::{TokenClaims, TokenHeader};
pub use decoder::{TokenDecoder, TokenError};
pub use encoder::TokenEncoder;
pub use manager::TokenManager;

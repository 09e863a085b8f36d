//! Identity & role resolution.
//!
//! [`IdentityProvider`] turns a bearer token into a [`crate::domain::Caller`]
//! once per request; downstream code pattern-matches on the caller instead
//! of checking role flags.

pub mod provider;
pub mod token;

pub use provider::IdentityProvider;
pub use token::{Claims, JwtConfig};

//! Data Transfer Objects for REST request/response serialization.
//!
//! The client-details endpoint responds with
//! [`crate::domain::ClientContact`] directly.

pub mod annotation_dto;
pub mod appointment_dto;

pub use annotation_dto::*;
pub use appointment_dto::*;

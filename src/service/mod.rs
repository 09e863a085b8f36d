//! Service layer: business logic orchestration.
//!
//! [`AppointmentService`] enforces the appointment lifecycle rules and
//! role-scoped access over the [`crate::persistence`] traits.

pub mod appointment_service;

pub use appointment_service::AppointmentService;

//! # troupe-booking
//!
//! REST backend for booking clown troupes.
//!
//! Three roles share one appointment book. Troupe leaders create
//! appointments for their troupe, clients view and rate their own, and
//! clowns view their troupe's appointments, move them through the status
//! lifecycle, raise issues and request a client's contact details. Every
//! request is resolved to a [`domain::Caller`] before any data is touched,
//! and every lookup is scoped to what that caller may see.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP + Bearer token)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Authenticated extractor ── IdentityProvider (identity/)
//!     │
//!     ├── AppointmentService (service/)
//!     │
//!     ├── AppointmentRepository + PartyDirectory (persistence/)
//!     │
//!     └── PostgreSQL or in-memory store
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod persistence;
pub mod service;

//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::identity::IdentityProvider;
use crate::service::AppointmentService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Appointment service for all business logic.
    pub appointment_service: Arc<AppointmentService>,
    /// Resolves bearer tokens to callers.
    pub identity: Arc<IdentityProvider>,
}

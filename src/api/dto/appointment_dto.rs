//! Appointment DTOs for the client, troupe-leader and clown views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Appointment, AppointmentDetail, AppointmentId, AppointmentStatus, ClientId, TroupeId, UserId,
};

/// Request body for `POST /troupeleader/appointments`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    /// Client the troupe is booked for.
    pub client_id: ClientId,
    /// Booked slot (RFC 3339 with offset).
    pub scheduled_at: DateTime<Utc>,
}

/// Response body for `POST /troupeleader/appointments` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAppointmentResponse {
    /// New appointment id.
    pub id: AppointmentId,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Booked slot.
    pub scheduled_at: DateTime<Utc>,
    /// Booked client.
    pub client_id: ClientId,
    /// Caller's troupe.
    pub troupe_id: TroupeId,
    /// Always `upcoming`.
    pub status: AppointmentStatus,
}

impl From<Appointment> for CreateAppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            created_at: appointment.created_at,
            scheduled_at: appointment.scheduled_at,
            client_id: appointment.client_id,
            troupe_id: appointment.troupe_id,
            status: appointment.status,
        }
    }
}

/// Client block nested in the client view.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDto {
    /// Account id.
    pub user_id: UserId,
    /// Contact name.
    pub contact_name: String,
    /// Contact email.
    pub contact_email: String,
    /// Contact number.
    pub contact_number: String,
}

/// Troupe block nested in the client view.
#[derive(Debug, Serialize, ToSchema)]
pub struct TroupeDto {
    /// Troupe name.
    pub name: String,
}

/// An appointment as seen by its client.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientAppointmentView {
    /// Appointment id.
    pub id: AppointmentId,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Booked slot.
    pub scheduled_at: DateTime<Utc>,
    /// The client's own contact block.
    pub client: ClientDto,
    /// The booked troupe.
    pub troupe: TroupeDto,
    /// Lifecycle state.
    pub status: AppointmentStatus,
    /// The client's rating, if any.
    pub rating: Option<String>,
}

impl From<AppointmentDetail> for ClientAppointmentView {
    fn from(detail: AppointmentDetail) -> Self {
        let AppointmentDetail {
            appointment,
            client,
            troupe,
        } = detail;
        Self {
            id: appointment.id,
            created_at: appointment.created_at,
            scheduled_at: appointment.scheduled_at,
            client: ClientDto {
                user_id: client.user_id,
                contact_name: client.contact_name,
                contact_email: client.contact_email,
                contact_number: client.contact_number,
            },
            troupe: TroupeDto { name: troupe.name },
            status: appointment.status,
            rating: appointment.rating,
        }
    }
}

/// An appointment as seen by a clown of the booked troupe.
///
/// Only the client's name is exposed; email and number need a logged
/// details request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClownAppointmentView {
    /// Appointment id.
    pub id: AppointmentId,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Booked slot.
    pub scheduled_at: DateTime<Utc>,
    /// Client contact name.
    pub client: String,
    /// Troupe name.
    pub troupe: String,
    /// Lifecycle state.
    pub status: AppointmentStatus,
    /// The client's rating, if any.
    pub rating: Option<String>,
}

impl From<AppointmentDetail> for ClownAppointmentView {
    fn from(detail: AppointmentDetail) -> Self {
        Self {
            id: detail.appointment.id,
            created_at: detail.appointment.created_at,
            scheduled_at: detail.appointment.scheduled_at,
            client: detail.client.contact_name,
            troupe: detail.troupe.name,
            status: detail.appointment.status,
            rating: detail.appointment.rating,
        }
    }
}

/// Request body for `PATCH /clients/appointments/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RateAppointmentRequest {
    /// New rating; an empty string clears it.
    pub rating: String,
}

/// Request body for `PATCH /clowns/appointments/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of `upcoming`, `incipient`, `completed`, `cancelled`.
    pub status: String,
}

//! Issue and client-details DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AppointmentId, AppointmentIssue, ClownId, IssueId};

/// Request body for `POST /clowns/appointments/{id}/issue`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RaiseIssueRequest {
    /// Short summary (max 50 chars).
    pub title: String,
    /// Longer description (max 200 chars).
    pub description: String,
}

/// Response body for `POST /clowns/appointments/{id}/issue` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct IssueResponse {
    /// Issue id.
    pub id: IssueId,
    /// Annotated appointment.
    pub appointment_id: AppointmentId,
    /// Raising clown.
    pub clown_id: ClownId,
    /// Short summary.
    pub title: String,
    /// Longer description.
    pub description: String,
}

impl From<AppointmentIssue> for IssueResponse {
    fn from(issue: AppointmentIssue) -> Self {
        Self {
            id: issue.id,
            appointment_id: issue.appointment_id,
            clown_id: issue.clown_id,
            title: issue.title,
            description: issue.description,
        }
    }
}

/// Request body for `POST /clowns/appointments/{id}/clientdetails`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClientDetailsRequestBody {
    /// Why the details are needed (max 100 chars).
    pub reason: String,
}

//! Append-only annotations on an appointment: issues raised by clowns and
//! logged requests for a client's contact details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AppointmentId, ClownId, DetailsRequestId, IssueId};
use crate::error::BookingError;

/// Maximum length of an issue title, in characters.
pub const MAX_ISSUE_TITLE_LEN: usize = 50;
/// Maximum length of an issue description, in characters.
pub const MAX_ISSUE_DESCRIPTION_LEN: usize = 200;
/// Maximum length of a details-request reason, in characters.
pub const MAX_REASON_LEN: usize = 100;

/// A clown-raised note attached to an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentIssue {
    /// Issue identifier.
    pub id: IssueId,
    /// Annotated appointment.
    pub appointment_id: AppointmentId,
    /// Clown who raised the issue.
    pub clown_id: ClownId,
    /// Short summary.
    pub title: String,
    /// Longer description.
    pub description: String,
}

impl AppointmentIssue {
    /// Builds a new issue after validating its text fields.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] if `title` or `description`
    /// is blank or too long.
    pub fn new(
        appointment_id: AppointmentId,
        clown_id: ClownId,
        title: String,
        description: String,
    ) -> Result<Self, BookingError> {
        Ok(Self {
            id: IssueId::new(),
            appointment_id,
            clown_id,
            title: bounded_text("title", title, MAX_ISSUE_TITLE_LEN)?,
            description: bounded_text("description", description, MAX_ISSUE_DESCRIPTION_LEN)?,
        })
    }
}

/// Audit record of a clown viewing a client's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetailsRequest {
    /// Request identifier.
    pub id: DetailsRequestId,
    /// Appointment whose client was looked up.
    pub appointment_id: AppointmentId,
    /// Clown who asked.
    pub clown_id: ClownId,
    /// Why the details were needed.
    pub reason: String,
    /// Server timestamp of the request.
    pub requested_at: DateTime<Utc>,
}

impl ClientDetailsRequest {
    /// Builds a new request record after validating the reason.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] if `reason` is blank or too
    /// long.
    pub fn new(
        appointment_id: AppointmentId,
        clown_id: ClownId,
        reason: String,
        now: DateTime<Utc>,
    ) -> Result<Self, BookingError> {
        Ok(Self {
            id: DetailsRequestId::new(),
            appointment_id,
            clown_id,
            reason: bounded_text("reason", reason, MAX_REASON_LEN)?,
            requested_at: now,
        })
    }
}

fn bounded_text(field: &str, value: String, max: usize) -> Result<String, BookingError> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidArgument(format!(
            "{field} must not be blank"
        )));
    }
    if value.chars().count() > max {
        return Err(BookingError::InvalidArgument(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value)
}

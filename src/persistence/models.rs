//! Database row models and their conversion into domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Appointment, AppointmentDetail, AppointmentStatus, Client, ClientId, Clown, Troupe, TroupeId,
    TroupeLeader,
};
use crate::error::BookingError;

/// A row of the appointment detail query: `appointments` joined with
/// `clients` and `troupes`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppointmentDetailRow {
    /// Appointment id.
    pub id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Booked slot.
    pub scheduled_at: DateTime<Utc>,
    /// Owning client.
    pub client_id: Uuid,
    /// Booked troupe.
    pub troupe_id: Uuid,
    /// Status string as stored.
    pub status: String,
    /// Optional rating.
    pub rating: Option<String>,
    /// Client's account id.
    pub client_user_id: Uuid,
    /// Client contact name.
    pub contact_name: String,
    /// Client contact email.
    pub contact_email: String,
    /// Client contact number.
    pub contact_number: String,
    /// Troupe display name.
    pub troupe_name: String,
}

impl TryFrom<AppointmentDetailRow> for AppointmentDetail {
    type Error = BookingError;

    fn try_from(row: AppointmentDetailRow) -> Result<Self, Self::Error> {
        let status: AppointmentStatus = row.status.parse().map_err(|_| {
            BookingError::Persistence(format!(
                "appointment {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;
        let client_id = ClientId::from_uuid(row.client_id);
        let troupe_id = TroupeId::from_uuid(row.troupe_id);
        Ok(Self {
            appointment: Appointment {
                id: row.id.into(),
                created_at: row.created_at,
                scheduled_at: row.scheduled_at,
                client_id,
                troupe_id,
                status,
                rating: row.rating,
            },
            client: Client {
                id: client_id,
                user_id: row.client_user_id.into(),
                contact_name: row.contact_name,
                contact_email: row.contact_email,
                contact_number: row.contact_number,
            },
            troupe: Troupe {
                id: troupe_id,
                name: row.troupe_name,
            },
        })
    }
}

/// A row of the `clients` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
    /// Client id.
    pub id: Uuid,
    /// Account id.
    pub user_id: Uuid,
    /// Contact name.
    pub contact_name: String,
    /// Contact email.
    pub contact_email: String,
    /// Contact number.
    pub contact_number: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id.into(),
            user_id: row.user_id.into(),
            contact_name: row.contact_name,
            contact_email: row.contact_email,
            contact_number: row.contact_number,
        }
    }
}

/// A row of the `troupes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TroupeRow {
    /// Troupe id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl From<TroupeRow> for Troupe {
    fn from(row: TroupeRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
        }
    }
}

/// A row of the `troupe_leaders` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TroupeLeaderRow {
    /// Leader id.
    pub id: Uuid,
    /// Account id.
    pub user_id: Uuid,
    /// Led troupe.
    pub troupe_id: Uuid,
}

impl From<TroupeLeaderRow> for TroupeLeader {
    fn from(row: TroupeLeaderRow) -> Self {
        Self {
            id: row.id.into(),
            user_id: row.user_id.into(),
            troupe_id: row.troupe_id.into(),
        }
    }
}

/// A row of the `clowns` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClownRow {
    /// Clown id.
    pub id: Uuid,
    /// Account id.
    pub user_id: Uuid,
    /// Troupe membership.
    pub troupe_id: Uuid,
    /// Rank within the troupe.
    pub rank: String,
}

impl From<ClownRow> for Clown {
    fn from(row: ClownRow) -> Self {
        Self {
            id: row.id.into(),
            user_id: row.user_id.into(),
            troupe_id: row.troupe_id.into(),
            rank: row.rank,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn row(status: &str) -> AppointmentDetailRow {
        let now = Utc::now();
        AppointmentDetailRow {
            id: Uuid::new_v4(),
            created_at: now,
            scheduled_at: now,
            client_id: Uuid::new_v4(),
            troupe_id: Uuid::new_v4(),
            status: status.to_string(),
            rating: None,
            client_user_id: Uuid::new_v4(),
            contact_name: "Ada".to_string(),
            contact_email: "ada@example.com".to_string(),
            contact_number: "555-0100".to_string(),
            troupe_name: "Big Top".to_string(),
        }
    }

    #[test]
    fn detail_row_converts() {
        let source = row("incipient");
        let Ok(detail) = AppointmentDetail::try_from(source.clone()) else {
            panic!("conversion failed");
        };
        assert_eq!(detail.appointment.status, AppointmentStatus::Incipient);
        assert_eq!(*detail.client.id.as_uuid(), source.client_id);
        assert_eq!(detail.appointment.client_id, detail.client.id);
        assert_eq!(detail.troupe.name, "Big Top");
    }

    #[test]
    fn unknown_stored_status_is_a_persistence_error() {
        let result = AppointmentDetail::try_from(row("done"));
        assert!(matches!(result, Err(BookingError::Persistence(_))));
    }
}

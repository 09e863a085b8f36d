//! Persistence layer: appointment repository and party directory.
//!
//! Provides the [`AppointmentRepository`] and [`PartyDirectory`] traits so
//! the lifecycle service has no dependency on a storage engine. Two
//! implementations exist: [`postgres::PostgresStore`] over `sqlx::PgPool`,
//! and [`memory::MemoryStore`] over in-process maps.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Appointment, AppointmentDetail, AppointmentId, AppointmentIssue, AppointmentPatch,
    ClientDetailsRequest, Client, ClientId, Clown, Troupe, TroupeId, TroupeLeader, TimeFilter,
    UserId,
};
use crate::error::BookingError;

pub use memory::{MemorySeed, MemoryStore};
pub use postgres::PostgresStore;

/// Owner predicate folded into scoped appointment lookups.
///
/// A record outside the scope is treated exactly like a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// Appointments owned by a client.
    Client(ClientId),
    /// Appointments booked for a troupe.
    Troupe(TroupeId),
}

impl OwnerScope {
    /// Returns `true` if the appointment lies within this scope.
    #[must_use]
    pub fn admits(&self, appointment: &Appointment) -> bool {
        match self {
            Self::Client(id) => appointment.client_id == *id,
            Self::Troupe(id) => appointment.troupe_id == *id,
        }
    }
}

/// Storage for appointments and their annotations.
#[async_trait]
pub trait AppointmentRepository: Send + Sync + fmt::Debug {
    /// Inserts the appointment unless its (troupe, scheduled_at) slot is
    /// already taken. The check and the insert are atomic.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Conflict`] if the slot is taken.
    async fn insert_if_absent(&self, appointment: Appointment)
    -> Result<Appointment, BookingError>;

    /// Looks up an appointment by id alone.
    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> Result<Option<AppointmentDetail>, BookingError>;

    /// Looks up an appointment by id within an owner scope.
    async fn find_scoped(
        &self,
        id: AppointmentId,
        scope: OwnerScope,
    ) -> Result<Option<AppointmentDetail>, BookingError>;

    /// Lists the scope's appointments passing `filter`, ordered by
    /// `scheduled_at` descending.
    async fn find_by_owner(
        &self,
        scope: OwnerScope,
        filter: TimeFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetail>, BookingError>;

    /// Applies `patch` to the appointment if it lies within `scope`.
    /// Returns `None` when no record matched.
    async fn update_fields(
        &self,
        id: AppointmentId,
        scope: OwnerScope,
        patch: AppointmentPatch,
    ) -> Result<Option<AppointmentDetail>, BookingError>;

    /// Appends an issue record.
    async fn append_issue(
        &self,
        issue: AppointmentIssue,
    ) -> Result<AppointmentIssue, BookingError>;

    /// Appends a client-details request record.
    async fn append_details_request(
        &self,
        request: ClientDetailsRequest,
    ) -> Result<ClientDetailsRequest, BookingError>;
}

/// Read access to the parties owned by the external user system.
#[async_trait]
pub trait PartyDirectory: Send + Sync + fmt::Debug {
    /// Looks up a client by id.
    async fn client(&self, id: ClientId) -> Result<Option<Client>, BookingError>;

    /// Looks up a troupe by id.
    async fn troupe(&self, id: TroupeId) -> Result<Option<Troupe>, BookingError>;

    /// Returns the client profile of an account.
    async fn client_for_user(&self, user_id: UserId) -> Result<Option<Client>, BookingError>;

    /// Returns the troupe-leader profile of an account.
    async fn troupe_leader_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<TroupeLeader>, BookingError>;

    /// Returns the clown profile of an account.
    async fn clown_for_user(&self, user_id: UserId) -> Result<Option<Clown>, BookingError>;
}

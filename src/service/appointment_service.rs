//! Appointment lifecycle service: creation, status changes, ratings,
//! annotations, and role-scoped reads.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    Appointment, AppointmentDetail, AppointmentId, AppointmentIssue, AppointmentPatch,
    AppointmentStatus, Caller, ClientContact, ClientDetailsRequest, ClientId, TimeFilter,
};
use crate::error::BookingError;
use crate::persistence::{AppointmentRepository, OwnerScope, PartyDirectory};

/// Orchestration layer for every appointment operation.
///
/// Holds no mutable state of its own. Every method first matches the
/// [`Caller`] against the role it needs, then folds the caller's ownership
/// into the storage lookup so that records outside the caller's scope look
/// exactly like missing ones.
#[derive(Debug, Clone)]
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    directory: Arc<dyn PartyDirectory>,
}

impl AppointmentService {
    /// Creates a new `AppointmentService`.
    #[must_use]
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        directory: Arc<dyn PartyDirectory>,
    ) -> Self {
        Self {
            appointments,
            directory,
        }
    }

    /// Books the caller's troupe for `client_id` at `scheduled_at`.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] unless the caller is a troupe leader
    ///   whose troupe is registered.
    /// - [`BookingError::InvalidArgument`] if the client does not exist.
    /// - [`BookingError::Conflict`] if the troupe is already booked for
    ///   that exact timestamp.
    pub async fn create(
        &self,
        caller: &Caller,
        client_id: ClientId,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Appointment, BookingError> {
        let troupe_id = caller.require_troupe_leader()?;
        let Some(troupe) = self.directory.troupe(troupe_id).await? else {
            return Err(BookingError::Forbidden(format!(
                "troupe {troupe_id} is not registered"
            )));
        };

        if self.directory.client(client_id).await?.is_none() {
            return Err(BookingError::InvalidArgument(format!(
                "client {client_id} does not exist"
            )));
        }

        let appointment = self
            .appointments
            .insert_if_absent(Appointment::new(
                client_id,
                troupe_id,
                scheduled_at,
                Utc::now(),
            ))
            .await?;

        tracing::info!(
            appointment_id = %appointment.id,
            %troupe_id,
            troupe = %troupe.name,
            %client_id,
            scheduled_at = %appointment.scheduled_at,
            "appointment created"
        );
        Ok(appointment)
    }

    /// Lists the calling client's appointments, latest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] unless the caller is a client.
    pub async fn list_for_client(
        &self,
        caller: &Caller,
        filter: TimeFilter,
    ) -> Result<Vec<AppointmentDetail>, BookingError> {
        let client_id = caller.require_client()?;
        self.appointments
            .find_by_owner(OwnerScope::Client(client_id), filter, Utc::now())
            .await
    }

    /// Returns one of the calling client's appointments.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] unless the caller is a client.
    /// - [`BookingError::NotFound`] if the appointment is missing or belongs
    ///   to another client.
    pub async fn get_for_client(
        &self,
        caller: &Caller,
        id: AppointmentId,
    ) -> Result<AppointmentDetail, BookingError> {
        let client_id = caller.require_client()?;
        self.appointments
            .find_scoped(id, OwnerScope::Client(client_id))
            .await?
            .ok_or_else(BookingError::appointment_not_found)
    }

    /// Sets (or clears, with an empty string) the rating on one of the
    /// calling client's appointments. No other field changes.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] unless the caller is a client.
    /// - [`BookingError::NotFound`] if the appointment is missing or belongs
    ///   to another client.
    /// - [`BookingError::InvalidArgument`] if the rating is too long.
    pub async fn rate(
        &self,
        caller: &Caller,
        id: AppointmentId,
        rating: String,
    ) -> Result<AppointmentDetail, BookingError> {
        let client_id = caller.require_client()?;
        let scope = OwnerScope::Client(client_id);

        if self.appointments.find_scoped(id, scope).await?.is_none() {
            return Err(BookingError::appointment_not_found());
        }
        let patch = AppointmentPatch::rating(rating)?;

        let detail = self
            .appointments
            .update_fields(id, scope, patch)
            .await?
            .ok_or_else(BookingError::appointment_not_found)?;

        tracing::info!(appointment_id = %id, %client_id, "appointment rated");
        Ok(detail)
    }

    /// Lists the calling clown's troupe appointments, latest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] unless the caller is a clown.
    pub async fn list_for_clown(
        &self,
        caller: &Caller,
    ) -> Result<Vec<AppointmentDetail>, BookingError> {
        let clown = caller.require_clown()?;
        self.appointments
            .find_by_owner(OwnerScope::Troupe(clown.troupe_id), TimeFilter::All, Utc::now())
            .await
    }

    /// Returns one of the calling clown's troupe appointments.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] unless the caller is a clown.
    /// - [`BookingError::NotFound`] if the appointment is missing or booked
    ///   for another troupe.
    pub async fn get_for_clown(
        &self,
        caller: &Caller,
        id: AppointmentId,
    ) -> Result<AppointmentDetail, BookingError> {
        let clown = caller.require_clown()?;
        self.appointments
            .find_scoped(id, OwnerScope::Troupe(clown.troupe_id))
            .await?
            .ok_or_else(BookingError::appointment_not_found)
    }

    /// Replaces the status of one of the calling clown's troupe
    /// appointments. Any of the four states may follow any other.
    ///
    /// The scoped lookup runs before `new_status` is validated, so a
    /// foreign appointment reports `NotFound` even with a bad status.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] unless the caller is a clown.
    /// - [`BookingError::NotFound`] if the appointment is missing or booked
    ///   for another troupe.
    /// - [`BookingError::InvalidArgument`] if `new_status` is not one of
    ///   `upcoming`, `incipient`, `completed`, `cancelled`.
    pub async fn update_status(
        &self,
        caller: &Caller,
        id: AppointmentId,
        new_status: &str,
    ) -> Result<AppointmentDetail, BookingError> {
        let clown = caller.require_clown()?;
        let scope = OwnerScope::Troupe(clown.troupe_id);

        let Some(current) = self.appointments.find_scoped(id, scope).await? else {
            return Err(BookingError::appointment_not_found());
        };
        let status: AppointmentStatus = new_status.parse()?;

        let detail = self
            .appointments
            .update_fields(id, scope, AppointmentPatch::Status(status))
            .await?
            .ok_or_else(BookingError::appointment_not_found)?;

        tracing::info!(
            appointment_id = %id,
            clown_id = %clown.clown_id,
            from = %current.appointment.status,
            to = %status,
            "status updated"
        );
        Ok(detail)
    }

    /// Attaches an issue to an appointment.
    ///
    /// The appointment is resolved by id alone; the clown need not belong
    /// to the booked troupe.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] unless the caller is a clown.
    /// - [`BookingError::InvalidArgument`] if the title or description is
    ///   blank or too long.
    /// - [`BookingError::NotFound`] if the appointment does not exist.
    pub async fn raise_issue(
        &self,
        caller: &Caller,
        id: AppointmentId,
        title: String,
        description: String,
    ) -> Result<AppointmentIssue, BookingError> {
        let clown = caller.require_clown()?;
        let issue = AppointmentIssue::new(id, clown.clown_id, title, description)?;

        if self.appointments.find_by_id(id).await?.is_none() {
            return Err(BookingError::appointment_not_found());
        }
        let issue = self.appointments.append_issue(issue).await?;

        tracing::info!(
            issue_id = %issue.id,
            appointment_id = %id,
            clown_id = %clown.clown_id,
            "issue raised"
        );
        Ok(issue)
    }

    /// Logs why the calling clown needs the appointment's client details,
    /// then returns those details.
    ///
    /// The contact block is only read after the log record has been stored.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] unless the caller is a clown.
    /// - [`BookingError::InvalidArgument`] if the reason is blank or too
    ///   long.
    /// - [`BookingError::NotFound`] if the appointment does not exist.
    pub async fn request_client_details(
        &self,
        caller: &Caller,
        id: AppointmentId,
        reason: String,
    ) -> Result<ClientContact, BookingError> {
        let clown = caller.require_clown()?;
        let request = ClientDetailsRequest::new(id, clown.clown_id, reason, Utc::now())?;

        let Some(detail) = self.appointments.find_by_id(id).await? else {
            return Err(BookingError::appointment_not_found());
        };
        let request = self.appointments.append_details_request(request).await?;

        tracing::info!(
            request_id = %request.id,
            appointment_id = %id,
            clown_id = %clown.clown_id,
            client_id = %detail.client.id,
            "client details requested"
        );
        Ok(detail.client.contact())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::domain::{
        Client, Clown, ClownId, Troupe, TroupeId, TroupeLeader, TroupeLeaderId, UserId,
    };
    use crate::persistence::MemoryStore;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: AppointmentService,
        leader: Caller,
        second_leader: Caller,
        clown: Caller,
        foreign_clown: Caller,
        client: Caller,
        other_client: Caller,
        client_id: ClientId,
        other_client_id: ClientId,
    }

    fn client_record(name: &str) -> Client {
        Client {
            id: ClientId::new(),
            user_id: UserId::new(),
            contact_name: name.to_string(),
            contact_email: format!("{}@example.com", name.to_lowercase()),
            contact_number: "555-0100".to_string(),
        }
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let troupe = Troupe {
            id: TroupeId::new(),
            name: "Big Top".to_string(),
        };
        let rival = Troupe {
            id: TroupeId::new(),
            name: "Sideshow".to_string(),
        };
        let leader = TroupeLeader {
            id: TroupeLeaderId::new(),
            user_id: UserId::new(),
            troupe_id: troupe.id,
        };
        let second_leader = TroupeLeader {
            id: TroupeLeaderId::new(),
            user_id: UserId::new(),
            troupe_id: troupe.id,
        };
        let clown = Clown {
            id: ClownId::new(),
            user_id: UserId::new(),
            troupe_id: troupe.id,
            rank: "senior".to_string(),
        };
        let foreign_clown = Clown {
            id: ClownId::new(),
            user_id: UserId::new(),
            troupe_id: rival.id,
            rank: "junior".to_string(),
        };
        let client = client_record("Ada");
        let other_client = client_record("Grace");

        let fx = Fixture {
            service: AppointmentService::new(
                Arc::clone(&store) as Arc<dyn AppointmentRepository>,
                Arc::clone(&store) as Arc<dyn PartyDirectory>,
            ),
            store: Arc::clone(&store),
            leader: Caller::TroupeLeader {
                user_id: leader.user_id,
                leader_id: leader.id,
                troupe_id: troupe.id,
            },
            second_leader: Caller::TroupeLeader {
                user_id: second_leader.user_id,
                leader_id: second_leader.id,
                troupe_id: troupe.id,
            },
            clown: Caller::Clown {
                user_id: clown.user_id,
                clown_id: clown.id,
                troupe_id: troupe.id,
            },
            foreign_clown: Caller::Clown {
                user_id: foreign_clown.user_id,
                clown_id: foreign_clown.id,
                troupe_id: rival.id,
            },
            client: Caller::Client {
                user_id: client.user_id,
                client_id: client.id,
            },
            other_client: Caller::Client {
                user_id: other_client.user_id,
                client_id: other_client.id,
            },
            client_id: client.id,
            other_client_id: other_client.id,
        };

        store.add_troupe(troupe).await;
        store.add_troupe(rival).await;
        store.add_troupe_leader(leader).await;
        store.add_troupe_leader(second_leader).await;
        store.add_clown(clown).await;
        store.add_clown(foreign_clown).await;
        store.add_client(client).await;
        store.add_client(other_client).await;
        fx
    }

    fn slot() -> DateTime<Utc> {
        let Some(at) = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).single() else {
            panic!("valid timestamp");
        };
        at
    }

    async fn book(fx: &Fixture, client_id: ClientId, at: DateTime<Utc>) -> Appointment {
        let Ok(appt) = fx.service.create(&fx.leader, client_id, at).await else {
            panic!("booking failed");
        };
        appt
    }

    #[tokio::test]
    async fn create_sets_initial_state() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        assert_eq!(appt.status, AppointmentStatus::Upcoming);
        assert_eq!(appt.client_id, fx.client_id);
        assert!(appt.rating.is_none());
        assert!(appt.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn distinct_slots_succeed_and_repeat_conflicts() {
        let fx = fixture().await;
        let _ = book(&fx, fx.client_id, slot()).await;
        let _ = book(&fx, fx.client_id, slot() + Duration::hours(2)).await;

        let again = fx.service.create(&fx.leader, fx.client_id, slot()).await;
        assert!(matches!(again, Err(BookingError::Conflict(_))));
    }

    #[tokio::test]
    async fn second_leader_of_same_troupe_conflicts() {
        let fx = fixture().await;
        let _ = book(&fx, fx.client_id, slot()).await;

        let second = fx
            .service
            .create(&fx.second_leader, fx.other_client_id, slot())
            .await;
        assert!(matches!(second, Err(BookingError::Conflict(_))));

        let at_slot = fx
            .store
            .appointments()
            .await
            .into_iter()
            .filter(|a| a.scheduled_at == slot())
            .count();
        assert_eq!(at_slot, 1);
    }

    #[tokio::test]
    async fn slots_within_one_microsecond_conflict() {
        let fx = fixture().await;
        let _ = book(&fx, fx.client_id, slot() + Duration::nanoseconds(100)).await;

        let again = fx
            .service
            .create(&fx.leader, fx.client_id, slot() + Duration::nanoseconds(600))
            .await;
        assert!(matches!(again, Err(BookingError::Conflict(_))));
    }

    #[tokio::test]
    async fn leader_of_unregistered_troupe_is_forbidden() {
        let fx = fixture().await;
        let orphan = Caller::TroupeLeader {
            user_id: UserId::new(),
            leader_id: TroupeLeaderId::new(),
            troupe_id: TroupeId::new(),
        };

        let result = fx.service.create(&orphan, fx.client_id, slot()).await;
        assert!(matches!(result, Err(BookingError::Forbidden(_))));
        assert!(fx.store.appointments().await.is_empty());
    }

    #[tokio::test]
    async fn only_troupe_leaders_create() {
        let fx = fixture().await;
        for caller in [&fx.client, &fx.clown] {
            let result = fx.service.create(caller, fx.client_id, slot()).await;
            assert!(matches!(result, Err(BookingError::Forbidden(_))));
        }
        assert!(fx.store.appointments().await.is_empty());
    }

    #[tokio::test]
    async fn create_for_unknown_client_is_invalid() {
        let fx = fixture().await;
        let result = fx.service.create(&fx.leader, ClientId::new(), slot()).await;
        assert!(matches!(result, Err(BookingError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn client_lists_only_own_appointments() {
        let fx = fixture().await;
        let _ = book(&fx, fx.client_id, slot()).await;
        let _ = book(&fx, fx.other_client_id, slot() + Duration::hours(1)).await;

        let Ok(list) = fx.service.list_for_client(&fx.client, TimeFilter::All).await else {
            panic!("list failed");
        };
        assert_eq!(list.len(), 1);
        assert!(list.iter().all(|d| d.appointment.client_id == fx.client_id));
    }

    #[tokio::test]
    async fn client_time_filters_split_past_and_upcoming() {
        let fx = fixture().await;
        let now = Utc::now();
        let past = book(&fx, fx.client_id, now - Duration::days(3)).await;
        let future = book(&fx, fx.client_id, now + Duration::days(3)).await;

        let Ok(upcoming) = fx
            .service
            .list_for_client(&fx.client, TimeFilter::Upcoming)
            .await
        else {
            panic!("list failed");
        };
        let Ok(previous) = fx.service.list_for_client(&fx.client, TimeFilter::Past).await else {
            panic!("list failed");
        };
        let Ok(all) = fx.service.list_for_client(&fx.client, TimeFilter::All).await else {
            panic!("list failed");
        };

        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming.first().map(|d| d.appointment.id), Some(future.id));
        assert_eq!(previous.len(), 1);
        assert_eq!(previous.first().map(|d| d.appointment.id), Some(past.id));
        let order: Vec<_> = all.iter().map(|d| d.appointment.id).collect();
        assert_eq!(order, vec![future.id, past.id]);
    }

    #[tokio::test]
    async fn foreign_appointment_is_not_found_for_client() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;

        let result = fx.service.get_for_client(&fx.other_client, appt.id).await;
        assert!(matches!(result, Err(BookingError::NotFound(_))));

        let result = fx
            .service
            .rate(&fx.other_client, appt.id, "meh".to_string())
            .await;
        assert!(matches!(result, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn rate_changes_only_rating() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;

        let Ok(detail) = fx
            .service
            .rate(&fx.client, appt.id, "Wonderful show".to_string())
            .await
        else {
            panic!("rating failed");
        };
        let rated = detail.appointment;
        assert_eq!(rated.rating.as_deref(), Some("Wonderful show"));
        assert_eq!(rated.status, appt.status);
        assert_eq!(rated.scheduled_at, appt.scheduled_at);
        assert_eq!(rated.created_at, appt.created_at);
        assert_eq!(rated.client_id, appt.client_id);
        assert_eq!(rated.troupe_id, appt.troupe_id);
    }

    #[tokio::test]
    async fn clown_cannot_rate() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        let result = fx.service.rate(&fx.clown, appt.id, "ok".to_string()).await;
        assert!(matches!(result, Err(BookingError::Forbidden(_))));
    }

    #[tokio::test]
    async fn client_cannot_list_clown_appointments() {
        let fx = fixture().await;
        let result = fx.service.list_for_clown(&fx.client).await;
        assert!(matches!(result, Err(BookingError::Forbidden(_))));
    }

    #[tokio::test]
    async fn clown_sees_only_own_troupe() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;

        let Ok(list) = fx.service.list_for_clown(&fx.clown).await else {
            panic!("list failed");
        };
        assert_eq!(list.len(), 1);

        let Ok(foreign) = fx.service.list_for_clown(&fx.foreign_clown).await else {
            panic!("list failed");
        };
        assert!(foreign.is_empty());

        let result = fx.service.get_for_clown(&fx.foreign_clown, appt.id).await;
        assert!(matches!(result, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_status_is_rejected_and_not_stored() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;

        let result = fx.service.update_status(&fx.clown, appt.id, "done").await;
        let Err(BookingError::InvalidArgument(msg)) = result else {
            panic!("expected InvalidArgument");
        };
        assert_eq!(msg, "the status you provided is not valid");

        let Ok(detail) = fx.service.get_for_clown(&fx.clown, appt.id).await else {
            panic!("lookup failed");
        };
        assert_eq!(detail.appointment.status, AppointmentStatus::Upcoming);
    }

    #[tokio::test]
    async fn valid_status_is_persisted() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        let _ = fx.service.rate(&fx.client, appt.id, "fun".to_string()).await;

        let Ok(detail) = fx
            .service
            .update_status(&fx.clown, appt.id, "completed")
            .await
        else {
            panic!("update failed");
        };
        assert_eq!(detail.appointment.status, AppointmentStatus::Completed);
        assert_eq!(detail.appointment.rating.as_deref(), Some("fun"));

        let Ok(reread) = fx.service.get_for_clown(&fx.clown, appt.id).await else {
            panic!("lookup failed");
        };
        assert_eq!(reread.appointment.status, AppointmentStatus::Completed);
    }

    #[tokio::test]
    async fn transitions_are_unconstrained() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        for status in ["cancelled", "upcoming", "completed", "incipient"] {
            let result = fx.service.update_status(&fx.clown, appt.id, status).await;
            assert!(result.is_ok(), "transition to {status} should be allowed");
        }
    }

    #[tokio::test]
    async fn not_found_precedes_status_validation() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        let result = fx
            .service
            .update_status(&fx.foreign_clown, appt.id, "done")
            .await;
        assert!(matches!(result, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn raise_issue_appends_record() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;

        let Ok(issue) = fx
            .service
            .raise_issue(
                &fx.clown,
                appt.id,
                "Late".to_string(),
                "Traffic on the bridge".to_string(),
            )
            .await
        else {
            panic!("issue failed");
        };
        assert_eq!(issue.appointment_id, appt.id);
        assert_eq!(fx.store.issues().await, vec![issue]);
    }

    #[tokio::test]
    async fn raise_issue_on_missing_appointment_writes_nothing() {
        let fx = fixture().await;
        let result = fx
            .service
            .raise_issue(
                &fx.clown,
                AppointmentId::new(),
                "Late".to_string(),
                "Traffic".to_string(),
            )
            .await;
        assert!(matches!(result, Err(BookingError::NotFound(_))));
        assert!(fx.store.issues().await.is_empty());
    }

    #[tokio::test]
    async fn request_client_details_logs_then_returns_contact() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        let Caller::Clown { clown_id, .. } = fx.clown else {
            panic!("fixture clown");
        };

        let Ok(contact) = fx
            .service
            .request_client_details(&fx.clown, appt.id, "verify address".to_string())
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(
            contact,
            ClientContact {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                number: "555-0100".to_string(),
            }
        );

        let log = fx.store.details_requests().await;
        assert_eq!(log.len(), 1);
        let Some(entry) = log.first() else {
            panic!("log entry");
        };
        assert_eq!(entry.appointment_id, appt.id);
        assert_eq!(entry.clown_id, clown_id);
        assert_eq!(entry.reason, "verify address");
    }

    #[tokio::test]
    async fn request_client_details_on_missing_appointment_writes_nothing() {
        let fx = fixture().await;
        let result = fx
            .service
            .request_client_details(&fx.clown, AppointmentId::new(), "verify address".to_string())
            .await;
        assert!(matches!(result, Err(BookingError::NotFound(_))));
        assert!(fx.store.details_requests().await.is_empty());
    }

    #[tokio::test]
    async fn request_client_details_requires_clown() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        let result = fx
            .service
            .request_client_details(&fx.leader, appt.id, "verify address".to_string())
            .await;
        assert!(matches!(result, Err(BookingError::Forbidden(_))));
        assert!(fx.store.details_requests().await.is_empty());
    }

    #[tokio::test]
    async fn unprivileged_caller_is_forbidden_everywhere() {
        let fx = fixture().await;
        let appt = book(&fx, fx.client_id, slot()).await;
        let nobody = Caller::Unprivileged {
            user_id: UserId::new(),
        };

        assert!(matches!(
            fx.service.create(&nobody, fx.client_id, slot()).await,
            Err(BookingError::Forbidden(_))
        ));
        assert!(matches!(
            fx.service.list_for_client(&nobody, TimeFilter::All).await,
            Err(BookingError::Forbidden(_))
        ));
        assert!(matches!(
            fx.service.get_for_client(&nobody, appt.id).await,
            Err(BookingError::Forbidden(_))
        ));
        assert!(matches!(
            fx.service.list_for_clown(&nobody).await,
            Err(BookingError::Forbidden(_))
        ));
        assert!(matches!(
            fx.service.update_status(&nobody, appt.id, "completed").await,
            Err(BookingError::Forbidden(_))
        ));
        assert!(matches!(
            fx.service
                .raise_issue(&nobody, appt.id, "t".to_string(), "d".to_string())
                .await,
            Err(BookingError::Forbidden(_))
        ));
    }
}

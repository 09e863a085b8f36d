//! In-process storage backed by `tokio::sync::RwLock` maps.
//!
//! [`MemoryStore`] implements both storage traits. It backs the unit tests
//! and local runs with `PERSISTENCE_ENABLED=false`. Slot uniqueness is
//! checked and recorded under a single write lock, so concurrent creates
//! for the same slot cannot both succeed.
//!
//! Party records come from a [`MemorySeed`] document for local runs, or
//! from the `add_*` helpers in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{AppointmentRepository, OwnerScope, PartyDirectory};
use crate::domain::{
    Appointment, AppointmentDetail, AppointmentId, AppointmentIssue, AppointmentPatch, Client,
    ClientDetailsRequest, ClientId, Clown, ClownId, TimeFilter, Troupe, TroupeId, TroupeLeader,
    TroupeLeaderId, UserId,
};
use crate::error::BookingError;

#[derive(Debug, Default)]
struct Parties {
    clients: HashMap<ClientId, Client>,
    troupes: HashMap<TroupeId, Troupe>,
    leaders: HashMap<TroupeLeaderId, TroupeLeader>,
    clowns: HashMap<ClownId, Clown>,
}

impl Parties {
    fn detail(&self, appointment: Appointment) -> Result<AppointmentDetail, BookingError> {
        let client = self.clients.get(&appointment.client_id).cloned().ok_or_else(|| {
            BookingError::Internal(format!(
                "appointment {} references unknown client {}",
                appointment.id, appointment.client_id
            ))
        })?;
        let troupe = self.troupes.get(&appointment.troupe_id).cloned().ok_or_else(|| {
            BookingError::Internal(format!(
                "appointment {} references unknown troupe {}",
                appointment.id, appointment.troupe_id
            ))
        })?;
        Ok(AppointmentDetail {
            appointment,
            client,
            troupe,
        })
    }
}

/// Party records loaded into a [`MemoryStore`] at startup.
///
/// Every list may be omitted from the JSON document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemorySeed {
    /// Bookable troupes.
    pub troupes: Vec<Troupe>,
    /// Client profiles.
    pub clients: Vec<Client>,
    /// Troupe-leader profiles; each must reference a known troupe.
    pub troupe_leaders: Vec<TroupeLeader>,
    /// Clown profiles; each must reference a known troupe.
    pub clowns: Vec<Clown>,
}

impl MemorySeed {
    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] if the document is not
    /// valid seed JSON.
    pub fn from_json(json: &str) -> Result<Self, BookingError> {
        serde_json::from_str(json)
            .map_err(|e| BookingError::InvalidArgument(format!("invalid memory seed: {e}")))
    }
}

/// In-memory implementation of [`AppointmentRepository`] and
/// [`PartyDirectory`].
///
/// Lock order is always appointments first, then parties.
#[derive(Debug, Default)]
pub struct MemoryStore {
    appointments: RwLock<HashMap<AppointmentId, Appointment>>,
    issues: RwLock<Vec<AppointmentIssue>>,
    details_requests: RwLock<Vec<ClientDetailsRequest>>,
    parties: RwLock<Parties>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client.
    pub async fn add_client(&self, client: Client) {
        self.parties.write().await.clients.insert(client.id, client);
    }

    /// Registers a troupe.
    pub async fn add_troupe(&self, troupe: Troupe) {
        self.parties.write().await.troupes.insert(troupe.id, troupe);
    }

    /// Registers a troupe leader.
    pub async fn add_troupe_leader(&self, leader: TroupeLeader) {
        self.parties.write().await.leaders.insert(leader.id, leader);
    }

    /// Registers a clown.
    pub async fn add_clown(&self, clown: Clown) {
        self.parties.write().await.clowns.insert(clown.id, clown);
    }

    /// Registers every party in `seed`.
    ///
    /// References are checked before anything is inserted, so a rejected
    /// seed leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] if a troupe leader or
    /// clown references a troupe that is neither seeded nor registered.
    pub async fn load_seed(&self, seed: MemorySeed) -> Result<(), BookingError> {
        let mut parties = self.parties.write().await;
        let known = |troupe_id: &TroupeId| {
            parties.troupes.contains_key(troupe_id)
                || seed.troupes.iter().any(|troupe| troupe.id == *troupe_id)
        };
        if let Some(leader) = seed.troupe_leaders.iter().find(|l| !known(&l.troupe_id)) {
            return Err(BookingError::InvalidArgument(format!(
                "troupe leader {} references unknown troupe {}",
                leader.id, leader.troupe_id
            )));
        }
        if let Some(clown) = seed.clowns.iter().find(|c| !known(&c.troupe_id)) {
            return Err(BookingError::InvalidArgument(format!(
                "clown {} references unknown troupe {}",
                clown.id, clown.troupe_id
            )));
        }

        parties
            .troupes
            .extend(seed.troupes.into_iter().map(|troupe| (troupe.id, troupe)));
        parties
            .clients
            .extend(seed.clients.into_iter().map(|client| (client.id, client)));
        parties
            .leaders
            .extend(seed.troupe_leaders.into_iter().map(|leader| (leader.id, leader)));
        parties
            .clowns
            .extend(seed.clowns.into_iter().map(|clown| (clown.id, clown)));
        Ok(())
    }

    /// Returns every stored appointment, in no particular order.
    pub async fn appointments(&self) -> Vec<Appointment> {
        self.appointments.read().await.values().cloned().collect()
    }

    /// Returns every logged issue, oldest first.
    pub async fn issues(&self) -> Vec<AppointmentIssue> {
        self.issues.read().await.clone()
    }

    /// Returns every logged client-details request, oldest first.
    pub async fn details_requests(&self) -> Vec<ClientDetailsRequest> {
        self.details_requests.read().await.clone()
    }

    async fn require_annotation_refs(
        &self,
        appointment_id: AppointmentId,
        clown_id: ClownId,
    ) -> Result<(), BookingError> {
        if !self.appointments.read().await.contains_key(&appointment_id) {
            return Err(BookingError::Persistence(format!(
                "appointment {appointment_id} does not exist"
            )));
        }
        if !self.parties.read().await.clowns.contains_key(&clown_id) {
            return Err(BookingError::Persistence(format!(
                "clown {clown_id} does not exist"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn insert_if_absent(
        &self,
        appointment: Appointment,
    ) -> Result<Appointment, BookingError> {
        let mut map = self.appointments.write().await;
        {
            let parties = self.parties.read().await;
            if !parties.clients.contains_key(&appointment.client_id) {
                return Err(BookingError::Persistence(format!(
                    "client {} does not exist",
                    appointment.client_id
                )));
            }
            if !parties.troupes.contains_key(&appointment.troupe_id) {
                return Err(BookingError::Persistence(format!(
                    "troupe {} does not exist",
                    appointment.troupe_id
                )));
            }
        }
        let taken = map.values().any(|existing| {
            existing.troupe_id == appointment.troupe_id
                && existing.scheduled_at == appointment.scheduled_at
        });
        if taken {
            return Err(BookingError::Conflict(
                "an appointment with that date already exists".to_string(),
            ));
        }
        map.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> Result<Option<AppointmentDetail>, BookingError> {
        let found = self.appointments.read().await.get(&id).cloned();
        match found {
            Some(appointment) => self.parties.read().await.detail(appointment).map(Some),
            None => Ok(None),
        }
    }

    async fn find_scoped(
        &self,
        id: AppointmentId,
        scope: OwnerScope,
    ) -> Result<Option<AppointmentDetail>, BookingError> {
        let found = self
            .appointments
            .read()
            .await
            .get(&id)
            .filter(|appointment| scope.admits(appointment))
            .cloned();
        match found {
            Some(appointment) => self.parties.read().await.detail(appointment).map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_owner(
        &self,
        scope: OwnerScope,
        filter: TimeFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetail>, BookingError> {
        let mut matched: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .values()
            .filter(|appointment| {
                scope.admits(appointment) && filter.admits(appointment.scheduled_at, now)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.scheduled_at
                .cmp(&a.scheduled_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        let parties = self.parties.read().await;
        matched
            .into_iter()
            .map(|appointment| parties.detail(appointment))
            .collect()
    }

    async fn update_fields(
        &self,
        id: AppointmentId,
        scope: OwnerScope,
        patch: AppointmentPatch,
    ) -> Result<Option<AppointmentDetail>, BookingError> {
        let updated = {
            let mut map = self.appointments.write().await;
            match map.get_mut(&id).filter(|appointment| scope.admits(appointment)) {
                Some(appointment) => {
                    appointment.apply(patch);
                    Some(appointment.clone())
                }
                None => None,
            }
        };
        match updated {
            Some(appointment) => self.parties.read().await.detail(appointment).map(Some),
            None => Ok(None),
        }
    }

    async fn append_issue(
        &self,
        issue: AppointmentIssue,
    ) -> Result<AppointmentIssue, BookingError> {
        self.require_annotation_refs(issue.appointment_id, issue.clown_id)
            .await?;
        self.issues.write().await.push(issue.clone());
        Ok(issue)
    }

    async fn append_details_request(
        &self,
        request: ClientDetailsRequest,
    ) -> Result<ClientDetailsRequest, BookingError> {
        self.require_annotation_refs(request.appointment_id, request.clown_id)
            .await?;
        self.details_requests.write().await.push(request.clone());
        Ok(request)
    }
}

#[async_trait]
impl PartyDirectory for MemoryStore {
    async fn client(&self, id: ClientId) -> Result<Option<Client>, BookingError> {
        Ok(self.parties.read().await.clients.get(&id).cloned())
    }

    async fn troupe(&self, id: TroupeId) -> Result<Option<Troupe>, BookingError> {
        Ok(self.parties.read().await.troupes.get(&id).cloned())
    }

    async fn client_for_user(&self, user_id: UserId) -> Result<Option<Client>, BookingError> {
        Ok(self
            .parties
            .read()
            .await
            .clients
            .values()
            .find(|client| client.user_id == user_id)
            .cloned())
    }

    async fn troupe_leader_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<TroupeLeader>, BookingError> {
        Ok(self
            .parties
            .read()
            .await
            .leaders
            .values()
            .find(|leader| leader.user_id == user_id)
            .cloned())
    }

    async fn clown_for_user(&self, user_id: UserId) -> Result<Option<Clown>, BookingError> {
        Ok(self
            .parties
            .read()
            .await
            .clowns
            .values()
            .find(|clown| clown.user_id == user_id)
            .cloned())
    }
}

//! Parties to an appointment: clients, troupes, troupe leaders and clowns.
//!
//! These records belong to the external user system. The booking service
//! only reads them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{ClientId, ClownId, TroupeId, TroupeLeaderId, UserId};

/// The customer who books and rates appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client identifier.
    pub id: ClientId,
    /// Account the client profile belongs to.
    pub user_id: UserId,
    /// Contact person's name.
    pub contact_name: String,
    /// Contact email address.
    pub contact_email: String,
    /// Contact phone number.
    pub contact_number: String,
}

impl Client {
    /// Returns the privileged contact block for this client.
    #[must_use]
    pub fn contact(&self) -> ClientContact {
        ClientContact {
            name: self.contact_name.clone(),
            email: self.contact_email.clone(),
            number: self.contact_number.clone(),
        }
    }
}

/// A client's contact details, released to clowns only after a logged
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClientContact {
    /// Contact person's name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub number: String,
}

/// A group of clowns; the unit that gets booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Troupe {
    /// Troupe identifier.
    pub id: TroupeId,
    /// Display name.
    pub name: String,
}

/// Leads exactly one troupe and books appointments on its behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroupeLeader {
    /// Leader identifier.
    pub id: TroupeLeaderId,
    /// Account the leader profile belongs to.
    pub user_id: UserId,
    /// The led troupe.
    pub troupe_id: TroupeId,
}

/// A member of exactly one troupe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clown {
    /// Clown identifier.
    pub id: ClownId,
    /// Account the clown profile belongs to.
    pub user_id: UserId,
    /// The troupe the clown performs with.
    pub troupe_id: TroupeId,
    /// Rank within the troupe.
    pub rank: String,
}

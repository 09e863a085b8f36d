//! Domain layer: entities, identifiers, and the resolved caller.
//!
//! This module contains the booking domain model: typed identifiers, the
//! appointment aggregate with its status enumeration, the parties to an
//! appointment, append-only annotations, and the role-tagged [`Caller`].

pub mod annotation;
pub mod appointment;
pub mod caller;
pub mod ids;
pub mod party;

pub use annotation::{AppointmentIssue, ClientDetailsRequest};
pub use appointment::{
    Appointment, AppointmentDetail, AppointmentPatch, AppointmentStatus, TimeFilter,
};
pub use caller::{Caller, ClownRef, Role};
pub use ids::{
    AppointmentId, ClientId, ClownId, DetailsRequestId, IssueId, TroupeId, TroupeLeaderId, UserId,
};
pub use party::{Client, ClientContact, Clown, Troupe, TroupeLeader};

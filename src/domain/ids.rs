//! Type-safe entity identifiers.
//!
//! Every entity gets its own newtype wrapper around [`uuid::Uuid`] (v4) so
//! that, for example, a [`ClientId`] can never be passed where a
//! [`TroupeId`] is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, ToSchema, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Creates a new random identifier (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Creates an identifier from an existing [`uuid::Uuid`].
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner [`uuid::Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of an account in the external user system.
    UserId
);
entity_id!(
    /// Identifier of an [`super::Appointment`].
    AppointmentId
);
entity_id!(
    /// Identifier of a [`super::Client`].
    ClientId
);
entity_id!(
    /// Identifier of a [`super::Troupe`].
    TroupeId
);
entity_id!(
    /// Identifier of a [`super::TroupeLeader`].
    TroupeLeaderId
);
entity_id!(
    /// Identifier of a [`super::Clown`].
    ClownId
);
entity_id!(
    /// Identifier of an [`super::AppointmentIssue`].
    IssueId
);
entity_id!(
    /// Identifier of a [`super::ClientDetailsRequest`].
    DetailsRequestId
);

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(AppointmentId::new(), AppointmentId::new());
    }

    #[test]
    fn display_is_uuid_format() {
        let s = ClientId::new().to_string();
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let id = TroupeId::from_uuid(uuid);
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn from_uuid_round_trip() {
        let uuid = uuid::Uuid::new_v4();
        let id = ClownId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
        assert_eq!(uuid::Uuid::from(id), uuid);
    }
}

//! The resolved identity of a request.
//!
//! A [`Caller`] is produced once per request by the identity provider and
//! then pattern-matched by every lifecycle operation.

use super::ids::{ClientId, ClownId, TroupeId, TroupeLeaderId, UserId};
use crate::error::BookingError;

/// Booking roles an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Books and rates appointments.
    Client,
    /// Creates appointments for their troupe.
    TroupeLeader,
    /// Works appointments for their troupe.
    Clown,
}

impl Role {
    /// Returns the role name as carried in token claims.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::TroupeLeader => "troupe_leader",
            Self::Clown => "clown",
        }
    }

    /// Parses a claim value. Unknown roles yield `None`.
    #[must_use]
    pub fn from_claim(role: &str) -> Option<Self> {
        match role {
            "client" => Some(Self::Client),
            "troupe_leader" => Some(Self::TroupeLeader),
            "clown" => Some(Self::Clown),
            _ => None,
        }
    }

    fn denial(self) -> BookingError {
        let name = match self {
            Self::Client => "client",
            Self::TroupeLeader => "troupe leader",
            Self::Clown => "clown",
        };
        BookingError::Forbidden(format!(
            "you are not a {name} and can not access {name} functions"
        ))
    }
}

/// A clown together with the troupe they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClownRef {
    /// The clown.
    pub clown_id: ClownId,
    /// The clown's troupe.
    pub troupe_id: TroupeId,
}

/// An authenticated caller, tagged by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// A client account.
    Client {
        /// Account id.
        user_id: UserId,
        /// The caller's client profile.
        client_id: ClientId,
    },
    /// A troupe leader account.
    TroupeLeader {
        /// Account id.
        user_id: UserId,
        /// The caller's leader profile.
        leader_id: TroupeLeaderId,
        /// The troupe they lead.
        troupe_id: TroupeId,
    },
    /// A clown account.
    Clown {
        /// Account id.
        user_id: UserId,
        /// The caller's clown profile.
        clown_id: ClownId,
        /// The troupe they perform with.
        troupe_id: TroupeId,
    },
    /// Authenticated, but holding no booking role.
    Unprivileged {
        /// Account id.
        user_id: UserId,
    },
}

impl Caller {
    /// Returns the account id regardless of role.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        match self {
            Self::Client { user_id, .. }
            | Self::TroupeLeader { user_id, .. }
            | Self::Clown { user_id, .. }
            | Self::Unprivileged { user_id } => *user_id,
        }
    }

    /// Returns the caller's role, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Client { .. } => Some(Role::Client),
            Self::TroupeLeader { .. } => Some(Role::TroupeLeader),
            Self::Clown { .. } => Some(Role::Clown),
            Self::Unprivileged { .. } => None,
        }
    }

    /// Returns the client profile of a client caller.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] for any other caller.
    pub fn require_client(&self) -> Result<ClientId, BookingError> {
        match self {
            Self::Client { client_id, .. } => Ok(*client_id),
            _ => Err(Role::Client.denial()),
        }
    }

    /// Returns the troupe led by a troupe-leader caller.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] for any other caller.
    pub fn require_troupe_leader(&self) -> Result<TroupeId, BookingError> {
        match self {
            Self::TroupeLeader { troupe_id, .. } => Ok(*troupe_id),
            _ => Err(Role::TroupeLeader.denial()),
        }
    }

    /// Returns the clown profile and troupe of a clown caller.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] for any other caller.
    pub fn require_clown(&self) -> Result<ClownRef, BookingError> {
        match self {
            Self::Clown {
                clown_id,
                troupe_id,
                ..
            } => Ok(ClownRef {
                clown_id: *clown_id,
                troupe_id: *troupe_id,
            }),
            _ => Err(Role::Clown.denial()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn role_claims_round_trip() {
        for role in [Role::Client, Role::TroupeLeader, Role::Clown] {
            assert_eq!(Role::from_claim(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_claim("admin"), None);
    }

    #[test]
    fn client_cannot_act_as_clown() {
        let caller = Caller::Client {
            user_id: UserId::new(),
            client_id: ClientId::new(),
        };
        let Err(BookingError::Forbidden(msg)) = caller.require_clown() else {
            panic!("expected Forbidden");
        };
        assert_eq!(msg, "you are not a clown and can not access clown functions");
    }

    #[test]
    fn unprivileged_holds_no_role() {
        let caller = Caller::Unprivileged {
            user_id: UserId::new(),
        };
        assert!(caller.role().is_none());
        assert!(caller.require_client().is_err());
        assert!(caller.require_troupe_leader().is_err());
        assert!(caller.require_clown().is_err());
    }

    #[test]
    fn clown_ref_carries_troupe() {
        let troupe_id = TroupeId::new();
        let clown_id = ClownId::new();
        let caller = Caller::Clown {
            user_id: UserId::new(),
            clown_id,
            troupe_id,
        };
        let Ok(clown) = caller.require_clown() else {
            panic!("expected clown");
        };
        assert_eq!(clown.troupe_id, troupe_id);
        assert_eq!(clown.clown_id, clown_id);
    }
}

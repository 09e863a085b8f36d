//! Appointment aggregate, its status enumeration, and list filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{AppointmentId, ClientId, TroupeId};
use super::party::{Client, Troupe};
use crate::error::BookingError;

/// Maximum length of a client's rating, in characters.
pub const MAX_RATING_LEN: usize = 128;

/// Fractional-second digits kept on stored timestamps.
pub const STORED_SUBSEC_DIGITS: u16 = 6;

/// Lifecycle state of an appointment.
///
/// Every appointment starts as [`AppointmentStatus::Upcoming`]. A clown of
/// the owning troupe may move it to any of the four states; no ordering is
/// enforced between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked and not yet started.
    Upcoming,
    /// About to start or in progress.
    Incipient,
    /// Finished.
    Completed,
    /// Called off.
    Cancelled,
}

impl AppointmentStatus {
    /// All valid states.
    pub const ALL: [Self; 4] = [
        Self::Upcoming,
        Self::Incipient,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the wire / storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Incipient => "incipient",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                BookingError::InvalidArgument("the status you provided is not valid".to_string())
            })
    }
}

/// A booking between a client and a troupe.
///
/// `id`, `created_at`, `scheduled_at`, `client_id` and `troupe_id` never
/// change after creation. At most one appointment exists per
/// (`troupe_id`, `scheduled_at`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: AppointmentId,
    /// Server timestamp of creation.
    pub created_at: DateTime<Utc>,
    /// When the troupe is booked for.
    pub scheduled_at: DateTime<Utc>,
    /// Owning client.
    pub client_id: ClientId,
    /// Booked troupe.
    pub troupe_id: TroupeId,
    /// Current lifecycle state.
    pub status: AppointmentStatus,
    /// Free-text rating left by the client.
    pub rating: Option<String>,
}

impl Appointment {
    /// Creates a fresh `upcoming` appointment with no rating.
    ///
    /// Both timestamps are truncated to microseconds, the precision of a
    /// PostgreSQL `TIMESTAMPTZ`, so every store compares slots alike.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        troupe_id: TroupeId,
        scheduled_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            created_at: now.trunc_subsecs(STORED_SUBSEC_DIGITS),
            scheduled_at: scheduled_at.trunc_subsecs(STORED_SUBSEC_DIGITS),
            client_id,
            troupe_id,
            status: AppointmentStatus::Upcoming,
            rating: None,
        }
    }

    /// Applies a single-field patch. All other fields are left untouched.
    pub fn apply(&mut self, patch: AppointmentPatch) {
        match patch {
            AppointmentPatch::Status(status) => self.status = status,
            AppointmentPatch::Rating(rating) => self.rating = rating,
        }
    }
}

/// The only mutations an appointment admits after creation.
///
/// Each variant touches exactly one field, which keeps the client path
/// (rating) and the clown path (status) from ever writing anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentPatch {
    /// Replace the status.
    Status(AppointmentStatus),
    /// Replace (or clear) the rating.
    Rating(Option<String>),
}

impl AppointmentPatch {
    /// Builds a rating patch from client input. An empty string clears the
    /// rating.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] if the rating exceeds
    /// [`MAX_RATING_LEN`] characters.
    pub fn rating(rating: String) -> Result<Self, BookingError> {
        if rating.chars().count() > MAX_RATING_LEN {
            return Err(BookingError::InvalidArgument(format!(
                "rating must be at most {MAX_RATING_LEN} characters"
            )));
        }
        Ok(Self::Rating((!rating.is_empty()).then_some(rating)))
    }
}

/// Time window applied to a client's appointment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    /// Every appointment.
    #[default]
    All,
    /// `scheduled_at >= now`.
    Upcoming,
    /// `scheduled_at < now`.
    Past,
}

impl TimeFilter {
    /// Returns `true` if an appointment at `scheduled_at` passes the filter.
    #[must_use]
    pub fn admits(self, scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Upcoming => scheduled_at >= now,
            Self::Past => scheduled_at < now,
        }
    }
}

/// An appointment joined with its client and troupe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetail {
    /// The appointment record.
    pub appointment: Appointment,
    /// The owning client.
    pub client: Client,
    /// The booked troupe.
    pub troupe: Troupe,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parses_every_known_status() {
        for status in AppointmentStatus::ALL {
            let Ok(parsed) = status.as_str().parse::<AppointmentStatus>() else {
                panic!("{status} should parse");
            };
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let result = "done".parse::<AppointmentStatus>();
        let Err(BookingError::InvalidArgument(msg)) = result else {
            panic!("expected InvalidArgument");
        };
        assert_eq!(msg, "the status you provided is not valid");
    }

    #[test]
    fn status_parsing_is_case_sensitive() {
        assert!("Completed".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn new_appointment_is_upcoming_and_unrated() {
        let now = Utc::now();
        let appt = Appointment::new(ClientId::new(), TroupeId::new(), now, now);
        assert_eq!(appt.status, AppointmentStatus::Upcoming);
        assert!(appt.rating.is_none());
        assert_eq!(appt.created_at, now.trunc_subsecs(STORED_SUBSEC_DIGITS));
    }

    #[test]
    fn timestamps_are_truncated_to_microseconds() {
        let Some(base) = DateTime::from_timestamp(1_750_000_000, 123_456_100) else {
            panic!("valid timestamp");
        };
        let appt = Appointment::new(ClientId::new(), TroupeId::new(), base, base);
        assert_eq!(appt.scheduled_at.timestamp_subsec_nanos(), 123_456_000);
        assert_eq!(appt.created_at.timestamp_subsec_nanos(), 123_456_000);

        let nearby = Appointment::new(
            ClientId::new(),
            TroupeId::new(),
            base + Duration::nanoseconds(500),
            base,
        );
        assert_eq!(nearby.scheduled_at, appt.scheduled_at);
    }

    #[test]
    fn status_patch_touches_only_status() {
        let now = Utc::now();
        let mut appt = Appointment::new(ClientId::new(), TroupeId::new(), now, now);
        appt.rating = Some("great".to_string());
        let before = appt.clone();

        appt.apply(AppointmentPatch::Status(AppointmentStatus::Cancelled));

        assert_eq!(appt.status, AppointmentStatus::Cancelled);
        assert_eq!(appt.rating, before.rating);
        assert_eq!(appt.scheduled_at, before.scheduled_at);
        assert_eq!(appt.client_id, before.client_id);
        assert_eq!(appt.troupe_id, before.troupe_id);
    }

    #[test]
    fn empty_rating_clears() {
        let Ok(patch) = AppointmentPatch::rating(String::new()) else {
            panic!("empty rating is valid");
        };
        assert_eq!(patch, AppointmentPatch::Rating(None));
    }

    #[test]
    fn overlong_rating_is_rejected() {
        let result = AppointmentPatch::rating("x".repeat(MAX_RATING_LEN + 1));
        assert!(matches!(result, Err(BookingError::InvalidArgument(_))));
    }

    #[test]
    fn time_filter_boundaries() {
        let now = Utc::now();
        let past = now - Duration::days(1);
        assert!(TimeFilter::All.admits(past, now));
        assert!(TimeFilter::Upcoming.admits(now, now));
        assert!(!TimeFilter::Upcoming.admits(past, now));
        assert!(TimeFilter::Past.admits(past, now));
        assert!(!TimeFilter::Past.admits(now, now));
    }
}

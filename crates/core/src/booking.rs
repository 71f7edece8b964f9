//! Appointment status enum, state machine, pricing totals, and the
//! client-cancellation window.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future worker or CLI tooling.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::CoreError;

/// Minimum advance notice, in hours, for a client-initiated cancellation.
/// Admins bypass the window.
pub const CANCELLATION_WINDOW_HOURS: f64 = 2.0;

/// Lifecycle status of an appointment. Stored as uppercase text in the
/// `appointments.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    /// Booked without choosing a coiffeur; waits for the salon to assign one.
    PendingAssignment,
    /// Booked with a coiffeur; waits for salon confirmation.
    Pending,
    Confirmed,
    /// Alternate confirmation path entered via on-site payment.
    ConfirmedOnSite,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 8] = [
        AppointmentStatus::PendingAssignment,
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::ConfirmedOnSite,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// Statuses a caller may request through the status-update endpoint.
    /// `PENDING_ASSIGNMENT` and `CONFIRMED_ON_SITE` are only ever entered
    /// by the booking and payment flows respectively.
    pub const UPDATABLE: [AppointmentStatus; 6] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::PendingAssignment => "PENDING_ASSIGNMENT",
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::ConfirmedOnSite => "CONFIRMED_ON_SITE",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }

    /// Parse a stored or client-supplied status value.
    ///
    /// The error message enumerates the valid values so a client can
    /// correct its request without consulting documentation.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{value}'. Valid values: {}",
                    Self::ALL.map(|s| s.as_str()).join(", ")
                ))
            })
    }

    /// Parse a target status for the status-update endpoint, restricted to
    /// [`AppointmentStatus::UPDATABLE`].
    pub fn parse_updatable(value: &str) -> Result<Self, CoreError> {
        Self::UPDATABLE
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{value}'. Valid values: {}",
                    Self::UPDATABLE.map(|s| s.as_str()).join(", ")
                ))
            })
    }

    /// Whether this status counts as occupying the coiffeur's calendar.
    /// Cancelled and no-show appointments free their interval.
    pub fn occupies_calendar(self) -> bool {
        !matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    /// Terminal statuses have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    /// The set of statuses reachable from `self`.
    ///
    /// Cancellation and no-show are reachable from every non-terminal
    /// status; the forward path is
    /// `PENDING_ASSIGNMENT -> PENDING -> CONFIRMED -> IN_PROGRESS -> COMPLETED`
    /// with `CONFIRMED_ON_SITE` as the on-site-payment confirmation branch.
    pub fn valid_transitions(self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            PendingAssignment => &[Pending, Confirmed, ConfirmedOnSite, Cancelled, NoShow],
            Pending => &[Confirmed, ConfirmedOnSite, InProgress, Cancelled, NoShow],
            Confirmed => &[InProgress, Completed, Cancelled, NoShow],
            ConfirmedOnSite => &[InProgress, Completed, Cancelled, NoShow],
            InProgress => &[Completed, Cancelled, NoShow],
            Completed | Cancelled | NoShow => &[],
        }
    }

    pub fn can_transition(self, to: AppointmentStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a transition, returning a descriptive validation error for
    /// invalid ones.
    pub fn validate_transition(self, to: AppointmentStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Invalid status transition: {} -> {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

/// Price and duration of one requested service, as read from the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct ServiceQuote {
    pub duration_minutes: i32,
    pub price: f64,
}

/// Sum the durations and prices of all requested services.
///
/// A booking with several services occupies one contiguous interval whose
/// length is the sum of the services' durations, and its total price is the
/// sum of their prices.
pub fn quote_totals(services: &[ServiceQuote]) -> (i32, f64) {
    services.iter().fold((0, 0.0), |(mins, price), s| {
        (mins + s.duration_minutes, price + s.price)
    })
}

/// Signed number of hours between `now` and the appointment's scheduled
/// start (negative when the start is in the past).
pub fn hours_until_start(date: NaiveDate, start: NaiveTime, now: DateTime<Utc>) -> f64 {
    let start_at = date.and_time(start).and_utc();
    (start_at - now).num_minutes() as f64 / 60.0
}

/// Whether a client may still cancel: strictly more than
/// [`CANCELLATION_WINDOW_HOURS`] before the scheduled start.
pub fn cancellable_by_client(date: NaiveDate, start: NaiveTime, now: DateTime<Utc>) -> bool {
    hours_until_start(date, start, now) > CANCELLATION_WINDOW_HOURS
}

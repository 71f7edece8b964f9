//! Appointment entity model and list filter.

use chrono::{NaiveDate, NaiveTime};
use salonet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `appointments` table.
///
/// `status` holds one of the uppercase values of
/// [`salonet_core::booking::AppointmentStatus`]; parse at use sites.
/// `coiffeur_id` stays `NULL` until the salon assigns staff.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub client_id: DbId,
    pub salon_id: DbId,
    pub coiffeur_id: Option<DbId>,
    pub service_id: DbId,
    pub date: NaiveDate,
    #[serde(serialize_with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: String,
    pub total_price: f64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Serialize a time-of-day as `"HH:MM"`, matching the wire format the
/// booking endpoints accept.
fn hhmm<S: serde::Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&salonet_core::timeslot::format_hhmm(*time))
}

/// Insert payload for a new appointment.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client_id: DbId,
    pub salon_id: DbId,
    pub coiffeur_id: Option<DbId>,
    pub service_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub total_price: f64,
    pub notes: Option<String>,
}

/// Optional filters for appointment listing.
#[derive(Debug, Default, Clone)]
pub struct AppointmentFilter {
    /// Exact status match, e.g. `"CONFIRMED"`.
    pub status: Option<String>,
    /// Inclusive lower bound on the appointment date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the appointment date.
    pub to: Option<NaiveDate>,
}

//! Salon and opening-hours entity models.

use chrono::NaiveTime;
use salonet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `salons` table. One salon per owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Salon {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `salon_hours` table: the opening hours for one weekday
/// (0 = Sunday .. 6 = Saturday), at most one row per (salon, weekday).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalonHours {
    pub id: DbId,
    pub salon_id: DbId,
    pub day_of_week: i16,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

//! Service catalogue entity model.

use salonet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `services` table.
///
/// `duration_minutes` drives both the slot grid and the conflict interval
/// length; `price` feeds the booking total.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub salon_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub created_at: Timestamp,
}

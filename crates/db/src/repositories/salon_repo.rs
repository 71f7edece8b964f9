//! Repository for the `salons` and `salon_hours` tables.

use salonet_core::types::DbId;
use sqlx::PgPool;

use crate::models::salon::{Salon, SalonHours};

const SALON_COLUMNS: &str = "id, owner_id, name, address, created_at";
const HOURS_COLUMNS: &str = "id, salon_id, day_of_week, open_time, close_time, is_closed";

/// Provides salon lookups and opening-hours resolution.
pub struct SalonRepo;

impl SalonRepo {
    /// Fetch one salon by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Salon>, sqlx::Error> {
        let query = format!("SELECT {SALON_COLUMNS} FROM salons WHERE id = $1");
        sqlx::query_as::<_, Salon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the salon owned by a user (owner_id is unique).
    pub async fn get_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Option<Salon>, sqlx::Error> {
        let query = format!("SELECT {SALON_COLUMNS} FROM salons WHERE owner_id = $1");
        sqlx::query_as::<_, Salon>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// The opening-hours row for one weekday (0 = Sunday .. 6 = Saturday),
    /// if one exists.
    pub async fn hours_for_day(
        pool: &PgPool,
        salon_id: DbId,
        day_of_week: i16,
    ) -> Result<Option<SalonHours>, sqlx::Error> {
        let query = format!(
            "SELECT {HOURS_COLUMNS} FROM salon_hours \
             WHERE salon_id = $1 AND day_of_week = $2"
        );
        sqlx::query_as::<_, SalonHours>(&query)
            .bind(salon_id)
            .bind(day_of_week)
            .fetch_optional(pool)
            .await
    }
}

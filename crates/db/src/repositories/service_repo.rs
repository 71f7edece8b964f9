//! Repository for the `services` table.

use salonet_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::Service;

const COLUMNS: &str = "id, salon_id, name, category, price, duration_minutes, created_at";

/// Provides service catalogue lookups.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Fetch one service by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the requested services of one salon. Services belonging to a
    /// different salon are not returned; the caller detects unknown ids by
    /// comparing lengths.
    pub async fn list_for_salon_by_ids(
        pool: &PgPool,
        salon_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services WHERE salon_id = $1 AND id = ANY($2)"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(salon_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `coiffeurs` table.

use salonet_core::types::DbId;
use sqlx::PgPool;

use crate::models::coiffeur::Coiffeur;

const COLUMNS: &str = "id, salon_id, user_id, is_available, created_at";

/// Provides coiffeur lookups.
pub struct CoiffeurRepo;

impl CoiffeurRepo {
    /// Fetch one coiffeur by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Coiffeur>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coiffeurs WHERE id = $1");
        sqlx::query_as::<_, Coiffeur>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the coiffeur record linked to a user identity, if any. Used to
    /// scope appointment listing for coiffeur-roled users.
    pub async fn get_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Coiffeur>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coiffeurs WHERE user_id = $1");
        sqlx::query_as::<_, Coiffeur>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}

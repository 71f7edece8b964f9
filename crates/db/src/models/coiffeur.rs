//! Coiffeur (staff) entity model.

use salonet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `coiffeurs` table. Belongs to exactly one salon and links
/// to a user identity for display attributes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coiffeur {
    pub id: DbId,
    pub salon_id: DbId,
    pub user_id: DbId,
    pub is_available: bool,
    pub created_at: Timestamp,
}

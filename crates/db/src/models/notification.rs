//! Notification entity model.

use salonet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
///
/// The durable record is the source of truth for a user's inbox; real-time
/// push is best-effort on top of it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

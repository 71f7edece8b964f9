//! Chat message entity model.

use salonet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `chat_messages` table. Immutable once created; at least
/// one of `text`/`audio_url` is present (enforced by a table CHECK).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub appointment_id: DbId,
    pub sender_id: DbId,
    pub text: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: Timestamp,
}

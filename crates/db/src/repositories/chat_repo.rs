//! Repository for the `chat_messages` table.

use salonet_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat_message::ChatMessage;

const COLUMNS: &str = "id, appointment_id, sender_id, text, audio_url, created_at";

/// Provides the per-appointment message thread.
pub struct ChatRepo;

impl ChatRepo {
    /// Append a message to an appointment's thread, returning the created
    /// row. The table CHECK rejects rows with neither text nor audio.
    pub async fn create(
        pool: &PgPool,
        appointment_id: DbId,
        sender_id: DbId,
        text: Option<&str>,
        audio_url: Option<&str>,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (appointment_id, sender_id, text, audio_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(appointment_id)
            .bind(sender_id)
            .bind(text)
            .bind(audio_url)
            .fetch_one(pool)
            .await
    }

    /// The full thread of an appointment, ascending by creation time.
    pub async fn list_for_appointment(
        pool: &PgPool,
        appointment_id: DbId,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chat_messages \
             WHERE appointment_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(appointment_id)
            .fetch_all(pool)
            .await
    }
}

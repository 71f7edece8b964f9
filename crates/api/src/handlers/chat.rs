//! Handlers for the per-appointment chat thread.
//!
//! Messages are text, a voice clip, or both; voice clips arrive as a
//! multipart part and are stored through the configured [`MediaStore`].

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use salonet_core::error::CoreError;
use salonet_core::kinds::KIND_CHAT;
use salonet_core::types::DbId;
use salonet_db::models::chat_message::ChatMessage;
use salonet_db::repositories::ChatRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::appointment::{load_appointment, require_access};
use crate::media::MAX_VOICE_BYTES;
use crate::middleware::AuthUser;
use crate::response::{success, ApiResponse};
use crate::state::AppState;

/// GET /api/v1/appointments/{id}/messages
///
/// The full thread of an appointment, ascending by creation time. Only the
/// participants (and admins) may read it.
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<ChatMessage>>>> {
    let (appointment, salon) = load_appointment(&state, id).await?;
    require_access(&user, &appointment, &salon)?;

    let messages = ChatRepo::list_for_appointment(&state.pool, appointment.id).await?;
    Ok(success(messages))
}

/// POST /api/v1/appointments/{id}/messages
///
/// Append a message to the thread. The multipart body accepts a `text` field
/// and/or a `voice` file part (audio, max 12 MB); at least one is required.
/// The counterpart receives a notification and a real-time push.
pub async fn post_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<ChatMessage>>)> {
    let (appointment, salon) = load_appointment(&state, id).await?;
    require_access(&user, &appointment, &salon)?;

    let mut text: Option<String> = None;
    let mut audio_url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "text" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid text field: {e}")))?;
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    text = Some(trimmed.to_string());
                }
            }
            "voice" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !content_type.starts_with("audio/") {
                    return Err(CoreError::Validation(format!(
                        "Voice attachments must be audio, got {content_type}"
                    ))
                    .into());
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid voice field: {e}")))?;
                if data.len() > MAX_VOICE_BYTES {
                    return Err(CoreError::Validation(format!(
                        "Voice clip exceeds the {} MB limit",
                        MAX_VOICE_BYTES / (1024 * 1024)
                    ))
                    .into());
                }
                audio_url = Some(state.media.store_voice(&data, &content_type).await?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    if text.is_none() && audio_url.is_none() {
        return Err(CoreError::Validation(
            "A message requires text or a voice clip".into(),
        )
        .into());
    }

    let message = ChatRepo::create(
        &state.pool,
        appointment.id,
        user.user_id,
        text.as_deref(),
        audio_url.as_deref(),
    )
    .await?;

    // The counterpart is the other side of the booking.
    let recipient_id = if user.user_id == appointment.client_id {
        salon.owner_id
    } else {
        appointment.client_id
    };

    if recipient_id != user.user_id {
        state.dispatcher.notify_detached(
            recipient_id,
            KIND_CHAT,
            format!("New message about your appointment on {}", appointment.date),
        );
        state.dispatcher.push_chat(recipient_id, &message);
    }

    Ok((StatusCode::CREATED, success(message)))
}

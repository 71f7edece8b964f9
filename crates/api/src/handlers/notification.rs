//! Handlers for the `/notifications` resource.
//!
//! Every endpoint is scoped to the authenticated user; there is no way to
//! read or mutate another user's notifications.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use salonet_core::error::CoreError;
use salonet_core::types::DbId;
use salonet_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::{success, success_message, success_with_message, ApiResponse};
use crate::state::AppState;

/// Default page size for the notification list.
const DEFAULT_LIMIT: i64 = 30;
/// Hard cap on the notification list page size.
const MAX_LIMIT: i64 = 100;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/notifications
///
/// The caller's notifications, newest first (default 30, max 100), together
/// with their unread count.
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let notifications = NotificationRepo::list_for_user(&state.pool, user.user_id, limit).await?;
    let unread = NotificationRepo::unread_count(&state.pool, user.user_id).await?;

    Ok(success(json!({
        "notifications": notifications,
        "unread": unread,
    })))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let unread = NotificationRepo::unread_count(&state.pool, user.user_id).await?;
    Ok(success(json!({ "unread": unread })))
}

/// PATCH /api/v1/notifications/{id}/read
///
/// Mark one notification as read. 404 if it does not exist or belongs to
/// another user.
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let updated = NotificationRepo::mark_read(&state.pool, id, user.user_id).await?;
    if !updated {
        return Err(CoreError::NotFound {
            entity: "Notification",
            id,
        }
        .into());
    }
    Ok(success_message("Notification marked as read"))
}

/// PATCH /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let marked = NotificationRepo::mark_all_read(&state.pool, user.user_id).await?;
    Ok(success_with_message(
        "All notifications marked as read",
        json!({ "marked": marked }),
    ))
}

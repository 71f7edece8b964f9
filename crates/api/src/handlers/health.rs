//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::AppResult;
use crate::response::{success, ApiResponse};
use crate::state::AppState;

/// GET /health
///
/// Liveness and readiness probe: verifies database connectivity and reports
/// the number of live WebSocket connections.
pub async fn health(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    salonet_db::health_check(&state.pool).await?;
    let connections = state.hub.connection_count().await;

    Ok(success(json!({
        "database": "ok",
        "websocketConnections": connections,
    })))
}

use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use salonet_core::types::DbId;
use serde::Deserialize;

use crate::auth::jwt::validate_token;
use crate::state::AppState;
use crate::ws::events::{self, EVENT_CONNECTED, EVENT_PONG};
use crate::ws::hub::Hub;

/// Close code sent to clients that fail authentication.
const CLOSE_UNAUTHORIZED: u16 = 4401;

/// Query parameters accepted by the WebSocket endpoint.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// JWT access token; browsers cannot set headers on WebSocket upgrades.
    pub token: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// The access token is taken from the `token` query parameter, falling back
/// to a `token` cookie. The upgrade is always completed so the client gets a
/// proper close frame; unauthenticated sockets are closed with code 4401
/// immediately after the handshake.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let token = query.token.or_else(|| token_from_cookie(&headers));

    let user_id = token
        .and_then(|t| validate_token(&t, &state.config.jwt).ok())
        .map(|claims| claims.sub);

    ws.on_upgrade(move |socket| handle_socket(socket, state.hub.clone(), user_id))
}

/// Extract the `token` cookie value from request headers, if present.
fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("cookie")?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == "token" {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Manage a single WebSocket connection after upgrade.
///
/// Unauthenticated connections are closed with code 4401. Authenticated
/// connections are registered with the [`Hub`], greeted with a
/// `realtime:connected` event, and then serviced by two tasks:
///   1. A spawned sender task forwarding hub channel messages to the sink.
///   2. The receive loop on the current task (handles `ping` frames).
async fn handle_socket(socket: WebSocket, hub: Arc<Hub>, user_id: Option<DbId>) {
    let Some(user_id) = user_id else {
        let mut socket = socket;
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: CLOSE_UNAUTHORIZED,
                reason: "unauthorized".into(),
            })))
            .await;
        tracing::debug!("Rejected unauthenticated WebSocket connection");
        return;
    };

    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(user_id, conn_id = %conn_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = hub.register(user_id, conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Confirm the connection before any events arrive.
    hub.send_to_connection(
        user_id,
        &conn_id,
        events::envelope(EVENT_CONNECTED, serde_json::json!({ "userId": user_id })),
    )
    .await;

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                handle_client_frame(&hub, user_id, &conn_id, &text).await;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    hub.unregister(user_id, &conn_id).await;
    send_task.abort();
    tracing::info!(user_id, conn_id = %conn_id, "WebSocket disconnected");
}

/// Handle a client-sent text frame. Only `{"type": "ping"}` is meaningful;
/// malformed or unknown frames are ignored.
async fn handle_client_frame(hub: &Hub, user_id: DbId, conn_id: &str, text: &str) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        tracing::trace!(conn_id = %conn_id, "Ignoring malformed client frame");
        return;
    };

    if value.get("type").and_then(|t| t.as_str()) == Some("ping") {
        hub.send_to_connection(
            user_id,
            conn_id,
            events::envelope(
                EVENT_PONG,
                serde_json::json!({ "time": chrono::Utc::now() }),
            ),
        )
        .await;
    }
}

pub mod appointment;
pub mod health;
pub mod notification;
pub mod payment;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                              WebSocket (token auth)
///
/// /appointments                                    list, create
/// /appointments/availability/{coiffeur_id}         bookable slots (public)
/// /appointments/{id}                               get, cancel
/// /appointments/{id}/status                        lifecycle update (PATCH)
/// /appointments/{id}/assign-coiffeur               staff assignment (PATCH)
/// /appointments/{id}/messages                      chat thread (GET, POST)
///
/// /notifications                                   list
/// /notifications/read-all                          mark all read (PATCH)
/// /notifications/unread-count                      unread counter
/// /notifications/{id}/read                         mark one read (PATCH)
///
/// /payments                                        record payment (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/appointments", appointment::router())
        .nest("/notifications", notification::router())
        .nest("/payments", payment::router())
}

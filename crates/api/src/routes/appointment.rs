//! Route definitions for the `/appointments` resource.
//!
//! The availability endpoint is public; everything else requires
//! authentication (enforced by the `AuthUser` extractor on each handler).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{appointment, chat};
use crate::media::MAX_VOICE_BYTES;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET    /                           -> list_appointments
/// POST   /                           -> create_appointment
/// GET    /availability/{coiffeur_id} -> availability (public)
/// GET    /{id}                       -> get_appointment
/// DELETE /{id}                       -> cancel_appointment
/// PATCH  /{id}/status                -> update_status
/// PATCH  /{id}/assign-coiffeur       -> assign_coiffeur
/// GET    /{id}/messages              -> list_messages
/// POST   /{id}/messages              -> post_message (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(appointment::list_appointments).post(appointment::create_appointment),
        )
        .route(
            "/availability/{coiffeur_id}",
            get(appointment::availability),
        )
        .route(
            "/{id}",
            get(appointment::get_appointment).delete(appointment::cancel_appointment),
        )
        .route("/{id}/status", patch(appointment::update_status))
        .route("/{id}/assign-coiffeur", patch(appointment::assign_coiffeur))
        .route(
            "/{id}/messages",
            get(chat::list_messages).post(chat::post_message),
        )
        // Voice clips go through this subtree; leave headroom for the other
        // multipart fields.
        .layer(DefaultBodyLimit::max(MAX_VOICE_BYTES + 64 * 1024))
}

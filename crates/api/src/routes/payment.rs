//! Route definitions for the `/payments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST   /  -> record_payment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(payment::record_payment))
}

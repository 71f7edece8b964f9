//! WebSocket infrastructure for real-time notification and chat delivery.
//!
//! Provides per-user connection management, heartbeat monitoring, the typed
//! event envelope, and the authenticated HTTP upgrade handler used by Axum
//! routes.

pub mod events;
mod handler;
mod heartbeat;
pub mod hub;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use hub::Hub;

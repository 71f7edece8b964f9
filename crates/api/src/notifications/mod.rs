//! Notification dispatch infrastructure.
//!
//! The [`Dispatcher`] persists a notification row first, then pushes it to
//! any of the recipient's live WebSocket connections.

pub mod dispatcher;

pub use dispatcher::Dispatcher;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::media::MediaStore;
use crate::notifications::Dispatcher;
use crate::ws::Hub;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: salonet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Real-time connection hub (browser/mobile clients).
    pub hub: Arc<Hub>,
    /// Persist-then-push notification dispatcher.
    pub dispatcher: Arc<Dispatcher>,
    /// Voice attachment storage (file-storage collaborator).
    pub media: Arc<dyn MediaStore>,
}

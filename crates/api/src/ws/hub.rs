use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use salonet_core::types::DbId;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// A single WebSocket connection.
pub struct HubConnection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
}

/// Manages all active WebSocket connections, keyed by authenticated user.
///
/// A user may hold several simultaneous connections (multiple tabs or
/// devices); each is identified by a connection id and tracked in the inner
/// map. Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`
/// and shared across the application.
pub struct Hub {
    connections: RwLock<HashMap<DbId, HashMap<String, HubConnection>>>,
}

impl Hub {
    /// Create a new, empty hub.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection for a user.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn register(
        &self,
        user_id: DbId,
        conn_id: String,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = HubConnection { sender: tx };
        self.connections
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(conn_id, conn);
        rx
    }

    /// Remove a connection; the user's entry is pruned once its last
    /// connection is gone.
    pub async fn unregister(&self, user_id: DbId, conn_id: &str) {
        let mut conns = self.connections.write().await;
        if let Some(user_conns) = conns.get_mut(&user_id) {
            user_conns.remove(conn_id);
            if user_conns.is_empty() {
                conns.remove(&user_id);
            }
        }
    }

    /// Send a message to every connection belonging to a specific user.
    ///
    /// Returns the number of connections the message was sent to; `0` means
    /// the user is offline. Connections whose send channels are closed are
    /// silently skipped (they are cleaned up on their receive loop exit).
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let Some(user_conns) = conns.get(&user_id) else {
            return 0;
        };
        let mut count = 0;
        for conn in user_conns.values() {
            if conn.sender.send(message.clone()).is_ok() {
                count += 1;
            }
        }
        count
    }

    /// Send a message to one specific connection of a user.
    ///
    /// Returns `true` if the message was queued.
    pub async fn send_to_connection(&self, user_id: DbId, conn_id: &str, message: Message) -> bool {
        let conns = self.connections.read().await;
        conns
            .get(&user_id)
            .and_then(|user_conns| user_conns.get(conn_id))
            .map(|conn| conn.sender.send(message).is_ok())
            .unwrap_or(false)
    }

    /// Return the current number of active connections across all users.
    pub async fn connection_count(&self) -> usize {
        self.connections
            .read()
            .await
            .values()
            .map(|user_conns| user_conns.len())
            .sum()
    }

    /// Return the number of distinct users currently connected.
    pub async fn user_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for user_conns in conns.values() {
            for conn in user_conns.values() {
                let _ = conn.sender.send(Message::Ping(Bytes::new()));
            }
        }
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count: usize = conns.values().map(|user_conns| user_conns.len()).sum();
        for user_conns in conns.values() {
            for conn in user_conns.values() {
                let _ = conn.sender.send(Message::Close(None));
            }
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

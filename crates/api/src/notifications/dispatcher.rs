use std::sync::Arc;

use salonet_core::types::DbId;
use salonet_db::models::chat_message::ChatMessage;
use salonet_db::models::notification::Notification;
use salonet_db::repositories::NotificationRepo;
use salonet_db::DbPool;

use crate::ws::events::{self, EVENT_CHAT, EVENT_NOTIFICATION};
use crate::ws::Hub;

/// Persist-then-push notification dispatcher.
///
/// Delivery order is fixed: the notification row is written first, and the
/// WebSocket push happens afterwards on a detached task. A recipient who is
/// offline (or whose push fails) still finds the notification when they next
/// fetch their list.
pub struct Dispatcher {
    pool: DbPool,
    hub: Arc<Hub>,
}

impl Dispatcher {
    pub fn new(pool: DbPool, hub: Arc<Hub>) -> Self {
        Self { pool, hub }
    }

    /// Create a notification for `user_id` and push it to their live
    /// connections.
    ///
    /// Returns the persisted row. The push is spawned on a detached task so
    /// the caller never waits on (or fails because of) socket delivery.
    pub async fn notify(
        &self,
        user_id: DbId,
        kind: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        let notification = NotificationRepo::create(&self.pool, user_id, kind, message).await?;

        let hub = Arc::clone(&self.hub);
        let payload = notification.clone();
        tokio::spawn(async move {
            let delivered = hub
                .send_to_user(user_id, events::envelope(EVENT_NOTIFICATION, &payload))
                .await;
            tracing::debug!(user_id, delivered, "Pushed notification");
        });

        Ok(notification)
    }

    /// Like [`notify`](Self::notify), but runs entirely on a detached task.
    ///
    /// Used where notification delivery must never affect the outcome of the
    /// triggering request (e.g. chat side-notifications). Persistence errors
    /// are logged, not propagated.
    pub fn notify_detached(&self, user_id: DbId, kind: &'static str, message: String) {
        let pool = self.pool.clone();
        let hub = Arc::clone(&self.hub);
        tokio::spawn(async move {
            match NotificationRepo::create(&pool, user_id, kind, &message).await {
                Ok(notification) => {
                    let delivered = hub
                        .send_to_user(user_id, events::envelope(EVENT_NOTIFICATION, &notification))
                        .await;
                    tracing::debug!(user_id, delivered, "Pushed notification");
                }
                Err(e) => {
                    tracing::error!(user_id, error = %e, "Failed to persist notification");
                }
            }
        });
    }

    /// Push a chat message to the recipient's live connections.
    ///
    /// The message row is already persisted by the chat handler; this only
    /// performs the real-time push.
    pub fn push_chat(&self, recipient_id: DbId, message: &ChatMessage) {
        let hub = Arc::clone(&self.hub);
        let payload = message.clone();
        tokio::spawn(async move {
            let delivered = hub
                .send_to_user(recipient_id, events::envelope(EVENT_CHAT, &payload))
                .await;
            tracing::debug!(recipient_id, delivered, "Pushed chat message");
        });
    }
}

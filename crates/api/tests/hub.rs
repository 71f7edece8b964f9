//! Unit tests for the WebSocket `Hub`.
//!
//! These tests exercise the per-user connection registry directly, without
//! performing any HTTP upgrades. They verify register/unregister semantics,
//! per-user delivery, pruning of empty user entries, and graceful shutdown.

use axum::extract::ws::Message;
use salonet_api::ws::Hub;

// ---------------------------------------------------------------------------
// Test: new hub starts empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_hub_is_empty() {
    let hub = Hub::new();

    assert_eq!(hub.connection_count().await, 0);
    assert_eq!(hub.user_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: register() tracks connections and users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_increments_counts() {
    let hub = Hub::new();

    let _rx1 = hub.register(1, "conn-a".to_string()).await;
    let _rx2 = hub.register(1, "conn-b".to_string()).await;
    let _rx3 = hub.register(2, "conn-c".to_string()).await;

    assert_eq!(hub.connection_count().await, 3);
    assert_eq!(hub.user_count().await, 2);
}

// ---------------------------------------------------------------------------
// Test: unregister() prunes the user entry once its last connection is gone
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unregister_prunes_empty_user() {
    let hub = Hub::new();

    let _rx1 = hub.register(1, "conn-a".to_string()).await;
    let _rx2 = hub.register(1, "conn-b".to_string()).await;
    assert_eq!(hub.user_count().await, 1);

    hub.unregister(1, "conn-a").await;
    assert_eq!(hub.connection_count().await, 1);
    assert_eq!(hub.user_count().await, 1);

    hub.unregister(1, "conn-b").await;
    assert_eq!(hub.connection_count().await, 0);
    assert_eq!(hub.user_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: unregister() with unknown ids is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unregister_unknown_is_noop() {
    let hub = Hub::new();

    let _rx = hub.register(1, "conn-a".to_string()).await;
    hub.unregister(1, "nonexistent").await;
    hub.unregister(99, "conn-a").await;

    assert_eq!(hub.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: send_to_user() reaches every connection of that user, and only them
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_user_reaches_all_their_connections() {
    let hub = Hub::new();

    let mut rx1 = hub.register(1, "conn-a".to_string()).await;
    let mut rx2 = hub.register(1, "conn-b".to_string()).await;
    let mut rx3 = hub.register(2, "conn-c".to_string()).await;

    let delivered = hub.send_to_user(1, Message::Text("for user 1".into())).await;
    assert_eq!(delivered, 2);

    let msg1 = rx1.recv().await.expect("rx1 should receive");
    let msg2 = rx2.recv().await.expect("rx2 should receive");
    assert!(matches!(&msg1, Message::Text(t) if *t == "for user 1"));
    assert!(matches!(&msg2, Message::Text(t) if *t == "for user 1"));

    // User 2 must not see the message.
    assert!(
        rx3.try_recv().is_err(),
        "user 2 must not receive user 1's message"
    );
}

// ---------------------------------------------------------------------------
// Test: send_to_user() for an offline user delivers to nobody
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_offline_user_delivers_nothing() {
    let hub = Hub::new();

    let delivered = hub.send_to_user(42, Message::Text("anyone?".into())).await;
    assert_eq!(delivered, 0);
}

// ---------------------------------------------------------------------------
// Test: send_to_connection() targets a single connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_connection_targets_one() {
    let hub = Hub::new();

    let mut rx1 = hub.register(1, "conn-a".to_string()).await;
    let mut rx2 = hub.register(1, "conn-b".to_string()).await;

    let sent = hub
        .send_to_connection(1, "conn-a", Message::Text("only a".into()))
        .await;
    assert!(sent);

    let msg = rx1.recv().await.expect("rx1 should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "only a"));
    assert!(rx2.try_recv().is_err(), "conn-b must not receive");

    let sent = hub
        .send_to_connection(1, "nonexistent", Message::Text("nobody".into()))
        .await;
    assert!(!sent);
}

// ---------------------------------------------------------------------------
// Test: send_to_user() skips closed channels without panicking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_user_skips_closed_channels() {
    let hub = Hub::new();

    let rx1 = hub.register(1, "conn-a".to_string()).await;
    let mut rx2 = hub.register(1, "conn-b".to_string()).await;

    // Drop rx1 to close its channel.
    drop(rx1);

    let delivered = hub
        .send_to_user(1, Message::Text("still alive".into()))
        .await;
    assert_eq!(delivered, 1);

    let msg = rx2.recv().await.expect("rx2 should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "still alive"));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let hub = Hub::new();

    let mut rx1 = hub.register(1, "conn-a".to_string()).await;
    let mut rx2 = hub.register(2, "conn-b".to_string()).await;
    assert_eq!(hub.connection_count().await, 2);

    hub.shutdown_all().await;

    // Connection count should be zero after shutdown.
    assert_eq!(hub.connection_count().await, 0);
    assert_eq!(hub.user_count().await, 0);

    // Both receivers should have received a Close message.
    let msg1 = rx1.recv().await.expect("rx1 should receive Close");
    assert!(
        matches!(msg1, Message::Close(None)),
        "Expected Close(None), got: {msg1:?}"
    );

    let msg2 = rx2.recv().await.expect("rx2 should receive Close");
    assert!(
        matches!(msg2, Message::Close(None)),
        "Expected Close(None), got: {msg2:?}"
    );

    // After Close, the channel should be closed (no more messages).
    assert!(
        rx1.recv().await.is_none(),
        "Channel should be closed after shutdown"
    );
}

// ---------------------------------------------------------------------------
// Test: registering with a duplicate connection id replaces the previous one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_conn_id_replaces_previous_connection() {
    let hub = Hub::new();

    let _rx_old = hub.register(1, "conn-a".to_string()).await;
    assert_eq!(hub.connection_count().await, 1);

    // Re-register with the same id -- should replace, not duplicate.
    let mut rx_new = hub.register(1, "conn-a".to_string()).await;
    assert_eq!(hub.connection_count().await, 1);

    let delivered = hub.send_to_user(1, Message::Text("replaced".into())).await;
    assert_eq!(delivered, 1);
    let msg = rx_new.recv().await.expect("new rx should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "replaced"));
}

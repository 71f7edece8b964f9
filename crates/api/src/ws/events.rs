//! Typed event envelope for WebSocket frames.
//!
//! Every server-pushed frame is a JSON text message of the shape
//! `{"type": "<event>", "payload": {...}}`.

use axum::extract::ws::Message;
use serde::Serialize;

/// Sent once right after a successful authenticated upgrade.
pub const EVENT_CONNECTED: &str = "realtime:connected";
/// A notification was created for the connected user.
pub const EVENT_NOTIFICATION: &str = "notification:new";
/// A chat message arrived in one of the user's appointment threads.
pub const EVENT_CHAT: &str = "chat:new";
/// Reply to a client-sent `ping` frame.
pub const EVENT_PONG: &str = "pong";

/// Build a WebSocket text frame carrying the standard event envelope.
pub fn envelope<T: Serialize>(event: &str, payload: T) -> Message {
    let body = serde_json::json!({
        "type": event,
        "payload": payload,
    });
    Message::Text(body.to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let msg = envelope(EVENT_NOTIFICATION, serde_json::json!({"id": 3}));
        let Message::Text(text) = msg else {
            panic!("expected a text frame");
        };
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "notification:new");
        assert_eq!(value["payload"]["id"], 3);
    }
}

//! Well-known notification kind constants.
//!
//! These must match the values accepted by the `notifications.kind` column
//! and the tags the client uses to group its inbox. The column also accepts
//! `review` and `suggestion` rows written by the companion services that
//! share the database; this backend only ever emits the kinds below.

/// A booking was created, assigned, or changed status.
pub const KIND_BOOKING: &str = "booking";

/// A new chat message arrived on an appointment thread.
pub const KIND_CHAT: &str = "chat";

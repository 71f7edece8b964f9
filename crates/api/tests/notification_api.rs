//! HTTP-level integration tests for the `/notifications` endpoints and the
//! persist-then-push dispatcher.
//!
//! Every endpoint is scoped to the authenticated user; these tests pin down
//! that one user's reads never leak into another's inbox.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{bearer_for, body_json, build_test_app, get_auth, patch_auth, seed_user};
use sqlx::PgPool;

use salonet_api::notifications::Dispatcher;
use salonet_api::ws::Hub;
use salonet_core::kinds::KIND_BOOKING;
use salonet_db::repositories::NotificationRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Two users with two unread notifications each.
async fn two_inboxes(pool: &PgPool) -> (i64, i64, i64) {
    let alice = seed_user(pool, "alice@test.com", "client").await;
    let bob = seed_user(pool, "bob@test.com", "client").await;

    let first = NotificationRepo::create(pool, alice, KIND_BOOKING, "Booking confirmed")
        .await
        .unwrap();
    NotificationRepo::create(pool, alice, KIND_BOOKING, "Booking cancelled")
        .await
        .unwrap();
    NotificationRepo::create(pool, bob, KIND_BOOKING, "New booking")
        .await
        .unwrap();
    NotificationRepo::create(pool, bob, KIND_BOOKING, "Another booking")
        .await
        .unwrap();

    (alice, bob, first.id)
}

async fn unread_of(app: axum::Router, user_id: i64) -> i64 {
    let auth = bearer_for(user_id, "client");
    let r = get_auth(app, "/api/v1/notifications/unread-count", &auth).await;
    assert_eq!(r.status(), StatusCode::OK);
    body_json(r).await["data"]["unread"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: marking one notification read leaves other users' inboxes untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_does_not_touch_other_users_unread_count(pool: PgPool) {
    let (alice, bob, alice_first) = two_inboxes(&pool).await;
    let app = build_test_app(pool);

    let auth = bearer_for(alice, "client");
    let r = patch_auth(
        app.clone(),
        &format!("/api/v1/notifications/{alice_first}/read"),
        &auth,
    )
    .await;
    assert_eq!(r.status(), StatusCode::OK);

    assert_eq!(unread_of(app.clone(), alice).await, 1);
    assert_eq!(unread_of(app, bob).await, 2, "Bob's inbox must be untouched");
}

// ---------------------------------------------------------------------------
// Test: a user cannot mark another user's notification read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_rejects_foreign_notification(pool: PgPool) {
    let (alice, bob, alice_first) = two_inboxes(&pool).await;
    let app = build_test_app(pool);

    // Bob tries to mark one of Alice's notifications as read.
    let auth = bearer_for(bob, "client");
    let r = patch_auth(
        app.clone(),
        &format!("/api/v1/notifications/{alice_first}/read"),
        &auth,
    )
    .await;
    assert_eq!(r.status(), StatusCode::NOT_FOUND);

    assert_eq!(unread_of(app.clone(), alice).await, 2);
    assert_eq!(unread_of(app, bob).await, 2);
}

// ---------------------------------------------------------------------------
// Test: read-all reports the marked count and is scoped to the caller
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_all_read_is_scoped_to_the_caller(pool: PgPool) {
    let (alice, bob, _) = two_inboxes(&pool).await;
    let app = build_test_app(pool);

    let auth = bearer_for(alice, "client");
    let r = patch_auth(app.clone(), "/api/v1/notifications/read-all", &auth).await;
    assert_eq!(r.status(), StatusCode::OK);

    let json = body_json(r).await;
    assert_eq!(json["message"], "All notifications marked as read");
    assert_eq!(json["data"]["marked"], 2);

    assert_eq!(unread_of(app.clone(), alice).await, 0);
    assert_eq!(unread_of(app, bob).await, 2, "Bob's inbox must be untouched");
}

// ---------------------------------------------------------------------------
// Test: the dispatcher persists the notification before returning
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn dispatcher_notify_persists_before_returning(pool: PgPool) {
    let alice = seed_user(&pool, "alice@test.com", "client").await;
    let dispatcher = Dispatcher::new(pool.clone(), Arc::new(Hub::new()));

    let notification = dispatcher
        .notify(alice, KIND_BOOKING, "Your appointment is confirmed")
        .await
        .expect("notify should persist the row");

    assert_eq!(notification.user_id, alice);
    assert_eq!(notification.kind, "booking");
    assert!(!notification.is_read);

    // Durable immediately, without waiting on any push task.
    let unread = NotificationRepo::unread_count(&pool, alice).await.unwrap();
    assert_eq!(unread, 1);
}

//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as production)
//! on top of the pool provided by `#[sqlx::test]`, plus request/seed helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use salonet_api::auth::jwt::{generate_access_token, JwtConfig};
use salonet_api::config::ServerConfig;
use salonet_api::media::LocalMediaStore;
use salonet_api::notifications::Dispatcher;
use salonet_api::router::build_app_router;
use salonet_api::state::AppState;
use salonet_api::ws::Hub;

/// JWT configuration with a fixed secret so tests can mint their own tokens.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 60,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. Media lands in a shared temp directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_dir: std::env::temp_dir()
            .join("salonet-test-media")
            .to_string_lossy()
            .into_owned(),
        public_base_url: "http://localhost:3000".to_string(),
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let hub = Arc::new(Hub::new());
    let dispatcher = Arc::new(Dispatcher::new(pool.clone(), Arc::clone(&hub)));
    let media = Arc::new(
        LocalMediaStore::new(&config.media_dir, &config.public_base_url)
            .expect("media dir creation should succeed"),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        hub,
        dispatcher,
        media,
    };

    build_app_router(state, &config)
}

/// Mint an `Authorization` header value for the given user.
pub fn bearer_for(user_id: i64, role: &str) -> String {
    let token = generate_access_token(user_id, role, &test_jwt_config())
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send an authenticated GET request.
pub async fn get_auth(app: Router, uri: &str, auth: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated POST request with a JSON body.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    auth: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated PATCH request with a JSON body.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    auth: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated PATCH request with no body.
pub async fn patch_auth(app: Router, uri: &str, auth: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into a JSON value.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
//
// Users, salons, and catalogue rows are written by the external identity and
// salon-management collaborators in production, so there are no repository
// create methods for them; tests seed them directly.
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, role) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(role)
        .fetch_one(pool)
        .await
        .expect("user insert should succeed")
}

pub async fn seed_salon(pool: &PgPool, owner_id: i64, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO salons (owner_id, name) VALUES ($1, $2) RETURNING id")
        .bind(owner_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("salon insert should succeed")
}

pub async fn seed_service(pool: &PgPool, salon_id: i64, duration_minutes: i32) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO services (salon_id, name, price, duration_minutes) \
         VALUES ($1, 'Cut & Style', 45.0, $2) RETURNING id",
    )
    .bind(salon_id)
    .bind(duration_minutes)
    .fetch_one(pool)
    .await
    .expect("service insert should succeed")
}

pub async fn seed_coiffeur(pool: &PgPool, salon_id: i64, user_id: i64) -> i64 {
    sqlx::query_scalar("INSERT INTO coiffeurs (salon_id, user_id) VALUES ($1, $2) RETURNING id")
        .bind(salon_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("coiffeur insert should succeed")
}

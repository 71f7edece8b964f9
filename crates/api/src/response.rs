//! Uniform JSON success envelope.
//!
//! Every success response carries `{"status": "success"}` plus an optional
//! human-readable `message` and an optional `data` payload. Error responses
//! use the matching envelope produced by [`crate::error::AppError`].

use serde::Serialize;

/// The success envelope wrapper for all JSON responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `"success"` for this type.
    pub status: &'static str,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Wrap a payload in the success envelope: `{"status": "success", "data": ...}`.
pub fn success<T: Serialize>(data: T) -> axum::Json<ApiResponse<T>> {
    axum::Json(ApiResponse {
        status: "success",
        message: None,
        data: Some(data),
    })
}

/// A success envelope with a message and payload.
pub fn success_with_message<T: Serialize>(
    message: impl Into<String>,
    data: T,
) -> axum::Json<ApiResponse<T>> {
    axum::Json(ApiResponse {
        status: "success",
        message: Some(message.into()),
        data: Some(data),
    })
}

/// A bare success envelope with only a message, for operations with no payload.
pub fn success_message(message: impl Into<String>) -> axum::Json<ApiResponse<()>> {
    axum::Json(ApiResponse {
        status: "success",
        message: Some(message.into()),
        data: None,
    })
}

//! Liveness probe.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// GET /health - returns 200 as soon as the server accepts connections.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

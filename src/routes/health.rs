use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// Public by design: a garbage Authorization header must not block it.
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong" }))
}

use axum::{response::IntoResponse, Json};

/// Public liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "message": "Server is running",
    }))
}

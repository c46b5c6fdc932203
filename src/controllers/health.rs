use axum::{http::StatusCode, response::IntoResponse};

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

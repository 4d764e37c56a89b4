use axum::http::StatusCode;

/// Liveness probe; no auth, no state.
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use lambda_http::tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::scheduled_match::{MatchResult, ScheduledMatch};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches))
        .route("/matches/{id}/result", put(record_result))
}

/// Matches the caller plays in, on either side, oldest first.
async fn list_matches(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<ScheduledMatch>>, ApiError> {
    state
        .match_service
        .list_for_player(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn record_result(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(match_id): Path<String>,
    Json(payload): Json<MatchResult>,
) -> Result<Json<ScheduledMatch>, ApiError> {
    let updated = state
        .match_service
        .record_result(&match_id, &authenticated_user.user_id, payload)
        .await
        .map_err(|e| {
            error!("Failed to record result for match {}: {}", match_id, e);
            ApiError::from(e)
        })?;
    debug!("Result recorded for match {}", match_id);
    Ok(Json(updated))
}

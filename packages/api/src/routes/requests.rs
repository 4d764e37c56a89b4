use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use lambda_http::tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::match_request::{MatchRequest, SubmitMatchRequest};
use shared::models::scheduled_match::ScheduledMatch;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requests", post(submit_request))
        .route("/requests/incoming", get(list_incoming))
        .route("/requests/outgoing", get(list_outgoing))
        .route("/requests/{id}/accept", post(accept_request))
        .route("/requests/{id}/decline", post(decline_request))
        .route("/requests/{id}", delete(cancel_request))
}

async fn submit_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<SubmitMatchRequest>,
) -> Result<(StatusCode, Json<MatchRequest>), ApiError> {
    let request = state
        .match_request_service
        .submit_request(
            &authenticated_user.user_id,
            &payload.requestee_id,
            payload.proposed_date,
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to submit request from {} to {}: {}",
                authenticated_user.user_id, payload.requestee_id, e
            );
            ApiError::from(e)
        })?;
    debug!("Match request {} submitted", request.id);
    Ok((StatusCode::CREATED, Json(request)))
}

async fn list_incoming(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<MatchRequest>>, ApiError> {
    state
        .match_request_service
        .list_incoming(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn list_outgoing(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<MatchRequest>>, ApiError> {
    state
        .match_request_service
        .list_outgoing(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

/// Accepting returns the match created from the request.
async fn accept_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(request_id): Path<String>,
) -> Result<Json<ScheduledMatch>, ApiError> {
    let scheduled_match = state
        .match_request_service
        .accept_request(&request_id, &authenticated_user.user_id)
        .await
        .map_err(|e| {
            error!("Failed to accept request {}: {}", request_id, e);
            ApiError::from(e)
        })?;
    debug!(
        "Request {} accepted, match {} created",
        request_id, scheduled_match.id
    );
    Ok(Json(scheduled_match))
}

async fn decline_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(request_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .match_request_service
        .decline_request(&request_id, &authenticated_user.user_id)
        .await
        .map_err(|e| {
            error!("Failed to decline request {}: {}", request_id, e);
            ApiError::from(e)
        })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn cancel_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(request_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .match_request_service
        .cancel_request(&request_id, &authenticated_user.user_id)
        .await
        .map_err(|e| {
            error!("Failed to cancel request {}: {}", request_id, e);
            ApiError::from(e)
        })?;
    debug!("Request {} cancelled", request_id);
    Ok(StatusCode::NO_CONTENT)
}

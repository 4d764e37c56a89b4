use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use lambda_http::tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::profile::{CreateProfileRequest, PlayerProfile, ProfileUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", post(create_profile))
        .route("/profile", patch(update_profile))
}

async fn get_profile(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<PlayerProfile>, ApiError> {
    state
        .profile_service
        .get_profile(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

/// The profile's email comes from the authenticated account, not from the
/// request body.
async fn create_profile(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<PlayerProfile>), ApiError> {
    let account = state
        .user_service
        .get_account_by_id(&authenticated_user.user_id)
        .await
        .map_err(ApiError::from)?;

    let profile = state
        .profile_service
        .create_profile(
            &authenticated_user.user_id,
            &payload.name,
            &account.email,
            payload.skill_level,
            payload.availability,
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to create profile for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;

    debug!("Profile created for {}", authenticated_user.user_id);
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn update_profile(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<PlayerProfile>, ApiError> {
    state
        .profile_service
        .update_profile(&authenticated_user.user_id, payload)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to update profile for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

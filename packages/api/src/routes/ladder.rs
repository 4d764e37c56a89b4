use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::profile::PlayerProfile;

pub fn routes() -> Router<AppState> {
    Router::new().route("/ladder", get(ladder_standings))
}

#[derive(Debug, Deserialize)]
pub struct LadderQuery {
    pub limit: Option<usize>,
}

/// Active players ordered by stored ranking points, highest first.
async fn ladder_standings(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Query(query): Query<LadderQuery>,
) -> Result<Json<Vec<PlayerProfile>>, ApiError> {
    state
        .directory_service
        .ladder_standings(query.limit)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::directory::DirectoryFilter;
use shared::models::profile::{Availability, PlayerProfile, SkillLevel};
use shared::services::errors::profile_service_errors::ProfileServiceError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/players", get(search_players))
}

/// Directory query parameters. `availability` takes a comma-separated list
/// of slots, e.g. `availability=weekends,evenings`.
#[derive(Debug, Default, Deserialize)]
pub struct PlayersQuery {
    pub skill_level: Option<String>,
    pub availability: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

impl PlayersQuery {
    fn into_filter(self) -> Result<DirectoryFilter, ApiError> {
        let skill_level = self
            .skill_level
            .map(|value| value.parse::<SkillLevel>())
            .transpose()
            .map_err(|e| ApiError::ProfileService(ProfileServiceError::ValidationError(e)))?;

        let availability = match self.availability {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|slot| !slot.is_empty())
                .map(|slot| slot.parse::<Availability>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApiError::ProfileService(ProfileServiceError::ValidationError(e)))?,
            None => Vec::new(),
        };

        Ok(DirectoryFilter {
            skill_level,
            availability,
            is_active: self.is_active,
            search_term: self.search,
        })
    }
}

/// The caller never appears in their own directory results.
async fn search_players(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<PlayersQuery>,
) -> Result<Json<Vec<PlayerProfile>>, ApiError> {
    let filter = query.into_filter()?;
    state
        .directory_service
        .search_players(&filter, Some(&authenticated_user.user_id))
        .await
        .map(Json)
        .map_err(ApiError::from)
}

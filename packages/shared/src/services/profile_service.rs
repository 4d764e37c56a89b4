use std::sync::Arc;

use chrono::Utc;

use crate::models::profile::{Availability, PlayerProfile, ProfileUpdate, SkillLevel};
use crate::repositories::errors::profile_repository_errors::ProfileRepositoryError;
use crate::repositories::profile_repository::ProfileRepository;
use crate::services::errors::profile_service_errors::ProfileServiceError;

pub struct ProfileService {
    repository: Arc<dyn ProfileRepository + Send + Sync>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository + Send + Sync>) -> Self {
        ProfileService { repository }
    }

    /// Creates (or overwrites) the profile for `user_id`. Re-invoking on an
    /// existing id replaces the whole document.
    pub async fn create_profile(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        skill_level: SkillLevel,
        availability: Vec<Availability>,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        if user_id.is_empty() || name.is_empty() || email.is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "User ID, name and email are required".to_string(),
            ));
        }
        if availability.is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "At least one availability slot is required".to_string(),
            ));
        }

        let profile = PlayerProfile::new(user_id, name, email, skill_level, availability);
        self.repository
            .put_profile(&profile)
            .await
            .map_err(map_repository_error)?;
        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<PlayerProfile, ProfileServiceError> {
        if user_id.is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_profile(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or(ProfileServiceError::ProfileNotFound)
    }

    /// Merge-updates the profile and stamps `updated_at`. An update that
    /// would leave the availability set empty is rejected before anything is
    /// persisted.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        if user_id.is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        if update.is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "Update contains no fields".to_string(),
            ));
        }
        if let Some(availability) = &update.availability {
            if availability.is_empty() {
                return Err(ProfileServiceError::ValidationError(
                    "Availability cannot be empty".to_string(),
                ));
            }
        }
        if let Some(name) = &update.name {
            if name.is_empty() {
                return Err(ProfileServiceError::ValidationError(
                    "Name cannot be empty".to_string(),
                ));
            }
        }

        let updated_at = Utc::now();
        self.repository
            .update_profile(user_id, &update, updated_at)
            .await
            .map_err(map_repository_error)?;
        self.get_profile(user_id).await
    }
}

fn map_repository_error(error: ProfileRepositoryError) -> ProfileServiceError {
    match error {
        ProfileRepositoryError::NotFound => ProfileServiceError::ProfileNotFound,
        other => ProfileServiceError::RepositoryError(other.to_string()),
    }
}

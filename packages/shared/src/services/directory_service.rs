use std::sync::Arc;

use crate::models::directory::DirectoryFilter;
use crate::models::profile::PlayerProfile;
use crate::repositories::profile_repository::ProfileRepository;
use crate::services::errors::directory_service_errors::DirectoryServiceError;

/// Directory and ladder reads over the profile collection.
///
/// Every query is a full scan with client-side predicates, O(total profiles)
/// regardless of filter selectivity. Fine at club scale; move the predicates
/// behind indexed queries if the collection ever grows past that.
pub struct DirectoryService {
    repository: Arc<dyn ProfileRepository + Send + Sync>,
}

impl DirectoryService {
    pub fn new(repository: Arc<dyn ProfileRepository + Send + Sync>) -> Self {
        DirectoryService { repository }
    }

    pub async fn list_players(
        &self,
        exclude_user_id: Option<&str>,
    ) -> Result<Vec<PlayerProfile>, DirectoryServiceError> {
        let mut profiles = self
            .repository
            .scan_profiles()
            .await
            .map_err(|e| DirectoryServiceError::RepositoryError(e.to_string()))?;
        if let Some(exclude) = exclude_user_id {
            profiles.retain(|profile| profile.user_id != exclude);
        }
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }

    pub async fn search_players(
        &self,
        filter: &DirectoryFilter,
        exclude_user_id: Option<&str>,
    ) -> Result<Vec<PlayerProfile>, DirectoryServiceError> {
        let mut profiles = self.list_players(exclude_user_id).await?;
        profiles.retain(|profile| filter.matches(profile));
        Ok(profiles)
    }

    /// Ladder standings: active players ordered by stored ranking points,
    /// highest first, ties broken by name. The points are read back as-is;
    /// nothing in this system computes them.
    pub async fn ladder_standings(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<PlayerProfile>, DirectoryServiceError> {
        let mut profiles = self
            .repository
            .scan_profiles()
            .await
            .map_err(|e| DirectoryServiceError::RepositoryError(e.to_string()))?;
        profiles.retain(|profile| profile.is_active);
        profiles.sort_by(|a, b| {
            b.ranking_points
                .cmp(&a.ranking_points)
                .then_with(|| a.name.cmp(&b.name))
        });
        if let Some(limit) = limit {
            profiles.truncate(limit);
        }
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Availability, SkillLevel};
    use crate::repositories::profile_repository::tests::InMemoryProfileRepository;

    fn profile(
        user_id: &str,
        name: &str,
        skill_level: SkillLevel,
        availability: Vec<Availability>,
    ) -> PlayerProfile {
        PlayerProfile::new(
            user_id,
            name,
            &format!("{}@club.test", user_id),
            skill_level,
            availability,
        )
    }

    fn seeded_service() -> DirectoryService {
        let profiles = vec![
            profile(
                "user-a",
                "Alex Carter",
                SkillLevel::Advanced,
                vec![Availability::Weekends],
            ),
            profile(
                "user-b",
                "Sam Reed",
                SkillLevel::Advanced,
                vec![Availability::Weekdays],
            ),
            profile(
                "user-c",
                "Jo Walker",
                SkillLevel::Beginner,
                vec![Availability::Weekends, Availability::Evenings],
            ),
        ];
        DirectoryService::new(Arc::new(InMemoryProfileRepository::with_profiles(profiles)))
    }

    #[tokio::test]
    async fn test_list_players_excludes_requested_user() {
        let service = seeded_service();
        let players = service.list_players(Some("user-b")).await.unwrap();
        assert_eq!(players.len(), 2);
        assert!(players.iter().all(|p| p.user_id != "user-b"));
    }

    #[tokio::test]
    async fn test_search_advanced_weekends_excluding_caller() {
        let service = seeded_service();
        let filter = DirectoryFilter {
            skill_level: Some(SkillLevel::Advanced),
            availability: vec![Availability::Weekends],
            ..Default::default()
        };

        // user-c is the caller: beginner, but must be excluded regardless.
        let players = service
            .search_players(&filter, Some("user-c"))
            .await
            .unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].user_id, "user-a");
    }

    #[tokio::test]
    async fn test_search_skips_inactive_when_requested() {
        let mut inactive = profile(
            "user-d",
            "Pat Quinn",
            SkillLevel::Advanced,
            vec![Availability::Weekends],
        );
        inactive.is_active = false;
        let service = DirectoryService::new(Arc::new(InMemoryProfileRepository::with_profiles(
            vec![inactive],
        )));

        let filter = DirectoryFilter {
            is_active: Some(true),
            ..Default::default()
        };
        let players = service.search_players(&filter, None).await.unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_ladder_orders_by_points_then_name() {
        let mut first = profile(
            "user-a",
            "Alex Carter",
            SkillLevel::Advanced,
            vec![Availability::Weekends],
        );
        first.ranking_points = 1400;
        let mut tied_low = profile(
            "user-b",
            "Sam Reed",
            SkillLevel::Advanced,
            vec![Availability::Weekends],
        );
        tied_low.ranking_points = 1000;
        let mut inactive = profile(
            "user-c",
            "Jo Walker",
            SkillLevel::Beginner,
            vec![Availability::Weekends],
        );
        inactive.ranking_points = 2000;
        inactive.is_active = false;

        let service = DirectoryService::new(Arc::new(InMemoryProfileRepository::with_profiles(
            vec![tied_low.clone(), first.clone(), inactive],
        )));

        let standings = service.ladder_standings(None).await.unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].user_id, "user-a");
        assert_eq!(standings[1].user_id, "user-b");

        let top_one = service.ladder_standings(Some(1)).await.unwrap();
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].user_id, "user-a");
    }
}

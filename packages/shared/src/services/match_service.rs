use std::sync::Arc;

use crate::models::scheduled_match::{MatchResult, ScheduledMatch};
use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
use crate::repositories::match_repository::MatchRepository;
use crate::services::errors::match_service_errors::MatchServiceError;

pub struct MatchService {
    repository: Arc<dyn MatchRepository + Send + Sync>,
}

impl MatchService {
    pub fn new(repository: Arc<dyn MatchRepository + Send + Sync>) -> Self {
        MatchService { repository }
    }

    /// Every match the user plays in, on either side, oldest first.
    pub async fn list_for_player(
        &self,
        user_id: &str,
    ) -> Result<Vec<ScheduledMatch>, MatchServiceError> {
        if user_id.is_empty() {
            return Err(MatchServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        let mut matches = self
            .repository
            .query_for_player(user_id)
            .await
            .map_err(map_repository_error)?;
        matches.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(matches)
    }

    pub async fn get_match(&self, match_id: &str) -> Result<ScheduledMatch, MatchServiceError> {
        if match_id.is_empty() {
            return Err(MatchServiceError::ValidationError(
                "Match ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_match(match_id)
            .await
            .map_err(map_repository_error)?
            .ok_or(MatchServiceError::MatchNotFound)
    }

    /// Records (or overwrites) the result. Only a participant may record,
    /// and the winner must be one of the two players.
    pub async fn record_result(
        &self,
        match_id: &str,
        caller_id: &str,
        result: MatchResult,
    ) -> Result<ScheduledMatch, MatchServiceError> {
        if result.winner.is_empty() || result.score.is_empty() {
            return Err(MatchServiceError::ValidationError(
                "Winner and score are required".to_string(),
            ));
        }

        let scheduled_match = self.get_match(match_id).await?;
        if !scheduled_match.has_player(caller_id) {
            return Err(MatchServiceError::NotParticipant);
        }
        if !scheduled_match.has_player(&result.winner) {
            return Err(MatchServiceError::ValidationError(
                "Winner must be one of the match players".to_string(),
            ));
        }

        self.repository
            .set_result(match_id, &result)
            .await
            .map_err(map_repository_error)?;

        Ok(ScheduledMatch {
            result: Some(result),
            ..scheduled_match
        })
    }
}

fn map_repository_error(error: MatchRepositoryError) -> MatchServiceError {
    match error {
        MatchRepositoryError::NotFound => MatchServiceError::MatchNotFound,
        other => MatchServiceError::RepositoryError(other.to_string()),
    }
}

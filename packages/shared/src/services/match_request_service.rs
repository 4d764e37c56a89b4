use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::match_request::{MatchRequest, RequestStatus};
use crate::models::scheduled_match::ScheduledMatch;
use crate::repositories::errors::match_request_repository_errors::MatchRequestRepositoryError;
use crate::repositories::match_request_repository::MatchRequestRepository;
use crate::repositories::profile_repository::ProfileRepository;
use crate::services::errors::match_request_service_errors::MatchRequestServiceError;

/// The match-request lifecycle: pending -> accepted | declined | deleted,
/// every transition terminal. Accepting creates the derived match in the
/// same repository transaction as the status flip.
pub struct MatchRequestService {
    request_repository: Arc<dyn MatchRequestRepository + Send + Sync>,
    profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
}

impl MatchRequestService {
    pub fn new(
        request_repository: Arc<dyn MatchRequestRepository + Send + Sync>,
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        MatchRequestService {
            request_repository,
            profile_repository,
        }
    }

    pub async fn submit_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
        proposed_date: DateTime<Utc>,
    ) -> Result<MatchRequest, MatchRequestServiceError> {
        if requester_id.is_empty() || requestee_id.is_empty() {
            return Err(MatchRequestServiceError::ValidationError(
                "Requester and requestee IDs are required".to_string(),
            ));
        }
        if requester_id == requestee_id {
            return Err(MatchRequestServiceError::ValidationError(
                "Cannot request a match against yourself".to_string(),
            ));
        }

        let requester = self
            .profile_repository
            .get_profile(requester_id)
            .await
            .map_err(|e| MatchRequestServiceError::RepositoryError(e.to_string()))?
            .ok_or(MatchRequestServiceError::ProfileNotFound)?;
        let requestee = self
            .profile_repository
            .get_profile(requestee_id)
            .await
            .map_err(|e| MatchRequestServiceError::RepositoryError(e.to_string()))?
            .ok_or(MatchRequestServiceError::RequesteeNotFound)?;

        let request = MatchRequest::new(&requester, &requestee, proposed_date);
        self.request_repository
            .create_request(&request)
            .await
            .map_err(map_repository_error)?;
        Ok(request)
    }

    /// Requestee-only. Flips the request to accepted and creates the match
    /// atomically; a request that already left pending yields
    /// `AlreadyResolved` and no match.
    pub async fn accept_request(
        &self,
        request_id: &str,
        caller_id: &str,
    ) -> Result<ScheduledMatch, MatchRequestServiceError> {
        let request = self.load_request(request_id).await?;
        if request.requestee_id != caller_id {
            return Err(MatchRequestServiceError::NotPermitted);
        }
        if request.status != RequestStatus::Pending {
            return Err(MatchRequestServiceError::AlreadyResolved);
        }

        let scheduled_match = ScheduledMatch::from_request(&request);
        self.request_repository
            .accept_and_create_match(request_id, &scheduled_match)
            .await
            .map_err(map_repository_error)?;
        Ok(scheduled_match)
    }

    /// Requestee-only. Compare-and-swap pending -> declined.
    pub async fn decline_request(
        &self,
        request_id: &str,
        caller_id: &str,
    ) -> Result<(), MatchRequestServiceError> {
        let request = self.load_request(request_id).await?;
        if request.requestee_id != caller_id {
            return Err(MatchRequestServiceError::NotPermitted);
        }
        if request.status != RequestStatus::Pending {
            return Err(MatchRequestServiceError::AlreadyResolved);
        }

        self.request_repository
            .transition_if_pending(request_id, RequestStatus::Declined)
            .await
            .map_err(map_repository_error)
    }

    /// Requester-only cancel: deletes the pending request outright.
    pub async fn cancel_request(
        &self,
        request_id: &str,
        caller_id: &str,
    ) -> Result<(), MatchRequestServiceError> {
        let request = self.load_request(request_id).await?;
        if request.requester_id != caller_id {
            return Err(MatchRequestServiceError::NotPermitted);
        }
        if request.status != RequestStatus::Pending {
            return Err(MatchRequestServiceError::AlreadyResolved);
        }

        self.request_repository
            .delete_if_pending(request_id, caller_id)
            .await
            .map_err(map_repository_error)
    }

    /// Requests addressed to the user, pending only: accepted and declined
    /// requests are no longer "incoming".
    pub async fn list_incoming(
        &self,
        user_id: &str,
    ) -> Result<Vec<MatchRequest>, MatchRequestServiceError> {
        self.request_repository
            .query_incoming(user_id)
            .await
            .map_err(map_repository_error)
    }

    /// Requests sent by the user, all statuses.
    pub async fn list_outgoing(
        &self,
        user_id: &str,
    ) -> Result<Vec<MatchRequest>, MatchRequestServiceError> {
        self.request_repository
            .query_outgoing(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn load_request(
        &self,
        request_id: &str,
    ) -> Result<MatchRequest, MatchRequestServiceError> {
        if request_id.is_empty() {
            return Err(MatchRequestServiceError::ValidationError(
                "Request ID cannot be empty".to_string(),
            ));
        }
        self.request_repository
            .get_request(request_id)
            .await
            .map_err(map_repository_error)?
            .ok_or(MatchRequestServiceError::RequestNotFound)
    }
}

fn map_repository_error(error: MatchRequestRepositoryError) -> MatchRequestServiceError {
    match error {
        MatchRequestRepositoryError::NotFound => MatchRequestServiceError::RequestNotFound,
        MatchRequestRepositoryError::StatusConflict => MatchRequestServiceError::AlreadyResolved,
        other => MatchRequestServiceError::RepositoryError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Availability, PlayerProfile, SkillLevel};
    use crate::repositories::match_request_repository::tests::InMemoryMatchRequestRepository;
    use crate::repositories::profile_repository::tests::InMemoryProfileRepository;
    use chrono::TimeZone;

    fn profile(user_id: &str, name: &str) -> PlayerProfile {
        PlayerProfile::new(
            user_id,
            name,
            &format!("{}@club.test", user_id),
            SkillLevel::Intermediate,
            vec![Availability::Weekends],
        )
    }

    fn service_with_players() -> (MatchRequestService, Arc<InMemoryMatchRequestRepository>) {
        let request_repository = Arc::new(InMemoryMatchRequestRepository::new());
        let profile_repository = Arc::new(InMemoryProfileRepository::with_profiles(vec![
            profile("user-a", "Alex Carter"),
            profile("user-b", "Sam Reed"),
        ]));
        let service = MatchRequestService::new(request_repository.clone(), profile_repository);
        (service, request_repository)
    }

    fn proposed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 16, 18, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_submit_snapshots_profiles() {
        let (service, _) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.requester_name, "Alex Carter");
        assert_eq!(request.requestee_name, "Sam Reed");
        assert_eq!(request.proposed_date, proposed_date());
    }

    #[tokio::test]
    async fn test_submit_fails_for_unknown_requestee() {
        let (service, _) = service_with_players();
        let result = service
            .submit_request("user-a", "ghost", proposed_date())
            .await;
        assert!(matches!(
            result,
            Err(MatchRequestServiceError::RequesteeNotFound)
        ));
    }

    #[tokio::test]
    async fn test_submit_to_self_rejected() {
        let (service, _) = service_with_players();
        let result = service
            .submit_request("user-a", "user-a", proposed_date())
            .await;
        assert!(matches!(
            result,
            Err(MatchRequestServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_accept_creates_match_and_marks_accepted() {
        let (service, repository) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        let scheduled = service.accept_request(&request.id, "user-b").await.unwrap();

        assert_eq!(scheduled.player1_id, "user-a");
        assert_eq!(scheduled.player2_id, "user-b");
        assert_eq!(scheduled.date, proposed_date());

        let stored = repository.get_request(&request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Accepted);
        assert_eq!(repository.created_matches().len(), 1);
    }

    #[tokio::test]
    async fn test_accept_by_requester_not_permitted() {
        let (service, _) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        let result = service.accept_request(&request.id, "user-a").await;
        assert!(matches!(
            result,
            Err(MatchRequestServiceError::NotPermitted)
        ));
    }

    #[tokio::test]
    async fn test_no_transition_out_of_terminal_state() {
        let (service, repository) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();
        service.accept_request(&request.id, "user-b").await.unwrap();

        let accept_again = service.accept_request(&request.id, "user-b").await;
        assert!(matches!(
            accept_again,
            Err(MatchRequestServiceError::AlreadyResolved)
        ));

        let decline_after = service.decline_request(&request.id, "user-b").await;
        assert!(matches!(
            decline_after,
            Err(MatchRequestServiceError::AlreadyResolved)
        ));

        // Exactly one match, no matter how many accept attempts.
        assert_eq!(repository.created_matches().len(), 1);
    }

    #[tokio::test]
    async fn test_lost_accept_race_yields_no_second_match() {
        // The losing side of a concurrent double accept: another caller
        // flips the status between this service's read and its write, so
        // the conditional accept fails and no match is created for it.
        let (service, repository) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        repository
            .transition_if_pending(&request.id, RequestStatus::Declined)
            .await
            .unwrap();

        let result = service.accept_request(&request.id, "user-b").await;
        assert!(matches!(
            result,
            Err(MatchRequestServiceError::AlreadyResolved)
        ));
        assert!(repository.created_matches().is_empty());
    }

    #[tokio::test]
    async fn test_decline_sets_status_without_match() {
        let (service, repository) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        service
            .decline_request(&request.id, "user-b")
            .await
            .unwrap();

        let stored = repository.get_request(&request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Declined);
        assert!(repository.created_matches().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_by_non_requester_fails() {
        let (service, repository) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        let result = service.cancel_request(&request.id, "user-b").await;
        assert!(matches!(
            result,
            Err(MatchRequestServiceError::NotPermitted)
        ));
        assert!(repository.get_request(&request.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cancel_by_requester_deletes_request() {
        let (service, repository) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        service.cancel_request(&request.id, "user-a").await.unwrap();
        assert!(repository.get_request(&request.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_incoming_lists_pending_only() {
        let (service, _) = service_with_players();
        let request = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();

        let incoming = service.list_incoming("user-b").await.unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].id, request.id);

        service.accept_request(&request.id, "user-b").await.unwrap();

        let incoming = service.list_incoming("user-b").await.unwrap();
        assert!(incoming.is_empty());
    }

    #[tokio::test]
    async fn test_outgoing_lists_all_statuses() {
        let (service, _) = service_with_players();
        let first = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();
        let second = service
            .submit_request("user-a", "user-b", proposed_date())
            .await
            .unwrap();
        service.decline_request(&first.id, "user-b").await.unwrap();

        let outgoing = service.list_outgoing("user-a").await.unwrap();
        assert_eq!(outgoing.len(), 2);
        assert!(outgoing.iter().any(|r| r.id == second.id));
        assert!(outgoing
            .iter()
            .any(|r| r.id == first.id && r.status == RequestStatus::Declined));
    }

    #[tokio::test]
    async fn test_requester_without_profile_cannot_submit() {
        let request_repository = Arc::new(InMemoryMatchRequestRepository::new());
        let profile_repository = Arc::new(InMemoryProfileRepository::with_profiles(vec![profile(
            "user-b",
            "Sam Reed",
        )]));
        let service = MatchRequestService::new(request_repository, profile_repository);

        let result = service
            .submit_request("user-a", "user-b", proposed_date())
            .await;
        assert!(matches!(
            result,
            Err(MatchRequestServiceError::ProfileNotFound)
        ));
    }
}

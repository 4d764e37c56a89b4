use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::PlayerProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }
}

/// Body of the submit-request call; the requester is the authenticated user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitMatchRequest {
    pub requestee_id: String,
    pub proposed_date: DateTime<Utc>,
}

/// A proposal from one player to another to schedule a match.
///
/// Requester/requestee name and email are point-in-time snapshots taken from
/// the profiles when the request is submitted; they do not track later
/// profile edits.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchRequest {
    pub id: String,
    pub requester_id: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requestee_id: String,
    pub requestee_name: String,
    pub requestee_email: String,
    pub status: RequestStatus,
    pub proposed_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl MatchRequest {
    pub fn new(
        requester: &PlayerProfile,
        requestee: &PlayerProfile,
        proposed_date: DateTime<Utc>,
    ) -> Self {
        MatchRequest {
            id: Uuid::new_v4().to_string(),
            requester_id: requester.user_id.clone(),
            requester_name: requester.name.clone(),
            requester_email: requester.email.clone(),
            requestee_id: requestee.user_id.clone(),
            requestee_name: requestee.name.clone(),
            requestee_email: requestee.email.clone(),
            status: RequestStatus::Pending,
            proposed_date,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Availability, SkillLevel};

    fn profile(user_id: &str, name: &str, email: &str) -> PlayerProfile {
        PlayerProfile::new(
            user_id,
            name,
            email,
            SkillLevel::Intermediate,
            vec![Availability::Weekends],
        )
    }

    #[test]
    fn test_new_request_is_pending_with_snapshots() {
        let requester = profile("user-a", "Alex Carter", "alex@club.test");
        let requestee = profile("user-b", "Sam Reed", "sam@club.test");
        let date = Utc::now();

        let request = MatchRequest::new(&requester, &requestee, date);

        assert!(!request.id.is_empty());
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.requester_id, "user-a");
        assert_eq!(request.requester_name, "Alex Carter");
        assert_eq!(request.requestee_email, "sam@club.test");
        assert_eq!(request.proposed_date, date);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        let parsed: RequestStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, RequestStatus::Pending);
    }

    #[test]
    fn test_status_as_str_matches_serde() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Accepted,
            RequestStatus::Declined,
        ] {
            let serialized = serde_json::to_string(&status).unwrap();
            assert_eq!(serialized, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_request_ids_unique() {
        let requester = profile("user-a", "Alex", "a@x.test");
        let requestee = profile("user-b", "Sam", "b@x.test");
        let r1 = MatchRequest::new(&requester, &requestee, Utc::now());
        let r2 = MatchRequest::new(&requester, &requestee, Utc::now());
        assert_ne!(r1.id, r2.id);
    }
}

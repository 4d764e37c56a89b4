use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::match_request::MatchRequest;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchResult {
    pub winner: String,
    pub score: String,
}

/// A confirmed, scheduled encounter between two players. Created exactly
/// once when a match request is accepted; a result may be attached later.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScheduledMatch {
    pub id: String,
    pub player1_id: String,
    pub player1_name: String,
    pub player2_id: String,
    pub player2_name: String,
    pub date: DateTime<Utc>,
    pub result: Option<MatchResult>,
    pub created_at: DateTime<Utc>,
}

impl ScheduledMatch {
    /// Derives the match from an accepted request: the requester becomes
    /// player 1, the requestee player 2, the proposed date the match date.
    pub fn from_request(request: &MatchRequest) -> Self {
        ScheduledMatch {
            id: Uuid::new_v4().to_string(),
            player1_id: request.requester_id.clone(),
            player1_name: request.requester_name.clone(),
            player2_id: request.requestee_id.clone(),
            player2_name: request.requestee_name.clone(),
            date: request.proposed_date,
            result: None,
            created_at: Utc::now(),
        }
    }

    pub fn has_player(&self, user_id: &str) -> bool {
        self.player1_id == user_id || self.player2_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Availability, PlayerProfile, SkillLevel};

    fn request() -> MatchRequest {
        let requester = PlayerProfile::new(
            "user-a",
            "Alex Carter",
            "alex@club.test",
            SkillLevel::Advanced,
            vec![Availability::Weekends],
        );
        let requestee = PlayerProfile::new(
            "user-b",
            "Sam Reed",
            "sam@club.test",
            SkillLevel::Advanced,
            vec![Availability::Weekends],
        );
        MatchRequest::new(&requester, &requestee, Utc::now())
    }

    #[test]
    fn test_from_request_copies_identities_and_date() {
        let req = request();
        let scheduled = ScheduledMatch::from_request(&req);

        assert_eq!(scheduled.player1_id, req.requester_id);
        assert_eq!(scheduled.player1_name, "Alex Carter");
        assert_eq!(scheduled.player2_id, req.requestee_id);
        assert_eq!(scheduled.player2_name, "Sam Reed");
        assert_eq!(scheduled.date, req.proposed_date);
        assert!(scheduled.result.is_none());
    }

    #[test]
    fn test_has_player() {
        let scheduled = ScheduledMatch::from_request(&request());
        assert!(scheduled.has_player("user-a"));
        assert!(scheduled.has_player("user-b"));
        assert!(!scheduled.has_player("user-c"));
    }

    #[test]
    fn test_result_round_trip() {
        let mut scheduled = ScheduledMatch::from_request(&request());
        scheduled.result = Some(MatchResult {
            winner: "user-a".to_string(),
            score: "3-1".to_string(),
        });

        let serialized = serde_json::to_string(&scheduled).unwrap();
        let deserialized: ScheduledMatch = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, scheduled);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RANKING_POINTS: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for SkillLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            other => Err(format!("Unknown skill level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Weekdays,
    Weekends,
    Evenings,
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "weekdays" => Ok(Availability::Weekdays),
            "weekends" => Ok(Availability::Weekends),
            "evenings" => Ok(Availability::Evenings),
            other => Err(format!("Unknown availability slot: {}", other)),
        }
    }
}

/// A player's self-reported skill/availability record, keyed 1:1 by the
/// owning user's id. `ranking_points` is a raw stored value read back for
/// the ladder; nothing in this system computes it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub skill_level: SkillLevel,
    pub availability: Vec<Availability>,
    pub is_active: bool,
    pub ranking_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerProfile {
    pub fn new(
        user_id: &str,
        name: &str,
        email: &str,
        skill_level: SkillLevel,
        availability: Vec<Availability>,
    ) -> Self {
        let now = Utc::now();
        PlayerProfile {
            user_id: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            skill_level,
            availability,
            is_active: true,
            ranking_points: DEFAULT_RANKING_POINTS,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of the profile-creation call. The profile's email is taken from the
/// authenticated account, not from the body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProfileRequest {
    pub name: String,
    pub skill_level: SkillLevel,
    pub availability: Vec<Availability>,
}

/// Partial profile update; only the fields that are `Some` are merged into
/// the stored document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub availability: Option<Vec<Availability>>,
    pub is_active: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.skill_level.is_none()
            && self.availability.is_none()
            && self.is_active.is_none()
    }
}

use serde::{Deserialize, Serialize};

use crate::models::profile::{Availability, PlayerProfile, SkillLevel};

/// Directory search filters. All predicates are applied client-side after a
/// full collection scan; an unset field does not constrain the result.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoryFilter {
    pub skill_level: Option<SkillLevel>,
    pub availability: Vec<Availability>,
    pub is_active: Option<bool>,
    pub search_term: Option<String>,
}

impl DirectoryFilter {
    pub fn matches(&self, profile: &PlayerProfile) -> bool {
        if let Some(is_active) = self.is_active {
            if profile.is_active != is_active {
                return false;
            }
        }
        if let Some(skill_level) = self.skill_level {
            if profile.skill_level != skill_level {
                return false;
            }
        }
        if !self.availability.is_empty()
            && !self
                .availability
                .iter()
                .any(|slot| profile.availability.contains(slot))
        {
            return false;
        }
        if let Some(term) = &self.search_term {
            let term = term.trim().to_lowercase();
            if !term.is_empty()
                && !profile.name.to_lowercase().contains(&term)
                && !profile.email.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> PlayerProfile {
        PlayerProfile::new(
            "user-1",
            "Alex Carter",
            "alex@club.test",
            SkillLevel::Advanced,
            vec![Availability::Weekends, Availability::Evenings],
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(DirectoryFilter::default().matches(&profile()));
    }

    #[test]
    fn test_skill_level_must_be_equal() {
        let filter = DirectoryFilter {
            skill_level: Some(SkillLevel::Beginner),
            ..Default::default()
        };
        assert!(!filter.matches(&profile()));
    }

    #[test]
    fn test_availability_overlap_is_enough() {
        let filter = DirectoryFilter {
            availability: vec![Availability::Weekdays, Availability::Evenings],
            ..Default::default()
        };
        assert!(filter.matches(&profile()));

        let filter = DirectoryFilter {
            availability: vec![Availability::Weekdays],
            ..Default::default()
        };
        assert!(!filter.matches(&profile()));
    }

    #[test]
    fn test_search_term_is_case_insensitive_over_name_and_email() {
        let by_name = DirectoryFilter {
            search_term: Some("CARTER".to_string()),
            ..Default::default()
        };
        assert!(by_name.matches(&profile()));

        let by_email = DirectoryFilter {
            search_term: Some("club.test".to_string()),
            ..Default::default()
        };
        assert!(by_email.matches(&profile()));

        let miss = DirectoryFilter {
            search_term: Some("nobody".to_string()),
            ..Default::default()
        };
        assert!(!miss.matches(&profile()));
    }

    #[test]
    fn test_blank_search_term_does_not_constrain() {
        let filter = DirectoryFilter {
            search_term: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&profile()));
    }

    #[test]
    fn test_inactive_profiles_can_be_filtered_out() {
        let mut inactive = profile();
        inactive.is_active = false;

        let filter = DirectoryFilter {
            is_active: Some(true),
            ..Default::default()
        };
        assert!(!filter.matches(&inactive));
    }
}

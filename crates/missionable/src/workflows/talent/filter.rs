//! Dashboard filter engine over the fetched talent collection.
//!
//! Every criterion is an independent predicate and the visible set is their
//! conjunction. Filtering never reorders or mutates the fetched collection, so
//! clearing a criterion restores exactly the records it alone was hiding.

use serde::{Deserialize, Serialize};

use super::domain::TalentProfile;

/// Tri-state clearance criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceFilter {
    #[default]
    Any,
    Eligible,
    NotEligible,
}

impl ClearanceFilter {
    /// Parse the dashboard query value; anything unrecognized means "no restriction".
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" => Self::Eligible,
            "no" | "false" => Self::NotEligible,
            _ => Self::Any,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Any => "all",
            Self::Eligible => "yes",
            Self::NotEligible => "no",
        }
    }

    pub fn admits(&self, clearance_eligible: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Eligible => clearance_eligible,
            Self::NotEligible => !clearance_eligible,
        }
    }
}

/// Minimum years of experience, restricted to the thresholds the dashboard offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceThreshold {
    #[default]
    Any,
    AtLeast3,
    AtLeast6,
    AtLeast10,
}

impl ExperienceThreshold {
    pub const ALL: [ExperienceThreshold; 4] =
        [Self::Any, Self::AtLeast3, Self::AtLeast6, Self::AtLeast10];

    pub fn from_param(raw: &str) -> Self {
        match raw.trim() {
            "3" => Self::AtLeast3,
            "6" => Self::AtLeast6,
            "10" => Self::AtLeast10,
            _ => Self::Any,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Any => "all",
            Self::AtLeast3 => "3",
            Self::AtLeast6 => "6",
            Self::AtLeast10 => "10",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::AtLeast3 => "3+ years",
            Self::AtLeast6 => "6+ years",
            Self::AtLeast10 => "10+ years",
        }
    }

    pub fn min_years(&self) -> Option<u32> {
        match self {
            Self::Any => None,
            Self::AtLeast3 => Some(3),
            Self::AtLeast6 => Some(6),
            Self::AtLeast10 => Some(10),
        }
    }

    pub fn admits(&self, years_of_experience: u32) -> bool {
        self.min_years()
            .map_or(true, |minimum| years_of_experience >= minimum)
    }
}

/// The full set of dashboard criteria. The default value restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentFilter {
    /// Case-insensitive substring matched against any tech stack entry.
    pub skill_term: String,
    pub clearance: ClearanceFilter,
    pub min_experience: ExperienceThreshold,
}

impl TalentFilter {
    pub fn is_unrestricted(&self) -> bool {
        self.skill_term.is_empty()
            && self.clearance == ClearanceFilter::Any
            && self.min_experience == ExperienceThreshold::Any
    }

    pub fn matches(&self, profile: &TalentProfile) -> bool {
        self.matches_skill(profile)
            && self.clearance.admits(profile.clearance_eligible)
            && self.min_experience.admits(profile.years_of_experience)
    }

    fn matches_skill(&self, profile: &TalentProfile) -> bool {
        if self.skill_term.is_empty() {
            return true;
        }

        let term = self.skill_term.to_lowercase();
        profile
            .tech_stack
            .iter()
            .any(|skill| skill.to_lowercase().contains(&term))
    }
}

/// Derive the visible subset, preserving the order of `records`.
pub fn filter_profiles<'a>(
    records: &'a [TalentProfile],
    criteria: &TalentFilter,
) -> Vec<&'a TalentProfile> {
    records
        .iter()
        .filter(|profile| criteria.matches(profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::talent::domain::{TalentId, WorkPreference};
    use chrono::{TimeZone, Utc};

    fn profile(id: &str, stack: &[&str], years: u32, cleared: bool) -> TalentProfile {
        TalentProfile {
            id: TalentId(id.to_string()),
            full_name: format!("Candidate {id}"),
            email: format!("{id}@example.com"),
            linkedin: None,
            tech_stack: stack.iter().map(|skill| skill.to_string()).collect(),
            years_of_experience: years,
            clearance_eligible: cleared,
            work_preference: WorkPreference::Remote,
            accommodation_preferences: None,
            resume_path: None,
            created_at: Utc
                .with_ymd_and_hms(2025, 5, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    fn roster() -> Vec<TalentProfile> {
        vec![
            profile("a", &["TypeScript", "React"], 5, true),
            profile("b", &["Python", "AWS"], 12, false),
            profile("c", &["Java"], 2, true),
            profile("d", &["JavaScript", "Node.js"], 7, false),
        ]
    }

    fn ids(visible: &[&TalentProfile]) -> Vec<String> {
        visible.iter().map(|profile| profile.id.0.clone()).collect()
    }

    #[test]
    fn default_criteria_return_full_set_in_order() {
        let records = roster();
        let criteria = TalentFilter::default();
        assert!(criteria.is_unrestricted());
        assert_eq!(ids(&filter_profiles(&records, &criteria)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn skill_term_is_case_insensitive_substring() {
        let records = roster();
        let criteria = TalentFilter {
            skill_term: "script".to_string(),
            ..TalentFilter::default()
        };
        assert_eq!(ids(&filter_profiles(&records, &criteria)), ["a", "d"]);

        let upper = TalentFilter {
            skill_term: "JAVA".to_string(),
            ..TalentFilter::default()
        };
        assert_eq!(ids(&filter_profiles(&records, &upper)), ["c", "d"]);
    }

    #[test]
    fn clearance_filter_splits_roster() {
        let records = roster();
        let eligible = TalentFilter {
            clearance: ClearanceFilter::Eligible,
            ..TalentFilter::default()
        };
        let not_eligible = TalentFilter {
            clearance: ClearanceFilter::NotEligible,
            ..TalentFilter::default()
        };

        assert_eq!(ids(&filter_profiles(&records, &eligible)), ["a", "c"]);
        assert_eq!(ids(&filter_profiles(&records, &not_eligible)), ["b", "d"]);
    }

    #[test]
    fn experience_threshold_is_inclusive_minimum() {
        let five_years = profile("x", &["Go"], 5, false);
        assert!(ExperienceThreshold::AtLeast3.admits(five_years.years_of_experience));
        assert!(!ExperienceThreshold::AtLeast6.admits(five_years.years_of_experience));
        assert!(ExperienceThreshold::AtLeast6.admits(6));
        assert!(ExperienceThreshold::Any.admits(0));
    }

    #[test]
    fn criteria_combine_as_conjunction() {
        let records = roster();
        let criteria = TalentFilter {
            skill_term: "java".to_string(),
            clearance: ClearanceFilter::NotEligible,
            min_experience: ExperienceThreshold::AtLeast6,
        };
        assert_eq!(ids(&filter_profiles(&records, &criteria)), ["d"]);
    }

    #[test]
    fn filtering_is_idempotent_and_leaves_source_untouched() {
        let records = roster();
        let snapshot = records.clone();
        let criteria = TalentFilter {
            skill_term: "a".to_string(),
            clearance: ClearanceFilter::Any,
            min_experience: ExperienceThreshold::AtLeast3,
        };

        let first: Vec<TalentProfile> = filter_profiles(&records, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let second = filter_profiles(&first, &criteria);

        assert_eq!(ids(&second), first.iter().map(|p| p.id.0.clone()).collect::<Vec<_>>());
        assert_eq!(records, snapshot);
    }

    #[test]
    fn empty_result_is_valid() {
        let records = roster();
        let criteria = TalentFilter {
            skill_term: "fortran".to_string(),
            ..TalentFilter::default()
        };
        assert!(filter_profiles(&records, &criteria).is_empty());
    }

    #[test]
    fn query_params_round_trip_and_default_unknown_values() {
        for threshold in ExperienceThreshold::ALL {
            assert_eq!(ExperienceThreshold::from_param(threshold.as_param()), threshold);
        }
        assert_eq!(ExperienceThreshold::from_param("4"), ExperienceThreshold::Any);
        assert_eq!(ClearanceFilter::from_param("YES"), ClearanceFilter::Eligible);
        assert_eq!(ClearanceFilter::from_param("maybe"), ClearanceFilter::Any);
    }
}

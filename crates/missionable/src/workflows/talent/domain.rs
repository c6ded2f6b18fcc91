use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the backend store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalentId(pub String);

impl fmt::Display for TalentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Work arrangement a candidate is open to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkPreference {
    #[serde(rename = "Remote")]
    Remote,
    #[serde(rename = "Hybrid")]
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkPreference {
    pub const ALL: [WorkPreference; 3] = [Self::Remote, Self::Hybrid, Self::OnSite];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preference| preference.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// A talent profile as stored by the backend. Read-only to this application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentProfile {
    pub id: TalentId,
    pub full_name: String,
    pub email: String,
    pub linkedin: Option<String>,
    /// Selection order is kept for display; matching treats it as a set.
    pub tech_stack: Vec<String>,
    pub years_of_experience: u32,
    pub clearance_eligible: bool,
    pub work_preference: WorkPreference,
    pub accommodation_preferences: Option<String>,
    pub resume_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TalentProfile {
    pub fn has_resume(&self) -> bool {
        self.resume_path.is_some()
    }
}

/// Insert payload for the `talents` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTalentProfile {
    pub full_name: String,
    pub email: String,
    pub linkedin: Option<String>,
    pub tech_stack: Vec<String>,
    pub years_of_experience: u32,
    pub clearance_eligible: bool,
    pub work_preference: WorkPreference,
    pub accommodation_preferences: Option<String>,
    pub resume_path: Option<String>,
}

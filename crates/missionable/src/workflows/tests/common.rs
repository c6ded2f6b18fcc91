use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::backend::{InMemoryBackend, Session};
use crate::workflows::employer::InquiryForm;
use crate::workflows::talent::{
    ResumeAttachment, TalentId, TalentProfile, TalentSignup, WorkPreference,
};

pub(super) const ADMIN_EMAIL: &str = "ops@missionable.systems";
pub(super) const ADMIN_PASSWORD: &str = "correct horse";
pub(super) const LIVE_TOKEN: &str = "live-token";

pub(super) fn backend() -> Arc<InMemoryBackend> {
    Arc::new(InMemoryBackend::with_admin(ADMIN_EMAIL, ADMIN_PASSWORD))
}

pub(super) fn signed_in_backend() -> Arc<InMemoryBackend> {
    let backend = backend();
    backend.grant_session(LIVE_TOKEN);
    backend
}

pub(super) fn session() -> Session {
    Session {
        access_token: LIVE_TOKEN.to_string(),
        email: Some(ADMIN_EMAIL.to_string()),
    }
}

pub(super) fn signup() -> TalentSignup {
    TalentSignup {
        full_name: "  Jordan Reyes ".to_string(),
        email: "jordan@example.com".to_string(),
        linkedin: Some("".to_string()),
        tech_stack: vec!["Rust".to_string(), "typescript".to_string()],
        years_of_experience: Some(6),
        clearance_eligible: Some(true),
        work_preference: Some(WorkPreference::Remote),
        accommodation_preferences: Some("Written interview questions in advance".to_string()),
        resume: None,
    }
}

pub(super) fn resume(file_name: &str) -> ResumeAttachment {
    ResumeAttachment {
        file_name: file_name.to_string(),
        content: b"%PDF-1.7 resume".to_vec(),
    }
}

pub(super) fn inquiry_form() -> InquiryForm {
    InquiryForm {
        company_name: "Northwind Defense".to_string(),
        contact_email: "hiring@northwind.example".to_string(),
        role_description: "Accessible front-end for mission planning tools".to_string(),
        required_skills: vec!["React".to_string(), "TypeScript".to_string()],
    }
}

pub(super) fn profile(
    id: &str,
    full_name: &str,
    stack: &[&str],
    years: u32,
    cleared: bool,
    resume_path: Option<&str>,
    day: u32,
) -> TalentProfile {
    TalentProfile {
        id: TalentId(id.to_string()),
        full_name: full_name.to_string(),
        email: format!("{id}@example.com"),
        linkedin: None,
        tech_stack: stack.iter().map(|skill| skill.to_string()).collect(),
        years_of_experience: years,
        clearance_eligible: cleared,
        work_preference: WorkPreference::Hybrid,
        accommodation_preferences: None,
        resume_path: resume_path.map(str::to_string),
        created_at: Utc
            .with_ymd_and_hms(2025, 3, day, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

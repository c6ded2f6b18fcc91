use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::domain::{NewTalentProfile, WorkPreference};
use crate::backend::{BackendError, RemoteDataService};
use crate::workflows::validation::{
    optional_text, optional_url, require_email, require_text, validate_tags, ValidationError,
};

pub const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// Raw talent sign-up as collected by the form.
#[derive(Debug, Clone, Default)]
pub struct TalentSignup {
    pub full_name: String,
    pub email: String,
    pub linkedin: Option<String>,
    pub tech_stack: Vec<String>,
    pub years_of_experience: Option<u32>,
    pub clearance_eligible: Option<bool>,
    pub work_preference: Option<WorkPreference>,
    pub accommodation_preferences: Option<String>,
    pub resume: Option<ResumeAttachment>,
}

/// Uploaded document as received from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ResumeAttachment {
    /// Text after the last `.`; the whole name when there is none.
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit('.')
            .next()
            .unwrap_or(self.file_name.as_str())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let extension = self.extension().to_ascii_lowercase();
        if !self.file_name.contains('.') || !RESUME_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::UnsupportedResumeType);
        }
        if self.content.len() > MAX_RESUME_BYTES {
            return Err(ValidationError::ResumeTooLarge);
        }
        Ok(())
    }
}

/// Outcome of a talent submission: the terminal "submitted" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Resume upload failed: {0}")]
    Upload(BackendError),
    #[error("An account with this email already exists.")]
    DuplicateEmail,
    #[error("Submission failed: {0}")]
    Insert(BackendError),
}

/// Validates a sign-up, stores the optional resume, then writes the profile row.
pub struct TalentIntakeService<B: ?Sized> {
    backend: Arc<B>,
}

impl<B> TalentIntakeService<B>
where
    B: RemoteDataService + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// At most one blob write followed by exactly one row write. A failed row
    /// write after a successful upload leaves the blob in place.
    pub async fn submit(
        &self,
        signup: TalentSignup,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let TalentSignup {
            full_name,
            email,
            linkedin,
            tech_stack,
            years_of_experience,
            clearance_eligible,
            work_preference,
            accommodation_preferences,
            resume,
        } = signup;

        let full_name = require_text(&full_name, "Full name")?;
        let email = require_email(&email, "Email")?;
        let linkedin = optional_url(linkedin.as_deref(), "LinkedIn profile")?;
        let tech_stack = validate_tags(&tech_stack, ValidationError::EmptyTechStack)?;
        let years_of_experience = years_of_experience.ok_or(ValidationError::MissingField {
            field: "Years of experience",
        })?;
        let clearance_eligible = clearance_eligible.ok_or(ValidationError::MissingField {
            field: "Security clearance eligibility",
        })?;
        let work_preference = work_preference.ok_or(ValidationError::MissingField {
            field: "Work preference",
        })?;

        let resume = resume.filter(|attachment| !attachment.content.is_empty());
        if let Some(attachment) = &resume {
            attachment.validate()?;
        }

        let resume_path = match resume {
            Some(attachment) => {
                let key = format!("{}.{}", Uuid::new_v4(), attachment.extension());
                self.backend
                    .upload_resume(&key, &attachment.content)
                    .await
                    .map_err(|err| {
                        warn!(error = %err, "resume upload failed");
                        SubmissionError::Upload(err)
                    })?;
                Some(key)
            }
            None => None,
        };

        let record = NewTalentProfile {
            full_name,
            email,
            linkedin,
            tech_stack,
            years_of_experience,
            clearance_eligible,
            work_preference,
            accommodation_preferences: optional_text(accommodation_preferences.as_deref()),
            resume_path: resume_path.clone(),
        };

        if let Err(err) = self.backend.insert_talent(&record).await {
            if err.is_duplicate_key() {
                return Err(SubmissionError::DuplicateEmail);
            }
            warn!(error = %err, orphaned_resume = ?resume_path, "talent insert failed");
            return Err(SubmissionError::Insert(err));
        }

        info!(
            skills = record.tech_stack.len(),
            with_resume = resume_path.is_some(),
            "talent profile submitted"
        );
        Ok(SubmissionReceipt { resume_path })
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::{BackendError, RemoteDataService};
use crate::workflows::validation::{require_email, require_text, validate_tags, ValidationError};

/// Insert payload for the `employer_inquiries` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerInquiry {
    pub company_name: String,
    pub contact_email: String,
    pub role_description: String,
    pub required_skills: Vec<String>,
}

/// Raw inquiry as collected by the form.
#[derive(Debug, Clone, Default)]
pub struct InquiryForm {
    pub company_name: String,
    pub contact_email: String,
    pub role_description: String,
    pub required_skills: Vec<String>,
}

impl InquiryForm {
    pub fn validate(self) -> Result<EmployerInquiry, ValidationError> {
        Ok(EmployerInquiry {
            company_name: require_text(&self.company_name, "Company name")?,
            contact_email: require_email(&self.contact_email, "Contact email")?,
            role_description: require_text(&self.role_description, "Role description")?,
            required_skills: validate_tags(
                &self.required_skills,
                ValidationError::EmptyRequiredSkills,
            )?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InquiryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Submission failed: {0}")]
    Insert(BackendError),
}

pub struct EmployerInquiryService<B: ?Sized> {
    backend: Arc<B>,
}

impl<B> EmployerInquiryService<B>
where
    B: RemoteDataService + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn submit(&self, form: InquiryForm) -> Result<EmployerInquiry, InquiryError> {
        let inquiry = form.validate()?;

        self.backend
            .insert_inquiry(&inquiry)
            .await
            .map_err(|err| {
                warn!(error = %err, "employer inquiry insert failed");
                InquiryError::Insert(err)
            })?;

        info!(
            skills = inquiry.required_skills.len(),
            "employer inquiry submitted"
        );
        Ok(inquiry)
    }
}

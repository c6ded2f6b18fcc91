//! Boundary to the hosted backend that owns auth sessions, the row store and
//! resume storage. The site never persists anything itself.

mod http;
mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::workflows::employer::EmployerInquiry;
use crate::workflows::talent::{NewTalentProfile, TalentProfile};

pub use http::HostedBackend;
pub use memory::{BackendCall, InMemoryBackend};

pub const TALENTS_TABLE: &str = "talents";
pub const INQUIRIES_TABLE: &str = "employer_inquiries";
pub const RESUME_BUCKET: &str = "resumes";

/// An authenticated admin session. Only its presence and token are used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub email: Option<String>,
}

/// Temporary capability URL for a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The service answered and refused the operation.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("unexpected backend payload: {0}")]
    Decode(String),
}

impl BackendError {
    /// Store-reported uniqueness violation (Postgres `23505` surfaces as "duplicate key ...").
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::Rejected { message, .. } if message.contains("duplicate"))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

/// Operations the site performs against the hosted backend.
#[async_trait]
pub trait RemoteDataService: Send + Sync {
    /// Resolve a stored access token; `Ok(None)` when the session is absent or expired.
    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    async fn insert_talent(&self, record: &NewTalentProfile) -> Result<(), BackendError>;

    async fn insert_inquiry(&self, inquiry: &EmployerInquiry) -> Result<(), BackendError>;

    /// All talent profiles, newest first.
    async fn list_talents(&self, session: &Session) -> Result<Vec<TalentProfile>, BackendError>;

    async fn upload_resume(&self, key: &str, content: &[u8]) -> Result<(), BackendError>;

    async fn create_signed_url(
        &self,
        session: &Session,
        key: &str,
        expires_in: Duration,
    ) -> Result<SignedUrl, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_detection_only_applies_to_rejections() {
        let duplicate = BackendError::Rejected {
            status: 409,
            message: "duplicate key value violates unique constraint \"talents_email_key\""
                .to_string(),
        };
        assert!(duplicate.is_duplicate_key());

        let other = BackendError::Rejected {
            status: 400,
            message: "invalid input syntax".to_string(),
        };
        assert!(!other.is_duplicate_key());
        assert!(!BackendError::Transport("duplicate".to_string()).is_duplicate_key());
    }
}

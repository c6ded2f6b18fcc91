use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{BackendError, RemoteDataService, Session, SignedUrl, RESUME_BUCKET};
use crate::workflows::employer::EmployerInquiry;
use crate::workflows::talent::{NewTalentProfile, TalentId, TalentProfile};

/// Every operation the in-memory backend has served, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    CurrentSession,
    SignIn { email: String },
    SignOut,
    InsertTalent { email: String },
    InsertInquiry { company_name: String },
    ListTalents,
    UploadResume { key: String },
    CreateSignedUrl { key: String, expires_in: Duration },
}

#[derive(Debug, Default)]
struct MemoryState {
    admin: Option<(String, String)>,
    sessions: HashSet<String>,
    talents: Vec<TalentProfile>,
    inquiries: Vec<EmployerInquiry>,
    blobs: HashMap<String, Vec<u8>>,
    calls: Vec<BackendCall>,
    failures: HashMap<&'static str, BackendError>,
}

/// Process-local stand-in for the hosted backend. Backs `serve --offline` and
/// the test suites; individual operations can be made to fail on demand.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryBackend {
    pub fn with_admin(email: impl Into<String>, password: impl Into<String>) -> Self {
        let backend = Self::default();
        backend.lock().admin = Some((email.into(), password.into()));
        backend
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every later call of `operation` (e.g. `"upload_resume"`) return `error`.
    pub fn fail_on(&self, operation: &'static str, error: BackendError) {
        self.lock().failures.insert(operation, error);
    }

    /// Register a live session token without going through `sign_in`.
    pub fn grant_session(&self, access_token: impl Into<String>) {
        self.lock().sessions.insert(access_token.into());
    }

    /// Seed a stored profile; `list_talents` returns newest first.
    pub fn seed_talent(&self, profile: TalentProfile) {
        self.lock().talents.push(profile);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn inquiries(&self) -> Vec<EmployerInquiry> {
        self.lock().inquiries.clone()
    }

    pub fn stored_talents(&self) -> Vec<TalentProfile> {
        self.lock().talents.clone()
    }

    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().blobs.get(key).cloned()
    }

    fn record(
        &self,
        call: BackendCall,
        operation: &'static str,
    ) -> Result<MutexGuard<'_, MemoryState>, BackendError> {
        let mut state = self.lock();
        state.calls.push(call);
        if let Some(error) = state.failures.get(operation).cloned() {
            return Err(error);
        }
        Ok(state)
    }
}

#[async_trait]
impl RemoteDataService for InMemoryBackend {
    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, BackendError> {
        let state = self.record(BackendCall::CurrentSession, "current_session")?;
        if !state.sessions.contains(access_token) {
            return Ok(None);
        }
        Ok(Some(Session {
            access_token: access_token.to_string(),
            email: state.admin.as_ref().map(|(email, _)| email.clone()),
        }))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let mut state = self.record(
            BackendCall::SignIn {
                email: email.to_string(),
            },
            "sign_in",
        )?;

        let valid = matches!(
            &state.admin,
            Some((admin_email, admin_password))
                if admin_email.eq_ignore_ascii_case(email) && admin_password == password
        );
        if !valid {
            return Err(BackendError::Rejected {
                status: 400,
                message: "Invalid login credentials".to_string(),
            });
        }

        let access_token = Uuid::new_v4().to_string();
        state.sessions.insert(access_token.clone());
        Ok(Session {
            access_token,
            email: Some(email.to_string()),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let mut state = self.record(BackendCall::SignOut, "sign_out")?;
        state.sessions.remove(access_token);
        Ok(())
    }

    async fn insert_talent(&self, record: &NewTalentProfile) -> Result<(), BackendError> {
        let mut state = self.record(
            BackendCall::InsertTalent {
                email: record.email.clone(),
            },
            "insert_talent",
        )?;

        if state
            .talents
            .iter()
            .any(|existing| existing.email.eq_ignore_ascii_case(&record.email))
        {
            return Err(BackendError::Rejected {
                status: 409,
                message: "duplicate key value violates unique constraint \"talents_email_key\""
                    .to_string(),
            });
        }

        let profile = TalentProfile {
            id: TalentId(Uuid::new_v4().to_string()),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            linkedin: record.linkedin.clone(),
            tech_stack: record.tech_stack.clone(),
            years_of_experience: record.years_of_experience,
            clearance_eligible: record.clearance_eligible,
            work_preference: record.work_preference,
            accommodation_preferences: record.accommodation_preferences.clone(),
            resume_path: record.resume_path.clone(),
            created_at: Utc::now(),
        };
        state.talents.push(profile);
        Ok(())
    }

    async fn insert_inquiry(&self, inquiry: &EmployerInquiry) -> Result<(), BackendError> {
        let mut state = self.record(
            BackendCall::InsertInquiry {
                company_name: inquiry.company_name.clone(),
            },
            "insert_inquiry",
        )?;
        state.inquiries.push(inquiry.clone());
        Ok(())
    }

    async fn list_talents(&self, session: &Session) -> Result<Vec<TalentProfile>, BackendError> {
        let state = self.record(BackendCall::ListTalents, "list_talents")?;
        if !state.sessions.contains(&session.access_token) {
            return Err(BackendError::Rejected {
                status: 401,
                message: "JWT expired".to_string(),
            });
        }

        // Later inserts win ties so equal timestamps still read newest first.
        let mut talents: Vec<TalentProfile> = state.talents.iter().rev().cloned().collect();
        talents.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(talents)
    }

    async fn upload_resume(&self, key: &str, content: &[u8]) -> Result<(), BackendError> {
        let mut state = self.record(
            BackendCall::UploadResume {
                key: key.to_string(),
            },
            "upload_resume",
        )?;
        if state.blobs.contains_key(key) {
            return Err(BackendError::Rejected {
                status: 409,
                message: "The resource already exists".to_string(),
            });
        }
        state.blobs.insert(key.to_string(), content.to_vec());
        Ok(())
    }

    async fn create_signed_url(
        &self,
        session: &Session,
        key: &str,
        expires_in: Duration,
    ) -> Result<SignedUrl, BackendError> {
        let state = self.record(
            BackendCall::CreateSignedUrl {
                key: key.to_string(),
                expires_in,
            },
            "create_signed_url",
        )?;
        if !state.sessions.contains(&session.access_token) {
            return Err(BackendError::Rejected {
                status: 401,
                message: "JWT expired".to_string(),
            });
        }
        if !state.blobs.contains_key(key) {
            return Err(BackendError::Rejected {
                status: 404,
                message: "Object not found".to_string(),
            });
        }
        Ok(SignedUrl(format!(
            "memory://{RESUME_BUCKET}/{key}?expires_in={}",
            expires_in.as_secs()
        )))
    }
}

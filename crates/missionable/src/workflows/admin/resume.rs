use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::backend::{BackendError, RemoteDataService, Session};
use crate::workflows::talent::TalentProfile;

/// Lifetime of the capability URL handed to the browser.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(60);

/// `Jane  Q Doe` + `abc.pdf` → `Jane_Q_Doe_resume.pdf`.
pub fn download_file_name(full_name: &str, resume_path: &str) -> String {
    let stem = full_name.split_whitespace().collect::<Vec<_>>().join("_");
    let extension = resume_path.rsplit('.').next().unwrap_or(resume_path);
    format!("{stem}_resume.{extension}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDownload {
    pub url: String,
    pub file_name: String,
}

impl ResumeDownload {
    /// The signed URL with the suggested file name attached as a `download`
    /// query parameter. Unparseable URLs are passed through untouched.
    pub fn redirect_url(&self) -> String {
        match reqwest::Url::parse(&self.url) {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair("download", &self.file_name);
                url.to_string()
            }
            Err(_) => self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeError {
    #[error("No resume on file for this candidate.")]
    NotOnFile,
    #[error("Resume is unavailable right now.")]
    Unavailable(#[source] BackendError),
}

pub struct ResumeRetriever<B: ?Sized> {
    backend: Arc<B>,
}

impl<B> ResumeRetriever<B>
where
    B: RemoteDataService + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn prepare(
        &self,
        session: &Session,
        profile: &TalentProfile,
    ) -> Result<ResumeDownload, ResumeError> {
        let path = profile.resume_path.as_deref().ok_or(ResumeError::NotOnFile)?;

        let signed = self
            .backend
            .create_signed_url(session, path, SIGNED_URL_TTL)
            .await
            .map_err(|err| {
                warn!(talent = %profile.id, error = %err, "signed resume url unavailable");
                ResumeError::Unavailable(err)
            })?;

        info!(talent = %profile.id, "resume download issued");
        Ok(ResumeDownload {
            url: signed.0,
            file_name: download_file_name(&profile.full_name, path),
        })
    }
}

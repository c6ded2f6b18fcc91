use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{
    BackendError, RemoteDataService, Session, SignedUrl, INQUIRIES_TABLE, RESUME_BUCKET,
    TALENTS_TABLE,
};
use crate::config::BackendConfig;
use crate::error::AppError;
use crate::workflows::employer::EmployerInquiry;
use crate::workflows::talent::{NewTalentProfile, TalentProfile};

/// HTTP client for a Supabase-style backend: GoTrue auth under `/auth/v1`,
/// PostgREST rows under `/rest/v1`, object storage under `/storage/v1`.
#[derive(Clone)]
pub struct HostedBackend {
    base_url: Url,
    anon_key: String,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    user: Option<UserResponse>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: Option<String>,
}

impl HostedBackend {
    pub fn new(
        base_url: &str,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| BackendError::Transport(format!("invalid backend url: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Transport(format!(
                "invalid backend url: {base_url}"
            )));
        }
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            anon_key: anon_key.into(),
            http_client,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, AppError> {
        let url = config.require_url()?;
        Ok(Self::new(url, config.anon_key.clone(), config.timeout)?)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // `new` rejects URLs without a hierarchical path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attach the project key plus either the user's token or the anonymous key.
    fn authorize(&self, builder: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        builder.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    async fn send(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<Response, BackendError> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|err| {
            warn!(operation, error = %err, "backend request failed");
            BackendError::from(err)
        })?;

        let status = response.status();
        debug!(
            operation,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "backend response"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        warn!(operation, status = status.as_u16(), %message, "backend rejected request");
        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull the human readable message out of the JSON error envelopes the
/// auth, rest and storage services each use.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[async_trait]
impl RemoteDataService for HostedBackend {
    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, BackendError> {
        let request = self.authorize(
            self.http_client.get(self.endpoint(["auth", "v1", "user"])),
            Some(access_token),
        );

        match self.send("session", request).await {
            Ok(response) => {
                let user: UserResponse = response.json().await?;
                Ok(Some(Session {
                    access_token: access_token.to_string(),
                    email: user.email,
                }))
            }
            Err(BackendError::Rejected { status, .. })
                if status == StatusCode::UNAUTHORIZED.as_u16()
                    || status == StatusCode::FORBIDDEN.as_u16() =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let request = self
            .authorize(
                self.http_client
                    .post(self.endpoint(["auth", "v1", "token"]))
                    .query(&[("grant_type", "password")]),
                None,
            )
            .json(&json!({ "email": email, "password": password }));

        let token: TokenResponse = self.send("sign_in", request).await?.json().await?;
        Ok(Session {
            access_token: token.access_token,
            email: token.user.and_then(|user| user.email),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let request = self.authorize(
            self.http_client.post(self.endpoint(["auth", "v1", "logout"])),
            Some(access_token),
        );
        self.send("sign_out", request).await?;
        Ok(())
    }

    async fn insert_talent(&self, record: &NewTalentProfile) -> Result<(), BackendError> {
        let request = self
            .authorize(
                self.http_client
                    .post(self.endpoint(["rest", "v1", TALENTS_TABLE])),
                None,
            )
            .header("Prefer", "return=minimal")
            .json(record);
        self.send("insert_talent", request).await?;
        Ok(())
    }

    async fn insert_inquiry(&self, inquiry: &EmployerInquiry) -> Result<(), BackendError> {
        let request = self
            .authorize(
                self.http_client
                    .post(self.endpoint(["rest", "v1", INQUIRIES_TABLE])),
                None,
            )
            .header("Prefer", "return=minimal")
            .json(inquiry);
        self.send("insert_inquiry", request).await?;
        Ok(())
    }

    async fn list_talents(&self, session: &Session) -> Result<Vec<TalentProfile>, BackendError> {
        let request = self.authorize(
            self.http_client
                .get(self.endpoint(["rest", "v1", TALENTS_TABLE]))
                .query(&[("select", "*"), ("order", "created_at.desc")]),
            Some(&session.access_token),
        );
        let profiles = self.send("list_talents", request).await?.json().await?;
        Ok(profiles)
    }

    async fn upload_resume(&self, key: &str, content: &[u8]) -> Result<(), BackendError> {
        let content_type = mime_guess::from_path(key).first_or(mime::APPLICATION_OCTET_STREAM);
        let request = self
            .authorize(
                self.http_client.post(self.endpoint([
                    "storage",
                    "v1",
                    "object",
                    RESUME_BUCKET,
                    key,
                ])),
                None,
            )
            .header(reqwest::header::CONTENT_TYPE, content_type.as_ref())
            .body(content.to_vec());
        self.send("upload_resume", request).await?;
        Ok(())
    }

    async fn create_signed_url(
        &self,
        session: &Session,
        key: &str,
        expires_in: Duration,
    ) -> Result<SignedUrl, BackendError> {
        let request = self
            .authorize(
                self.http_client.post(self.endpoint([
                    "storage",
                    "v1",
                    "object",
                    "sign",
                    RESUME_BUCKET,
                    key,
                ])),
                Some(&session.access_token),
            )
            .json(&json!({ "expiresIn": expires_in.as_secs() }));

        let signed: SignedUrlResponse = self
            .send("create_signed_url", request)
            .await?
            .json()
            .await?;
        let path = signed
            .signed_url
            .ok_or_else(|| BackendError::Decode("signed url missing from response".to_string()))?;

        if path.starts_with("http://") || path.starts_with("https://") {
            Ok(SignedUrl(path))
        } else {
            let storage = self.endpoint(["storage", "v1"]);
            Ok(SignedUrl(format!("{storage}{path}")))
        }
    }
}

#[cfg(test)]
mod tests;

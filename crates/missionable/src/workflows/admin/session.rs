use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{RemoteDataService, Session};

/// Result of the gate check run before any dashboard data is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Authenticated(Session),
    RedirectToLogin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// Every sign-in failure is reported the same way.
    #[error("Invalid email or password.")]
    InvalidCredentials,
}

/// Resolves the admin session against the backend. Unreachable backends deny
/// access exactly like an absent session; nothing is retried.
pub struct SessionGate<B: ?Sized> {
    backend: Arc<B>,
}

impl<B> Clone for SessionGate<B>
where
    B: ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> SessionGate<B>
where
    B: RemoteDataService + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn check(&self, access_token: Option<&str>) -> GateDecision {
        let Some(token) = access_token.filter(|token| !token.trim().is_empty()) else {
            debug!("no session token presented");
            return GateDecision::RedirectToLogin;
        };

        match self.backend.current_session(token).await {
            Ok(Some(session)) => GateDecision::Authenticated(session),
            Ok(None) => {
                debug!("session token no longer valid");
                GateDecision::RedirectToLogin
            }
            Err(err) => {
                warn!(error = %err, "session check failed; treating as signed out");
                GateDecision::RedirectToLogin
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, LoginError> {
        match self.backend.sign_in(email.trim(), password).await {
            Ok(session) => {
                info!("admin signed in");
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "admin sign-in rejected");
                Err(LoginError::InvalidCredentials)
            }
        }
    }

    /// Best effort: the local session is dropped whether or not the backend
    /// acknowledged the revocation.
    pub async fn sign_out(&self, access_token: &str) {
        if let Err(err) = self.backend.sign_out(access_token).await {
            warn!(error = %err, "backend sign-out failed");
        }
    }
}

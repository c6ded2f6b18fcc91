use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use cookie::time::Duration;
use cookie::{Cookie, CookieBuilder, SameSite};
use metrics_exporter_prometheus::PrometheusHandle;
use missionable::backend::RemoteDataService;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) const SESSION_COOKIE: &str = "missionable_session";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) backend: Arc<dyn RemoteDataService>,
    pub(crate) site: SiteLinks,
    pub(crate) secure_cookies: bool,
}

/// Builds absolute links under the configured base path (`""` mounts at the root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SiteLinks {
    base_path: String,
}

impl SiteLinks {
    pub(crate) fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub(crate) fn base_path(&self) -> &str {
        &self.base_path
    }

    pub(crate) fn home(&self) -> String {
        if self.base_path.is_empty() {
            "/".to_string()
        } else {
            self.base_path.clone()
        }
    }

    pub(crate) fn to(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    pub(crate) fn cookie_path(&self) -> String {
        self.home()
    }
}

fn session_cookie_builder(links: &SiteLinks, value: String) -> CookieBuilder<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path(links.cookie_path())
        .http_only(true)
        .same_site(SameSite::Lax)
}

pub(crate) fn session_cookie(
    links: &SiteLinks,
    access_token: &str,
    secure: bool,
) -> Cookie<'static> {
    session_cookie_builder(links, access_token.to_string())
        .secure(secure)
        .build()
}

pub(crate) fn expired_session_cookie(links: &SiteLinks) -> Cookie<'static> {
    session_cookie_builder(links, String::new())
        .max_age(Duration::ZERO)
        .build()
}

/// Reads the session token from any `Cookie` header on the request.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|value| !value.is_empty())
}

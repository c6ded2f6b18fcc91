use crate::infra::{expired_session_cookie, session_cookie, session_token, AppState};
use crate::views::{dashboard_page, login_page, Notice};
use axum::extract::{Form, Query};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Extension;
use missionable::workflows::admin::{
    DashboardAccess, DashboardLoader, ResumeError, ResumeRetriever, SessionGate,
};
use missionable::workflows::talent::{ClearanceFilter, ExperienceThreshold, TalentFilter};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
}

/// Dashboard criteria as they appear in the query string.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    pub(crate) skill: Option<String>,
    pub(crate) clearance: Option<String>,
    pub(crate) experience: Option<String>,
}

impl DashboardQuery {
    pub(crate) fn criteria(&self) -> TalentFilter {
        TalentFilter {
            skill_term: self.skill.clone().unwrap_or_default(),
            clearance: self
                .clearance
                .as_deref()
                .map(ClearanceFilter::from_param)
                .unwrap_or_default(),
            min_experience: self
                .experience
                .as_deref()
                .map(ExperienceThreshold::from_param)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResumeQuery {
    pub(crate) id: String,
    pub(crate) skill: Option<String>,
    pub(crate) clearance: Option<String>,
    pub(crate) experience: Option<String>,
}

impl ResumeQuery {
    fn criteria(&self) -> TalentFilter {
        DashboardQuery {
            skill: self.skill.clone(),
            clearance: self.clearance.clone(),
            experience: self.experience.clone(),
        }
        .criteria()
    }
}

pub(crate) async fn login_form(Extension(state): Extension<AppState>) -> Html<String> {
    Html(login_page(&state.site, "", None))
}

pub(crate) async fn login_submit(
    Extension(state): Extension<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let gate = SessionGate::new(state.backend.clone());
    match gate.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            let cookie = session_cookie(&state.site, &session.access_token, state.secure_cookies);
            (
                [(SET_COOKIE, cookie.to_string())],
                Redirect::to(&state.site.to("/admin")),
            )
                .into_response()
        }
        Err(err) => (
            StatusCode::UNAUTHORIZED,
            Html(login_page(&state.site, &form.email, Some(&err.to_string()))),
        )
            .into_response(),
    }
}

pub(crate) async fn dashboard(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let token = session_token(&headers);
    let loader = DashboardLoader::new(state.backend.clone());
    match loader.load(token.as_deref()).await {
        DashboardAccess::RedirectToLogin => {
            Redirect::to(&state.site.to("/admin/login")).into_response()
        }
        DashboardAccess::Ready { dashboard, .. } => {
            let dashboard = dashboard.with_criteria(query.criteria());
            Html(dashboard_page(&state.site, &dashboard, None)).into_response()
        }
    }
}

pub(crate) async fn logout(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        SessionGate::new(state.backend.clone()).sign_out(&token).await;
        info!("admin signed out");
    }
    (
        [(SET_COOKIE, expired_session_cookie(&state.site).to_string())],
        Redirect::to(&state.site.to("/admin/login")),
    )
        .into_response()
}

/// Issues a short-lived signed URL and redirects the browser to it. Failures
/// re-render the dashboard, with the same criteria, carrying the error notice.
pub(crate) async fn resume(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResumeQuery>,
) -> Response {
    let token = session_token(&headers);
    let loader = DashboardLoader::new(state.backend.clone());
    let (session, dashboard) = match loader.load(token.as_deref()).await {
        DashboardAccess::RedirectToLogin => {
            return Redirect::to(&state.site.to("/admin/login")).into_response()
        }
        DashboardAccess::Ready { session, dashboard } => {
            (session, dashboard.with_criteria(query.criteria()))
        }
    };

    let retriever = ResumeRetriever::new(state.backend.clone());
    let outcome = match dashboard.find(&query.id) {
        Some(profile) => retriever.prepare(&session, profile).await,
        None => Err(ResumeError::NotOnFile),
    };

    match outcome {
        Ok(download) => Redirect::to(&download.redirect_url()).into_response(),
        Err(err) => {
            let status = match &err {
                ResumeError::NotOnFile => StatusCode::NOT_FOUND,
                ResumeError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            };
            let notice = Notice::Error(err.to_string());
            (
                status,
                Html(dashboard_page(&state.site, &dashboard, Some(&notice))),
            )
                .into_response()
        }
    }
}

use crate::admin;
use crate::infra::AppState;
use crate::public::{self, JOIN_BODY_LIMIT};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;

/// Site pages mounted under the configured base path; operational endpoints
/// stay at the root.
pub(crate) fn app_router(state: AppState) -> Router {
    let site = Router::new()
        .route("/", get(public::home))
        .route(
            "/join",
            get(public::join_form)
                .post(public::join_submit)
                .layer(DefaultBodyLimit::max(JOIN_BODY_LIMIT)),
        )
        .route(
            "/employers",
            get(public::employers_form).post(public::employers_submit),
        )
        .route(
            "/admin/login",
            get(admin::login_form).post(admin::login_submit),
        )
        .route("/admin", get(admin::dashboard))
        .route("/admin/logout", post(admin::logout))
        .route("/admin/resume", get(admin::resume));

    let router = match state.site.base_path() {
        "" => site,
        base_path => Router::new().nest(base_path, site),
    };

    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

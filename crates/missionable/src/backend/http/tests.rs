use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode as HttpStatus, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::*;
use crate::workflows::talent::WorkPreference;

/// Requests seen by the local stand-in service, as `"<what>: <value>"` lines.
type Seen = Arc<Mutex<Vec<String>>>;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stand-in service");
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> HostedBackend {
    HostedBackend::new(base_url, "anon-key", Duration::from_secs(5)).expect("client builds")
}

fn session(token: &str) -> Session {
    Session {
        access_token: token.to_string(),
        email: None,
    }
}

fn new_profile() -> NewTalentProfile {
    NewTalentProfile {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        linkedin: None,
        tech_stack: vec!["Rust".to_string()],
        years_of_experience: 4,
        clearance_eligible: false,
        work_preference: WorkPreference::Remote,
        accommodation_preferences: None,
        resume_path: None,
    }
}

async fn user_for_token(headers: HeaderMap) -> impl IntoResponse {
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    match bearer {
        "Bearer live" => (HttpStatus::OK, Json(json!({ "email": "ops@example.com" }))),
        "Bearer expired" => (HttpStatus::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))),
        "Bearer revoked" => (HttpStatus::FORBIDDEN, Json(json!({ "msg": "forbidden" }))),
        _ => (
            HttpStatus::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "auth service down" })),
        ),
    }
}

#[test]
fn error_message_reads_each_service_envelope() {
    assert_eq!(
        error_message(r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#)
            .as_deref(),
        Some("duplicate key value violates unique constraint")
    );
    assert_eq!(
        error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
            .as_deref(),
        Some("Invalid login credentials")
    );
    assert_eq!(error_message("<html>bad gateway</html>"), None);
}

#[test]
fn endpoints_drop_trailing_slash_and_encode_segments() {
    let backend = client("https://project.example.co/");
    assert_eq!(
        backend.endpoint(["auth", "v1", "user"]).as_str(),
        "https://project.example.co/auth/v1/user"
    );
    assert_eq!(
        backend
            .endpoint(["storage", "v1", "object", "resumes", "my resume.pdf"])
            .as_str(),
        "https://project.example.co/storage/v1/object/resumes/my%20resume.pdf"
    );
}

#[test]
fn rejects_urls_without_a_path() {
    assert!(matches!(
        HostedBackend::new("mailto:ops@example.com", "anon", Duration::from_secs(5)),
        Err(BackendError::Transport(_))
    ));
    assert!(matches!(
        HostedBackend::new("not a url", "anon", Duration::from_secs(5)),
        Err(BackendError::Transport(_))
    ));
}

#[tokio::test]
async fn current_session_separates_absent_sessions_from_failures() {
    let base = serve(Router::new().route("/auth/v1/user", get(user_for_token))).await;
    let backend = client(&base);

    let live = backend.current_session("live").await.expect("live session");
    assert_eq!(
        live,
        Some(Session {
            access_token: "live".to_string(),
            email: Some("ops@example.com".to_string()),
        })
    );
    assert_eq!(backend.current_session("expired").await, Ok(None));
    assert_eq!(backend.current_session("revoked").await, Ok(None));
    assert_eq!(
        backend.current_session("anything-else").await,
        Err(BackendError::Rejected {
            status: 500,
            message: "auth service down".to_string(),
        })
    );
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);

    let result = client(&format!("http://{addr}")).current_session("live").await;

    assert!(matches!(result, Err(BackendError::Transport(_))));
}

#[tokio::test]
async fn duplicate_email_envelope_is_detected() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/rest/v1/talents",
            post(|State(seen): State<Seen>, headers: HeaderMap| async move {
                let prefer = headers
                    .get("prefer")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                seen.lock().expect("seen lock").push(format!("prefer: {prefer}"));
                (
                    HttpStatus::CONFLICT,
                    Json(json!({
                        "code": "23505",
                        "details": "Key (email)=(jane@example.com) already exists.",
                        "message": "duplicate key value violates unique constraint \"talents_email_key\""
                    })),
                )
            }),
        )
        .with_state(seen.clone());
    let backend = client(&serve(router).await);

    let err = backend
        .insert_talent(&new_profile())
        .await
        .expect_err("duplicate is rejected");

    assert!(err.is_duplicate_key());
    assert!(matches!(err, BackendError::Rejected { status: 409, .. }));
    assert_eq!(
        *seen.lock().expect("seen lock"),
        vec!["prefer: return=minimal".to_string()]
    );
}

#[tokio::test]
async fn listing_asks_for_newest_first() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/rest/v1/talents",
            get(
                |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                    let mut seen = seen.lock().expect("seen lock");
                    seen.push(format!("select: {}", params.get("select").cloned().unwrap_or_default()));
                    seen.push(format!("order: {}", params.get("order").cloned().unwrap_or_default()));
                    Json(json!([{
                        "id": "t-1",
                        "full_name": "Jane Doe",
                        "email": "jane@example.com",
                        "linkedin": null,
                        "tech_stack": ["Rust"],
                        "years_of_experience": 4,
                        "clearance_eligible": false,
                        "work_preference": "Remote",
                        "accommodation_preferences": null,
                        "resume_path": null,
                        "created_at": "2025-03-04T15:20:00+00:00"
                    }]))
                },
            ),
        )
        .with_state(seen.clone());
    let backend = client(&serve(router).await);

    let profiles = backend
        .list_talents(&session("live"))
        .await
        .expect("listing succeeds");

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].full_name, "Jane Doe");
    assert_eq!(
        *seen.lock().expect("seen lock"),
        vec!["select: *".to_string(), "order: created_at.desc".to_string()]
    );
}

#[tokio::test]
async fn upload_encodes_the_storage_key_and_sets_content_type() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/storage/v1/object/resumes/:key",
            post(
                |State(seen): State<Seen>, uri: Uri, headers: HeaderMap| async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let mut seen = seen.lock().expect("seen lock");
                    seen.push(format!("path: {}", uri.path()));
                    seen.push(format!("content-type: {content_type}"));
                    Json(json!({ "Key": "resumes/stored" }))
                },
            ),
        )
        .with_state(seen.clone());
    let backend = client(&serve(router).await);

    backend
        .upload_resume("my resume.pdf", b"%PDF-1.4")
        .await
        .expect("upload succeeds");

    assert_eq!(
        *seen.lock().expect("seen lock"),
        vec![
            "path: /storage/v1/object/resumes/my%20resume.pdf".to_string(),
            "content-type: application/pdf".to_string(),
        ]
    );
}

#[tokio::test]
async fn relative_signed_urls_are_joined_under_storage() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/storage/v1/object/sign/resumes/:key",
            post(
                |State(seen): State<Seen>, Path(key): Path<String>, Json(body): Json<Value>| async move {
                    seen.lock()
                        .expect("seen lock")
                        .push(format!("expiresIn: {}", body["expiresIn"]));
                    if key == "hosted.pdf" {
                        Json(json!({ "signedURL": "https://cdn.example.co/hosted.pdf?token=abc" }))
                    } else {
                        Json(json!({ "signedURL": format!("/object/sign/resumes/{key}?token=abc") }))
                    }
                },
            ),
        )
        .with_state(seen.clone());
    let base = serve(router).await;
    let backend = client(&base);

    let relative = backend
        .create_signed_url(&session("live"), "a1.pdf", Duration::from_secs(60))
        .await
        .expect("signed url");
    let absolute = backend
        .create_signed_url(&session("live"), "hosted.pdf", Duration::from_secs(60))
        .await
        .expect("signed url");

    assert_eq!(
        relative,
        SignedUrl(format!("{base}/storage/v1/object/sign/resumes/a1.pdf?token=abc"))
    );
    assert_eq!(
        absolute,
        SignedUrl("https://cdn.example.co/hosted.pdf?token=abc".to_string())
    );
    assert_eq!(
        *seen.lock().expect("seen lock"),
        vec!["expiresIn: 60".to_string(), "expiresIn: 60".to_string()]
    );
}

#[tokio::test]
async fn missing_signed_url_is_a_decode_failure() {
    let router = Router::new().route(
        "/storage/v1/object/sign/resumes/:key",
        post(|| async { Json(json!({ "error": null })) }),
    );
    let backend = client(&serve(router).await);

    let result = backend
        .create_signed_url(&session("live"), "a1.pdf", Duration::from_secs(60))
        .await;

    assert!(matches!(result, Err(BackendError::Decode(_))));
}

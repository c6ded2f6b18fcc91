use crate::infra::AppState;
use crate::views::{employers_page, home_page, join_page, EmployersView, JoinView};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use missionable::workflows::employer::{EmployerInquiryService, InquiryError, InquiryForm};
use missionable::workflows::talent::{
    ResumeAttachment, SubmissionError, TalentIntakeService, TalentSignup, WorkPreference,
};
use tracing::warn;

/// Multipart ceiling for the sign-up form: the resume limit plus room for the text fields.
pub(crate) const JOIN_BODY_LIMIT: usize = 12 * 1024 * 1024;

const UNREADABLE_FORM: &str = "We could not read your submission. Please try again.";

pub(crate) async fn home(Extension(state): Extension<AppState>) -> Html<String> {
    Html(home_page(&state.site))
}

pub(crate) async fn join_form(Extension(state): Extension<AppState>) -> Html<String> {
    Html(join_page(&state.site, &JoinView::Blank))
}

pub(crate) async fn join_submit(
    Extension(state): Extension<AppState>,
    multipart: Multipart,
) -> Response {
    let mut signup = match read_signup(multipart).await {
        Ok(signup) => signup,
        Err(err) => {
            warn!(error = %err, "unreadable talent sign-up");
            let blank = TalentSignup::default();
            let view = JoinView::Rejected {
                signup: &blank,
                message: UNREADABLE_FORM.to_string(),
            };
            return (StatusCode::BAD_REQUEST, Html(join_page(&state.site, &view))).into_response();
        }
    };

    // The resume is never echoed back, so keep the sticky copy free of it.
    let resume = signup.resume.take();
    let sticky = signup.clone();
    signup.resume = resume;

    let service = TalentIntakeService::new(state.backend.clone());
    match service.submit(signup).await {
        Ok(_) => Html(join_page(&state.site, &JoinView::Submitted)).into_response(),
        Err(err) => {
            let status = match &err {
                SubmissionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SubmissionError::DuplicateEmail => StatusCode::CONFLICT,
                SubmissionError::Upload(_) | SubmissionError::Insert(_) => StatusCode::BAD_GATEWAY,
            };
            let view = JoinView::Rejected {
                signup: &sticky,
                message: err.to_string(),
            };
            (status, Html(join_page(&state.site, &view))).into_response()
        }
    }
}

pub(crate) async fn employers_form(Extension(state): Extension<AppState>) -> Html<String> {
    Html(employers_page(&state.site, &EmployersView::Blank))
}

pub(crate) async fn employers_submit(
    Extension(state): Extension<AppState>,
    multipart: Multipart,
) -> Response {
    let form = match read_inquiry(multipart).await {
        Ok(form) => form,
        Err(err) => {
            warn!(error = %err, "unreadable employer inquiry");
            let blank = InquiryForm::default();
            let view = EmployersView::Rejected {
                form: &blank,
                message: UNREADABLE_FORM.to_string(),
            };
            return (StatusCode::BAD_REQUEST, Html(employers_page(&state.site, &view)))
                .into_response();
        }
    };

    let sticky = form.clone();
    let service = EmployerInquiryService::new(state.backend.clone());
    match service.submit(form).await {
        Ok(_) => Html(employers_page(&state.site, &EmployersView::Submitted)).into_response(),
        Err(err) => {
            let status = match &err {
                InquiryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                InquiryError::Insert(_) => StatusCode::BAD_GATEWAY,
            };
            let view = EmployersView::Rejected {
                form: &sticky,
                message: err.to_string(),
            };
            (status, Html(employers_page(&state.site, &view))).into_response()
        }
    }
}

async fn read_signup(mut multipart: Multipart) -> Result<TalentSignup, MultipartError> {
    let mut signup = TalentSignup::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "resume" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content = field.bytes().await?;
            if !file_name.is_empty() {
                signup.resume = Some(ResumeAttachment {
                    file_name,
                    content: content.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "full_name" => signup.full_name = value,
            "email" => signup.email = value,
            "linkedin" => signup.linkedin = Some(value),
            "tech_stack" => signup.tech_stack.push(value),
            "years_of_experience" => signup.years_of_experience = value.trim().parse().ok(),
            "clearance_eligible" => {
                signup.clearance_eligible = match value.trim() {
                    "yes" => Some(true),
                    "no" => Some(false),
                    _ => None,
                }
            }
            "work_preference" => signup.work_preference = WorkPreference::from_label(&value),
            "accommodation_preferences" => signup.accommodation_preferences = Some(value),
            _ => {}
        }
    }

    Ok(signup)
}

async fn read_inquiry(mut multipart: Multipart) -> Result<InquiryForm, MultipartError> {
    let mut form = InquiryForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await?;
        match name.as_str() {
            "company_name" => form.company_name = value,
            "contact_email" => form.contact_email = value,
            "role_description" => form.role_description = value,
            "required_skills" => form.required_skills.push(value),
            _ => {}
        }
    }

    Ok(form)
}

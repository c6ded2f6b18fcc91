use reqwest::Url;

use super::talent::catalog::canonical_skill;

/// Local, pre-submission failures. None of these reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required.")]
    MissingField { field: &'static str },
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("{field} must be a web address starting with http:// or https://.")]
    InvalidUrl { field: &'static str },
    #[error("Please select at least one skill from the tech stack.")]
    EmptyTechStack,
    #[error("Please select at least one required skill.")]
    EmptyRequiredSkills,
    #[error("\"{0}\" is not one of the listed skills.")]
    UnknownSkill(String),
    #[error("Resume must be a PDF, DOC, or DOCX file.")]
    UnsupportedResumeType,
    #[error("Resume must be 10 MB or smaller.")]
    ResumeTooLarge,
}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// True for absolute `http`/`https` URLs with a host. Other schemes are never
/// rendered as links.
pub fn is_web_url(raw: &str) -> bool {
    Url::parse(raw.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

pub(crate) fn optional_url(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match optional_text(value) {
        Some(url) if !is_web_url(&url) => Err(ValidationError::InvalidUrl { field }),
        other => Ok(other),
    }
}

pub(crate) fn require_email(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let email = require_text(value, field)?;
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !email.contains(' ') =>
        {
            Ok(email)
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Canonicalize a multi-select tag set, keeping selection order and dropping repeats.
/// `empty` is raised when nothing was selected.
pub(crate) fn validate_tags(
    selected: &[String],
    empty: ValidationError,
) -> Result<Vec<String>, ValidationError> {
    let mut tags: Vec<String> = Vec::with_capacity(selected.len());
    for raw in selected {
        let canonical = canonical_skill(raw)
            .ok_or_else(|| ValidationError::UnknownSkill(raw.trim().to_string()))?;
        if !tags.iter().any(|existing| existing == canonical) {
            tags.push(canonical.to_string());
        }
    }

    if tags.is_empty() {
        return Err(empty);
    }
    Ok(tags)
}

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// One entry of the `errors` list Walutomat attaches to failed calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed with status {status_code}: {message}")]
    RequestFailed {
        status_code: u16,
        message: String,
        errors: Vec<ApiErrorDetail>,
        raw_body: Option<String>,
    },
    #[error("malformed response ({reason})")]
    MalformedResponse { raw_body: String, reason: String },
    #[error("transport failure: {message}")]
    TransportFailure { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status_code, .. } => Some(*status_code),
            Self::MalformedResponse { .. } => Some(StatusCode::OK.as_u16()),
            Self::TransportFailure { .. } => None,
        }
    }

    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { raw_body, .. } => raw_body.as_deref(),
            Self::MalformedResponse { raw_body, .. } => Some(raw_body),
            Self::TransportFailure { .. } => None,
        }
    }

    pub fn errors(&self) -> &[ApiErrorDetail] {
        match self {
            Self::RequestFailed { errors, .. } => errors,
            _ => &[],
        }
    }

    pub(crate) fn request_failed(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let errors = parsed
            .as_ref()
            .map(|b| b.errors.clone())
            .unwrap_or_default();

        let message = parsed
            .and_then(|b| b.message())
            .or_else(|| plain_text_message(body))
            .unwrap_or_else(|| {
                if status.is_success() {
                    "request rejected without details".to_string()
                } else {
                    status_description(status)
                }
            });

        Self::RequestFailed {
            status_code: status.as_u16(),
            message,
            errors,
            raw_body: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub(crate) fn malformed(body: &str, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            raw_body: body.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::TransportFailure {
            message: value.to_string(),
        }
    }
}

/// Shape shared by `{"message": ...}` and `{"errors": [...]}` bodies.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl ErrorBody {
    pub(crate) fn message(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.trim().is_empty()) {
            return Some(message.clone());
        }
        if self.errors.is_empty() {
            return None;
        }

        let descriptions: Vec<&str> = self
            .errors
            .iter()
            .map(|e| e.description.as_deref().unwrap_or("Unknown error"))
            .collect();
        Some(descriptions.join(", "))
    }
}

fn plain_text_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.starts_with('[') {
        return None;
    }
    Some(trimmed.to_string())
}

fn status_description(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

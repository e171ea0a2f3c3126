use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub const CONNECTIVITY_MESSAGE: &str =
    "Cannot reach the server. Please check your network connection.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    #[error("{}", CONNECTIVITY_MESSAGE)]
    Connectivity,

    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Expected a response body but the server sent none")]
    EmptyBody,

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Session storage migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    /// Builds an API error from a non-2xx status and its decoded JSON body.
    pub fn from_response(status: StatusCode, body: Value) -> Self {
        let message = backend_message(&body).unwrap_or_else(|| {
            format!("API error: {}", status.canonical_reason().unwrap_or("unknown status"))
        });
        AppError::Api {
            status: status.as_u16(),
            message,
            body: Some(body),
        }
    }

    pub fn non_json_response(status: StatusCode) -> Self {
        AppError::Api {
            status: status.as_u16(),
            message: format!("Server did not return JSON. Status: {}", status.as_u16()),
            body: None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the operator when a call fails.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Connectivity => CONNECTIVITY_MESSAGE.to_string(),
            AppError::SessionExpired => "Unable to refresh the session. Please log in again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// The backend sends `message` either as a string or, for validation
/// failures, as a list of strings.
fn backend_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(msg) if !msg.is_empty() => Some(msg.clone()),
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

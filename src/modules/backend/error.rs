use reqwest::StatusCode;
use thiserror::Error;

use crate::shared::types::ErrorBody;

/// Failure of a single backend call.
///
/// Every variant is recoverable: callers log it and decide whether the user sees a toast.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Transport(String),

    #[error("Backend returned status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Backend rejected the request ({status}): {}", .messages.join(", "))]
    Validation { status: u16, messages: Vec<String> },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

impl BackendError {
    /// Classify a non-2xx response from its status and raw body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        match parsed.validation_messages() {
            Some(messages) if !messages.is_empty() => BackendError::Validation {
                status: status.as_u16(),
                messages,
            },
            _ => BackendError::Status {
                status: status.as_u16(),
                message: parsed.message.filter(|m| !m.trim().is_empty()),
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } | BackendError::Validation { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Missing, expired or insufficient credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Message suitable for a toast: validation messages joined, else the server message,
    /// else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BackendError::Validation { messages, .. } => messages.join(", "),
            BackendError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

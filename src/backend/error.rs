//! Backend error types and message extraction.

use serde_json::Value;
use thiserror::Error;

/// Message shown when an error body carries nothing usable.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Errors that can occur while talking to the REST backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Base URL or path could not form a valid URL.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Connection failure or timeout; no response was received.
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    /// HTTP 2xx but the envelope reported an error.
    #[error("{message}")]
    Rejected { message: String },

    /// Body was not the expected envelope.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Text suitable for a one-line user notification.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Http { message, .. } | BackendError::Rejected { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Transport(format!("request timed out: {}", e))
        } else if e.is_decode() {
            BackendError::InvalidResponse(e.to_string())
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Extract a human-readable message from an error body.
///
/// Tries `message`, then `error.message`, then a string `error`, then falls
/// back to a generic text.
pub fn error_message(body: &Value) -> String {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    non_empty(body.get("message"))
        .or_else(|| non_empty(body.get("error").and_then(|e| e.get("message"))))
        .or_else(|| non_empty(body.get("error")))
        .or_else(|| non_empty(Some(body)))
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response blocked by the service: {0}")]
    Blocked(String),

    #[error("LLM API key not found. Set the {0} environment variable.")]
    MissingApiKey(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Map a Gemini error body status/code to an error
    pub fn from_status(status: u16, service_status: Option<&str>, message: String) -> Self {
        if status == 401 || status == 403 || service_status == Some("UNAUTHENTICATED") {
            return LlmError::AuthFailed(message);
        }
        LlmError::ApiError { status, message }
    }
}

//! LLM request/response types for Wander Wise
//!
//! A request is a single prompt, optionally constrained to JSON output matching
//! a response schema. Each request is independent; no conversation is kept.

use serde_json::Value;
use tracing::debug;

/// A generation request - everything needed for one model call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Full prompt text
    pub prompt: String,

    /// When set, the model must answer with JSON conforming to this schema
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    /// Free text request (no schema)
    pub fn text(prompt: impl Into<String>) -> Self {
        debug!("GenerateRequest::text: called");
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// JSON request constrained by a response schema
    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        debug!("GenerateRequest::json: called");
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }

    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Response from a generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate
    pub text: String,

    /// Why the model stopped
    pub finish_reason: FinishReason,

    /// Token accounting
    pub usage: TokenUsage,
}

impl GenerateResponse {
    /// Plain response with default metadata
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other(String),
}

impl FinishReason {
    /// Parse from Gemini `finishReason`
    pub fn from_gemini(s: &str) -> Self {
        debug!(%s, "FinishReason::from_gemini: called");
        match s {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            "RECITATION" => FinishReason::Recitation,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// Token usage as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

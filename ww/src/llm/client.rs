//! LlmClient trait definition

use async_trait::async_trait;

use super::{GenerateRequest, GenerateResponse, LlmError};

/// Stateless LLM client - each call is an independent round trip
///
/// Implementations perform exactly one request per call: no retries, no
/// caching. Identical requests may yield different answers.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single generation request and wait for the full response
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}

//! Text-generation provider abstraction and implementations.
//!
//! Handlers talk to a [`TextProvider`] so the upstream (OpenAI, or a mock in
//! tests) can be swapped without touching request handling.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

/// Error type for provider operations.
///
/// The HTTP layer does not distinguish between variants; they exist for logs.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

impl FinishReason {
    pub fn from_openai(reason: Option<&str>) -> Self {
        match reason {
            Some("stop") | None => FinishReason::Complete,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(_) => FinishReason::Other,
        }
    }
}

/// Generation parameters for a single call.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Maximum output tokens.
    pub max_tokens: Option<u32>,
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: FinishReason,
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `prompt` as a single user message, authorized with `api_key`.
    async fn generate(
        &self,
        api_key: &Secret<String>,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Short provider name for logs and metric labels.
    fn name(&self) -> &'static str;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_reason_mapping() {
        assert_eq!(FinishReason::from_openai(Some("stop")), FinishReason::Complete);
        assert_eq!(FinishReason::from_openai(None), FinishReason::Complete);
        assert_eq!(FinishReason::from_openai(Some("length")), FinishReason::Length);
        assert_eq!(
            FinishReason::from_openai(Some("content_filter")),
            FinishReason::ContentFilter
        );
        assert_eq!(FinishReason::from_openai(Some("tool_calls")), FinishReason::Other);
    }

    #[test]
    fn api_error_message_includes_status() {
        let err = ProviderError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        assert_eq!(err.to_string(), "API error 401: Incorrect API key provided");
    }

    #[test]
    fn client_error_is_not_reported_as_a_credential_problem() {
        let err = ProviderError::Client("TLS backend unavailable".to_string());
        assert_eq!(err.to_string(), "HTTP client error: TLS backend unavailable");
    }
}

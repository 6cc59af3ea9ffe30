//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::sync::Mutex;

/// A call observed by [`MockTextProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub api_key: String,
    pub prompt: String,
    pub max_tokens: Option<u32>,
}

enum MockReply {
    Text(String),
    Fail(String),
}

/// Mock text provider that returns a canned reply and records every call.
pub struct MockTextProvider {
    reply: MockReply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTextProvider {
    /// Always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Text(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with a network error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Fail(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

/// Rough token estimate of four bytes per token, saturating at `u32::MAX`.
fn approx_tokens(text: &str) -> u32 {
    u32::try_from(text.len() / 4).unwrap_or(u32::MAX)
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        api_key: &Secret<String>,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                api_key: api_key.expose_secret().clone(),
                prompt: prompt.to_string(),
                max_tokens: params.max_tokens,
            });
        }

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: approx_tokens(prompt),
                output_tokens: approx_tokens(text),
                finish_reason: FinishReason::Complete,
            }),
            MockReply::Fail(message) => Err(ProviderError::Network(message.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

pub mod client;
pub mod prompts;
pub mod response;

use async_trait::async_trait;
use thiserror::Error;

pub use client::{OpenAiClient, OpenAiConfig};

use crate::models::LlmAnalysis;

/// Default cap on estimated input tokens before a completion call is made.
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 12_000;

#[derive(Debug, Error)]
pub enum AiError {
    /// The model returned text that is not syntactically valid JSON.
    #[error("AI generated invalid JSON: {0}")]
    ResponseFormat(String),

    /// The model returned valid JSON that does not match the output
    /// contract (missing field, wrong type, unknown enum value).
    #[error("AI generated an invalid response format: {0}")]
    ResponseSchema(String),

    /// Provider-side or transport failure (auth, rate limit, outage).
    #[error("AI service error: {0}")]
    Service(String),
}

/// Seam between the handlers and the model provider. The production
/// implementation is [`OpenAiClient`]; tests substitute a mock.
///
/// Callers are expected to have checked the token budget already; the
/// analyzer does not re-validate input length.
#[async_trait]
pub trait TranscriptAnalyzer: Send + Sync {
    async fn analyze(&self, transcript: &str) -> Result<LlmAnalysis, AiError>;
}

/// Rough token estimate: one token per four characters. This is an
/// advisory approximation, not a tokenizer; callers should treat it as
/// conservative guidance only.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

pub fn is_within_budget(text: &str, max_tokens: usize) -> bool {
    estimate_tokens(text) <= max_tokens
}

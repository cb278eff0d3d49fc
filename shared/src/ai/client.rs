use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::{prompts, response, AiError, TranscriptAnalyzer};
use crate::models::LlmAnalysis;

const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Configuration for the OpenAI completion client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Model to use (e.g. "gpt-4o-mini").
    pub model: String,
    /// Sampling temperature; kept low for consistent extraction.
    pub temperature: f64,
}

impl OpenAiConfig {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.3,
        }
    }
}

pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            // Forces syntactically valid JSON output; the schema is still
            // checked on our side.
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(OPENAI_CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Service(format!("failed to reach OpenAI: {e}")))?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(AiError::Service(format!(
                "authentication failed ({status}); check the OpenAI API key"
            )));
        }

        if status.as_u16() == 429 {
            return Err(AiError::Service(
                "rate limited by OpenAI; try again later".to_string(),
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Service(format!(
                "OpenAI returned HTTP {status}: {body}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::Service(format!("failed to parse OpenAI response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AiError::Service("no response content from OpenAI".to_string()))
    }
}

#[async_trait]
impl TranscriptAnalyzer for OpenAiClient {
    async fn analyze(&self, transcript: &str) -> Result<LlmAnalysis, AiError> {
        debug!(
            chars = transcript.chars().count(),
            model = %self.config.model,
            "requesting transcript analysis"
        );

        let content = self
            .complete(prompts::SYSTEM_PROMPT, &prompts::build_user_prompt(transcript))
            .await?;

        response::parse_analysis(&content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

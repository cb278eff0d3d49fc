use std::env;

use anyhow::{Context, Result};
use axum::http::HeaderValue;

use shared::ai::DEFAULT_MAX_INPUT_TOKENS;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    /// Browser origin allowed by CORS.
    pub frontend_origin: HeaderValue,
    /// Advisory cap on estimated input tokens for the analyze endpoint.
    pub max_input_tokens: usize,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .context("Missing required environment variable: DATABASE_URL")?;
        let openai_api_key = env::var("OPENAI_API_KEY")
            .context("Missing required environment variable: OPENAI_API_KEY")?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let openai_model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let frontend_origin = env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .parse::<HeaderValue>()
            .context("FRONTEND_URL is not a valid origin")?;

        let max_input_tokens = env::var("MAX_INPUT_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_INPUT_TOKENS.to_string())
            .parse()
            .context("MAX_INPUT_TOKENS must be a positive integer")?;

        Ok(Self {
            port,
            database_url,
            openai_api_key,
            openai_model,
            frontend_origin,
            max_input_tokens,
        })
    }
}

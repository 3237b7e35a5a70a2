//! Anthropic API oracle implementation.
//!
//! Makes direct HTTP calls to the Anthropic Messages API as an alternative
//! to the Claude Code CLI oracle.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::OracleConfig;
use crate::domain::ports::DecompositionOracle;

const API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic API oracle.
#[derive(Debug, Clone)]
pub struct AnthropicApiConfig {
    /// API key (will be read from ANTHROPIC_API_KEY env if not set).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Response token limit.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnthropicApiConfig {
    fn default() -> Self {
        Self::from(&OracleConfig::default())
    }
}

impl From<&OracleConfig> for AnthropicApiConfig {
    fn from(config: &OracleConfig) -> Self {
        Self {
            api_key: config.resolve_api_key(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        }
    }
}

impl AnthropicApiConfig {
    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL; a trailing slash is trimmed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Oracle that calls the Messages API directly.
pub struct AnthropicApiOracle {
    config: AnthropicApiConfig,
    http_client: Client,
}

impl AnthropicApiOracle {
    /// Build the oracle. Fails when no API key is configured.
    pub fn new(config: AnthropicApiConfig) -> DomainResult<Self> {
        if config.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(DomainError::OracleUnavailable(
                "API key required for anthropic_api backend. Set oracle.api_key or ANTHROPIC_API_KEY."
                    .to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::OracleUnavailable(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, http_client })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }
}

#[async_trait]
impl DecompositionOracle for AnthropicApiOracle {
    fn name(&self) -> &'static str {
        "anthropic_api"
    }

    async fn complete(&self, prompt: &str) -> DomainResult<String> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.config.model, "Calling Anthropic Messages API");

        let response = self
            .http_client
            .post(self.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::OracleUnavailable(format!("API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::OracleUnavailable(format!(
                "API returned {status}: {text}"
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DomainError::OracleFormat(format!("Unreadable API response: {e}")))?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.trim().is_empty() {
            return Err(DomainError::OracleFormat(
                "API response contained no text content".to_string(),
            ));
        }

        Ok(text)
    }
}

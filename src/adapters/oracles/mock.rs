//! Mock oracle for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::DecompositionOracle;

/// Mock response configuration.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Raw oracle text
    pub output: String,
    /// Whether to simulate failure
    pub fail: bool,
    /// Error message if failing
    pub error_message: Option<String>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            output: r#"{"breakdowns": []}"#.to_string(),
            fail: false,
            error_message: None,
        }
    }
}

impl MockResponse {
    /// Response returning `output`.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Default::default()
        }
    }

    /// Response failing as unavailable with `error`.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            fail: true,
            error_message: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Mock oracle for testing.
///
/// Queued responses are served first, then the default. Every prompt is
/// recorded.
#[derive(Clone)]
pub struct MockOracle {
    default_response: MockResponse,
    queued: Arc<RwLock<VecDeque<MockResponse>>>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOracle {
    /// Mock answering with an empty breakdown.
    pub fn new() -> Self {
        Self::with_default_response(MockResponse::default())
    }

    /// Mock answering with `response` once the queue is empty.
    pub fn with_default_response(response: MockResponse) -> Self {
        Self {
            default_response: response,
            queued: Arc::new(RwLock::new(VecDeque::new())),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Answer with this text on every call.
    pub fn returning(output: impl Into<String>) -> Self {
        Self::with_default_response(MockResponse::success(output))
    }

    /// Fail every call with this message.
    pub fn failing(error: impl Into<String>) -> Self {
        Self::with_default_response(MockResponse::failure(error))
    }

    /// Queue a one-shot response.
    pub async fn push_response(&self, response: MockResponse) {
        self.queued.write().await.push_back(response);
    }

    /// Prompts received so far.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.read().await.clone()
    }

    /// Number of `complete` calls so far.
    pub async fn call_count(&self) -> usize {
        self.prompts.read().await.len()
    }
}

#[async_trait]
impl DecompositionOracle for MockOracle {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> DomainResult<String> {
        self.prompts.write().await.push(prompt.to_string());

        let response = self
            .queued
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());

        if response.fail {
            return Err(DomainError::OracleUnavailable(
                response
                    .error_message
                    .unwrap_or_else(|| "Mock failure".to_string()),
            ));
        }

        Ok(response.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_then_default() {
        let oracle = MockOracle::returning("default");
        oracle.push_response(MockResponse::success("first")).await;

        assert_eq!(oracle.complete("a").await.unwrap(), "first");
        assert_eq!(oracle.complete("b").await.unwrap(), "default");
        assert_eq!(oracle.prompts().await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failure() {
        let oracle = MockOracle::failing("boom");
        let err = oracle.complete("x").await.unwrap_err();
        assert!(matches!(err, DomainError::OracleUnavailable(ref m) if m == "boom"));
        assert_eq!(oracle.call_count().await, 1);
    }
}

//! Decomposition oracle port - interface for text-generation backends.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Trait for oracle implementations.
///
/// An oracle takes a rendered prompt and returns free text that is expected
/// to contain one JSON object. The engine treats the reply as untrusted and
/// never retries a failed call.
#[async_trait]
pub trait DecompositionOracle: Send + Sync {
    /// Get the oracle backend name.
    fn name(&self) -> &'static str;

    /// Send a prompt and return the raw response text.
    async fn complete(&self, prompt: &str) -> DomainResult<String>;
}

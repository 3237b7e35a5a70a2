//! Decomposition oracle implementations.

pub mod anthropic_api;
pub mod claude_code;
pub mod mock;

pub use anthropic_api::{AnthropicApiConfig, AnthropicApiOracle};
pub use claude_code::{ClaudeCodeConfig, ClaudeCodeOracle};
pub use mock::{MockOracle, MockResponse};

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{OracleBackend, OracleConfig};
use crate::domain::ports::DecompositionOracle;

/// Build the configured oracle backend.
pub fn build_oracle(config: &OracleConfig) -> DomainResult<Arc<dyn DecompositionOracle>> {
    match config.backend {
        OracleBackend::ClaudeCode => Ok(Arc::new(ClaudeCodeOracle::new(ClaudeCodeConfig::from(config)))),
        OracleBackend::AnthropicApi => Ok(Arc::new(AnthropicApiOracle::new(AnthropicApiConfig::from(
            config,
        ))?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_claude_code() {
        let oracle = build_oracle(&OracleConfig::default()).unwrap();
        assert_eq!(oracle.name(), "claude_code");
    }

    #[test]
    fn test_api_backend_with_key() {
        let config = OracleConfig {
            backend: OracleBackend::AnthropicApi,
            api_key: Some("sk-test".into()),
            ..OracleConfig::default()
        };
        assert_eq!(build_oracle(&config).unwrap().name(), "anthropic_api");
    }
}

//! Claude Code CLI oracle implementation.
//!
//! Spawns `claude --print` with the prompt and returns its stdout.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::OracleConfig;
use crate::domain::ports::DecompositionOracle;

/// Claude Code CLI oracle configuration.
#[derive(Debug, Clone)]
pub struct ClaudeCodeConfig {
    /// Path to claude CLI binary
    pub binary_path: String,
    /// Output format for print mode
    pub output_format: String,
    /// Seconds to wait for the process
    pub timeout_secs: u64,
    /// Additional CLI flags
    pub extra_flags: Vec<String>,
}

impl Default for ClaudeCodeConfig {
    fn default() -> Self {
        Self {
            binary_path: "claude".to_string(),
            output_format: "text".to_string(),
            timeout_secs: 120,
            extra_flags: vec![],
        }
    }
}

impl From<&OracleConfig> for ClaudeCodeConfig {
    fn from(config: &OracleConfig) -> Self {
        Self {
            binary_path: config.claude_code_path.clone(),
            timeout_secs: config.timeout_secs,
            ..Self::default()
        }
    }
}

/// Oracle backed by the Claude Code CLI.
pub struct ClaudeCodeOracle {
    config: ClaudeCodeConfig,
}

impl ClaudeCodeOracle {
    /// Oracle running the configured binary.
    pub fn new(config: ClaudeCodeConfig) -> Self {
        Self { config }
    }

    /// Build CLI arguments for a prompt.
    fn build_args(&self, prompt: &str) -> Vec<String> {
        let mut args = vec![
            "--print".to_string(),
            "--output-format".to_string(),
            self.config.output_format.clone(),
        ];
        args.extend(self.config.extra_flags.iter().cloned());
        args.push(prompt.to_string());
        args
    }
}

#[async_trait]
impl DecompositionOracle for ClaudeCodeOracle {
    fn name(&self) -> &'static str {
        "claude_code"
    }

    async fn complete(&self, prompt: &str) -> DomainResult<String> {
        let mut cmd = Command::new(&self.config.binary_path);
        cmd.args(self.build_args(prompt))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(binary = %self.config.binary_path, "Spawning Claude Code");

        let output = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), cmd.output())
            .await
            .map_err(|_| {
                DomainError::OracleUnavailable(format!(
                    "Claude Code timed out after {}s",
                    self.config.timeout_secs
                ))
            })?
            .map_err(|e| DomainError::OracleUnavailable(format!("Failed to execute Claude Code: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::OracleUnavailable(format!(
                "Claude Code failed: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

use serde::{Deserialize, Serialize};

use crate::infrastructure::logging::LogConfig;

/// Main configuration structure for Taskforge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,

    /// Decomposition oracle configuration
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Local scoring thresholds
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Thresholds for the local risk rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// Estimate above which a one-person team is flagged, in minutes
    #[serde(default = "default_solo_threshold_minutes")]
    pub solo_threshold_minutes: u32,
}

const fn default_solo_threshold_minutes() -> u32 {
    8 * 60
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            solo_threshold_minutes: default_solo_threshold_minutes(),
        }
    }
}

/// Which oracle backend answers decomposition prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleBackend {
    /// Claude Code CLI (no API key needed)
    #[default]
    ClaudeCode,
    /// Direct Anthropic Messages API
    AnthropicApi,
}

/// Oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OracleConfig {
    /// Which backend to call
    #[serde(default)]
    pub backend: OracleBackend,

    /// Model name passed to the API backend
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens for the response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path to the Claude Code CLI
    #[serde(default = "default_claude_code_path")]
    pub claude_code_path: String,

    /// API key (falls back to `ANTHROPIC_API_KEY`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    "claude-sonnet-4-5".to_string()
}

const fn default_max_tokens() -> u32 {
    4096
}

const fn default_temperature() -> f32 {
    0.3
}

const fn default_timeout_secs() -> u64 {
    120
}

fn default_claude_code_path() -> String {
    "claude".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: OracleBackend::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            claude_code_path: default_claude_code_path(),
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

impl OracleConfig {
    /// Get API key from config or environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
    }
}

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `logging.level` is not a known level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// `oracle.max_tokens` is zero.
    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    /// `oracle.temperature` is outside `0.0..=1.0`.
    #[error("Invalid temperature: {0}. Must be between 0.0 and 1.0")]
    InvalidTemperature(f32),

    /// `oracle.timeout_secs` is zero.
    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    /// `oracle.model` is blank.
    #[error("Oracle model cannot be empty")]
    EmptyModel,

    /// `oracle.claude_code_path` is blank.
    #[error("Claude Code path cannot be empty")]
    EmptyClaudeCodePath,

    /// `analysis.solo_threshold_minutes` is zero.
    #[error("Invalid solo_threshold_minutes: {0}. Must be at least 1")]
    InvalidSoloThreshold(u32),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .taskforge/config.yaml
    /// 3. .taskforge/local.yaml (optional overrides)
    /// 4. Environment variables (TASKFORGE_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(".taskforge/config.yaml"))
            .merge(Yaml::file(".taskforge/local.yaml"))
            .merge(Env::prefixed("TASKFORGE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::base()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TASKFORGE_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let oracle = &config.oracle;
        if oracle.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(oracle.max_tokens));
        }

        if !(0.0..=1.0).contains(&oracle.temperature) {
            return Err(ConfigError::InvalidTemperature(oracle.temperature));
        }

        if oracle.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(oracle.timeout_secs));
        }

        if oracle.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if oracle.claude_code_path.trim().is_empty() {
            return Err(ConfigError::EmptyClaudeCodePath);
        }

        if config.analysis.solo_threshold_minutes == 0 {
            return Err(ConfigError::InvalidSoloThreshold(
                config.analysis.solo_threshold_minutes,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::OracleBackend;
    use crate::infrastructure::logging::LogFormat;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.oracle.backend, OracleBackend::ClaudeCode);
        assert_eq!(config.oracle.max_tokens, 4096);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
logging:
  level: debug
  format: json
oracle:
  backend: anthropic_api
  model: claude-haiku-4-5
  temperature: 0.7
  timeout_secs: 30
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.oracle.backend, OracleBackend::AnthropicApi);
        assert_eq!(config.oracle.model, "claude-haiku-4-5");
        assert!((config.oracle.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.oracle.timeout_secs, 30);
        assert_eq!(config.oracle.claude_code_path, "claude");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_oracle_limits() {
        let mut config = Config::default();
        config.oracle.max_tokens = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxTokens(0))
        ));

        let mut config = Config::default();
        config.oracle.temperature = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTemperature(_))
        ));

        let mut config = Config::default();
        config.oracle.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_empty_strings() {
        let mut config = Config::default();
        config.oracle.model = "  ".to_string();
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::EmptyModel)));

        let mut config = Config::default();
        config.oracle.claude_code_path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyClaudeCodePath)
        ));
    }

    #[test]
    fn test_hierarchical_merging() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(base_file, "logging:\n  level: info\n  format: json\noracle:\n  max_tokens: 1000").unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "logging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = ConfigLoader::base()
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.logging.level, "debug", "Override should win for nested fields");
        assert_eq!(config.logging.format, LogFormat::Json, "Base value should persist");
        assert_eq!(config.oracle.max_tokens, 1000);
    }

    #[test]
    fn test_solo_threshold() {
        let config: Config = serde_yaml::from_str("analysis:\n  solo_threshold_minutes: 960\n").unwrap();
        assert_eq!(config.analysis.solo_threshold_minutes, 960);
        assert_eq!(Config::default().analysis.solo_threshold_minutes, 480);

        let mut config = Config::default();
        config.analysis.solo_threshold_minutes = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidSoloThreshold(0))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(ConfigLoader::load_from_file("/nonexistent/taskforge.yaml").is_err());
    }
}

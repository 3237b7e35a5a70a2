//! `logging:` section of the taskforge config file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how taskforge writes its diagnostics.
///
/// Diagnostics never go to stdout: `--json` output there must stay parseable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is unset; one of trace, debug, info,
    /// warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console format; the file is always JSON
    #[serde(default)]
    pub format: LogFormat,

    /// Write a rolling log file here as well; no file when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Base name of the rolling log file
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Print diagnostics to stderr
    #[serde(default = "default_console", alias = "enable_stdout")]
    pub console: bool,

    /// How often the log file rolls over
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Console log format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    Json,
    /// Multi-line human output.
    #[default]
    Pretty,
}

impl LogFormat {
    /// Config spelling of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

/// Roll-over period of the log file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file each day.
    #[default]
    Daily,
    /// New file each hour.
    Hourly,
    /// A single file.
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            file_name: default_file_name(),
            console: default_console(),
            rotation: RotationPolicy::default(),
        }
    }
}

impl LogConfig {
    /// Whether a log file will be written.
    pub fn writes_file(&self) -> bool {
        self.log_dir.is_some()
    }
}

// Quiet by default: analysis results are the CLI's real output.
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_file_name() -> String {
    "taskforge.log".to_string()
}

const fn default_console() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.file_name, "taskforge.log");
        assert!(config.console);
        assert!(!config.writes_file());
    }

    #[test]
    fn test_partial_yaml_and_legacy_key() {
        let config: LogConfig =
            serde_yaml::from_str("log_dir: /tmp/tf\nenable_stdout: false\nrotation: hourly\n").unwrap();
        assert!(config.writes_file());
        assert!(!config.console);
        assert_eq!(config.rotation, RotationPolicy::Hourly);
        assert_eq!(config.level, "warn");
    }
}

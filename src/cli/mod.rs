//! Command-line interface.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use commands::analyze::AnalyzeArgs;
use commands::decompose::DecomposeArgs;
use commands::duration::DurationArgs;
use commands::experience::ExperienceArgs;

/// Parsed command line.
#[derive(Parser, Debug)]
#[command(name = "taskforge", version, about = "Task decomposition and estimation engine")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file (defaults to .taskforge/config.yaml + local.yaml)
    #[arg(short, long, global = true, env = "TASKFORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a task and ask the oracle for a breakdown
    Analyze(AnalyzeArgs),
    /// Turn a saved analysis into sequenced subtasks
    Decompose(DecomposeArgs),
    /// Compute the experience reward for a task
    Experience(ExperienceArgs),
    /// Parse a duration string into minutes and canonical form
    Duration(DurationArgs),
}

/// Load configuration from an explicit file or the default hierarchy.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// User-facing lines for an error chain.
///
/// Stops at an analysis failure so its underlying cause stays in the logs.
pub fn error_messages(err: &anyhow::Error) -> Vec<String> {
    let mut messages = Vec::new();
    for cause in err.chain() {
        messages.push(cause.to_string());
        if matches!(
            cause.downcast_ref::<DomainError>(),
            Some(DomainError::AnalysisFailed { .. })
        ) {
            break;
        }
    }
    messages
}

/// Print an error and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let messages = error_messages(&err);

    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": messages.first(),
            "causes": messages.get(1..).unwrap_or_default(),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        let mut lines = messages.iter();
        if let Some(first) = lines.next() {
            eprintln!("{} {first}", console::style("Error:").red().bold());
        }
        for cause in lines {
            eprintln!("  {} {cause}", console::style("caused by:").dim());
        }
    }

    std::process::exit(1);
}

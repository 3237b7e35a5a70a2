//! `taskforge decompose`: post-process a saved analysis into subtasks.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::commands::analyze::SavedAnalysis;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::DecomposedTask;
use crate::services::duration::{format_to_duration, parse_duration};
use crate::services::{validate_candidates, DecompositionProcessor, RejectedCandidate};

/// Arguments for `decompose`.
#[derive(Args, Debug)]
pub struct DecomposeArgs {
    /// Analysis file written by `analyze --save`
    pub file: PathBuf,

    /// Fail if any oracle candidate is invalid instead of defaulting it
    #[arg(long)]
    pub strict: bool,

    /// Write the subtasks as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Sequenced subtasks of one parent.
#[derive(Debug, Serialize)]
pub struct DecomposeOutput {
    /// Parent task title.
    pub parent: String,
    /// Subtasks in execution order.
    pub subtasks: Vec<DecomposedTask>,
    /// Sum of subtask durations.
    pub total_duration: String,
    /// Candidates that were repaired with defaults.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defaulted: Vec<RejectedCandidate>,
}

impl CommandOutput for DecomposeOutput {
    fn to_human(&self) -> String {
        if self.subtasks.is_empty() {
            return format!("No subtasks for '{}'.", self.parent);
        }

        let mut lines = vec![
            format!(
                "{} subtask(s) for '{}', {} with buffer:",
                self.subtasks.len(),
                self.parent,
                self.total_duration
            ),
            TableFormatter::new().format_subtasks(&self.subtasks),
        ];

        for entry in &self.defaulted {
            lines.push(format!(
                "{} #{} '{}' used defaults: {}",
                console::style("warning:").yellow(),
                entry.index + 1,
                entry.title,
                entry.reason
            ));
        }

        lines.join("\n")
    }
}

/// Load a saved analysis file.
pub fn read_saved_analysis(path: &Path) -> Result<SavedAnalysis> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid analysis file {}", path.display()))
}

/// Run the post-processor over a saved analysis.
pub fn decompose_saved(saved: &SavedAnalysis, strict: bool) -> Result<DecomposeOutput> {
    let report = validate_candidates(&saved.analysis.breakdowns);
    let processor = DecompositionProcessor::default();

    let (subtasks, defaulted) = if strict {
        let accepted = report.into_strict()?;
        (processor.process(&saved.task, &accepted), Vec::new())
    } else {
        (processor.process(&saved.task, &saved.analysis.breakdowns), report.rejected)
    };

    let total: u32 = subtasks
        .iter()
        .map(|t| parse_duration(&t.estimated_duration))
        .fold(0, u32::saturating_add);

    Ok(DecomposeOutput {
        parent: saved.task.title.clone(),
        total_duration: format_to_duration(total),
        subtasks,
        defaulted,
    })
}

/// Run `decompose`.
pub fn execute(args: DecomposeArgs, json_mode: bool) -> Result<()> {
    let saved = read_saved_analysis(&args.file)?;
    let out = decompose_saved(&saved, args.strict)?;

    if let Some(path) = &args.output {
        let body = serde_json::to_string_pretty(&out.subtasks)?;
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write subtasks to {}", path.display()))?;
    }

    output(&out, json_mode);
    Ok(())
}

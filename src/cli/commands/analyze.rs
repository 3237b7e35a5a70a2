//! `taskforge analyze`: score a task and fetch the oracle's breakdown.

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::adapters::oracles::build_oracle;
use crate::cli::output::table::severity_color;
use crate::cli::output::{create_spinner, output, CommandOutput, ProgressBarExt, TableFormatter};
use crate::domain::models::{
    AnalysisContext, ComplexityResult, Config, EnhancedAnalysis, Recommendation, RiskResult,
    TaskInput, TaskPriority,
};
use crate::services::{LocalAssessment, LocalAssessor, RiskAnalyzer, TaskAnalyzer};

/// Arguments for `analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Task title
    pub title: String,

    /// Task description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Priority (high, medium, low)
    #[arg(short, long, default_value = "medium")]
    pub priority: String,

    /// Task category
    #[arg(long)]
    pub category: Option<String>,

    /// Skill category (e.g. backend, design)
    #[arg(long)]
    pub skill: Option<String>,

    /// Estimated duration (e.g. PT3H, "90 minutes", 2時間)
    #[arg(short = 'e', long)]
    pub estimate: Option<String>,

    /// Project identifier attached to logs
    #[arg(long)]
    pub project_id: Option<String>,

    /// Analysis context file (JSON or YAML)
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Write {task, context, analysis} to this file for `decompose`
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Only run the local scoring, without calling the oracle
    #[arg(long)]
    pub offline: bool,
}

impl AnalyzeArgs {
    /// Build the task input from flags.
    pub fn to_task(&self) -> Result<TaskInput> {
        let priority = TaskPriority::from_str(&self.priority)
            .ok_or_else(|| anyhow::anyhow!("Invalid priority: {}", self.priority))?;

        let mut task = TaskInput::new(&self.title, &self.description).with_priority(priority);
        if let Some(category) = &self.category {
            task = task.with_category(category);
        }
        if let Some(skill) = &self.skill {
            task = task.with_skill_category(skill);
        }
        if let Some(estimate) = &self.estimate {
            task = task.with_estimated_duration(estimate);
        }
        if let Some(project_id) = &self.project_id {
            task = task.with_project_id(project_id);
        }
        Ok(task)
    }
}

/// An analysis persisted for a later `decompose` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAnalysis {
    /// Task as read from the command line.
    pub task: TaskInput,
    /// Project context, if any was given.
    #[serde(default)]
    pub context: Option<AnalysisContext>,
    /// Result of the run.
    pub analysis: EnhancedAnalysis,
}

/// Oracle-backed analysis.
#[derive(Debug, Serialize)]
pub struct AnalysisOutput {
    /// Merged result.
    pub analysis: EnhancedAnalysis,
    /// Where `--save` wrote it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

impl CommandOutput for AnalysisOutput {
    fn to_human(&self) -> String {
        let analysis = &self.analysis;
        let metrics = &analysis.quality_metrics;

        let mut lines = vec![format!(
            "Analysis {}",
            console::style(&analysis.analysis_id.to_string()[..8]).bold()
        )];
        lines.extend(assessment_lines(
            &analysis.complexity,
            &analysis.risks,
            &analysis.recommendations,
        ));
        lines.push(format!("Experience: {} XP", analysis.experience_points));
        if let Some(category) = &analysis.category {
            lines.push(format!("Category: {category}"));
        }

        let coverage = metrics
            .estimate_coverage
            .map(|c| format!(", {:.0}% of estimate", c * 100.0))
            .unwrap_or_default();
        let dropped = match metrics.dropped_breakdown_count {
            0 => String::new(),
            n => format!(", {n} unreadable dropped"),
        };
        lines.push(format!(
            "\nBreakdown ({} of {} valid{dropped}, total {}{coverage}):",
            metrics.valid_breakdown_count, metrics.breakdown_count, metrics.total_estimated_duration
        ));
        if analysis.breakdowns.is_empty() {
            lines.push("  (no subtasks proposed)".to_string());
        } else {
            lines.push(TableFormatter::new().format_breakdowns(&analysis.breakdowns));
        }

        if let Some(path) = &self.saved_to {
            lines.push(format!("\nSaved to {path}"));
        }

        lines.join("\n")
    }
}

/// Local-only assessment from `--offline`.
#[derive(Debug, Serialize)]
pub struct AssessmentOutput {
    /// Heuristic result.
    pub assessment: LocalAssessment,
}

impl CommandOutput for AssessmentOutput {
    fn to_human(&self) -> String {
        let a = &self.assessment;
        assessment_lines(&a.complexity, &a.risks, &a.recommendations).join("\n")
    }
}

fn assessment_lines(
    complexity: &ComplexityResult,
    risks: &RiskResult,
    recommendation: &Recommendation,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Complexity: {} (score {})",
        console::style(complexity.level).bold(),
        complexity.score
    )];
    lines.extend(complexity.factors.iter().map(|f| format!("  - {f}")));

    if risks.is_empty() {
        lines.push("Risks: none".to_string());
    } else {
        lines.push("Risks:".to_string());
        for risk in &risks.risks {
            lines.push(format!(
                "  [{}] {}",
                console::style(risk.severity.as_str()).fg(severity_color(risk.severity)),
                risk.description
            ));
        }
    }

    let effort = &recommendation.estimated_effort;
    lines.push(format!(
        "Strategy: {}, team size {}, parallelization {:.2}",
        recommendation.breakdown_strategy,
        recommendation.suggested_team_size,
        recommendation.parallelization_potential
    ));
    lines.push(format!(
        "Effort: {} / {} / {}",
        effort.optimistic, effort.realistic, effort.pessimistic
    ));
    if !recommendation.suggested_skills.is_empty() {
        lines.push(format!("Skills: {}", recommendation.suggested_skills.join(", ")));
    }

    lines
}

/// Local evaluators with the configured thresholds.
pub fn assessor_for(config: &Config) -> LocalAssessor {
    LocalAssessor::new().with_risk_analyzer(RiskAnalyzer::with_solo_threshold(
        config.analysis.solo_threshold_minutes,
    ))
}

/// Read an analysis context from JSON or YAML, chosen by extension.
pub fn read_context(path: &Path) -> Result<AnalysisContext> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("Invalid YAML context in {}", path.display()))
    } else {
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON context in {}", path.display()))
    }
}

/// Run `analyze`.
pub async fn execute(args: AnalyzeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let task = args.to_task()?;
    let context = args.context.as_deref().map(read_context).transpose()?;

    let assessor = assessor_for(config);

    if args.offline {
        crate::services::validate_task(&task, context.as_ref())?;
        let out = AssessmentOutput {
            assessment: assessor.assess(&task, context.as_ref()),
        };
        output(&out, json_mode);
        return Ok(());
    }

    let oracle = build_oracle(&config.oracle).context("Failed to configure decomposition oracle")?;
    let analyzer = TaskAnalyzer::new(oracle).with_assessor(assessor);

    let spinner = (!json_mode).then(|| {
        let spinner = create_spinner();
        spinner.set_message(format!("Analyzing with {}...", analyzer.oracle_name()));
        spinner
    });

    let result = analyzer.analyze(&task, context.as_ref()).await;
    if let Some(spinner) = &spinner {
        match &result {
            Ok(_) => spinner.finish_success("Analysis complete"),
            Err(_) => spinner.finish_error("Analysis failed"),
        }
    }
    let analysis = result?;

    let saved_to = match &args.save {
        Some(path) => {
            let saved = SavedAnalysis {
                task,
                context,
                analysis: analysis.clone(),
            };
            let body = serde_json::to_string_pretty(&saved)?;
            std::fs::write(path, body)
                .with_context(|| format!("Failed to write analysis to {}", path.display()))?;
            Some(path.display().to_string())
        }
        None => None,
    };

    output(&AnalysisOutput { analysis, saved_to }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(title: &str) -> AnalyzeArgs {
        AnalyzeArgs {
            title: title.to_string(),
            description: String::new(),
            priority: "medium".to_string(),
            category: None,
            skill: None,
            estimate: None,
            project_id: None,
            context: None,
            save: None,
            offline: false,
        }
    }

    #[test]
    fn test_to_task_maps_flags() {
        let mut a = args("Ship login");
        a.priority = "HIGH".into();
        a.skill = Some("backend".into());
        a.estimate = Some("PT3H".into());

        let task = a.to_task().unwrap();
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.skill_name(), Some("backend"));
        assert_eq!(task.estimate(), Some("PT3H"));
    }

    #[test]
    fn test_to_task_rejects_priority() {
        let mut a = args("x");
        a.priority = "urgent".into();
        assert!(a.to_task().is_err());
    }

    #[test]
    fn test_read_yaml_context() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "team_context:\n  team_size: 3\n  available_skills: [rust, react]\nproject_context:\n  project_name: Atlas"
        )
        .unwrap();

        let context = read_context(file.path()).unwrap();
        assert_eq!(context.team_context.unwrap().team_size, 3);
        assert_eq!(context.project_context.unwrap().project_name, "Atlas");
    }

    #[test]
    fn test_read_json_context_camel_case() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"teamContext": {{"teamSize": 2, "availableSkills": []}}}}"#).unwrap();

        let context = read_context(file.path()).unwrap();
        assert_eq!(context.team_context.unwrap().team_size, 2);
    }

    #[test]
    fn test_assessor_uses_configured_solo_threshold() {
        use crate::domain::models::TeamContext;
        use crate::services::risk::RISK_SOLO_LARGE_TASK;

        let task = TaskInput::new("Migrate billing", "").with_estimated_duration("PT9H");
        let context = AnalysisContext::new().with_team(TeamContext::new(1));

        let default = assessor_for(&Config::default()).assess(&task, Some(&context));
        assert!(default.risks.has_risk(RISK_SOLO_LARGE_TASK));

        let mut config = Config::default();
        config.analysis.solo_threshold_minutes = 960;
        let relaxed = assessor_for(&config).assess(&task, Some(&context));
        assert!(!relaxed.risks.has_risk(RISK_SOLO_LARGE_TASK));
    }
}

//! `taskforge experience`: compute the reward for a task.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::services::experience::{ExperienceCalculator, MAX_EXPERIENCE};

/// Arguments for `experience`.
#[derive(Args, Debug)]
pub struct ExperienceArgs {
    /// Task title
    pub title: String,

    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Estimated duration (e.g. PT3H)
    #[arg(short = 'e', long)]
    pub estimate: Option<String>,

    /// Task category
    #[arg(long)]
    pub category: Option<String>,

    /// Skill category
    #[arg(long)]
    pub skill: Option<String>,
}

/// Computed reward.
#[derive(Debug, Serialize)]
pub struct ExperienceOutput {
    /// Task title.
    pub title: String,
    /// Reward in points.
    pub experience_points: u32,
    /// Upper bound on any reward.
    pub max: u32,
}

impl CommandOutput for ExperienceOutput {
    fn to_human(&self) -> String {
        format!(
            "{}: {} XP (max {})",
            self.title,
            console::style(self.experience_points).bold().cyan(),
            self.max
        )
    }
}

/// Run `experience`.
pub fn execute(args: ExperienceArgs, json_mode: bool) -> Result<()> {
    let points = ExperienceCalculator::new().calculate(
        &args.title,
        args.description.as_deref(),
        args.estimate.as_deref(),
        args.category.as_deref(),
        args.skill.as_deref(),
    );

    let out = ExperienceOutput {
        title: args.title,
        experience_points: points,
        max: MAX_EXPERIENCE,
    };
    output(&out, json_mode);
    Ok(())
}

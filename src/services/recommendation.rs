//! Recommendation generator.
//!
//! Combines the complexity verdict with team/project context into a
//! breakdown strategy, suggested skills, a three-point effort envelope,
//! parallelization potential and a team size. Effort arithmetic is done on
//! whole minutes so the envelope stays ordered and round-trips through the
//! duration codec exactly.

use crate::domain::models::{
    AnalysisContext, BreakdownStrategy, ComplexityLevel, ComplexityResult, EffortEstimate,
    Recommendation, TaskInput,
};
use crate::services::duration::{format_to_duration, parse_optional_duration};

const MINUTES_PER_HOUR: u64 = 60;
const MAX_SUGGESTED_SKILLS: usize = 3;
/// Estimates longer than this are worth splitting across people.
const PARALLEL_THRESHOLD_MINUTES: u64 = 8 * MINUTES_PER_HOUR;
/// Work one person is expected to carry.
const MINUTES_PER_MEMBER: u64 = 16 * MINUTES_PER_HOUR;

const HIGH_PARALLELIZATION: f64 = 0.8;
const LOW_PARALLELIZATION: f64 = 0.3;

/// Builds a [`Recommendation`] for a task.
#[derive(Debug, Clone, Default)]
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Stateless generator.
    pub fn new() -> Self {
        Self
    }

    /// Advice for `task` at the given complexity.
    pub fn generate(
        &self,
        task: &TaskInput,
        context: Option<&AnalysisContext>,
        complexity: &ComplexityResult,
    ) -> Recommendation {
        let team = context.and_then(|c| c.team_context.as_ref());
        let base_minutes = u64::from(parse_optional_duration(task.estimate()));

        let suggested_skills = match task.skill_name() {
            Some(skill) => vec![skill.to_string()],
            None => team
                .map(|t| t.available_skills.iter().take(MAX_SUGGESTED_SKILLS).cloned().collect())
                .unwrap_or_default(),
        };

        let parallelization_potential =
            if complexity.level == ComplexityLevel::High && base_minutes > PARALLEL_THRESHOLD_MINUTES {
                HIGH_PARALLELIZATION
            } else {
                LOW_PARALLELIZATION
            };

        let available = team.map_or(1, |t| t.team_size.max(1));
        let needed = u32::try_from(base_minutes.div_ceil(MINUTES_PER_MEMBER)).unwrap_or(u32::MAX);

        Recommendation {
            breakdown_strategy: strategy_for(complexity.level),
            suggested_skills,
            estimated_effort: effort_envelope(base_minutes),
            parallelization_potential,
            suggested_team_size: needed.min(available).max(1),
        }
    }
}

/// Structural decomposition first for hard tasks, incremental for easy ones.
pub fn strategy_for(level: ComplexityLevel) -> BreakdownStrategy {
    match level {
        ComplexityLevel::High => BreakdownStrategy::TopDown,
        ComplexityLevel::Medium => BreakdownStrategy::MiddleOut,
        ComplexityLevel::Low => BreakdownStrategy::BottomUp,
    }
}

/// Three-point envelope around `base_minutes`.
///
/// optimistic = max(1h, floor(0.7 * hours) h), never above realistic
/// realistic = base
/// pessimistic = ceil(1.5 * hours) h, never below realistic
pub fn effort_envelope(base_minutes: u64) -> EffortEstimate {
    let optimistic_hours = (base_minutes * 7 / (10 * MINUTES_PER_HOUR)).max(1);
    let optimistic = (optimistic_hours * MINUTES_PER_HOUR).min(base_minutes);

    let pessimistic_hours = (base_minutes * 3).div_ceil(2 * MINUTES_PER_HOUR);
    let pessimistic = (pessimistic_hours * MINUTES_PER_HOUR).max(base_minutes);

    EffortEstimate {
        optimistic: encode(optimistic),
        realistic: encode(base_minutes),
        pessimistic: encode(pessimistic),
    }
}

fn encode(minutes: u64) -> String {
    format_to_duration(u32::try_from(minutes).unwrap_or(u32::MAX))
}

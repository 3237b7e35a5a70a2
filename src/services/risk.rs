use crate::domain::models::{
    AnalysisContext, ComplexityLevel, ComplexityResult, Risk, RiskResult, RiskSeverity, TaskInput,
};
use crate::services::duration::parse_optional_duration;

/// Fires when the task has no estimate.
pub const RISK_EFFORT_UNKNOWN: &str = "effort unknown";
/// Fires for high complexity without team context.
pub const RISK_NO_TEAM_SUPPORT: &str = "high complexity without team support";
/// Fires for a one-person team above the solo threshold.
pub const RISK_SOLO_LARGE_TASK: &str = "solo execution of large task";

/// Flags structural risks of a task.
///
/// Every rule is evaluated independently and any number may fire. Risks are
/// advisory only; nothing downstream blocks on them.
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    solo_threshold_minutes: u32,
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskAnalyzer {
    /// Create an analyzer whose solo-execution threshold is one working day
    pub fn new() -> Self {
        Self {
            solo_threshold_minutes: 8 * 60,
        }
    }

    /// Create an analyzer with a custom solo-execution threshold
    pub fn with_solo_threshold(solo_threshold_minutes: u32) -> Self {
        Self {
            solo_threshold_minutes,
        }
    }

    /// Analyze a task given its already evaluated complexity
    pub fn analyze(
        &self,
        task: &TaskInput,
        context: Option<&AnalysisContext>,
        complexity: &ComplexityResult,
    ) -> RiskResult {
        let team = context.and_then(|c| c.team_context.as_ref());
        let mut risks = Vec::new();

        if task.estimate().is_none() {
            risks.push(Risk::new(RISK_EFFORT_UNKNOWN, RiskSeverity::Medium));
        }

        if complexity.level == ComplexityLevel::High && team.is_none() {
            risks.push(Risk::new(RISK_NO_TEAM_SUPPORT, RiskSeverity::High));
        }

        if let Some(team) = team {
            if team.team_size == 1
                && parse_optional_duration(task.estimate()) > self.solo_threshold_minutes
            {
                risks.push(Risk::new(RISK_SOLO_LARGE_TASK, RiskSeverity::Medium));
            }
        }

        RiskResult { risks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TeamContext;

    fn complexity(level: ComplexityLevel) -> ComplexityResult {
        ComplexityResult {
            level,
            score: 0,
            factors: vec![],
        }
    }

    #[test]
    fn test_missing_estimate() {
        let result = RiskAnalyzer::new().analyze(
            &TaskInput::new("Write spec", ""),
            None,
            &complexity(ComplexityLevel::Low),
        );
        assert_eq!(result.risks, vec![Risk::new(RISK_EFFORT_UNKNOWN, RiskSeverity::Medium)]);
    }

    #[test]
    fn test_high_complexity_without_team() {
        let task = TaskInput::new("t", "").with_estimated_duration("PT1H");
        let analyzer = RiskAnalyzer::new();

        let alone = analyzer.analyze(&task, None, &complexity(ComplexityLevel::High));
        assert!(alone.has_risk(RISK_NO_TEAM_SUPPORT));
        assert_eq!(alone.highest_severity(), Some(RiskSeverity::High));

        let context = AnalysisContext::new().with_team(TeamContext::new(3));
        let supported = analyzer.analyze(&task, Some(&context), &complexity(ComplexityLevel::High));
        assert!(supported.is_empty());
    }

    #[test]
    fn test_project_only_context_is_not_team_support() {
        let task = TaskInput::new("t", "").with_estimated_duration("PT1H");
        let context = AnalysisContext::new();
        let result = RiskAnalyzer::new().analyze(&task, Some(&context), &complexity(ComplexityLevel::High));
        assert!(result.has_risk(RISK_NO_TEAM_SUPPORT));
    }

    #[test]
    fn test_solo_large_task() {
        let context = AnalysisContext::new().with_team(TeamContext::new(1));
        let analyzer = RiskAnalyzer::new();

        let big = TaskInput::new("t", "").with_estimated_duration("PT9H");
        let result = analyzer.analyze(&big, Some(&context), &complexity(ComplexityLevel::Low));
        assert_eq!(result.risks, vec![Risk::new(RISK_SOLO_LARGE_TASK, RiskSeverity::Medium)]);

        let small = TaskInput::new("t", "").with_estimated_duration("PT8H");
        assert!(analyzer.analyze(&small, Some(&context), &complexity(ComplexityLevel::Low)).is_empty());
    }

    #[test]
    fn test_solo_rule_ignores_larger_teams() {
        let context = AnalysisContext::new().with_team(TeamContext::new(2));
        let big = TaskInput::new("t", "").with_estimated_duration("PT40H");
        let result = RiskAnalyzer::new().analyze(&big, Some(&context), &complexity(ComplexityLevel::Low));
        assert!(result.is_empty());
    }

    #[test]
    fn test_custom_solo_threshold() {
        let context = AnalysisContext::new().with_team(TeamContext::new(1));
        let analyzer = RiskAnalyzer::with_solo_threshold(16 * 60);
        let task = TaskInput::new("t", "").with_estimated_duration("PT9H");
        assert!(analyzer.analyze(&task, Some(&context), &complexity(ComplexityLevel::Low)).is_empty());
    }
}

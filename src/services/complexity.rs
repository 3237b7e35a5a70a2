use crate::domain::models::{AnalysisContext, ComplexityLevel, ComplexityResult, TaskInput};
use crate::services::duration::parse_optional_duration;

/// Factor text for long descriptions.
pub const FACTOR_DETAILED_DESCRIPTION: &str = "requires detailed description";
/// Factor text for long estimates.
pub const FACTOR_LONG_WORKING_TIME: &str = "requires long working time";

/// Scores a task's intrinsic difficulty with a transparent additive heuristic.
///
/// Score formula: description_points + duration_points + category_points
#[derive(Debug, Clone)]
pub struct ComplexityEvaluator {
    description_word_threshold: usize,
    long_duration_minutes: u32,
}

impl Default for ComplexityEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplexityEvaluator {
    /// Create an evaluator with the default thresholds (100 words, 8 hours)
    pub fn new() -> Self {
        Self {
            description_word_threshold: 100,
            long_duration_minutes: 8 * 60,
        }
    }

    /// Create an evaluator with custom thresholds
    pub fn with_thresholds(description_word_threshold: usize, long_duration_minutes: u32) -> Self {
        Self {
            description_word_threshold,
            long_duration_minutes,
        }
    }

    /// Evaluate the complexity of a task
    ///
    /// The context is accepted for symmetry with the other analyzers; the
    /// current heuristic reads only the task itself.
    pub fn evaluate(&self, task: &TaskInput, _context: Option<&AnalysisContext>) -> ComplexityResult {
        let mut score = 0;
        let mut factors = Vec::new();

        if task.description.split_whitespace().count() > self.description_word_threshold {
            score += 2;
            factors.push(FACTOR_DETAILED_DESCRIPTION.to_string());
        }

        if parse_optional_duration(task.estimate()) > self.long_duration_minutes {
            score += 2;
            factors.push(FACTOR_LONG_WORKING_TIME.to_string());
        }

        if let Some(category) = task.category_name() {
            score += 1;
            factors.push(format!("category: {category}"));
        }

        ComplexityResult {
            level: ComplexityLevel::from_score(score),
            score,
            factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_description() -> String {
        vec!["word"; 101].join(" ")
    }

    #[test]
    fn test_bare_task_is_low() {
        let result = ComplexityEvaluator::new().evaluate(&TaskInput::new("Write spec", ""), None);
        assert_eq!(result.level, ComplexityLevel::Low);
        assert_eq!(result.score, 0);
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_word_threshold_is_exclusive() {
        let evaluator = ComplexityEvaluator::new();
        let exactly = TaskInput::new("t", vec!["word"; 100].join(" "));
        assert_eq!(evaluator.evaluate(&exactly, None).score, 0);

        let over = TaskInput::new("t", long_description());
        let result = evaluator.evaluate(&over, None);
        assert_eq!(result.score, 2);
        assert_eq!(result.factors, vec![FACTOR_DETAILED_DESCRIPTION]);
    }

    #[test]
    fn test_duration_goes_through_codec() {
        let evaluator = ComplexityEvaluator::new();
        let eight = TaskInput::new("t", "").with_estimated_duration("PT8H");
        assert_eq!(evaluator.evaluate(&eight, None).score, 0);

        let nine = TaskInput::new("t", "").with_estimated_duration("9 hours");
        let result = evaluator.evaluate(&nine, None);
        assert_eq!(result.score, 2);
        assert_eq!(result.level, ComplexityLevel::Low);
        assert_eq!(result.factors, vec![FACTOR_LONG_WORKING_TIME]);
    }

    #[test]
    fn test_all_factors_make_high() {
        let task = TaskInput::new("t", long_description())
            .with_estimated_duration("PT12H")
            .with_category("infrastructure");
        let result = ComplexityEvaluator::new().evaluate(&task, None);

        assert_eq!(result.score, 5);
        assert_eq!(result.level, ComplexityLevel::High);
        assert_eq!(result.factors[2], "category: infrastructure");
    }

    #[test]
    fn test_two_factors_make_medium() {
        let task = TaskInput::new("t", "").with_estimated_duration("PT10H").with_category("ops");
        assert_eq!(
            ComplexityEvaluator::new().evaluate(&task, None).level,
            ComplexityLevel::Medium
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let evaluator = ComplexityEvaluator::with_thresholds(2, 60);
        let task = TaskInput::new("t", "one two three").with_estimated_duration("PT2H");
        assert_eq!(evaluator.evaluate(&task, None).score, 4);
    }
}

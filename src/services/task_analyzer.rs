//! Enhanced analysis facade.
//!
//! The engine's external entry point. Scores the task locally, asks the
//! oracle for a breakdown proposal, and merges both into one typed
//! [`EnhancedAnalysis`]. Decomposition of an approved analysis is a separate
//! call.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    AnalysisContext, ComplexityResult, DecomposedTask, EnhancedAnalysis, OracleProposal,
    QualityMetrics, Recommendation, RiskResult, SubtaskCandidate, TaskInput,
};
use crate::domain::ports::DecompositionOracle;
use crate::services::complexity::ComplexityEvaluator;
use crate::services::decomposition::{DecompositionProcessor, StylePalette};
use crate::services::duration::{format_to_duration, parse_duration, parse_optional_duration};
use crate::services::experience::ExperienceCalculator;
use crate::services::json_extractor::parse_oracle_proposal;
use crate::services::prompt::PromptBuilder;
use crate::services::recommendation::RecommendationGenerator;
use crate::services::risk::RiskAnalyzer;
use crate::services::validation::{validate_candidates, validate_task};

/// Scoring that needs no oracle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalAssessment {
    /// Additive complexity score and level.
    pub complexity: ComplexityResult,
    /// Advisory risks.
    pub risks: RiskResult,
    /// Strategy, skills and effort envelope.
    pub recommendations: Recommendation,
}

impl LocalAssessment {
    /// Score a task with the default evaluators.
    pub fn evaluate(task: &TaskInput, context: Option<&AnalysisContext>) -> Self {
        LocalAssessor::default().assess(task, context)
    }
}

/// The local evaluators, configured once and shared by the offline path and
/// the facade.
#[derive(Debug, Clone, Default)]
pub struct LocalAssessor {
    complexity: ComplexityEvaluator,
    risk: RiskAnalyzer,
    recommendations: RecommendationGenerator,
}

impl LocalAssessor {
    /// Assessor with the default evaluators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the complexity evaluator.
    pub fn with_complexity_evaluator(mut self, evaluator: ComplexityEvaluator) -> Self {
        self.complexity = evaluator;
        self
    }

    /// Replace the risk analyzer, e.g. to change the solo threshold.
    pub fn with_risk_analyzer(mut self, analyzer: RiskAnalyzer) -> Self {
        self.risk = analyzer;
        self
    }

    /// Complexity, risk and recommendation for one task.
    pub fn assess(&self, task: &TaskInput, context: Option<&AnalysisContext>) -> LocalAssessment {
        let complexity = self.complexity.evaluate(task, context);
        let risks = self.risk.analyze(task, context, &complexity);
        let recommendations = self.recommendations.generate(task, context, &complexity);

        LocalAssessment {
            complexity,
            risks,
            recommendations,
        }
    }
}

/// Facade composing the evaluators, the oracle and the post-processor.
///
/// Holds no mutable state; clones share the oracle.
#[derive(Clone)]
pub struct TaskAnalyzer {
    oracle: Arc<dyn DecompositionOracle>,
    prompt_builder: PromptBuilder,
    assessor: LocalAssessor,
    experience: ExperienceCalculator,
    decomposition: DecompositionProcessor,
}

impl TaskAnalyzer {
    /// Facade over `oracle` with default evaluators and palette.
    pub fn new(oracle: Arc<dyn DecompositionOracle>) -> Self {
        Self {
            oracle,
            prompt_builder: PromptBuilder::new(),
            assessor: LocalAssessor::new(),
            experience: ExperienceCalculator::new(),
            decomposition: DecompositionProcessor::default(),
        }
    }

    /// Replace all local evaluators at once.
    pub fn with_assessor(mut self, assessor: LocalAssessor) -> Self {
        self.assessor = assessor;
        self
    }

    /// Replace the complexity evaluator.
    pub fn with_complexity_evaluator(mut self, evaluator: ComplexityEvaluator) -> Self {
        self.assessor = self.assessor.with_complexity_evaluator(evaluator);
        self
    }

    /// Replace the risk analyzer.
    pub fn with_risk_analyzer(mut self, analyzer: RiskAnalyzer) -> Self {
        self.assessor = self.assessor.with_risk_analyzer(analyzer);
        self
    }

    /// Use `palette` when decomposing.
    pub fn with_palette(mut self, palette: StylePalette) -> Self {
        self.decomposition = DecompositionProcessor::new(palette);
        self
    }

    /// Name of the injected oracle backend.
    pub fn oracle_name(&self) -> &'static str {
        self.oracle.name()
    }

    /// Complexity, risk and recommendation without calling the oracle.
    pub fn assess(&self, task: &TaskInput, context: Option<&AnalysisContext>) -> LocalAssessment {
        self.assessor.assess(task, context)
    }

    /// Analyze a task end to end.
    ///
    /// Validation and oracle format errors are returned as-is. Everything
    /// else is logged with the task's identity and returned as
    /// [`DomainError::AnalysisFailed`].
    #[instrument(skip_all, fields(task = %task.title, oracle = self.oracle.name()))]
    pub async fn analyze(
        &self,
        task: &TaskInput,
        context: Option<&AnalysisContext>,
    ) -> DomainResult<EnhancedAnalysis> {
        validate_task(task, context)?;

        let analysis_id = Uuid::new_v4();
        match self.run_analysis(analysis_id, task, context).await {
            Ok(analysis) => {
                info!(
                    %analysis_id,
                    complexity = %analysis.complexity.level,
                    breakdowns = analysis.breakdowns.len(),
                    risks = analysis.risks.risks.len(),
                    "Task analysis complete"
                );
                Ok(analysis)
            }
            Err(err) if err.is_caller_visible() => {
                warn!(%analysis_id, error = %err, "Task analysis rejected");
                Err(err)
            }
            Err(err) => {
                error!(
                    %analysis_id,
                    task = %task.title,
                    project_id = ?task.project_id,
                    timestamp = %Utc::now().to_rfc3339(),
                    error = %err,
                    "Task analysis failed"
                );
                Err(DomainError::analysis_failed(analysis_id, err))
            }
        }
    }

    async fn run_analysis(
        &self,
        analysis_id: Uuid,
        task: &TaskInput,
        context: Option<&AnalysisContext>,
    ) -> DomainResult<EnhancedAnalysis> {
        let local = self.assessor.assess(task, context);

        let prompt = self.prompt_builder.build(task, context);
        debug!(%analysis_id, prompt_len = prompt.len(), "Querying decomposition oracle");
        let response = self.oracle.complete(&prompt).await?;

        let proposal = parse_oracle_proposal(&response)?;
        if !proposal.dropped.is_empty() {
            warn!(
                %analysis_id,
                dropped = proposal.dropped.len(),
                kept = proposal.breakdowns.len(),
                "Oracle breakdown had unusable entries"
            );
        }

        Ok(self.merge(analysis_id, task, proposal, local))
    }

    fn merge(
        &self,
        analysis_id: Uuid,
        task: &TaskInput,
        proposal: OracleProposal,
        local: LocalAssessment,
    ) -> EnhancedAnalysis {
        let quality_metrics = QualityMetrics {
            dropped_breakdown_count: proposal.dropped.len(),
            ..quality_metrics(task, &proposal.breakdowns)
        };
        let experience_points = proposal
            .experience_points
            .unwrap_or_else(|| i64::from(self.experience.for_task(task)));

        EnhancedAnalysis {
            analysis_id,
            analyzed_at: Utc::now(),
            breakdowns: proposal.breakdowns,
            category: proposal.category,
            skill_category: proposal.skill_category,
            experience_points,
            complexity: local.complexity,
            risks: local.risks,
            recommendations: local.recommendations,
            quality_metrics,
        }
    }

    /// Post-process the analysis' breakdown into sequenced subtasks.
    ///
    /// Total: invalid candidate data is defaulted, not rejected.
    pub fn decompose(&self, task: &TaskInput, analysis: &EnhancedAnalysis) -> Vec<DecomposedTask> {
        self.decomposition.process(task, &analysis.breakdowns)
    }

    /// Like [`Self::decompose`], but fails if any candidate is invalid.
    pub fn decompose_strict(
        &self,
        task: &TaskInput,
        analysis: &EnhancedAnalysis,
    ) -> DomainResult<Vec<DecomposedTask>> {
        let accepted = validate_candidates(&analysis.breakdowns).into_strict()?;
        Ok(self.decomposition.process(task, &accepted))
    }
}

/// Deterministic facts about a candidate list relative to its parent.
pub fn quality_metrics(task: &TaskInput, candidates: &[SubtaskCandidate]) -> QualityMetrics {
    let report = validate_candidates(candidates);
    let total: u64 = candidates
        .iter()
        .map(|c| u64::from(parse_duration(&c.estimated_duration)))
        .sum();
    let parent = parse_optional_duration(task.estimate());

    #[allow(clippy::cast_precision_loss)]
    let estimate_coverage = (parent > 0).then(|| total as f64 / f64::from(parent));

    QualityMetrics {
        breakdown_count: candidates.len(),
        dropped_breakdown_count: 0,
        valid_breakdown_count: report.accepted.len(),
        total_estimated_duration: format_to_duration(u32::try_from(total).unwrap_or(u32::MAX)),
        estimate_coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_metrics() {
        let task = TaskInput::new("t", "").with_estimated_duration("PT4H");
        let candidates = vec![
            SubtaskCandidate::new("A", "PT1H"),
            SubtaskCandidate::new("B", "PT2H"),
            SubtaskCandidate::new("C", "unknown"),
        ];
        let metrics = quality_metrics(&task, &candidates);
        assert_eq!(metrics.breakdown_count, 3);
        assert_eq!(metrics.valid_breakdown_count, 2);
        assert_eq!(metrics.total_estimated_duration, "PT3H");
        assert!((metrics.estimate_coverage.unwrap() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quality_metrics_without_estimate() {
        let metrics = quality_metrics(&TaskInput::new("t", ""), &[]);
        assert_eq!(metrics.breakdown_count, 0);
        assert_eq!(metrics.total_estimated_duration, "PT0M");
        assert_eq!(metrics.estimate_coverage, None);
    }
}

//! Analysis result models.
//!
//! Everything here is derived on each call and never persisted by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::breakdown::{RejectedCandidate, SubtaskCandidate};

/// Coarse complexity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    /// Score 0 to 2.
    Low,
    /// Score 3 or 4.
    Medium,
    /// Score 5 or more.
    High,
}

impl ComplexityLevel {
    /// Map an additive complexity score to a level.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=2 => Self::Low,
            3..=4 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the complexity evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityResult {
    /// Bucket derived from `score`.
    pub level: ComplexityLevel,
    /// Raw additive score the level was derived from.
    pub score: u32,
    /// Human-readable contributing reasons, in evaluation order.
    pub factors: Vec<String>,
}

/// Severity of an advisory risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    /// Worth noting.
    Low,
    /// Should be planned for.
    Medium,
    /// Likely to derail the task.
    High,
}

impl RiskSeverity {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One advisory risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    /// Stable rule text, e.g. "effort unknown".
    pub description: String,
    /// How serious the risk is.
    pub severity: RiskSeverity,
}

impl Risk {
    /// Risk with the given text and severity.
    pub fn new(description: impl Into<String>, severity: RiskSeverity) -> Self {
        Self {
            description: description.into(),
            severity,
        }
    }
}

/// Output of the risk analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Risks in rule order.
    pub risks: Vec<Risk>,
}

impl RiskResult {
    /// True if a risk with exactly this description fired.
    pub fn has_risk(&self, description: &str) -> bool {
        self.risks.iter().any(|r| r.description == description)
    }

    /// Most severe risk, if any fired.
    pub fn highest_severity(&self) -> Option<RiskSeverity> {
        self.risks.iter().map(|r| r.severity).max()
    }

    /// True when no rule fired.
    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }
}

/// How a task should be broken down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakdownStrategy {
    /// Split the whole first, then refine.
    TopDown,
    /// Start from the core piece and grow outward.
    MiddleOut,
    /// Start from concrete steps.
    BottomUp,
}

impl BreakdownStrategy {
    /// Hyphenated name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopDown => "top-down",
            Self::MiddleOut => "middle-out",
            Self::BottomUp => "bottom-up",
        }
    }
}

impl std::fmt::Display for BreakdownStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-point effort envelope, each bound a duration string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortEstimate {
    /// At least one hour, never above `realistic`.
    pub optimistic: String,
    /// The parent estimate itself.
    pub realistic: String,
    /// One and a half times the estimate, rounded up to hours.
    pub pessimistic: String,
}

/// Planning advice derived from complexity and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Strategy chosen from the complexity level.
    pub breakdown_strategy: BreakdownStrategy,
    /// At most three skills.
    pub suggested_skills: Vec<String>,
    /// Effort envelope.
    pub estimated_effort: EffortEstimate,
    /// In `0.0..=1.0`.
    pub parallelization_potential: f64,
    /// Always at least 1.
    pub suggested_team_size: u32,
}

/// The JSON object the oracle is asked to produce.
///
/// Fields not listed here are dropped on deserialization so they never reach
/// the engine's output contract. Oracle text goes through
/// `services::json_extractor`, which reads each breakdown entry on its own
/// and moves unusable ones to `dropped`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OracleProposal {
    /// Proposed subtasks, in the oracle's order.
    #[serde(default)]
    pub breakdowns: Vec<SubtaskCandidate>,
    /// Entries that could not be read as a candidate at all.
    #[serde(skip)]
    pub dropped: Vec<RejectedCandidate>,
    /// Category the oracle suggests for the parent.
    #[serde(default)]
    pub category: Option<String>,
    /// Skill the oracle suggests for the parent.
    #[serde(default, alias = "skillCategory")]
    pub skill_category: Option<String>,
    /// Reward the oracle suggests for the parent.
    #[serde(default, alias = "experiencePoints")]
    pub experience_points: Option<i64>,
}

/// Cheap deterministic facts about the oracle's breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Candidates read from the oracle.
    pub breakdown_count: usize,
    /// Oracle entries dropped before they became candidates.
    #[serde(default)]
    pub dropped_breakdown_count: usize,
    /// Candidates that pass validation.
    pub valid_breakdown_count: usize,
    /// Sum of the raw (unbuffered) candidate durations.
    pub total_estimated_duration: String,
    /// Candidate total divided by the parent estimate; `None` without one.
    pub estimate_coverage: Option<f64>,
}

/// Result of the analysis facade: the oracle's proposal merged with the
/// engine's own scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedAnalysis {
    /// Fresh id for this call.
    pub analysis_id: Uuid,
    /// When the analysis finished.
    pub analyzed_at: DateTime<Utc>,
    /// Candidates kept from the oracle.
    pub breakdowns: Vec<SubtaskCandidate>,
    /// Oracle category.
    pub category: Option<String>,
    /// Oracle skill.
    pub skill_category: Option<String>,
    /// Reward for the parent task, from the oracle or the experience formula.
    pub experience_points: i64,
    /// Local complexity score.
    pub complexity: ComplexityResult,
    /// Local risks.
    pub risks: RiskResult,
    /// Local planning advice.
    pub recommendations: Recommendation,
    /// Facts about the breakdown.
    pub quality_metrics: QualityMetrics,
}

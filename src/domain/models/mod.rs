pub mod analysis;
pub mod breakdown;
pub mod config;
pub mod task;

pub use analysis::{
    BreakdownStrategy, ComplexityLevel, ComplexityResult, EffortEstimate, EnhancedAnalysis,
    OracleProposal, QualityMetrics, Recommendation, Risk, RiskResult, RiskSeverity,
};
pub use breakdown::{
    DecomposedTask, DependencyType, LinkType, RejectedCandidate, SubtaskCandidate, SubtaskDependency, SubtaskStatus,
    TaskStyle, SUBTASK_TYPE,
};
pub use config::{AnalysisConfig, Config, OracleBackend, OracleConfig};
pub use task::{AnalysisContext, ProjectContext, TaskInput, TaskPriority, TeamContext, WorkingHours};

pub mod complexity;
pub mod decomposition;
pub mod duration;
pub mod experience;
pub mod json_extractor;
pub mod prompt;
pub mod recommendation;
pub mod risk;
pub mod task_analyzer;
pub mod validation;

pub use complexity::ComplexityEvaluator;
pub use decomposition::{DecompositionProcessor, StylePalette};
pub use duration::{format_to_duration, parse_duration, try_parse_duration};
pub use experience::{calculate_experience, ExperienceCalculator};
pub use json_extractor::{extract_json_object, parse_oracle_proposal};
pub use prompt::PromptBuilder;
pub use recommendation::RecommendationGenerator;
pub use risk::RiskAnalyzer;
pub use task_analyzer::{LocalAssessment, LocalAssessor, TaskAnalyzer};
pub use validation::{validate_candidates, validate_task, CandidateReport, RejectedCandidate};

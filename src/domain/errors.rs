//! Domain errors for the Taskforge estimation engine.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur while analyzing or decomposing a task.
///
/// Local computations (duration codec, scoring, experience) never fail; only
/// input validation, the oracle round-trip and JSON extraction surface here.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed task input or rejected subtask candidates. Not retried.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The oracle response held no extractable or schema-valid JSON object.
    #[error("Oracle response could not be parsed: {0}")]
    OracleFormat(String),

    /// The oracle backend could not be reached or returned a failure.
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// Any other failure during analysis. The display text is stable and
    /// user-presentable; the underlying cause is kept as the source only.
    #[error("Task analysis failed")]
    AnalysisFailed {
        /// Id of the failed analysis.
        analysis_id: Uuid,
        /// Underlying cause, for logs.
        #[source]
        source: Box<DomainError>,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Wrap an error as an opaque analysis failure.
    pub fn analysis_failed(analysis_id: Uuid, source: DomainError) -> Self {
        Self::AnalysisFailed {
            analysis_id,
            source: Box::new(source),
        }
    }

    /// Whether the error is surfaced to the caller unchanged by the facade.
    pub fn is_caller_visible(&self) -> bool {
        matches!(self, Self::ValidationFailed(_) | Self::OracleFormat(_))
    }
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

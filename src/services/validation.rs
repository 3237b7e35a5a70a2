//! Input and candidate validation.
//!
//! Task input is checked before any analysis work. Oracle candidates are
//! checked per entry; invalid entries are rejected, never coerced.

use crate::domain::errors::{DomainError, DomainResult};
pub use crate::domain::models::RejectedCandidate;
use crate::domain::models::{AnalysisContext, SubtaskCandidate, TaskInput};
use crate::services::duration::try_parse_duration;

/// Validate a task and its optional context.
pub fn validate_task(task: &TaskInput, context: Option<&AnalysisContext>) -> DomainResult<()> {
    if task.title.trim().is_empty() {
        return Err(DomainError::ValidationFailed("task title cannot be empty".to_string()));
    }

    if let Some(team) = context.and_then(|c| c.team_context.as_ref()) {
        if team.team_size == 0 {
            return Err(DomainError::ValidationFailed(
                "team size must be at least 1".to_string(),
            ));
        }
    }

    Ok(())
}

/// Outcome of validating a candidate list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateReport {
    /// Valid candidates, in original order.
    pub accepted: Vec<SubtaskCandidate>,
    /// Invalid candidates with their position and reason.
    pub rejected: Vec<RejectedCandidate>,
}

impl CandidateReport {
    /// True when nothing was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Convert into the accepted list, or an error naming every rejection.
    pub fn into_strict(self) -> DomainResult<Vec<SubtaskCandidate>> {
        if self.rejected.is_empty() {
            return Ok(self.accepted);
        }

        let reasons = self
            .rejected
            .iter()
            .map(|r| format!("#{} '{}': {}", r.index, r.title, r.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(DomainError::ValidationFailed(format!(
            "{} subtask candidate(s) rejected: {reasons}",
            self.rejected.len()
        )))
    }
}

/// Check one candidate.
pub fn validate_candidate(candidate: &SubtaskCandidate) -> Result<(), String> {
    if candidate.title.trim().is_empty() {
        return Err("title is empty".to_string());
    }
    if try_parse_duration(&candidate.estimated_duration).is_none() {
        return Err(format!(
            "estimated duration '{}' is not parseable",
            candidate.estimated_duration
        ));
    }
    if candidate.experience_points < 0 {
        return Err(format!(
            "experience points {} are negative",
            candidate.experience_points
        ));
    }
    Ok(())
}

/// Split candidates into accepted and rejected, preserving order.
pub fn validate_candidates(candidates: &[SubtaskCandidate]) -> CandidateReport {
    let mut report = CandidateReport::default();

    for (index, candidate) in candidates.iter().enumerate() {
        match validate_candidate(candidate) {
            Ok(()) => report.accepted.push(candidate.clone()),
            Err(reason) => report.rejected.push(RejectedCandidate {
                index,
                title: candidate.title.clone(),
                reason,
            }),
        }
    }

    report
}

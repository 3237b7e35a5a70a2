//! Breakdown domain model.
//!
//! `SubtaskCandidate`s come from the oracle and are untrusted.
//! `DecomposedTask`s are the engine's fully specified output, emitted in one
//! batch; their order defines the sequential dependency chain.

use serde::{Deserialize, Serialize};

use super::task::TaskPriority;

/// A subtask proposed by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskCandidate {
    /// Short subtask title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Unbuffered duration string.
    #[serde(default, alias = "estimatedDuration")]
    pub estimated_duration: String,
    /// Signed so that negative oracle values can be detected and rejected.
    #[serde(default, alias = "experiencePoints")]
    pub experience_points: i64,
    /// Skill key for styling and difficulty.
    #[serde(default, alias = "skillCategory")]
    pub skill_category: Option<String>,
}

impl SubtaskCandidate {
    /// Candidate with the given title and duration.
    pub fn new(title: impl Into<String>, estimated_duration: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            estimated_duration: estimated_duration.into(),
            experience_points: 0,
            skill_category: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the experience points.
    pub fn with_experience_points(mut self, points: i64) -> Self {
        self.experience_points = points;
        self
    }

    /// Set the skill category.
    pub fn with_skill_category(mut self, skill: impl Into<String>) -> Self {
        self.skill_category = Some(skill.into());
        self
    }

    /// The skill category, if present and not blank.
    pub fn skill_name(&self) -> Option<&str> {
        self.skill_category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A candidate the engine could not use, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    /// Position in the oracle's list.
    pub index: usize,
    /// Title as far as it could be read; empty when missing.
    pub title: String,
    /// Human-readable rejection reason.
    pub reason: String,
}

/// Strength of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    /// Must be satisfied.
    Required,
    /// Nice to have.
    Optional,
    /// Depends on circumstances.
    Conditional,
}

/// Scheduling relation between prerequisite and dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Prerequisite finishes before this starts.
    FinishToStart,
    /// Both start together.
    StartToStart,
    /// Both finish together.
    FinishToFinish,
    /// Prerequisite starts before this finishes.
    StartToFinish,
}

/// Edge from a subtask to its prerequisite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskDependency {
    /// Title of the prerequisite subtask.
    pub prerequisite_task_title: String,
    /// Edge strength.
    pub dependency_type: DependencyType,
    /// Scheduling relation.
    pub link_type: LinkType,
}

impl SubtaskDependency {
    /// A hard finish-to-start edge on `title`.
    pub fn sequential(title: impl Into<String>) -> Self {
        Self {
            prerequisite_task_title: title.into(),
            dependency_type: DependencyType::Required,
            link_type: LinkType::FinishToStart,
        }
    }
}

/// Lifecycle status of a decomposed subtask. The engine only ever creates
/// `NotStarted`; later transitions belong to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtaskStatus {
    /// Freshly created.
    #[default]
    NotStarted,
    /// Work has begun.
    InProgress,
    /// Done.
    Completed,
}

impl SubtaskStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Visual styling of a subtask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStyle {
    /// Hex colour from the palette.
    pub color: Option<String>,
    /// Icon name; currently always unset.
    pub icon: Option<String>,
}

/// Record type of a decomposed subtask.
pub const SUBTASK_TYPE: &str = "task";

/// A fully specified subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposedTask {
    /// Copied from the candidate.
    pub title: String,
    /// Copied from the candidate.
    pub description: String,
    /// Buffered duration string.
    pub estimated_duration: String,
    /// Always `"task"`.
    #[serde(rename = "type")]
    pub task_type: String,
    /// Inherited from the parent.
    pub priority: TaskPriority,
    /// Always not started.
    pub status: SubtaskStatus,
    /// Always 0.
    pub progress_percentage: u8,
    /// Inherited from the parent.
    pub category: Option<String>,
    /// Copied from the candidate.
    pub skill_category: Option<String>,
    /// Copied from the candidate.
    pub experience_points: i64,
    /// In `1..=5`.
    pub difficulty_level: u8,
    /// Palette styling.
    pub style: TaskStyle,
    /// Empty for the first subtask, else its predecessor.
    pub dependencies: Vec<SubtaskDependency>,
}

//! Task input domain model.
//!
//! A `TaskInput` is the user-authored task handed to the engine, and an
//! `AnalysisContext` carries optional project/team signals around it. Both
//! are read-only for the engine.

use serde::{Deserialize, Serialize};

/// Priority level of a user task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Do first.
    High,
    /// Default.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl TaskPriority {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse a priority name; `normal` means medium.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" | "normal" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task submitted for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Short task title. Must not be blank.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Inherited by every subtask.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Task category (e.g. "feature", "research").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Skill category hint (e.g. "backend").
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "skillCategory")]
    pub skill_category: Option<String>,
    /// Duration string such as `PT2H30M` or `1 hour 30 minutes`.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "estimatedDuration")]
    pub estimated_duration: Option<String>,
    /// Owning project, used in failure logs.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "projectId")]
    pub project_id: Option<String>,
}

impl TaskInput {
    /// Task with medium priority and no hints.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: TaskPriority::default(),
            category: None,
            skill_category: None,
            estimated_duration: None,
            project_id: None,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the skill hint.
    pub fn with_skill_category(mut self, skill: impl Into<String>) -> Self {
        self.skill_category = Some(skill.into());
        self
    }

    /// Set the duration estimate.
    pub fn with_estimated_duration(mut self, duration: impl Into<String>) -> Self {
        self.estimated_duration = Some(duration.into());
        self
    }

    /// Set the project id.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// The estimate, if one was supplied and is not blank.
    pub fn estimate(&self) -> Option<&str> {
        self.estimated_duration
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// The category, if present and not blank.
    pub fn category_name(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// The skill category, if present and not blank.
    pub fn skill_name(&self) -> Option<&str> {
        non_blank(self.skill_category.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Project the task belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Display name.
    #[serde(alias = "projectName")]
    pub project_name: String,
    /// What the project is about.
    #[serde(default, alias = "projectDescription")]
    pub project_description: String,
    /// Number of other tasks already recorded in the project.
    #[serde(default, alias = "relatedTaskCount")]
    pub related_task_count: u32,
}

/// Daily working window of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    /// Start of day, `HH:MM`.
    pub start: String,
    /// End of day, `HH:MM`.
    pub end: String,
    /// IANA timezone name.
    pub timezone: String,
}

/// Team executing the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamContext {
    /// Number of people available. Always at least 1.
    #[serde(alias = "teamSize")]
    pub team_size: u32,
    /// Skills the team has, in preference order.
    #[serde(default, alias = "availableSkills")]
    pub available_skills: Vec<String>,
    /// Daily window, when known.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "workingHours")]
    pub working_hours: Option<WorkingHours>,
}

impl TeamContext {
    /// Team of `team_size`, at least 1.
    pub fn new(team_size: u32) -> Self {
        Self {
            team_size: team_size.max(1),
            available_skills: Vec::new(),
            working_hours: None,
        }
    }

    /// Add skills, keeping first-seen order and dropping duplicates.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for skill in skills {
            let skill = skill.into();
            if !self.available_skills.contains(&skill) {
                self.available_skills.push(skill);
            }
        }
        self
    }

    /// Set the working window.
    pub fn with_working_hours(mut self, hours: WorkingHours) -> Self {
        self.working_hours = Some(hours);
        self
    }
}

/// Optional signals surrounding a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// Project signals.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "projectContext")]
    pub project_context: Option<ProjectContext>,
    /// Team signals.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "teamContext")]
    pub team_context: Option<TeamContext>,
}

impl AnalysisContext {
    /// Empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach project signals.
    pub fn with_project(mut self, project: ProjectContext) -> Self {
        self.project_context = Some(project);
        self
    }

    /// Attach team signals.
    pub fn with_team(mut self, team: TeamContext) -> Self {
        self.team_context = Some(team);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parsing() {
        assert_eq!(TaskPriority::from_str("HIGH"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::from_str("normal"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::from_str("urgent"), None);
        assert_eq!(TaskPriority::Low.to_string(), "low");
    }

    #[test]
    fn test_blank_estimate_is_absent() {
        let task = TaskInput::new("Write spec", "").with_estimated_duration("   ");
        assert_eq!(task.estimate(), None);
        assert_eq!(task.category_name(), None);
    }

    #[test]
    fn test_task_input_accepts_camel_case() {
        let task: TaskInput = serde_json::from_str(
            r#"{"title":"Ship","estimatedDuration":"PT1H","skillCategory":"backend","priority":"high"}"#,
        )
        .unwrap();
        assert_eq!(task.estimate(), Some("PT1H"));
        assert_eq!(task.skill_name(), Some("backend"));
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.description, "");
    }

    #[test]
    fn test_team_skills_are_deduplicated() {
        let team = TeamContext::new(0).with_skills(["rust", "sql", "rust", "design"]);
        assert_eq!(team.team_size, 1);
        assert_eq!(team.available_skills, vec!["rust", "sql", "design"]);
    }
}

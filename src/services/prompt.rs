//! Decomposition prompt rendering.
//!
//! Pure string templating over the task and its context. The same inputs
//! always produce byte-identical prompts.

use crate::domain::models::{AnalysisContext, ProjectContext, TaskInput, TeamContext};

const NOT_SPECIFIED: &str = "Not specified";

/// Renders the prompt sent to the decomposition oracle.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Builder with the standard template.
    pub fn new() -> Self {
        Self
    }

    /// Build the decomposition prompt.
    pub fn build(&self, task: &TaskInput, context: Option<&AnalysisContext>) -> String {
        let description = if task.description.trim().is_empty() {
            "No description provided"
        } else {
            task.description.trim()
        };

        let mut sections = vec![format!(
            r"You are a task decomposition assistant for a personal productivity app.

## Task to Decompose
Title: {}
Description: {}
Priority: {}
Category: {}
Skill Category: {}
Estimated Duration: {}",
            task.title.trim(),
            description,
            task.priority,
            task.category_name().unwrap_or(NOT_SPECIFIED),
            task.skill_name().unwrap_or(NOT_SPECIFIED),
            task.estimate().unwrap_or(NOT_SPECIFIED),
        )];

        if let Some(project) = context.and_then(|c| c.project_context.as_ref()) {
            sections.push(project_section(project));
        }
        if let Some(team) = context.and_then(|c| c.team_context.as_ref()) {
            sections.push(team_section(team));
        }

        sections.push(INSTRUCTIONS.to_string());
        sections.join("\n\n")
    }
}

fn project_section(project: &ProjectContext) -> String {
    let description = if project.project_description.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        project.project_description.trim()
    };
    format!(
        "## Project Context\nProject: {}\nDescription: {}\nRelated Tasks: {}",
        project.project_name, description, project.related_task_count
    )
}

fn team_section(team: &TeamContext) -> String {
    let skills = if team.available_skills.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        team.available_skills.join(", ")
    };
    let hours = team.working_hours.as_ref().map_or_else(
        || NOT_SPECIFIED.to_string(),
        |h| format!("{}-{} ({})", h.start, h.end, h.timezone),
    );
    format!(
        "## Team Context\nTeam Size: {}\nAvailable Skills: {}\nWorking Hours: {}",
        team.team_size, skills, hours
    )
}

const INSTRUCTIONS: &str = r#"## Instructions
Break this task into concrete, sequential subtasks. Each subtask should be
completable in one sitting by one person, in the order listed.

## Required Output Format (JSON)
Respond with a JSON object containing:
```json
{
  "breakdowns": [
    {
      "title": "Short subtask title",
      "description": "What needs to be done",
      "estimated_duration": "PT1H30M",
      "experience_points": 20,
      "skill_category": "frontend|backend|design|devops|testing|documentation"
    }
  ],
  "category": "task category",
  "skill_category": "main skill category",
  "experience_points": 50
}
```

IMPORTANT: Output ONLY the JSON object, no other text."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{TaskPriority, WorkingHours};

    #[test]
    fn test_minimal_prompt() {
        let prompt = PromptBuilder::new().build(&TaskInput::new("Write spec", ""), None);
        assert!(prompt.contains("Title: Write spec"));
        assert!(prompt.contains("Description: No description provided"));
        assert!(prompt.contains("Priority: medium"));
        assert!(prompt.contains("Estimated Duration: Not specified"));
        assert!(!prompt.contains("## Project Context"));
        assert!(!prompt.contains("## Team Context"));
        assert!(prompt.ends_with("no other text."));
    }

    #[test]
    fn test_context_sections() {
        let task = TaskInput::new("Ship v2", "Release the thing")
            .with_priority(TaskPriority::High)
            .with_estimated_duration("PT3H");
        let context = AnalysisContext::new()
            .with_project(ProjectContext {
                project_name: "Atlas".into(),
                project_description: String::new(),
                related_task_count: 12,
            })
            .with_team(TeamContext::new(3).with_skills(["rust", "react"]).with_working_hours(
                WorkingHours {
                    start: "09:00".into(),
                    end: "18:00".into(),
                    timezone: "Asia/Tokyo".into(),
                },
            ));

        let prompt = PromptBuilder::new().build(&task, Some(&context));
        assert!(prompt.contains("Project: Atlas\nDescription: Not specified\nRelated Tasks: 12"));
        assert!(prompt.contains("Team Size: 3\nAvailable Skills: rust, react\nWorking Hours: 09:00-18:00 (Asia/Tokyo)"));
        let project_at = prompt.find("## Project Context").unwrap();
        let team_at = prompt.find("## Team Context").unwrap();
        assert!(project_at < team_at);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let task = TaskInput::new("A", "B").with_category("c");
        let builder = PromptBuilder::new();
        assert_eq!(builder.build(&task, None), builder.build(&task, None));
    }
}

//! Common test utilities for integration tests
//!
//! Shared fixtures for tasks, contexts and oracle responses.

#![allow(dead_code)]

use taskforge::domain::models::{AnalysisContext, SubtaskCandidate, TaskInput, TeamContext};

/// Oracle response for the two-step schema/API breakdown.
pub fn two_step_response() -> String {
    serde_json::json!({
        "breakdowns": [
            {
                "title": "Design schema",
                "description": "Tables and indexes",
                "estimated_duration": "PT2H",
                "experience_points": 40,
                "skill_category": "backend"
            },
            {
                "title": "Implement API",
                "description": "CRUD endpoints",
                "estimated_duration": "PT4H",
                "experience_points": 80,
                "skill_category": "backend"
            }
        ],
        "category": "feature",
        "skill_category": "backend",
        "experience_points": 60
    })
    .to_string()
}

/// The same breakdown as [`two_step_response`], as typed candidates.
pub fn two_step_candidates() -> Vec<SubtaskCandidate> {
    vec![
        SubtaskCandidate::new("Design schema", "PT2H")
            .with_description("Tables and indexes")
            .with_experience_points(40)
            .with_skill_category("backend"),
        SubtaskCandidate::new("Implement API", "PT4H")
            .with_description("CRUD endpoints")
            .with_experience_points(80)
            .with_skill_category("backend"),
    ]
}

/// Wrap a JSON body in the kind of prose models like to add.
pub fn chatty(json: &str) -> String {
    format!("Sure! Here is the breakdown you asked for:\n\n```json\n{json}\n```\n\nLet me know if {{this}} helps.")
}

pub fn backend_task() -> TaskInput {
    TaskInput::new("Build user API", "Schema plus endpoints")
        .with_skill_category("backend")
        .with_estimated_duration("PT6H")
        .with_project_id("proj-42")
}

pub fn solo_context() -> AnalysisContext {
    AnalysisContext::new().with_team(TeamContext::new(1))
}

//! Decomposition post-processor.
//!
//! Turns the oracle's candidate list into a sequenced work breakdown:
//! each subtask depends on its predecessor (finish-to-start), carries a
//! 20% time buffer, a difficulty level in `1..=5`, a palette color and the
//! parent's priority and category.
//!
//! The operation is total: bad candidate data is replaced by safe defaults
//! and reported as a warning, never as an error. Callers that need strict
//! validation run [`crate::services::validation`] first.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::models::{
    DecomposedTask, SubtaskCandidate, SubtaskDependency, SubtaskStatus, TaskInput, TaskStyle,
    SUBTASK_TYPE,
};
use crate::services::duration::{format_to_duration, try_parse_duration};

const MIN_DIFFICULTY: u8 = 1;
const MAX_DIFFICULTY: u8 = 5;
const POINTS_PER_DIFFICULTY_STEP: u64 = 50;
const SKILL_DIFFICULTY_MULTIPLIER: f64 = 1.5;

/// Declarative skill-category to color map.
///
/// Keys are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePalette {
    colors: HashMap<String, String>,
}

impl Default for StylePalette {
    fn default() -> Self {
        Self::from_pairs([
            ("frontend", "#3B82F6"),
            ("backend", "#10B981"),
            ("design", "#EC4899"),
            ("devops", "#6366F1"),
            ("testing", "#F59E0B"),
            ("documentation", "#6B7280"),
        ])
    }
}

impl StylePalette {
    /// A palette with no entries; every subtask gets a null color.
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// Palette from `(skill, hex colour)` pairs; keys are matched case-insensitively.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let colors = pairs
            .into_iter()
            .map(|(k, v)| (normalize(k.as_ref()), v.into()))
            .collect();
        Self { colors }
    }

    /// Add or replace one entry.
    pub fn with_color(mut self, skill: &str, color: impl Into<String>) -> Self {
        self.colors.insert(normalize(skill), color.into());
        self
    }

    /// Colour for a skill; `None` when absent or unknown.
    pub fn color_for(&self, skill: Option<&str>) -> Option<&str> {
        skill.and_then(|s| self.colors.get(&normalize(s))).map(String::as_str)
    }

    /// Style for a skill category. Icons are left to the presentation layer.
    pub fn style_for(&self, skill: Option<&str>) -> TaskStyle {
        TaskStyle {
            color: self.color_for(skill).map(str::to_string),
            icon: None,
        }
    }
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Add the 20% contingency buffer, rounding up to the next whole minute.
pub fn buffered_minutes(minutes: u32) -> u32 {
    let buffered = (u64::from(minutes) * 6).div_ceil(5);
    u32::try_from(buffered).unwrap_or(u32::MAX)
}

/// Difficulty level from experience points and skill specificity.
///
/// `clamp(round(ceil(points / 50) * multiplier), 1, 5)`, where the
/// multiplier is 1.5 for skill-specific subtasks. Negative points count as 0.
pub fn difficulty_level(experience_points: i64, has_skill: bool) -> u8 {
    let points = u64::try_from(experience_points).unwrap_or(0);
    let steps = points.div_ceil(POINTS_PER_DIFFICULTY_STEP);
    // Clamp before converting so huge point values cannot overflow.
    #[allow(clippy::cast_precision_loss)]
    let base = steps.min(u64::from(MAX_DIFFICULTY)) as f64;
    let multiplier = if has_skill { SKILL_DIFFICULTY_MULTIPLIER } else { 1.0 };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let level = (base * multiplier).round() as u8;
    level.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Converts validated oracle candidates into decomposed subtasks.
#[derive(Debug, Clone, Default)]
pub struct DecompositionProcessor {
    palette: StylePalette,
}

impl DecompositionProcessor {
    /// Processor styling subtasks with `palette`.
    pub fn new(palette: StylePalette) -> Self {
        Self { palette }
    }

    /// The injected palette.
    pub fn palette(&self) -> &StylePalette {
        &self.palette
    }

    /// Process candidates in proposed order. Output has the same length and order.
    pub fn process(&self, parent: &TaskInput, candidates: &[SubtaskCandidate]) -> Vec<DecomposedTask> {
        debug!(
            parent = %parent.title,
            candidates = candidates.len(),
            "Decomposing task"
        );

        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let previous = index.checked_sub(1).map(|i| &candidates[i]);
                self.process_one(parent, index, candidate, previous)
            })
            .collect()
    }

    fn process_one(
        &self,
        parent: &TaskInput,
        index: usize,
        candidate: &SubtaskCandidate,
        previous: Option<&SubtaskCandidate>,
    ) -> DecomposedTask {
        let minutes = try_parse_duration(&candidate.estimated_duration).unwrap_or_else(|| {
            warn!(
                index,
                title = %candidate.title,
                duration = %candidate.estimated_duration,
                "Partial data: unparsable subtask duration, using 0 minutes"
            );
            0
        });

        let skill = candidate.skill_name();
        if skill.is_none() {
            warn!(
                index,
                title = %candidate.title,
                "Partial data: subtask has no skill category, style left empty"
            );
        }

        let dependencies = previous
            .map(|p| vec![SubtaskDependency::sequential(p.title.clone())])
            .unwrap_or_default();

        DecomposedTask {
            title: candidate.title.clone(),
            description: candidate.description.clone(),
            estimated_duration: format_to_duration(buffered_minutes(minutes)),
            task_type: SUBTASK_TYPE.to_string(),
            priority: parent.priority,
            status: SubtaskStatus::NotStarted,
            progress_percentage: 0,
            category: parent.category.clone(),
            skill_category: skill.map(str::to_string),
            experience_points: candidate.experience_points,
            difficulty_level: difficulty_level(candidate.experience_points, skill.is_some()),
            style: self.palette.style_for(skill),
            dependencies,
        }
    }
}

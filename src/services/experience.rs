use crate::domain::models::TaskInput;
use crate::services::duration::parse_duration;

/// Upper bound of any engine-computed reward.
pub const MAX_EXPERIENCE: u32 = 100;

/// Service for calculating deterministic experience-point rewards
///
/// Reward formula: round(base * complexity_factor * duration_factor * category_factor),
/// clamped to `0..=MAX_EXPERIENCE`
#[derive(Debug, Clone)]
pub struct ExperienceCalculator {
    base_points: f64,
}

impl Default for ExperienceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceCalculator {
    /// Create a calculator with the default base of 10 points
    pub fn new() -> Self {
        Self { base_points: 10.0 }
    }

    /// Create a calculator with a custom base
    pub fn with_base(base_points: f64) -> Self {
        Self { base_points }
    }

    /// Calculate the reward for a set of task attributes
    ///
    /// Blank optional values count as absent.
    pub fn calculate(
        &self,
        title: &str,
        description: Option<&str>,
        estimated_duration: Option<&str>,
        category: Option<&str>,
        skill_category: Option<&str>,
    ) -> u32 {
        let text_len = title.chars().count() + description.map_or(0, |d| d.chars().count());
        let duration = present(estimated_duration).map(parse_duration);

        let raw = self.base_points
            * complexity_factor(text_len)
            * duration_factor(duration)
            * category_factor(present(category).is_some(), present(skill_category).is_some());

        clamp_reward(raw)
    }

    /// Calculate the reward for a whole task input
    pub fn for_task(&self, task: &TaskInput) -> u32 {
        self.calculate(
            &task.title,
            Some(&task.description),
            task.estimated_duration.as_deref(),
            task.category.as_deref(),
            task.skill_category.as_deref(),
        )
    }
}

/// Calculate a reward with the default calculator.
pub fn calculate_experience(
    title: &str,
    description: Option<&str>,
    estimated_duration: Option<&str>,
    category: Option<&str>,
    skill_category: Option<&str>,
) -> u32 {
    ExperienceCalculator::new().calculate(title, description, estimated_duration, category, skill_category)
}

/// Multiplier by combined title and description length in characters.
pub fn complexity_factor(text_len: usize) -> f64 {
    match text_len {
        0..50 => 1.0,
        50..100 => 1.2,
        100..200 => 1.4,
        _ => 1.6,
    }
}

/// Multiplier by parsed minutes; no duration counts as the shortest bucket.
pub fn duration_factor(minutes: Option<u32>) -> f64 {
    match minutes {
        None | Some(0..=30) => 1.0,
        Some(31..=60) => 1.2,
        Some(61..=180) => 1.4,
        Some(_) => 1.6,
    }
}

fn category_factor(has_category: bool, has_skill: bool) -> f64 {
    let mut factor = 1.0;
    if has_category {
        factor *= 1.1;
    }
    if has_skill {
        factor *= 1.2;
    }
    factor
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_reward(raw: f64) -> u32 {
    raw.round().clamp(0.0, f64::from(MAX_EXPERIENCE)) as u32
}

//! Table output formatting for CLI commands
//!
//! Renders oracle breakdowns and decomposed subtasks with comfy-table.
//! Subtask rows are tinted with their style colour when colours are enabled.

use crate::domain::models::{DecomposedTask, RiskSeverity, SubtaskCandidate};
use crate::services::duration::try_parse_duration;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use super::truncate;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: console::colors_enabled(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format raw oracle candidates
    pub fn format_breakdowns(&self, candidates: &[SubtaskCandidate]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["#", "Title", "Duration", "XP", "Skill"]));

        for (i, candidate) in candidates.iter().enumerate() {
            let duration_cell = if try_parse_duration(&candidate.estimated_duration).is_some() {
                Cell::new(&candidate.estimated_duration)
            } else if self.use_colors {
                Cell::new(&candidate.estimated_duration).fg(Color::Red)
            } else {
                Cell::new(format!("{} (?)", candidate.estimated_duration))
            };

            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(truncate(&candidate.title, 40)),
                duration_cell,
                Cell::new(candidate.experience_points),
                Cell::new(candidate.skill_name().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    /// Format decomposed subtasks
    pub fn format_subtasks(&self, subtasks: &[DecomposedTask]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&[
            "#",
            "Title",
            "Duration",
            "Difficulty",
            "XP",
            "Skill",
            "Depends on",
        ]));

        for (i, task) in subtasks.iter().enumerate() {
            let mut title = Cell::new(truncate(&task.title, 40));
            if self.use_colors {
                if let Some(color) = task.style.color.as_deref().and_then(hex_to_color) {
                    title = title.fg(color);
                }
            }

            let depends_on = task
                .dependencies
                .iter()
                .map(|d| truncate(&d.prerequisite_task_title, 24))
                .collect::<Vec<_>>()
                .join(", ");

            table.add_row(vec![
                Cell::new(i + 1),
                title,
                Cell::new(&task.estimated_duration),
                Cell::new(difficulty_stars(task.difficulty_level)),
                Cell::new(task.experience_points),
                Cell::new(task.skill_category.as_deref().unwrap_or("-")),
                Cell::new(if depends_on.is_empty() { "-".to_string() } else { depends_on }),
            ]);
        }

        table.to_string()
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

fn difficulty_stars(level: u8) -> String {
    let level = usize::from(level.min(5));
    format!("{}{}", "★".repeat(level), "☆".repeat(5 - level))
}

/// Map risk severity to a terminal colour
pub fn severity_color(severity: RiskSeverity) -> console::Color {
    match severity {
        RiskSeverity::Low => console::Color::Green,
        RiskSeverity::Medium => console::Color::Yellow,
        RiskSeverity::High => console::Color::Red,
    }
}

/// Parse `#RRGGBB` into an RGB cell colour.
fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

//! Tolerant JSON extraction from oracle free text.
//!
//! Oracles wrap their JSON in prose or markdown fences. The extractor finds
//! the first balanced `{...}` span that parses as a JSON object, ignoring
//! braces inside string literals, then reads it as an [`OracleProposal`].
//!
//! Breakdown entries are read one at a time. A malformed field is defaulted
//! or converted where the intent is clear; an entry with no usable title is
//! dropped and reported, and the rest of the batch is kept.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{OracleProposal, RejectedCandidate, SubtaskCandidate};
use crate::services::duration::format_to_duration;

/// Maximum number of response characters echoed into error messages.
const ERROR_EXCERPT_LEN: usize = 200;

/// All balanced `{...}` spans of `text` as inclusive byte ranges, ordered by
/// start position.
///
/// One pass with a stack of open braces. String literals are only tracked
/// inside a span, so quotes in surrounding prose do not matter.
fn balanced_spans(text: &str) -> Vec<(usize, usize)> {
    let mut open: Vec<usize> = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(index),
            '}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, index));
                }
            }
            _ => {}
        }
    }

    // Spans close innermost first; callers want the leftmost.
    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}

/// Return the first balanced `{...}` span of `text`, without parsing it.
pub fn first_balanced_span(text: &str) -> Option<&str> {
    balanced_spans(text)
        .first()
        .map(|&(start, end)| &text[start..=end])
}

/// Return the first balanced span that parses as a JSON object.
///
/// Spans that are balanced but not JSON (e.g. `{placeholder}` in prose) are
/// skipped.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    balanced_spans(text)
        .into_iter()
        .find_map(|(start, end)| match serde_json::from_str::<Value>(&text[start..=end]) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
}

fn find_object(text: &str) -> DomainResult<Map<String, Value>> {
    extract_json_object(text).ok_or_else(|| {
        DomainError::OracleFormat(format!(
            "no JSON object found in response: {}",
            excerpt(text)
        ))
    })
}

/// Extract and deserialize the first JSON object into `T`.
pub fn extract_typed<T: DeserializeOwned>(text: &str) -> DomainResult<T> {
    serde_json::from_value(Value::Object(find_object(text)?))
        .map_err(|e| DomainError::OracleFormat(format!("response does not match schema: {e}")))
}

/// Top-level shape of the oracle object before per-entry conversion.
#[derive(Deserialize)]
struct RawProposal {
    #[serde(default)]
    breakdowns: Option<Vec<Value>>,
    #[serde(default)]
    category: Value,
    #[serde(default, alias = "skillCategory")]
    skill_category: Value,
    #[serde(default, alias = "experiencePoints")]
    experience_points: Value,
}

/// Extract the oracle's decomposition proposal from raw response text.
///
/// Fails with [`DomainError::OracleFormat`] when there is no JSON object or
/// `breakdowns` is not a list. Individual entries never fail the call.
pub fn parse_oracle_proposal(text: &str) -> DomainResult<OracleProposal> {
    let raw: RawProposal = extract_typed(text)?;

    let mut proposal = OracleProposal {
        category: lenient_string(&raw.category),
        skill_category: lenient_string(&raw.skill_category),
        experience_points: lenient_points(&raw.experience_points),
        ..OracleProposal::default()
    };

    for (index, entry) in raw.breakdowns.unwrap_or_default().iter().enumerate() {
        match candidate_from_value(entry) {
            Ok(candidate) => proposal.breakdowns.push(candidate),
            Err(reason) => {
                let title = entry
                    .get("title")
                    .and_then(lenient_string)
                    .unwrap_or_default();
                warn!(index, title = %title, reason = %reason, "Dropping oracle breakdown entry");
                proposal.dropped.push(RejectedCandidate { index, title, reason });
            }
        }
    }

    Ok(proposal)
}

/// Read one breakdown entry.
///
/// Strings accept numbers; a numeric duration is taken as minutes; float or
/// numeric-string experience points are rounded. Missing or null fields take
/// their defaults. Only a non-object entry or a missing title is an error.
pub fn candidate_from_value(entry: &Value) -> Result<SubtaskCandidate, String> {
    let Value::Object(fields) = entry else {
        return Err(format!("entry is {}, not an object", type_name(entry)));
    };

    let title = fields
        .get("title")
        .and_then(lenient_string)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| "title is missing".to_string())?;

    let estimated_duration = match field(fields, "estimated_duration", "estimatedDuration") {
        Value::Number(n) => n
            .as_f64()
            .filter(|m| m.is_finite() && *m >= 0.0)
            .map(|m| format_to_duration(saturating_minutes(m)))
            .unwrap_or_default(),
        other => lenient_string(other).unwrap_or_default(),
    };

    Ok(SubtaskCandidate {
        title,
        description: fields
            .get("description")
            .and_then(lenient_string)
            .unwrap_or_default(),
        estimated_duration,
        experience_points: lenient_points(field(fields, "experience_points", "experiencePoints"))
            .unwrap_or(0),
        skill_category: lenient_string(field(fields, "skill_category", "skillCategory"))
            .filter(|s| !s.trim().is_empty()),
    })
}

static NULL: Value = Value::Null;

/// A field by its snake_case name or camelCase alias; null when absent.
fn field<'a>(fields: &'a Map<String, Value>, snake: &str, camel: &str) -> &'a Value {
    fields
        .get(snake)
        .or_else(|| fields.get(camel))
        .unwrap_or(&NULL)
}

/// A string, or a number rendered as one.
fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// An integer from an integer, a finite float or a numeric string.
fn lenient_points(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(round_points)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(round_points),
        _ => None,
    }
}

// `as` saturates for out-of-range floats
#[allow(clippy::cast_possible_truncation)]
fn round_points(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.round() as i64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturating_minutes(minutes: f64) -> u32 {
    minutes.round() as u32
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= ERROR_EXCERPT_LEN {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(ERROR_EXCERPT_LEN).collect();
        format!("{cut}...")
    }
}

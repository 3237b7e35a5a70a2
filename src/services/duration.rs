//! Duration codec.
//!
//! Converts between duration strings and whole minutes. Accepted input is
//! any mix of `<number><unit>` fragments: ISO-8601-like tokens (`PT2H30M`),
//! English free text (`1 hour 30 minutes`, `2hrs 15min`) and Japanese units
//! (`2時間30分`). Output is always the canonical `PT{h}H{m}M` form.

use regex::Regex;
use std::sync::LazyLock;

/// A number followed by a run of letters, e.g. `2H`, `30 minutes`, `1時間`.
static FRAGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(\d+(?:\.\d+)?)\s*(\p{L}+)") {
        Ok(regex) => regex,
        Err(err) => panic!("Duration fragment regex is invalid: {err}"),
    }
});

const MINUTES_PER_HOUR: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Hours,
    Minutes,
}

impl Unit {
    fn classify(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "h" | "hr" | "hrs" | "hour" | "hours" | "時間" => Some(Self::Hours),
            "m" | "min" | "mins" | "minute" | "minutes" | "分" => Some(Self::Minutes),
            _ => None,
        }
    }

    fn to_minutes(self, value: f64) -> u32 {
        let minutes = match self {
            Self::Hours => value * f64::from(MINUTES_PER_HOUR),
            Self::Minutes => value,
        };
        // `as` saturates for out-of-range floats
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = minutes.round() as u32;
        whole
    }
}

/// Parse a duration string into minutes.
///
/// Returns `None` when no hour or minute fragment is present.
pub fn try_parse_duration(input: &str) -> Option<u32> {
    let mut matched = false;
    let mut total: u32 = 0;

    for caps in FRAGMENT_REGEX.captures_iter(input) {
        let Some(unit) = Unit::classify(&caps[2]) else {
            continue;
        };
        let Ok(value) = caps[1].parse::<f64>() else {
            continue;
        };
        matched = true;
        total = total.saturating_add(unit.to_minutes(value));
    }

    matched.then_some(total)
}

/// Parse a duration string into minutes, treating anything unrecognised as 0.
///
/// Durations are optional signals, so this never fails.
pub fn parse_duration(input: &str) -> u32 {
    try_parse_duration(input).unwrap_or(0)
}

/// Parse an optional duration, with absence meaning 0.
pub fn parse_optional_duration(input: Option<&str>) -> u32 {
    input.map_or(0, parse_duration)
}

/// Format minutes as `PT{h}H{m}M`, omitting zero units; zero is `PT0M`.
pub fn format_to_duration(minutes: u32) -> String {
    if minutes == 0 {
        return "PT0M".to_string();
    }

    let hours = minutes / MINUTES_PER_HOUR;
    let rest = minutes % MINUTES_PER_HOUR;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if rest > 0 {
        out.push_str(&format!("{rest}M"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_tokens() {
        assert_eq!(parse_duration("PT2H30M"), 150);
        assert_eq!(parse_duration("PT2H"), 120);
        assert_eq!(parse_duration("PT45M"), 45);
        assert_eq!(parse_duration("pt1h5m"), 65);
    }

    #[test]
    fn test_parse_free_text() {
        assert_eq!(parse_duration("1 hour 30 minutes"), 90);
        assert_eq!(parse_duration("3 hours"), 180);
        assert_eq!(parse_duration("1 minute"), 1);
        assert_eq!(parse_duration("2hrs 15min"), 135);
        assert_eq!(parse_duration("1.5 hours"), 90);
    }

    #[test]
    fn test_parse_japanese_units() {
        assert_eq!(parse_duration("2時間30分"), 150);
        assert_eq!(parse_duration("45分"), 45);
    }

    #[test]
    fn test_parse_sums_repeated_fragments() {
        assert_eq!(parse_duration("1 hour and another 1 hour"), 120);
    }

    #[test]
    fn test_no_match_is_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("soon"), 0);
        assert_eq!(parse_duration("90"), 0);
        assert_eq!(parse_duration("P3D"), 0);
        assert_eq!(try_parse_duration("tomorrow"), None);
        assert_eq!(try_parse_duration("PT0M"), Some(0));
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(parse_duration("99999999999999 hours"), u32::MAX);
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_to_duration(0), "PT0M");
        assert_eq!(format_to_duration(1), "PT1M");
        assert_eq!(format_to_duration(60), "PT1H");
        assert_eq!(format_to_duration(144), "PT2H24M");
        assert_eq!(format_to_duration(600), "PT10H");
    }

    #[test]
    fn test_round_trip_examples() {
        for minutes in [0, 1, 59, 60, 61, 600] {
            assert_eq!(parse_duration(&format_to_duration(minutes)), minutes);
        }
    }
}

//! `taskforge duration`: parse a duration string.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::services::duration::{format_to_duration, try_parse_duration};

/// Arguments for `duration`.
#[derive(Args, Debug)]
pub struct DurationArgs {
    /// Duration text (e.g. PT1H30M, "2 hours", 90分)
    pub text: String,
}

/// Parsed form of a duration string.
#[derive(Debug, Serialize)]
pub struct DurationOutput {
    /// Text as given.
    pub input: String,
    /// Minutes, when the text parsed.
    pub minutes: Option<u32>,
    /// ISO 8601 rendering of `minutes`.
    pub canonical: Option<String>,
}

impl DurationOutput {
    /// Parse `input`, keeping it verbatim.
    pub fn parse(input: &str) -> Self {
        let minutes = try_parse_duration(input);
        Self {
            input: input.to_string(),
            minutes,
            canonical: minutes.map(format_to_duration),
        }
    }
}

impl CommandOutput for DurationOutput {
    fn to_human(&self) -> String {
        match (self.minutes, &self.canonical) {
            (Some(minutes), Some(canonical)) => format!("{minutes} min ({canonical})"),
            _ => format!("Could not parse '{}' (treated as 0 minutes)", self.input),
        }
    }
}

/// Run `duration`.
pub fn execute(args: DurationArgs, json_mode: bool) -> Result<()> {
    output(&DurationOutput::parse(&args.text), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output() {
        let out = DurationOutput::parse("1時間30分");
        assert_eq!(out.minutes, Some(90));
        assert_eq!(out.canonical.as_deref(), Some("PT1H30M"));
        assert_eq!(out.to_human(), "90 min (PT1H30M)");
    }

    #[test]
    fn test_unparsable_output() {
        let out = DurationOutput::parse("eventually");
        assert_eq!(out.minutes, None);
        assert!(out.to_human().contains("Could not parse"));
    }
}

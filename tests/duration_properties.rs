//! Property tests for the duration codec and the scoring formulas.

use proptest::prelude::*;

use taskforge::domain::models::{SubtaskCandidate, TaskInput};
use taskforge::services::decomposition::{buffered_minutes, difficulty_level};
use taskforge::services::duration::{format_to_duration, parse_duration, try_parse_duration};
use taskforge::services::experience::{calculate_experience, complexity_factor, MAX_EXPERIENCE};
use taskforge::services::DecompositionProcessor;

#[test]
fn test_round_trip_fixed_points() {
    for minutes in [0, 1, 59, 60, 61, 600] {
        assert_eq!(parse_duration(&format_to_duration(minutes)), minutes);
    }
}

#[test]
fn test_complexity_factor_monotone() {
    let mut previous = complexity_factor(0);
    for len in 1..2_000 {
        let current = complexity_factor(len);
        assert!(current >= previous, "factor dropped at length {len}");
        previous = current;
    }
}

proptest! {
    #[test]
    fn prop_format_then_parse_is_identity(minutes in 0u32..10_000_000) {
        prop_assert_eq!(parse_duration(&format_to_duration(minutes)), minutes);
    }

    #[test]
    fn prop_canonical_form_is_stable(minutes in 0u32..1_000_000) {
        let canonical = format_to_duration(minutes);
        prop_assert_eq!(format_to_duration(parse_duration(&canonical)), canonical);
    }

    #[test]
    fn prop_free_text_hours_and_minutes(h in 0u32..500, m in 0u32..60) {
        let text = format!("{h} hours {m} minutes");
        prop_assert_eq!(try_parse_duration(&text), Some(h * 60 + m));
        let japanese = format!("{h}時間{m}分");
        prop_assert_eq!(try_parse_duration(&japanese), Some(h * 60 + m));
    }

    #[test]
    fn prop_parse_never_panics(input in "\\PC{0,64}") {
        let _ = parse_duration(&input);
    }

    #[test]
    fn prop_experience_is_bounded(
        title in "\\PC{0,200}",
        description in proptest::option::of("\\PC{0,2000}"),
        hours in proptest::option::of(0u32..1_000),
        category in proptest::option::of("[a-z]{0,12}"),
        skill in proptest::option::of("[a-z]{0,12}"),
    ) {
        let duration = hours.map(|h| format!("PT{h}H"));
        let points = calculate_experience(
            &title,
            description.as_deref(),
            duration.as_deref(),
            category.as_deref(),
            skill.as_deref(),
        );
        prop_assert!(points <= MAX_EXPERIENCE);
    }

    #[test]
    fn prop_difficulty_is_clamped(points in any::<i64>(), has_skill in any::<bool>()) {
        let level = difficulty_level(points, has_skill);
        prop_assert!((1..=5).contains(&level));
    }

    #[test]
    fn prop_buffer_never_shrinks(minutes in any::<u32>()) {
        prop_assert!(buffered_minutes(minutes) >= minutes);
    }

    #[test]
    fn prop_processor_preserves_length_and_order(titles in proptest::collection::vec("[A-Za-z ]{1,20}", 0..12)) {
        let candidates: Vec<SubtaskCandidate> = titles
            .iter()
            .map(|t| SubtaskCandidate::new(t.clone(), "PT1H"))
            .collect();

        let output = DecompositionProcessor::default().process(&TaskInput::new("p", ""), &candidates);

        prop_assert_eq!(output.len(), candidates.len());
        for (task, title) in output.iter().zip(&titles) {
            prop_assert_eq!(&task.title, title);
        }
        let edges: usize = output.iter().map(|t| t.dependencies.len()).sum();
        prop_assert_eq!(edges, candidates.len().saturating_sub(1));
    }
}

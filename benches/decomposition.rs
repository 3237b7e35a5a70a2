use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use taskforge::domain::models::{SubtaskCandidate, TaskInput};
use taskforge::services::json_extractor::parse_oracle_proposal;
use taskforge::services::{parse_duration, DecompositionProcessor};

const SKILLS: [&str; 6] = ["frontend", "backend", "design", "devops", "testing", "documentation"];

fn candidates(n: usize) -> Vec<SubtaskCandidate> {
    (0..n)
        .map(|i| {
            SubtaskCandidate::new(format!("Step {i}"), format!("PT{}H{}M", i % 5, (i * 7) % 60))
                .with_experience_points(i64::try_from(i * 13 % 120).unwrap_or(0))
                .with_skill_category(SKILLS[i % SKILLS.len()])
        })
        .collect()
}

fn bench_process(c: &mut Criterion) {
    let processor = DecompositionProcessor::default();
    let parent = TaskInput::new("Parent", "").with_category("feature");
    let mut group = c.benchmark_group("process");

    for n in [5, 50, 500] {
        let input = candidates(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| processor.process(black_box(&parent), black_box(input)));
        });
    }
    group.finish();
}

fn bench_parse_duration(c: &mut Criterion) {
    c.bench_function("parse_duration", |b| {
        b.iter(|| {
            parse_duration(black_box("PT12H30M"))
                + parse_duration(black_box("2 hours 15 minutes"))
                + parse_duration(black_box("3時間45分"))
        });
    });
}

fn bench_extract(c: &mut Criterion) {
    let body = serde_json::json!({
        "breakdowns": candidates(20),
        "category": "feature",
    })
    .to_string();
    let response = format!("Here you go:\n```json\n{body}\n```\nAnything else?");

    c.bench_function("parse_oracle_proposal", |b| {
        b.iter(|| parse_oracle_proposal(black_box(&response)));
    });
}

criterion_group!(benches, bench_process, bench_parse_duration, bench_extract);
criterion_main!(benches);

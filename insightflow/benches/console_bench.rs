//! Benchmarks for command parsing, summaries and export rendering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use insightflow::commands::Command;
use insightflow::core::Priority;
use insightflow::meetings::{heuristic_summary, render_export};
use insightflow::testing::{sample_meeting, SAMPLE_TRANSCRIPT};

fn parse_benchmark(c: &mut Criterion) {
    let inputs = ["help", "  STATUS ", "run deploy --env prod", "frobnicate"];
    c.bench_function("command_parse", |b| {
        b.iter(|| {
            for input in inputs {
                black_box(Command::parse(black_box(input)));
            }
        });
    });
}

fn summary_benchmark(c: &mut Criterion) {
    let transcript = SAMPLE_TRANSCRIPT.repeat(50);
    c.bench_function("heuristic_summary", |b| {
        b.iter(|| black_box(heuristic_summary(black_box(&transcript))));
    });
}

fn export_benchmark(c: &mut Criterion) {
    let meeting = sample_meeting(
        "Quarterly Planning",
        &[
            ("Ship the beta", Priority::High),
            ("Update the roadmap", Priority::Medium),
            ("Book the offsite", Priority::Low),
        ],
    );
    c.bench_function("render_export", |b| {
        b.iter(|| black_box(render_export(black_box(&meeting))));
    });
}

criterion_group!(benches, parse_benchmark, summary_benchmark, export_benchmark);
criterion_main!(benches);

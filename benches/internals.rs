use chrono::{DateTime, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use rdmabench::config::{BenchConfig, default_sizes};
use rdmabench::display;
use rdmabench::parse;
use rdmabench::sweep::run_sweep;
use rdmabench::trial::TrialRunner;
use rdmabench::types::{Action, ActionReport, SizeAverage};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Server output with `noise` lines of connection chatter before the timing.
fn make_output(noise: usize) -> String {
    let mut out = String::new();
    for i in 0..noise {
        out.push_str(&format!("HandleConnectRequest {}\n", i));
    }
    out.push_str("elapsed: 0.000123\n");
    out.push_str("HandleDisconnect\n");
    out
}

/// Answers every trial from the same canned output without spawning anything.
struct CannedRunner {
    output: String,
}

impl TrialRunner for CannedRunner {
    fn run_trial(&mut self, _action: Action, _size: u32) -> anyhow::Result<f64> {
        parse::extract_elapsed(&self.output, parse::DEFAULT_MARKER)
    }
}

// ---------------------------------------------------------------------------
// Benchmarks: parse
// ---------------------------------------------------------------------------

fn bench_extract_elapsed(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_elapsed");
    for &noise in &[0, 10, 100, 1000] {
        let output = make_output(noise);
        group.bench_with_input(BenchmarkId::from_parameter(noise), &output, |b, s| {
            b.iter(|| parse::extract_elapsed(s, parse::DEFAULT_MARKER).unwrap());
        });
    }
    group.finish();
}

fn bench_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("mean");
    for &len in &[3, 10, 1000] {
        let samples: Vec<f64> = (0..len).map(|i| i as f64 * 0.5).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &samples, |b, s| {
            b.iter(|| parse::mean(s).unwrap());
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmarks: sweep and display
// ---------------------------------------------------------------------------

fn bench_sweep(c: &mut Criterion) {
    let config = BenchConfig {
        repetitions: 10,
        ..BenchConfig::default()
    };
    let mut runner = CannedRunner {
        output: make_output(10),
    };

    c.bench_function("sweep_default_sizes", |b| {
        b.iter(|| {
            let mut sink: Vec<u8> = Vec::new();
            run_sweep(Action::WriteRdma, &config, &mut runner, Some(&mut sink)).unwrap()
        });
    });
}

fn bench_display(c: &mut Criterion) {
    let recorded_at: DateTime<Utc> = DateTime::parse_from_rfc3339("2026-02-18T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);

    let report = ActionReport {
        action: Action::WriteRdma,
        recorded_at,
        repetitions: 10,
        results: default_sizes()
            .into_iter()
            .map(|size| SizeAverage {
                size,
                samples: vec![size as f64 * 1e-6; 10],
                mean: size as f64 * 1e-6,
            })
            .collect(),
    };
    let reports = vec![report];

    let mut group = c.benchmark_group("display");
    group.bench_function("format_average", |b| {
        b.iter(|| display::format_average(0.000123));
    });
    group.bench_function("format_json_16", |b| {
        b.iter(|| display::format_json(&reports));
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion groups
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_extract_elapsed,
    bench_mean,
    bench_sweep,
    bench_display,
);
criterion_main!(benches);

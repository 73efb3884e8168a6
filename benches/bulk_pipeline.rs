// In benches/bulk_pipeline.rs

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use curvecache::{
    CurveCacheConfig, CurveSession, InterpolationKind, InterpolationRequest, SamplePoint,
    SamplingPlan,
};

// --- Mock Data Generation ---

/// The canonical five-point parabola sample set.
fn parabola_points() -> Vec<SamplePoint> {
    (0..5)
        .map(|i| {
            let x = i as f64 * 10.0;
            SamplePoint::new(x, x * x)
        })
        .collect()
}

fn session_with_threshold(flush_threshold: usize) -> CurveSession {
    let config = CurveCacheConfig {
        flush_threshold,
        ..Default::default()
    };
    let mut session = CurveSession::open(Arc::new(config)).unwrap();
    session.load_points("default", &parabola_points()).unwrap();
    session
}

// --- Benchmark Suite ---

/// How much per-batch commit overhead costs at different thresholds over the
/// same 4001-sample domain.
fn bench_bulk_thresholds(c: &mut Criterion) {
    let plan = SamplingPlan::new(0.0, 40.0, 0.01);

    let mut group = c.benchmark_group("Bulk Pipeline Thresholds");
    for threshold in [1usize, 100, 1000, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(threshold),
            &threshold,
            |b, &threshold| {
                b.iter(|| {
                    // Session setup is part of each iteration: every run gets
                    // a fresh in-memory store so row counts do not accumulate.
                    let mut session = session_with_threshold(threshold);
                    let report = session
                        .bulk_sample(black_box(&plan), "default", InterpolationKind::Linear)
                        .unwrap();
                    black_box(report)
                })
            },
        );
    }
    group.finish();
}

/// Interactive round trips: one routine call plus one audit append each.
fn bench_interactive_requests(c: &mut Criterion) {
    let mut session = session_with_threshold(1000);
    let mut rng = rand::rng();
    let targets: Vec<f64> = (0..256).map(|_| rng.random_range(0.0..40.0)).collect();

    let mut group = c.benchmark_group("Interactive Gateway");
    for kind in [InterpolationKind::Linear, InterpolationKind::Spline] {
        group.bench_function(format!("{kind}"), |b| {
            let mut i = 0usize;
            b.iter(|| {
                let request =
                    InterpolationRequest::new("default", kind, targets[i % targets.len()]);
                i += 1;
                black_box(session.evaluate(black_box(&request)).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bulk_thresholds, bench_interactive_requests);
criterion_main!(benches);

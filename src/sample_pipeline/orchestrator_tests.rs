use crate::config::OutOfRangePolicy;
use crate::error::CurveCacheError;
use crate::routines;
use crate::sample_pipeline::orchestrator::run_bulk_pipeline;
use crate::sample_pipeline::SamplingPlan;
use crate::storage::SampleSink;
use crate::types::{InterpolationKind, SamplePoint};

// Test Helpers

/// Records every committed batch; can refuse commits from batch k onward.
#[derive(Default)]
struct RecordingSink {
    batches: Vec<Vec<SamplePoint>>,
    fail_from_batch: Option<usize>,
}

impl SampleSink for RecordingSink {
    fn commit_batch(
        &mut self,
        _dataset_id: &str,
        _kind: InterpolationKind,
        batch: &[SamplePoint],
    ) -> Result<(), CurveCacheError> {
        if let Some(k) = self.fail_from_batch {
            if self.batches.len() >= k {
                return Err(CurveCacheError::Commit("injected failure".to_string()));
            }
        }
        self.batches.push(batch.to_vec());
        Ok(())
    }
}

const XS: [f64; 5] = [0.0, 10.0, 20.0, 30.0, 40.0];
const YS: [f64; 5] = [0.0, 100.0, 400.0, 900.0, 1600.0];

/// A client-side linear curve over the five canonical points, refusing
/// anything outside the fitted range.
fn bounded_linear_curve(x: f64) -> Result<f64, CurveCacheError> {
    let eval = routines::evaluate(InterpolationKind::Linear, &XS, &YS, x, 1)?;
    if eval.extrapolated {
        return Err(CurveCacheError::Domain {
            x,
            min: XS[0],
            max: XS[4],
        });
    }
    Ok(eval.y)
}

//==============================================================================
// Full Bulk Runs
//==============================================================================

#[test]
fn test_canonical_run_commits_every_sample_with_a_remainder_batch() {
    let plan = SamplingPlan::new(0.0, 40.0, 0.01);
    let mut sink = RecordingSink::default();

    let report = run_bulk_pipeline(
        &plan,
        bounded_linear_curve,
        &mut sink,
        "default",
        InterpolationKind::Linear,
        1000,
        OutOfRangePolicy::Abort,
    )
    .unwrap();

    // 4001 samples at threshold 1000: four full batches plus the remainder.
    assert_eq!(report.samples_generated, 4001);
    assert_eq!(report.rows_committed, 4001);
    assert_eq!(report.batches_committed, 5);
    assert_eq!(report.samples_skipped, 0);
    assert_eq!(
        sink.batches.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![1000, 1000, 1000, 1000, 1]
    );

    // The knot at x=10 must have been sampled exactly.
    let all: Vec<SamplePoint> = sink.batches.concat();
    let at_knot = all.iter().find(|p| p.x == 10.0).unwrap();
    assert_eq!(at_knot.y, 100.0);
}

#[test]
fn test_final_row_count_is_independent_of_the_threshold() {
    let plan = SamplingPlan::new(0.0, 40.0, 0.01);

    let mut counts = Vec::new();
    for threshold in [1usize, 7, 1000, 100_000] {
        let mut sink = RecordingSink::default();
        let report = run_bulk_pipeline(
            &plan,
            bounded_linear_curve,
            &mut sink,
            "default",
            InterpolationKind::Linear,
            threshold,
            OutOfRangePolicy::Abort,
        )
        .unwrap();
        let all: Vec<SamplePoint> = sink.batches.concat();
        assert_eq!(all.len(), report.rows_committed);
        counts.push(all.len());

        // No duplicates: x values are strictly increasing across batches.
        assert!(all.windows(2).all(|w| w[0].x < w[1].x));
    }
    assert!(counts.iter().all(|&c| c == 4001));
}

#[test]
fn test_commit_failure_aborts_but_keeps_earlier_batches() {
    let plan = SamplingPlan::new(0.0, 40.0, 0.01);
    let mut sink = RecordingSink {
        fail_from_batch: Some(2),
        ..Default::default()
    };

    let result = run_bulk_pipeline(
        &plan,
        bounded_linear_curve,
        &mut sink,
        "default",
        InterpolationKind::Linear,
        1000,
        OutOfRangePolicy::Abort,
    );

    assert!(matches!(result, Err(CurveCacheError::Commit(_))));
    // The first two batches were durably committed before the failure.
    assert_eq!(sink.batches.len(), 2);
    assert!(sink.batches.iter().all(|b| b.len() == 1000));
}

#[test]
fn test_invalid_plan_never_reaches_the_sink() {
    let mut sink = RecordingSink::default();
    let result = run_bulk_pipeline(
        &SamplingPlan::new(0.0, 40.0, -1.0),
        bounded_linear_curve,
        &mut sink,
        "default",
        InterpolationKind::Linear,
        1000,
        OutOfRangePolicy::Abort,
    );
    assert!(matches!(result, Err(CurveCacheError::Config(_))));
    assert!(sink.batches.is_empty());
}

//==============================================================================
// Out-Of-Range Policies
//==============================================================================

/// A plan that deliberately oversteps the fitted range: [0, 50] over points
/// fitted on [0, 40] produces 100 out-of-range samples at step 0.1.
fn overstepping_plan() -> SamplingPlan {
    SamplingPlan::new(0.0, 50.0, 0.1)
}

#[test]
fn test_abort_policy_propagates_the_domain_error() {
    let mut sink = RecordingSink::default();
    let result = run_bulk_pipeline(
        &overstepping_plan(),
        bounded_linear_curve,
        &mut sink,
        "default",
        InterpolationKind::Linear,
        1000,
        OutOfRangePolicy::Abort,
    );
    assert!(matches!(result, Err(CurveCacheError::Domain { .. })));
}

#[test]
fn test_skip_policy_drops_only_the_refused_samples() {
    let mut sink = RecordingSink::default();
    let report = run_bulk_pipeline(
        &overstepping_plan(),
        bounded_linear_curve,
        &mut sink,
        "default",
        InterpolationKind::Linear,
        1000,
        OutOfRangePolicy::Skip,
    )
    .unwrap();

    // 501 samples in [0, 50]; 401 lie within [0, 40].
    assert_eq!(report.samples_generated, 401);
    assert_eq!(report.samples_skipped, 100);
    assert_eq!(report.rows_committed, 401);
}

#[test]
fn test_clamp_policy_pins_refused_samples_to_the_range_end() {
    let mut sink = RecordingSink::default();
    let report = run_bulk_pipeline(
        &overstepping_plan(),
        bounded_linear_curve,
        &mut sink,
        "default",
        InterpolationKind::Linear,
        1000,
        OutOfRangePolicy::Clamp,
    )
    .unwrap();

    assert_eq!(report.samples_generated, 501);
    assert_eq!(report.samples_skipped, 0);
    assert_eq!(report.rows_committed, 501);

    // Every clamped sample evaluates the curve at the range end.
    let all: Vec<SamplePoint> = sink.batches.concat();
    let clamped: Vec<&SamplePoint> = all.iter().filter(|p| p.x == 40.0).collect();
    assert_eq!(clamped.len(), 101, "100 clamped plus the genuine x=40 sample");
    assert!(clamped.iter().all(|p| p.y == 1600.0));
}

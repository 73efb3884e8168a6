//! The lazy, finite, restartable sample generator at the head of the bulk
//! pipeline.
//!
//! X values are produced by index multiplication (`start + i * step`), not by
//! accumulation, so the sequence is identical on every restart and free of
//! drift over long domains. The sequence runs from the domain start up to and
//! including the first value at or beyond the domain end within floating-point
//! tolerance.

use crate::error::CurveCacheError;
use crate::sample_pipeline::SamplingPlan;
use crate::types::SamplePoint;

/// Relative tolerance for deciding whether the step divides the domain
/// evenly; absorbs the representation error of decimal steps.
const STEP_TOLERANCE: f64 = 1e-9;

/// Produces `(x, curve(x))` pairs over a validated [`SamplingPlan`].
///
/// The generator is side-effect-free and never drops a point: when the curve
/// is undefined at some x, that element surfaces as an `Err` and the consumer
/// decides what to do with it.
pub struct SampleGenerator<F> {
    start: f64,
    step: f64,
    curve: F,
    index: usize,
    last_index: usize,
}

impl<F> SampleGenerator<F>
where
    F: Fn(f64) -> Result<f64, CurveCacheError>,
{
    /// The plan must already be validated; see [`SamplingPlan::validate`].
    pub fn new(plan: &SamplingPlan, curve: F) -> Self {
        Self {
            start: plan.domain_start,
            step: plan.step,
            curve,
            index: 0,
            last_index: step_count(plan),
        }
    }

    /// Restarts the sequence from the domain start.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Total samples the full sequence yields.
    pub fn expected_samples(&self) -> usize {
        self.last_index + 1
    }
}

impl<F> Iterator for SampleGenerator<F>
where
    F: Fn(f64) -> Result<f64, CurveCacheError>,
{
    type Item = Result<SamplePoint, CurveCacheError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index > self.last_index {
            return None;
        }
        let x = self.start + self.index as f64 * self.step;
        self.index += 1;
        Some((self.curve)(x).map(|y| SamplePoint { x, y }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.last_index + 1 - self.index.min(self.last_index + 1);
        (remaining, Some(remaining))
    }
}

/// Number of steps (one less than the sample count). An evenly dividing step
/// lands exactly on the domain end; otherwise one more step overshoots it, as
/// the sequence must include the first value at or beyond the end.
fn step_count(plan: &SamplingPlan) -> usize {
    if plan.domain_end == plan.domain_start {
        return 0;
    }
    let span_steps = (plan.domain_end - plan.domain_start) / plan.step;
    let rounded = span_steps.round();
    if (span_steps - rounded).abs() <= STEP_TOLERANCE * rounded.max(1.0) {
        rounded as usize
    } else {
        span_steps.ceil() as usize
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

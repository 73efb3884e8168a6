// In: src/sample_pipeline/orchestrator.rs

//! The coordinator of one bulk run.
//!
//! This function is a pure coordinator: the generator produces, the writer
//! batches and commits, and the only decision made here is what to do with a
//! sample the curve refused, which is exactly the decision the generator
//! contract pushes up to its consumer.

use std::time::Instant;

use crate::config::OutOfRangePolicy;
use crate::error::CurveCacheError;
use crate::sample_pipeline::generator::SampleGenerator;
use crate::sample_pipeline::writer::BatchWriter;
use crate::sample_pipeline::{BulkRunReport, SamplingPlan};
use crate::storage::SampleSink;
use crate::types::{InterpolationKind, SamplePoint};

/// Samples `curve` over `plan` and commits the pairs in batches of
/// `flush_threshold` under `dataset_id`/`kind`.
///
/// A commit failure aborts the run with the batch intact inside the writer;
/// everything committed before it survives. A curve refusal is handled per
/// `policy`: `Abort` propagates it, `Skip` drops that sample, `Clamp`
/// re-evaluates at the nearest end of the fitted range.
pub fn run_bulk_pipeline<F, S>(
    plan: &SamplingPlan,
    curve: F,
    sink: &mut S,
    dataset_id: &str,
    kind: InterpolationKind,
    flush_threshold: usize,
    policy: OutOfRangePolicy,
) -> Result<BulkRunReport, CurveCacheError>
where
    F: Fn(f64) -> Result<f64, CurveCacheError>,
    S: SampleSink + ?Sized,
{
    // 1. Validate the plan before producing anything.
    plan.validate()?;
    let started = Instant::now();

    // 2. Wire the generator into the batching writer.
    let mut writer = BatchWriter::new(sink, dataset_id, kind, flush_threshold)?;
    let generator = SampleGenerator::new(plan, &curve);
    let expected = generator.expected_samples();

    let mut samples_generated = 0usize;
    let mut samples_skipped = 0usize;

    // 3. Drain the sequence, applying the out-of-range policy per element.
    for item in generator {
        match item {
            Ok(pair) => {
                samples_generated += 1;
                writer.ingest(pair)?;
            }
            Err(CurveCacheError::Domain { x, min, max }) => match policy {
                OutOfRangePolicy::Abort => {
                    return Err(CurveCacheError::Domain { x, min, max });
                }
                OutOfRangePolicy::Skip => {
                    samples_skipped += 1;
                    log::debug!("skipped x={x}: outside fitted range [{min}, {max}]");
                }
                OutOfRangePolicy::Clamp => {
                    let clamped = x.clamp(min, max);
                    let y = curve(clamped)?;
                    samples_generated += 1;
                    writer.ingest(SamplePoint::new(clamped, y))?;
                }
            },
            Err(other) => return Err(other),
        }
    }

    // 4. Flush the remainder with the same commit discipline.
    let stats = writer.finalize()?;

    let report = BulkRunReport {
        samples_generated,
        samples_skipped,
        rows_committed: stats.rows_committed,
        batches_committed: stats.batches_committed,
        elapsed: started.elapsed(),
    };
    log::info!(
        "bulk run over dataset '{}' ({kind}): {}/{} samples in {} batches, {} skipped, {:?}",
        dataset_id,
        report.rows_committed,
        expected,
        report.batches_committed,
        report.samples_skipped,
        report.elapsed
    );
    Ok(report)
}

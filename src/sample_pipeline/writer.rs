//! The batching writer at the tail of the bulk pipeline.
//!
//! Produced pairs accumulate in a buffer owned exclusively by the writer;
//! at the flush threshold the whole buffer goes to the sink as one
//! all-or-nothing committed batch. The buffer is cleared only after the
//! commit returns, so a failed commit leaves the exact batch in place for the
//! caller to retry. The writer itself never retries.

use crate::error::CurveCacheError;
use crate::storage::SampleSink;
use crate::types::{InterpolationKind, SamplePoint};

/// Counters from a writer's lifetime, merged batch by batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
    pub rows_committed: usize,
    pub batches_committed: usize,
}

pub struct BatchWriter<'a, S: SampleSink + ?Sized> {
    sink: &'a mut S,
    dataset_id: String,
    kind: InterpolationKind,
    flush_threshold: usize,
    buffer: Vec<SamplePoint>,
    stats: WriteStats,
}

impl<'a, S: SampleSink + ?Sized> BatchWriter<'a, S> {
    pub fn new(
        sink: &'a mut S,
        dataset_id: &str,
        kind: InterpolationKind,
        flush_threshold: usize,
    ) -> Result<Self, CurveCacheError> {
        if flush_threshold == 0 {
            return Err(CurveCacheError::Config(
                "flush_threshold must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            sink,
            dataset_id: dataset_id.to_string(),
            kind,
            flush_threshold,
            buffer: Vec::with_capacity(flush_threshold),
            stats: WriteStats::default(),
        })
    }

    /// Buffers one pair, flushing when the buffer reaches the threshold.
    /// The buffer never exceeds the threshold at the moment a flush fires.
    pub fn ingest(&mut self, pair: SamplePoint) -> Result<(), CurveCacheError> {
        self.buffer.push(pair);
        if self.buffer.len() >= self.flush_threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Commits the buffered pairs as one batch. A no-op on an empty buffer.
    pub fn flush(&mut self) -> Result<(), CurveCacheError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.sink
            .commit_batch(&self.dataset_id, self.kind, &self.buffer)?;

        // Commit succeeded; clear buffer and merge stats.
        self.stats.rows_committed += self.buffer.len();
        self.stats.batches_committed += 1;
        log::debug!(
            "committed batch {} ({} rows) for dataset '{}'",
            self.stats.batches_committed,
            self.buffer.len(),
            self.dataset_id
        );
        self.buffer.clear();
        Ok(())
    }

    /// Flushes any remaining pairs with the same commit discipline and
    /// returns the lifetime counters.
    pub fn finalize(&mut self) -> Result<WriteStats, CurveCacheError> {
        self.flush()?;
        Ok(self.stats)
    }

    /// Pairs currently awaiting commit. After a failed flush this still holds
    /// the whole batch.
    pub fn buffered(&self) -> &[SamplePoint] {
        &self.buffer
    }

    pub fn stats(&self) -> WriteStats {
        self.stats
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

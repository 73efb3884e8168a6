// In: src/storage/mod.rs

//! The persistence layer: trait seams for everything the pipelines need from
//! the relational store, plus the SQLite implementation behind them.
//!
//! The seams exist so the batching and gateway logic can be exercised against
//! in-memory doubles; the pipelines never name `rusqlite` directly. One
//! backend value implements all four traits and owns the single connection
//! for the lifetime of a session.

use crate::bridge::format::ProcedureRow;
use crate::error::CurveCacheError;
use crate::types::{InterpolationKind, InterpolationRequest, ResultLogEntry, SamplePoint};

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteBackend;

/// **CONTRACT:** One all-or-nothing bulk write of a batch of produced pairs,
/// durably committed before the call returns. On `Err` nothing from the batch
/// is persisted, so the caller may retry the identical batch.
pub trait SampleSink {
    fn commit_batch(
        &mut self,
        dataset_id: &str,
        kind: InterpolationKind,
        batch: &[SamplePoint],
    ) -> Result<(), CurveCacheError>;
}

/// **CONTRACT:** The canonical set of input points per named dataset.
/// `replace_points` is atomic: readers observe the old set complete or the
/// new set complete, never a mix, and on error the prior set stays intact.
pub trait PointStore {
    fn replace_points(
        &mut self,
        dataset_id: &str,
        points: &[SamplePoint],
    ) -> Result<(), CurveCacheError>;

    /// Current points in stored order; empty (not an error) for an unknown id.
    fn get_points(&self, dataset_id: &str) -> Result<Vec<SamplePoint>, CurveCacheError>;
}

/// **CONTRACT:** Append-only audit trail of every routine call. `append` is
/// the only mutator; `query` returns entries in insertion order.
pub trait ResultLog {
    fn append(&mut self, entry: &ResultLogEntry) -> Result<(), CurveCacheError>;

    fn query(
        &self,
        dataset_id: &str,
        kind: InterpolationKind,
    ) -> Result<Vec<ResultLogEntry>, CurveCacheError>;
}

/// **CONTRACT:** The server-side computation boundary. One logical request in,
/// at most one structured row out. `Ok(None)` means the routine ran but
/// yielded no row; `Err` is reserved for infrastructure failures (the routine
/// itself reports computation problems inside the row's code and message).
pub trait InterpolationRoutine {
    fn call_interpolation(
        &mut self,
        request: &InterpolationRequest,
    ) -> Result<Option<ProcedureRow>, CurveCacheError>;
}

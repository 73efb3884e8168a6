// In: src/storage/sqlite.rs

//! The SQLite implementation of every storage seam.
//!
//! One `SqliteBackend` owns one connection for the lifetime of a session and
//! implements all four traits from [`crate::storage`]. Bulk writes and point
//! replacement each run inside a single transaction: the commit is the
//! durability point, and nothing is observable before it.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::bridge::format::{self, ProcedureRow};
use crate::config::StorageLocation;
use crate::error::CurveCacheError;
use crate::routines;
use crate::storage::schema;
use crate::storage::{InterpolationRoutine, PointStore, ResultLog, SampleSink};
use crate::types::{
    InterpolationKind, InterpolationOutcome, InterpolationRequest, ResultLogEntry, SamplePoint,
};

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens the configured database and ensures the schema exists. A failure
    /// to open is a `Connection` error (retryable from the caller's side);
    /// everything after the handle exists reports through the usual taxonomy.
    pub fn open(location: &StorageLocation) -> Result<Self, CurveCacheError> {
        let conn = match location {
            StorageLocation::InMemory => Connection::open_in_memory(),
            StorageLocation::File { path } => Connection::open(path),
        }
        .map_err(|e| CurveCacheError::Connection(e.to_string()))?;

        schema::create_tables_if_not_exist(&conn)?;
        Ok(Self { conn })
    }

    /// The dataset's point columns in stored order, split for the routine
    /// kernels.
    fn point_columns(&self, dataset_id: &str) -> Result<(Vec<f64>, Vec<f64>), CurveCacheError> {
        let points = self.get_points(dataset_id)?;
        let mut xs = Vec::with_capacity(points.len());
        let mut ys = Vec::with_capacity(points.len());
        for p in &points {
            xs.push(p.x);
            ys.push(p.y);
        }
        Ok((xs, ys))
    }
}

//==================================================================================
// SampleSink: batched bulk inserts
//==================================================================================

impl SampleSink for SqliteBackend {
    fn commit_batch(
        &mut self,
        dataset_id: &str,
        kind: InterpolationKind,
        batch: &[SamplePoint],
    ) -> Result<(), CurveCacheError> {
        let commit_err = |e: rusqlite::Error| CurveCacheError::Commit(e.to_string());

        let tx = self.conn.transaction().map_err(commit_err)?;
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT INTO interpolation_results
                     (dataset_id, interpolation_type, x_target, y_result,
                      error_code, error_message, created_at)
                     VALUES (?1, ?2, ?3, ?4, 0, '', ?5)",
                )
                .map_err(commit_err)?;

            let created_at = Utc::now().to_rfc3339();
            for pair in batch {
                stmt.execute(params![
                    dataset_id,
                    kind.as_str(),
                    pair.x,
                    pair.y,
                    created_at,
                ])
                .map_err(commit_err)?;
            }
        }
        tx.commit()
            .map_err(|e| CurveCacheError::Commit(format!("commit: {e}")))?;
        Ok(())
    }
}

//==================================================================================
// PointStore: atomic replace of a dataset's input points
//==================================================================================

impl PointStore for SqliteBackend {
    fn replace_points(
        &mut self,
        dataset_id: &str,
        points: &[SamplePoint],
    ) -> Result<(), CurveCacheError> {
        // Delete-then-insert inside one transaction. Until the commit lands,
        // readers still see the previous set; on error the rollback restores it.
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM points_table WHERE dataset_id = ?1",
            params![dataset_id],
        )?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO points_table (x, y, dataset_id) VALUES (?1, ?2, ?3)",
            )?;
            for p in points {
                stmt.execute(params![p.x, p.y, dataset_id])?;
            }
        }
        tx.commit()?;
        log::debug!(
            "replaced points for dataset '{}' ({} rows)",
            dataset_id,
            points.len()
        );
        Ok(())
    }

    fn get_points(&self, dataset_id: &str) -> Result<Vec<SamplePoint>, CurveCacheError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT x, y FROM points_table WHERE dataset_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![dataset_id], |row| {
            Ok(SamplePoint {
                x: row.get(0)?,
                y: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

//==================================================================================
// ResultLog: append-only audit trail
//==================================================================================

impl ResultLog for SqliteBackend {
    fn append(&mut self, entry: &ResultLogEntry) -> Result<(), CurveCacheError> {
        self.conn.execute(
            "INSERT INTO interpolation_results
             (dataset_id, interpolation_type, x_target, y_result,
              error_code, error_message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.dataset_id,
                entry.kind.as_str(),
                entry.target_x,
                entry.outcome.y_result,
                entry.outcome.error_code,
                entry.outcome.error_message,
                entry.timestamp.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn query(
        &self,
        dataset_id: &str,
        kind: InterpolationKind,
    ) -> Result<Vec<ResultLogEntry>, CurveCacheError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT dataset_id, interpolation_type, x_target, y_result,
                    error_code, error_message, created_at
             FROM interpolation_results
             WHERE dataset_id = ?1 AND interpolation_type = ?2
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![dataset_id, kind.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, i32>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (dataset_id, kind_name, target_x, y_result, error_code, error_message, created_at) =
                row?;
            entries.push(ResultLogEntry {
                dataset_id,
                kind: InterpolationKind::from_name(&kind_name)?,
                target_x,
                outcome: InterpolationOutcome {
                    y_result,
                    error_code,
                    error_message,
                },
                timestamp: parse_timestamp(&created_at)?,
            });
        }
        Ok(entries)
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, CurveCacheError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CurveCacheError::Internal(format!("unreadable timestamp '{text}': {e}")))
}

//==================================================================================
// InterpolationRoutine: the server-side computation boundary
//==================================================================================

impl InterpolationRoutine for SqliteBackend {
    /// Resolves the dataset's point columns and runs the requested kernel.
    /// Computation problems travel back inside the row's code and message;
    /// `Err` here means the store itself failed.
    fn call_interpolation(
        &mut self,
        request: &InterpolationRequest,
    ) -> Result<Option<ProcedureRow>, CurveCacheError> {
        let (xs, ys) = self.point_columns(&request.dataset_id)?;

        let row = match routines::evaluate(
            request.kind,
            &xs,
            &ys,
            request.target_x,
            request.polynomial_degree,
        ) {
            Ok(eval) if eval.extrapolated => {
                ProcedureRow::warning(eval.y, format::CODE_EXTRAPOLATED, "extrapolated")
            }
            Ok(eval) => ProcedureRow::success(eval.y),
            Err(err) => ProcedureRow::failure(format::code_for_routine_error(&err), err.to_string()),
        };
        Ok(Some(row))
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn open_backend() -> SqliteBackend {
        SqliteBackend::open(&StorageLocation::InMemory).unwrap()
    }

    fn parabola_points() -> Vec<SamplePoint> {
        vec![
            SamplePoint::new(0.0, 0.0),
            SamplePoint::new(10.0, 100.0),
            SamplePoint::new(20.0, 400.0),
            SamplePoint::new(30.0, 900.0),
            SamplePoint::new(40.0, 1600.0),
        ]
    }

    #[test]
    fn test_open_is_idempotent_over_the_schema() {
        // Two backends over the same (in-memory) lifecycle both ensure the
        // schema; opening must never fail because the tables already exist.
        let _a = open_backend();
        let _b = open_backend();
    }

    #[test]
    fn test_get_points_for_unknown_dataset_is_empty_not_an_error() {
        let backend = open_backend();
        let points = backend.get_points("nobody-loaded-this").unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_replace_points_swaps_the_full_set() {
        let mut backend = open_backend();
        backend.replace_points("ds", &parabola_points()).unwrap();
        assert_eq!(backend.get_points("ds").unwrap().len(), 5);

        let replacement = vec![SamplePoint::new(1.0, 2.0), SamplePoint::new(3.0, 4.0)];
        backend.replace_points("ds", &replacement).unwrap();

        let points = backend.get_points("ds").unwrap();
        assert_eq!(points, replacement, "no old points may survive a replace");
    }

    #[test]
    fn test_replace_points_is_scoped_to_its_dataset() {
        let mut backend = open_backend();
        backend.replace_points("a", &parabola_points()).unwrap();
        backend
            .replace_points("b", &[SamplePoint::new(5.0, 5.0)])
            .unwrap();

        backend.replace_points("a", &[]).unwrap();
        assert!(backend.get_points("a").unwrap().is_empty());
        assert_eq!(backend.get_points("b").unwrap().len(), 1);
    }

    #[test]
    fn test_commit_batch_persists_every_pair() {
        let mut backend = open_backend();
        let batch: Vec<SamplePoint> = (0..250)
            .map(|i| SamplePoint::new(i as f64, (i * i) as f64))
            .collect();
        backend
            .commit_batch("ds", InterpolationKind::Linear, &batch)
            .unwrap();

        let entries = backend.query("ds", InterpolationKind::Linear).unwrap();
        assert_eq!(entries.len(), 250);
        assert!(entries.iter().all(|e| e.outcome.is_success()));
        assert_eq!(entries[3].target_x, 3.0);
        assert_eq!(entries[3].outcome.y_result, Some(9.0));
    }

    #[test]
    fn test_result_log_keeps_insertion_order_and_kind_scoping() {
        let mut backend = open_backend();
        for i in 0..5 {
            let request =
                InterpolationRequest::new("ds", InterpolationKind::Spline, i as f64);
            let entry =
                ResultLogEntry::record(&request, &InterpolationOutcome::success(i as f64 * 2.0));
            backend.append(&entry).unwrap();
        }
        // A different kind under the same dataset must not leak in.
        let other = InterpolationRequest::new("ds", InterpolationKind::Linear, 9.0);
        backend
            .append(&ResultLogEntry::record(
                &other,
                &InterpolationOutcome::success(1.0),
            ))
            .unwrap();

        let entries = backend.query("ds", InterpolationKind::Spline).unwrap();
        assert_eq!(entries.len(), 5);
        let targets: Vec<f64> = entries.iter().map(|e| e.target_x).collect();
        assert_eq!(targets, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_routine_call_interpolates_inside_the_range() {
        let mut backend = open_backend();
        backend.replace_points("ds", &parabola_points()).unwrap();

        let request = InterpolationRequest::new("ds", InterpolationKind::Linear, 10.0);
        let row = backend.call_interpolation(&request).unwrap().unwrap();
        assert_eq!(row.error_code, format::CODE_OK);
        assert_eq!(row.y_result, Some(100.0));
    }

    #[test]
    fn test_routine_call_flags_extrapolation_as_a_warning_row() {
        let mut backend = open_backend();
        backend.replace_points("ds", &parabola_points()).unwrap();

        let request = InterpolationRequest::new("ds", InterpolationKind::Linear, 45.0);
        let row = backend.call_interpolation(&request).unwrap().unwrap();
        assert_eq!(row.error_code, format::CODE_EXTRAPOLATED);
        assert_eq!(row.error_message, "extrapolated");
        assert!(row.y_result.is_some());
    }

    #[test]
    fn test_routine_call_reports_insufficient_points_in_band() {
        let mut backend = open_backend();
        // Empty dataset: the routine answers with a coded row, not an Err.
        let request = InterpolationRequest::new("empty", InterpolationKind::Linear, 1.0);
        let row = backend.call_interpolation(&request).unwrap().unwrap();
        assert_eq!(row.error_code, format::CODE_INSUFFICIENT_POINTS);
        assert!(row.y_result.is_none());
    }

    #[test]
    fn test_routine_call_reports_bad_degree_in_band() {
        let mut backend = open_backend();
        backend.replace_points("ds", &parabola_points()).unwrap();

        let request = InterpolationRequest::new("ds", InterpolationKind::Polynomial, 5.0)
            .with_degree(17);
        let row = backend.call_interpolation(&request).unwrap().unwrap();
        assert_eq!(row.error_code, format::CODE_BAD_INPUT);
        assert!(row.y_result.is_none());
    }
}

//! The persisted schema. Creation is idempotent and runs once at session
//! start, before any pipeline operation touches the connection.

use rusqlite::Connection;

use crate::error::CurveCacheError;

/// Table holding the canonical input points per dataset.
pub const POINTS_TABLE: &str = "points_table";
/// Table holding bulk-sampled pairs and the interpolation audit trail.
pub const RESULTS_TABLE: &str = "interpolation_results";
/// Dataset id used when the caller does not name one.
pub const DEFAULT_DATASET_ID: &str = "default";

/// Creates the schema if any of it is missing. Safe to call repeatedly.
pub fn create_tables_if_not_exist(conn: &Connection) -> Result<(), CurveCacheError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS points_table (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            x          REAL NOT NULL,
            y          REAL NOT NULL,
            dataset_id TEXT NOT NULL DEFAULT 'default'
        );
        CREATE INDEX IF NOT EXISTS idx_points_dataset
            ON points_table (dataset_id);

        CREATE TABLE IF NOT EXISTS interpolation_results (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            dataset_id         TEXT NOT NULL,
            interpolation_type TEXT NOT NULL,
            x_target           REAL NOT NULL,
            y_result           REAL,
            error_code         INTEGER NOT NULL DEFAULT 0,
            error_message      TEXT NOT NULL DEFAULT '',
            created_at         TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_results_dataset_type
            ON interpolation_results (dataset_id, interpolation_type);",
    )?;
    log::debug!("schema ensured ({POINTS_TABLE}, {RESULTS_TABLE})");
    Ok(())
}

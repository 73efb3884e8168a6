//! This file is the root of the `curvecache` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`bridge`,
//!     `sample_pipeline`, `routines`, etc.) so the Rust compiler knows they
//!     exist.
//! 2.  Re-exporting the handful of types that make up the public surface, so
//!     callers reach everything through `curvecache::...` without spelunking
//!     the module tree.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod routines;
pub mod sample_pipeline;
pub mod storage;

mod error;
mod observability;
mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use bridge::{CurveSession, InterpolationGateway, ProcedureRow};
pub use config::{CurveCacheConfig, OutOfRangePolicy, StorageLocation};
pub use error::CurveCacheError;
pub use observability::enable_verbose_logging;
pub use sample_pipeline::{BulkRunReport, SamplingPlan};
pub use types::{
    InterpolationKind, InterpolationOutcome, InterpolationRequest, ResultLogEntry, SamplePoint,
};

// In: src/error.rs

//! This module defines the single, unified error type for the entire curvecache
//! library. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.

use thiserror::Error;

use crate::types::InterpolationKind;

#[derive(Error, Debug)]
pub enum CurveCacheError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// The injected curve is undefined at the requested x. Whether to skip,
    /// clamp, or abort is the caller's decision, not this library's.
    #[error("sample x={x} lies outside the fitted range [{min}, {max}]")]
    Domain { x: f64, min: f64, max: f64 },

    /// The storage backend could not be reached. Retryable at the batch or
    /// request granularity.
    #[error("cannot reach the storage backend: {0}")]
    Connection(String),

    /// A bulk write failed after the connection succeeded. Fatal to the
    /// current batch; the writer keeps its buffer so the same batch can be
    /// retried.
    #[error("bulk commit failed: {0}")]
    Commit(String),

    /// The routine response had an unexpected shape. Fatal for that single
    /// call only.
    #[error("malformed routine response: {0}")]
    Protocol(String),

    #[error("unknown interpolation kind: '{0}'")]
    UnknownKind(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal logic error (this is a bug): {0}")]
    Internal(String),

    // =========================================================================
    // === Routine Input Validation Errors
    // =========================================================================
    #[error("insufficient points for {kind} interpolation: got {got}, need at least {need}")]
    InsufficientPoints {
        kind: InterpolationKind,
        got: usize,
        need: usize,
    },

    #[error("unequal column lengths: x has {x_len} elements, y has {y_len}")]
    UnequalLength { x_len: usize, y_len: usize },

    #[error("x-values must be strictly increasing (violated at index {idx}, x = {x})")]
    NonIncreasingX { idx: usize, x: f64 },

    #[error("non-finite value in input column at index {idx}")]
    NonFiniteInput { idx: usize },

    #[error("invalid polynomial degree {degree} for {points} points")]
    InvalidDegree { degree: usize, points: usize },

    #[error("degenerate fit: {0}")]
    DegenerateFit(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the SQLite layer outside the commit and
    /// connect paths, which map to `Commit` and `Connection` explicitly.
    #[error("SQLite operation failed: {0}")]
    Sqlite(String), // Manual `From` impl below keeps the message, not the source chain.

    /// An error from the Serde JSON library, typically during config parsing.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<rusqlite::Error> for CurveCacheError {
    fn from(err: rusqlite::Error) -> Self {
        CurveCacheError::Sqlite(err.to_string())
    }
}

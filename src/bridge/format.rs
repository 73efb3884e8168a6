// In: src/bridge/format.rs

//! Defines the request/response wire contract with the server-side
//! interpolation routine. This is the single source of truth for the shape of
//! a routine response row, the error-code table, and the decode rules that
//! turn a raw row into an [`InterpolationOutcome`].
//!
//! The routine conceptually returns three output parameters (value, code,
//! message); this module fixes them as one tagged row so the rest of the
//! library never cares how the backend actually transmits them.

use serde::{Deserialize, Serialize};

use crate::error::CurveCacheError;
use crate::types::InterpolationOutcome;

//==================================================================================
// I. Error-Code Table
//==================================================================================

/// The routine computed a value inside the fitted range.
pub const CODE_OK: i32 = 0;
/// The routine yielded no result row at all.
pub const CODE_NO_RESULT: i32 = -1;
/// The target lay outside the fitted range; the returned value is an
/// extension of the end behavior. A warning, not a failure.
pub const CODE_EXTRAPOLATED: i32 = 2;
/// The dataset holds fewer points than the requested kind can be fitted on.
pub const CODE_INSUFFICIENT_POINTS: i32 = 3;
/// The point columns or request parameters were unusable (non-increasing x,
/// non-finite values, bad degree, degenerate fit).
pub const CODE_BAD_INPUT: i32 = 4;

/// Message paired with [`CODE_NO_RESULT`].
pub const NO_RESULT_MESSAGE: &str = "no result";

//==================================================================================
// II. The Response Row
//==================================================================================

/// The single structured row a routine call yields: value, code, message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProcedureRow {
    pub y_result: Option<f64>,
    pub error_code: i32,
    pub error_message: String,
}

impl ProcedureRow {
    pub fn success(y: f64) -> Self {
        Self {
            y_result: Some(y),
            error_code: CODE_OK,
            error_message: String::new(),
        }
    }

    pub fn warning(y: f64, error_code: i32, error_message: impl Into<String>) -> Self {
        Self {
            y_result: Some(y),
            error_code,
            error_message: error_message.into(),
        }
    }

    pub fn failure(error_code: i32, error_message: impl Into<String>) -> Self {
        Self {
            y_result: None,
            error_code,
            error_message: error_message.into(),
        }
    }
}

//==================================================================================
// III. Decode Rules
//==================================================================================

/// Decodes the raw routine response into an outcome.
///
/// A missing row decodes to `(CODE_NO_RESULT, "no result")` rather than an
/// error: the routine ran, it just had nothing to say, and that fact belongs
/// in the result log. A row that *violates the contract* (a success code
/// without a finite value) is a protocol error, fatal for this call only.
pub fn decode_procedure_row(
    row: Option<ProcedureRow>,
) -> Result<InterpolationOutcome, CurveCacheError> {
    let Some(row) = row else {
        return Ok(InterpolationOutcome {
            y_result: None,
            error_code: CODE_NO_RESULT,
            error_message: NO_RESULT_MESSAGE.to_string(),
        });
    };

    if row.error_code == CODE_OK {
        match row.y_result {
            Some(y) if y.is_finite() => Ok(InterpolationOutcome::success(y)),
            Some(y) => Err(CurveCacheError::Protocol(format!(
                "success row carries non-finite value {y}"
            ))),
            None => Err(CurveCacheError::Protocol(
                "success row is missing its value".to_string(),
            )),
        }
    } else {
        // Any unseen non-zero code rides through untouched: with a value it
        // is a warning, without one a failure. The outcome helpers make that
        // distinction; the decoder does not second-guess the backend.
        Ok(InterpolationOutcome {
            y_result: row.y_result.filter(|y| y.is_finite()),
            error_code: row.error_code,
            error_message: row.error_message,
        })
    }
}

/// Maps a routine-side validation error onto the wire code it travels as.
pub fn code_for_routine_error(err: &CurveCacheError) -> i32 {
    match err {
        CurveCacheError::InsufficientPoints { .. } => CODE_INSUFFICIENT_POINTS,
        _ => CODE_BAD_INPUT,
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

//! The record structs that flow between the sampling pipeline, the routine
//! bridge, and the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_POLYNOMIAL_DEGREE;
use crate::types::InterpolationKind;

/// A single produced (x, y) pair. Immutable once produced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One logical request against the server-side interpolation routine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InterpolationRequest {
    pub dataset_id: String,
    pub kind: InterpolationKind,
    pub target_x: f64,
    /// Meaningful only for [`InterpolationKind::Polynomial`]; the routine
    /// ignores it otherwise.
    pub polynomial_degree: usize,
}

impl InterpolationRequest {
    pub fn new(dataset_id: impl Into<String>, kind: InterpolationKind, target_x: f64) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            kind,
            target_x,
            polynomial_degree: DEFAULT_POLYNOMIAL_DEGREE,
        }
    }

    pub fn with_degree(mut self, polynomial_degree: usize) -> Self {
        self.polynomial_degree = polynomial_degree;
        self
    }
}

/// The tri-part result of an interpolation request, decoded exactly once by
/// the bridge.
///
/// `error_code == 0` implies `y_result` is present and finite. A non-zero
/// code with a present value is a degraded-but-usable computation (e.g. an
/// extrapolation warning); an absent value is a failed one. Both are still
/// archived in the result log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InterpolationOutcome {
    pub y_result: Option<f64>,
    pub error_code: i32,
    pub error_message: String,
}

impl InterpolationOutcome {
    pub fn success(y: f64) -> Self {
        Self {
            y_result: Some(y),
            error_code: 0,
            error_message: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    /// Non-zero code, but the routine still produced a usable value.
    pub fn is_warning(&self) -> bool {
        self.error_code != 0 && self.y_result.is_some()
    }

    /// The routine produced no usable value.
    pub fn is_failure(&self) -> bool {
        self.y_result.is_none()
    }
}

/// One immutable line of the append-only interpolation audit trail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultLogEntry {
    pub dataset_id: String,
    pub kind: InterpolationKind,
    pub target_x: f64,
    pub outcome: InterpolationOutcome,
    pub timestamp: DateTime<Utc>,
}

impl ResultLogEntry {
    /// Stamps a request/outcome pair into a log entry at the current instant.
    pub fn record(request: &InterpolationRequest, outcome: &InterpolationOutcome) -> Self {
        Self {
            dataset_id: request.dataset_id.clone(),
            kind: request.kind,
            target_x: request.target_x,
            outcome: outcome.clone(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome_invariants() {
        let outcome = InterpolationOutcome::success(42.5);
        assert!(outcome.is_success());
        assert!(!outcome.is_warning());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.y_result, Some(42.5));
        assert_eq!(outcome.error_code, 0);
    }

    #[test]
    fn test_warning_outcome_keeps_its_value() {
        let outcome = InterpolationOutcome {
            y_result: Some(7.0),
            error_code: 2,
            error_message: "extrapolated".to_string(),
        };
        assert!(!outcome.is_success());
        assert!(outcome.is_warning());
        assert!(!outcome.is_failure());
    }

    #[test]
    fn test_failure_outcome_has_no_value() {
        let outcome = InterpolationOutcome {
            y_result: None,
            error_code: 3,
            error_message: "insufficient points".to_string(),
        };
        assert!(outcome.is_failure());
        assert!(!outcome.is_warning());
    }

    #[test]
    fn test_request_defaults_and_builder() {
        let request = InterpolationRequest::new("default", InterpolationKind::Polynomial, 12.5);
        assert_eq!(request.polynomial_degree, DEFAULT_POLYNOMIAL_DEGREE);
        let request = request.with_degree(5);
        assert_eq!(request.polynomial_degree, 5);
    }

    #[test]
    fn test_log_entry_copies_the_full_request() {
        let request = InterpolationRequest::new("ds-a", InterpolationKind::Linear, 3.0);
        let outcome = InterpolationOutcome::success(9.0);
        let entry = ResultLogEntry::record(&request, &outcome);
        assert_eq!(entry.dataset_id, "ds-a");
        assert_eq!(entry.kind, InterpolationKind::Linear);
        assert_eq!(entry.target_x, 3.0);
        assert_eq!(entry.outcome, outcome);
    }
}

//! The pure, stateless interpolation routine kernels.
//!
//! These are the computations behind the stored-routine boundary: the storage
//! layer resolves a dataset's point columns and dispatches here, and whatever
//! comes back is packaged into a coded response row. Each kernel is panic-free
//! and fully validated; malformed point columns come back as typed errors, not
//! as garbage values.

pub mod lagrange;
pub mod linear;
pub mod polynomial;
pub mod spline;

use crate::error::CurveCacheError;
use crate::types::InterpolationKind;

/// Relative tolerance applied at the ends of the fitted range before a target
/// counts as extrapolated. Absorbs the floating-point wiggle of stepped
/// sampling that lands on a boundary knot.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

//==================================================================================
// 1. Public Dispatch API
//==================================================================================

/// The result of one routine evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutineEvaluation {
    pub y: f64,
    /// The target lay outside the fitted range; the value is an extension of
    /// the end behavior of the curve, not an interpolation.
    pub extrapolated: bool,
}

/// Evaluates one interpolation of the given kind over the point columns.
///
/// `xs` and `ys` are the dataset's point columns in stored order; they must be
/// the same length, finite, strictly increasing in x, and hold at least
/// [`minimum_points`] entries for the kind. `degree` is consumed only by
/// [`InterpolationKind::Polynomial`].
pub fn evaluate(
    kind: InterpolationKind,
    xs: &[f64],
    ys: &[f64],
    target_x: f64,
    degree: usize,
) -> Result<RoutineEvaluation, CurveCacheError> {
    validate_columns(kind, xs, ys)?;
    if !target_x.is_finite() {
        return Err(CurveCacheError::NonFiniteInput { idx: 0 });
    }

    let y = match kind {
        InterpolationKind::Linear => linear::evaluate(xs, ys, target_x),
        InterpolationKind::Polynomial => polynomial::evaluate(xs, ys, target_x, degree)?,
        InterpolationKind::Spline => spline::evaluate(xs, ys, target_x),
        InterpolationKind::Lagrange => lagrange::evaluate(xs, ys, target_x),
    };

    Ok(RoutineEvaluation {
        y,
        extrapolated: is_outside_range(xs, target_x),
    })
}

/// The smallest point count each kind can be fitted on.
pub fn minimum_points(kind: InterpolationKind) -> usize {
    match kind {
        InterpolationKind::Linear => 2,
        InterpolationKind::Polynomial => 2,
        InterpolationKind::Spline => 3,
        InterpolationKind::Lagrange => 2,
    }
}

//==================================================================================
// 2. Validation Helpers
//==================================================================================

fn validate_columns(
    kind: InterpolationKind,
    xs: &[f64],
    ys: &[f64],
) -> Result<(), CurveCacheError> {
    if xs.len() != ys.len() {
        return Err(CurveCacheError::UnequalLength {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    let need = minimum_points(kind);
    if xs.len() < need {
        return Err(CurveCacheError::InsufficientPoints {
            kind,
            got: xs.len(),
            need,
        });
    }
    for (idx, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(CurveCacheError::NonFiniteInput { idx });
        }
        if idx > 0 && x <= xs[idx - 1] {
            return Err(CurveCacheError::NonIncreasingX { idx, x });
        }
    }
    Ok(())
}

fn is_outside_range(xs: &[f64], target_x: f64) -> bool {
    let lo = xs[0];
    let hi = xs[xs.len() - 1];
    let tol = BOUNDARY_TOLERANCE * (hi - lo).abs().max(1.0);
    target_x < lo - tol || target_x > hi + tol
}

//==================================================================================
// Unit Tests
//==================================================================================

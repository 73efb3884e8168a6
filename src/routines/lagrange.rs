//! This module contains the pure, stateless kernel for Lagrange
//! interpolation in barycentric form.
//!
//! The barycentric form avoids re-deriving basis polynomials per target and
//! is numerically steadier than the textbook product formula. Exact node hits
//! are short-circuited so the weight division never sees a zero.

//==================================================================================
// 1. Public Kernel API
//==================================================================================

/// Evaluates the unique degree-(n-1) Lagrange polynomial through all of
/// `(xs, ys)` at `target_x`.
pub fn evaluate(xs: &[f64], ys: &[f64], target_x: f64) -> f64 {
    // An exact node hit makes (target_x - xs[i]) vanish below; return the
    // node value directly.
    for (x, y) in xs.iter().zip(ys.iter()) {
        if target_x == *x {
            return *y;
        }
    }

    let n = xs.len();
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..n {
        let mut weight = 1.0;
        for j in 0..n {
            if j != i {
                weight /= xs[i] - xs[j];
            }
        }
        let term = weight / (target_x - xs[i]);
        numerator += term * ys[i];
        denominator += term;
    }
    numerator / denominator
}

//==================================================================================
// Unit Tests
//==================================================================================

//! This module contains the pure, stateless kernel for natural cubic spline
//! interpolation.
//!
//! Second derivatives at the knots are obtained from the natural-spline
//! tridiagonal system via the Thomas algorithm, then each target is evaluated
//! on its owning segment's cubic. Out-of-range targets evaluate the end
//! segment's cubic; the dispatcher flags those as extrapolated.

use crate::routines::linear::segment_index;

//==================================================================================
// 1. Public Kernel API
//==================================================================================

/// Evaluates the natural cubic spline through `(xs, ys)` at `target_x`.
///
/// Requires at least three strictly increasing knots (guaranteed by dispatch
/// validation).
pub fn evaluate(xs: &[f64], ys: &[f64], target_x: f64) -> f64 {
    let m = second_derivatives(xs, ys);
    evaluate_with(xs, ys, &m, target_x)
}

/// Evaluates a target against precomputed second derivatives. Split out so a
/// caller evaluating many targets pays the tridiagonal solve once.
pub fn evaluate_with(xs: &[f64], ys: &[f64], m: &[f64], target_x: f64) -> f64 {
    let i = segment_index(xs, target_x);
    let h = xs[i + 1] - xs[i];
    let a = (xs[i + 1] - target_x) / h;
    let b = (target_x - xs[i]) / h;
    a * ys[i]
        + b * ys[i + 1]
        + ((a * a * a - a) * m[i] + (b * b * b - b) * m[i + 1]) * h * h / 6.0
}

/// Second derivatives at every knot under natural boundary conditions
/// (`m[0] == m[n-1] == 0`), via the Thomas algorithm on the interior system.
pub fn second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    // Forward sweep. c_prime/d_prime index interior knots; the zero entries
    // at 0 encode the natural boundary.
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = xs[i] - xs[i - 1];
        let h1 = xs[i + 1] - xs[i];
        let diag = 2.0 * (h0 + h1) - h0 * c_prime[i - 1];
        c_prime[i] = h1 / diag;
        let rhs = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
        d_prime[i] = (rhs - h0 * d_prime[i - 1]) / diag;
    }

    // Back substitution; m[n-1] stays 0.
    for i in (1..n - 1).rev() {
        m[i] = d_prime[i] - c_prime[i] * m[i + 1];
    }
    m
}

//==================================================================================
// Unit Tests
//==================================================================================

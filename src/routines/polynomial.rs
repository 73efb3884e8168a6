//! This module contains the pure, stateless kernel for least-squares
//! polynomial interpolation.
//!
//! The requested degree is fitted by solving the normal equations with
//! Gaussian elimination under partial pivoting, and the fitted polynomial is
//! evaluated with Horner's scheme. The polynomial is defined everywhere, so
//! out-of-range targets simply evaluate the fit; the dispatcher flags them
//! as extrapolated.

use crate::error::CurveCacheError;

//==================================================================================
// 1. Public Kernel API
//==================================================================================

/// Fits a degree-`degree` polynomial to `(xs, ys)` and evaluates it at
/// `target_x`.
pub fn evaluate(
    xs: &[f64],
    ys: &[f64],
    target_x: f64,
    degree: usize,
) -> Result<f64, CurveCacheError> {
    let coefficients = fit(xs, ys, degree)?;
    Ok(horner(&coefficients, target_x))
}

/// Least-squares fit; returns coefficients in ascending-power order.
///
/// The degree must be at least 1 and strictly below the point count, otherwise
/// the normal system is under-determined.
pub fn fit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>, CurveCacheError> {
    let n = xs.len();
    if degree == 0 || degree >= n {
        return Err(CurveCacheError::InvalidDegree { degree, points: n });
    }

    let m = degree + 1;

    // Normal equations: A[i][j] = sum(x^(i+j)), b[i] = sum(y * x^i).
    // Power sums up to 2 * degree are shared between cells, so compute them once.
    let mut power_sums = vec![0.0_f64; 2 * degree + 1];
    let mut moments = vec![0.0_f64; m];
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let mut xp = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += xp;
            if k < m {
                moments[k] += y * xp;
            }
            xp *= x;
        }
    }

    let matrix: Vec<Vec<f64>> = (0..m)
        .map(|i| (0..m).map(|j| power_sums[i + j]).collect())
        .collect();

    solve(matrix, moments).ok_or_else(|| {
        CurveCacheError::DegenerateFit(format!(
            "normal system for degree {} over {} points is numerically singular",
            degree, n
        ))
    })
}

/// Horner evaluation of ascending-power coefficients.
#[inline]
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}

//==================================================================================
// 2. Private Linear-System Solver
//==================================================================================

/// Minimum absolute pivot before the system counts as singular.
const PIVOT_EPSILON: f64 = 1e-12;

/// Gaussian elimination with partial pivoting. `None` means singular.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let mut pivot = col;
        for row in (col + 1)..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in (row + 1)..n {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    Some(x)
}

//==================================================================================
// Unit Tests
//==================================================================================

//! Ordinary least squares with an intercept
//!
//! Columns are centered first, so the intercept drops out of the normal
//! equations and the system solved is `(XcᵀXc) w = Xcᵀyc`. The normal matrix
//! is diagonalized with cyclic Jacobi rotations and inverted on its
//! non-negligible eigenvalues only. Constant or collinear columns, or fewer
//! rows than columns, therefore give the minimum-norm solution rather than an
//! error. The intercept is recovered as `ȳ − x̄·w`.

use ehub_common::{Error, Result};
use ndarray::{Array1, Array2, Axis};

/// Eigenvalues below this fraction of the largest are treated as zero
const RANK_TOLERANCE: f64 = 1e-10;

/// Off-diagonal energy, relative to the whole matrix, at which Jacobi stops
const JACOBI_TOLERANCE: f64 = 1e-28;

const MAX_SWEEPS: usize = 100;

/// Fitted intercept and coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub intercept: f64,
    pub coefficients: Array1<f64>,
    /// Numerical rank of the centered feature matrix
    pub rank: usize,
}

impl OlsFit {
    /// Fitted values for every row of `x`
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        x.dot(&self.coefficients) + self.intercept
    }
}

/// Fit `y ≈ intercept + x·w`
pub fn fit(x: &Array2<f64>, y: &Array1<f64>) -> Result<OlsFit> {
    if x.nrows() == 0 {
        return Err(Error::Training("cannot fit an empty dataset".to_string()));
    }
    if x.nrows() != y.len() {
        return Err(Error::Training(format!(
            "{} feature rows for {} targets",
            x.nrows(),
            y.len()
        )));
    }

    let x_mean = x
        .mean_axis(Axis(0))
        .ok_or_else(|| Error::Training("feature matrix has no rows".to_string()))?;
    let y_mean = y
        .mean()
        .ok_or_else(|| Error::Training("target vector is empty".to_string()))?;

    let xc = x - &x_mean;
    let yc = y - y_mean;

    let xtx = xc.t().dot(&xc);
    let xty = xc.t().dot(&yc);
    let (coefficients, rank) = min_norm_solve(xtx, xty)?;
    let intercept = y_mean - x_mean.dot(&coefficients);

    Ok(OlsFit {
        intercept,
        coefficients,
        rank,
    })
}

/// Minimum-norm solution of the symmetric positive semi-definite system
/// `a · w = b`, with the numerical rank of `a`
pub fn min_norm_solve(a: Array2<f64>, b: Array1<f64>) -> Result<(Array1<f64>, usize)> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return Err(Error::Training(format!(
            "system is {}x{} with {} right-hand sides",
            a.nrows(),
            a.ncols(),
            b.len()
        )));
    }

    let (eigenvalues, eigenvectors) = symmetric_eigen(a);
    let largest = eigenvalues.iter().fold(0.0_f64, |m, v| m.max(*v));
    let cutoff = largest * RANK_TOLERANCE;

    let mut w = Array1::<f64>::zeros(n);
    let mut rank = 0;
    for (i, &lambda) in eigenvalues.iter().enumerate() {
        if lambda <= cutoff {
            continue;
        }
        let v = eigenvectors.column(i);
        w.scaled_add(v.dot(&b) / lambda, &v);
        rank += 1;
    }
    Ok((w, rank))
}

/// Eigenvalues and eigenvectors (as columns) of a symmetric matrix
fn symmetric_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..MAX_SWEEPS {
        let total: f64 = a.iter().map(|x| x * x).sum();
        let mut off = 0.0;
        for p in 0..n {
            for q in p + 1..n {
                off += 2.0 * a[[p, q]] * a[[p, q]];
            }
        }
        if off <= total * JACOBI_TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in p + 1..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }

                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + theta.hypot(1.0));
                let c = 1.0 / t.hypot(1.0);
                let s = t * c;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                a[[p, q]] = 0.0;
                a[[q, p]] = 0.0;

                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

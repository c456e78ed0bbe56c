//! Linear algebra utilities.
//!
//! Thin SVD by one-sided (Hestenes) Jacobi rotations. Works directly on the
//! columns of A rather than on AᵀA, so small singular values keep full
//! relative accuracy, which the tensor-train truncation relies on.

use burgers_types::error::{BurgersError, BurgersResult};
use ndarray::{Array1, Array2};

/// Maximum number of Jacobi sweeps.
const MAX_SWEEPS: usize = 60;

/// Relative orthogonality threshold for a column pair.
const ORTHO_TOL: f64 = 1e-15;

/// Thin singular value decomposition A = U · diag(sigma) · Vt.
///
/// Shapes for an `m × n` input with `k = min(m, n)`: `u` is `m × k`,
/// `sigma` is `k`, `vt` is `k × n`.
#[derive(Debug, Clone)]
pub struct Svd {
    pub u: Array2<f64>,
    pub sigma: Array1<f64>,
    pub vt: Array2<f64>,
}

impl Svd {
    pub fn rank_capacity(&self) -> usize {
        self.sigma.len()
    }

    /// U[:, :r] · diag(sigma[:r]) · Vt[:r, :]
    pub fn reconstruct(&self, r: usize) -> Array2<f64> {
        let r = r.min(self.sigma.len());
        let (m, n) = (self.u.nrows(), self.vt.ncols());
        let mut out = Array2::zeros((m, n));
        for s in 0..r {
            let sv = self.sigma[s];
            for i in 0..m {
                let us = self.u[[i, s]] * sv;
                if us == 0.0 {
                    continue;
                }
                for j in 0..n {
                    out[[i, j]] += us * self.vt[[s, j]];
                }
            }
        }
        out
    }
}

/// Thin SVD with singular values sorted descending.
///
/// Ties are broken by original column index (stable sort), so the output is
/// fully deterministic for a given input. Columns of U belonging to exactly
/// zero singular values are left zero.
///
/// Matches `numpy.linalg.svd(A, full_matrices=False)` up to column signs.
pub fn svd_jacobi(a: &Array2<f64>) -> BurgersResult<Svd> {
    let (m, n) = a.dim();
    if m == 0 || n == 0 {
        return Err(BurgersError::LinAlg(format!(
            "SVD of empty matrix ({m}x{n})"
        )));
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(BurgersError::LinAlg(
            "SVD input contains NaN or Inf".to_string(),
        ));
    }

    // Rotate the shorter side: wide matrices are decomposed via Aᵀ.
    if m < n {
        // Transposed copies keep F-order strides; callers reshape the
        // factors, so hand them back in row-major layout.
        let t = svd_tall(&a.t().as_standard_layout().into_owned());
        return Ok(Svd {
            u: t.vt.t().as_standard_layout().into_owned(),
            sigma: t.sigma,
            vt: t.u.t().as_standard_layout().into_owned(),
        });
    }
    Ok(svd_tall(a))
}

/// One-sided Jacobi on an `m × n` matrix with `m >= n`.
fn svd_tall(a: &Array2<f64>) -> Svd {
    let (m, n) = a.dim();
    let mut w = a.clone();
    let mut v: Array2<f64> = Array2::eye(n);

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;

        for i in 0..n {
            for j in (i + 1)..n {
                let mut alpha = 0.0;
                let mut beta = 0.0;
                let mut gamma = 0.0;
                for r in 0..m {
                    alpha += w[[r, i]] * w[[r, i]];
                    beta += w[[r, j]] * w[[r, j]];
                    gamma += w[[r, i]] * w[[r, j]];
                }
                if alpha == 0.0 || beta == 0.0 {
                    continue;
                }
                if gamma.abs() <= ORTHO_TOL * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let cos = 1.0 / (1.0 + t * t).sqrt();
                let sin = cos * t;

                for r in 0..m {
                    let wi = w[[r, i]];
                    let wj = w[[r, j]];
                    w[[r, i]] = cos * wi - sin * wj;
                    w[[r, j]] = sin * wi + cos * wj;
                }
                for r in 0..n {
                    let vi = v[[r, i]];
                    let vj = v[[r, j]];
                    v[[r, i]] = cos * vi - sin * vj;
                    v[[r, j]] = sin * vi + cos * vj;
                }
            }
        }

        if !rotated {
            break;
        }
    }

    // Column norms of the rotated matrix are the singular values
    let norms: Vec<f64> = (0..n)
        .map(|c| w.column(c).iter().map(|x| x * x).sum::<f64>().sqrt())
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        norms[j]
            .partial_cmp(&norms[i])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut u = Array2::zeros((m, n));
    let mut sigma = Array1::zeros(n);
    let mut vt = Array2::zeros((n, n));
    for (idx, &col) in order.iter().enumerate() {
        let s = norms[col];
        sigma[idx] = s;
        if s > 0.0 {
            for r in 0..m {
                u[[r, idx]] = w[[r, col]] / s;
            }
        }
        for r in 0..n {
            vt[[idx, r]] = v[[r, col]];
        }
    }

    Svd { u, sigma, vt }
}

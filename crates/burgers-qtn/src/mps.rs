// ─────────────────────────────────────────────────────────────────────
// SCPN Burgers Core — MPS Compressor
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Matrix product state (tensor train) of a 1D field.
//!
//! Core k has shape `(r_{k-1}, d_k, r_k)` with `r_0 = r_n = 1`. The field
//! index is row-major over the sites, so site 0 carries the most significant
//! digit of the grid index.
//!
//! Decomposition is left-to-right TT-SVD: every stored core is left-
//! orthogonal and the singular values are pushed into the remainder before
//! the next split, so the squared reconstruction error is the sum of the
//! squared discarded singular values over all junctions.

use crate::sites::SiteDims;
use crate::truncation::truncation_rank;
use burgers_math::linalg::svd_jacobi;
use burgers_math::norms::l2_relative_error;
use burgers_types::config::MpsConfig;
use burgers_types::error::{BurgersError, BurgersResult};
use ndarray::{s, Array1, Array2, Array3};
use serde::Serialize;

/// Chain of rank-3 cores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mps {
    cores: Vec<Array3<f64>>,
}

impl Mps {
    /// Build from explicit cores, checking boundary ranks and bond matching.
    pub fn from_cores(cores: Vec<Array3<f64>>) -> BurgersResult<Self> {
        let n = cores.len();
        if n == 0 {
            return Err(BurgersError::Factorization("MPS has no cores".to_string()));
        }
        if cores[0].dim().0 != 1 || cores[n - 1].dim().2 != 1 {
            return Err(BurgersError::Factorization(
                "boundary bond dimensions must be 1".to_string(),
            ));
        }
        for k in 1..n {
            let left = cores[k - 1].dim().2;
            let right = cores[k].dim().0;
            if left != right {
                return Err(BurgersError::Factorization(format!(
                    "bond {k} mismatch: core {} has right rank {left}, core {k} has left rank {right}",
                    k - 1
                )));
            }
        }
        Ok(Mps { cores })
    }

    pub fn cores(&self) -> &[Array3<f64>] {
        &self.cores
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn site_dims(&self) -> Vec<usize> {
        self.cores.iter().map(|c| c.dim().1).collect()
    }

    /// `(left_rank, right_rank)` of every core.
    pub fn core_ranks(&self) -> Vec<(usize, usize)> {
        self.cores
            .iter()
            .map(|c| {
                let (l, _, r) = c.dim();
                (l, r)
            })
            .collect()
    }

    /// Internal bond dimensions `r_1 … r_{n-1}`.
    pub fn bond_dims(&self) -> Vec<usize> {
        self.cores
            .iter()
            .take(self.cores.len().saturating_sub(1))
            .map(|c| c.dim().2)
            .collect()
    }

    pub fn max_bond_dim(&self) -> usize {
        self.bond_dims().into_iter().max().unwrap_or(1)
    }

    /// Stored element count across all cores.
    pub fn num_elements(&self) -> usize {
        self.cores.iter().map(|c| c.len()).sum()
    }

    /// Contract the chain back to a dense field of length `∏ d_k`.
    pub fn to_dense(&self) -> BurgersResult<Array1<f64>> {
        // acc: (prefix, bond) with the prefix index row-major over sites
        let mut acc: Array2<f64> = Array2::ones((1, 1));
        for core in &self.cores {
            let (rl, d, rr) = core.dim();
            let mat = core
                .as_standard_layout()
                .into_owned()
                .into_shape((rl, d * rr))
                .map_err(|e| BurgersError::LinAlg(format!("core reshape: {e}")))?;
            let prefix = acc.nrows();
            acc = acc
                .dot(&mat)
                .into_shape((prefix * d, rr))
                .map_err(|e| BurgersError::LinAlg(format!("contraction reshape: {e}")))?;
        }
        let n = acc.nrows();
        acc.into_shape(n)
            .map_err(|e| BurgersError::LinAlg(format!("dense reshape: {e}")))
    }
}

/// Result of one compression call.
#[derive(Debug, Clone, Serialize)]
pub struct Compression {
    pub mps: Mps,
    /// The field contracted back from `mps`.
    pub reconstructed: Array1<f64>,
    /// Original element count / stored element count.
    pub compression_ratio: f64,
    /// ‖u - contract(mps)‖₂ / ‖u‖₂
    pub reconstruction_error: f64,
}

/// TT-SVD compressor with a fixed site layout and truncation bounds.
#[derive(Debug, Clone)]
pub struct MpsCompressor {
    dims: SiteDims,
    max_bond_dim: usize,
    tolerance: f64,
}

impl MpsCompressor {
    pub fn new(dims: SiteDims, max_bond_dim: usize, tolerance: f64) -> BurgersResult<Self> {
        MpsConfig::new(max_bond_dim, tolerance).validate()?;
        Ok(MpsCompressor {
            dims,
            max_bond_dim,
            tolerance,
        })
    }

    /// Compressor for fields of length `nx`. Fails with
    /// [`BurgersError::Factorization`] when the configured layout can't
    /// factor `nx`.
    pub fn from_config(config: &MpsConfig, nx: usize) -> BurgersResult<Self> {
        let dims = SiteDims::from_config(config, nx)?;
        Self::new(dims, config.max_bond_dim, config.tolerance)
    }

    pub fn dims(&self) -> &SiteDims {
        &self.dims
    }

    pub fn max_bond_dim(&self) -> usize {
        self.max_bond_dim
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Sequential SVD split of `state` into cores.
    pub fn decompose(&self, state: &Array1<f64>) -> BurgersResult<Mps> {
        self.dims.check(state.len())?;
        let dims = self.dims.as_slice();
        let n_sites = dims.len();
        let nx = state.len();

        let mut rest = state
            .as_standard_layout()
            .into_owned()
            .into_shape((dims[0], nx / dims[0]))
            .map_err(|e| BurgersError::LinAlg(format!("state reshape: {e}")))?;
        let mut r_left = 1;
        let mut cores = Vec::with_capacity(n_sites);

        for site in 0..n_sites - 1 {
            let d = dims[site];
            let svd = svd_jacobi(&rest)?;
            let r = truncation_rank(&svd.sigma, self.max_bond_dim, self.tolerance);

            let core = svd
                .u
                .slice(s![.., ..r])
                .as_standard_layout()
                .into_owned()
                .into_shape((r_left, d, r))
                .map_err(|e| BurgersError::LinAlg(format!("core reshape: {e}")))?;
            cores.push(core);

            // S·Vt carries the weight into the next split
            let mut carry = svd.vt.slice(s![..r, ..]).as_standard_layout().into_owned();
            for (idx, mut row) in carry.rows_mut().into_iter().enumerate() {
                row *= svd.sigma[idx];
            }

            let next_d = dims[site + 1];
            let remaining = carry.ncols() / next_d;
            rest = carry
                .into_shape((r * next_d, remaining))
                .map_err(|e| BurgersError::LinAlg(format!("remainder reshape: {e}")))?;
            r_left = r;
        }

        let last = rest
            .as_standard_layout()
            .into_owned()
            .into_shape((r_left, dims[n_sites - 1], 1))
            .map_err(|e| BurgersError::LinAlg(format!("last core reshape: {e}")))?;
        cores.push(last);

        Mps::from_cores(cores)
    }

    /// Decompose, contract back, and report the metrics.
    pub fn compress(&self, state: &Array1<f64>) -> BurgersResult<Compression> {
        let mps = self.decompose(state)?;
        let reconstructed = mps.to_dense()?;
        let compression_ratio = state.len() as f64 / mps.num_elements() as f64;
        let reconstruction_error = l2_relative_error(&reconstructed, state);
        Ok(Compression {
            mps,
            reconstructed,
            compression_ratio,
            reconstruction_error,
        })
    }
}

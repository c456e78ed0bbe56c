// ─────────────────────────────────────────────────────────────────────
// SCPN Burgers Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{BurgersError, BurgersResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Minimum number of points for stable spectral derivatives.
pub const MIN_GRID_POINTS: usize = 4;

/// Uniform periodic 1D grid over `[0, L)` with its Fourier wavenumbers.
///
/// Fields are private: `dx`, `x` and `k` are derived from `nx` and `length`
/// inside the constructor and can't drift apart from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    nx: usize,
    length: f64,
    dx: f64,
    x: Array1<f64>, // x_j = j * dx, endpoint L excluded
    k: Array1<f64>, // numpy.fft.fftfreq(nx, dx) * 2π
}

impl Grid1D {
    /// Python equivalent:
    ///   x = np.linspace(0, L, Nx, endpoint=False)
    ///   k = 2 * np.pi * np.fft.fftfreq(Nx, d=L / Nx)
    pub fn new(nx: usize, length: f64) -> BurgersResult<Self> {
        if nx < MIN_GRID_POINTS || !(length > 0.0) || !length.is_finite() {
            return Err(BurgersError::InvalidGrid { nx, length });
        }

        let dx = length / nx as f64;
        let x = Array1::from_shape_fn(nx, |j| j as f64 * dx);

        // Non-negative frequencies first, then negative ones; the Nyquist
        // mode of an even grid lands on the negative side. Same ordering
        // as `burgers_math::fft::fftfreq` scaled by 2π; keep them in sync.
        let base = 2.0 * PI / length;
        let half = nx.div_ceil(2);
        let k = Array1::from_shape_fn(nx, |j| {
            if j < half {
                base * j as f64
            } else {
                base * (j as f64 - nx as f64)
            }
        });

        Ok(Grid1D {
            nx,
            length,
            dx,
            x,
            k,
        })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn k(&self) -> &Array1<f64> {
        &self.k
    }

    /// Largest resolved wavenumber magnitude.
    pub fn k_max(&self) -> f64 {
        self.k.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()))
    }

    /// Sample a function on the grid points.
    pub fn sample<F: Fn(f64) -> f64>(&self, f: F) -> Array1<f64> {
        self.x.mapv(f)
    }
}

/// A captured `(time, u)` pair. Holds its own copy of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: f64,
    pub state: Array1<f64>,
}

/// Advection blow-up detected during a run.
///
/// Non-fatal: the run continues and the first occurrence is attached to the
/// [`RunResult`] so sweep analysis can flag the parameter point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstabilityWarning {
    /// Zero-based index of the step that tripped the check.
    pub step: usize,
    /// Simulated time at the start of that step.
    pub time: f64,
    /// ‖u_out‖₂ / ‖u_in‖₂ for the advection sub-step (infinite for NaN/Inf output).
    pub growth: f64,
}

/// Terminal output of one driver invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub solver: String,
    pub snapshots: Vec<Snapshot>,
    pub runtime_seconds: f64,
    pub steps: usize,
    /// QTN only: one entry per snapshot, `NaN` when compression was skipped.
    pub compression_ratios: Vec<f64>,
    /// QTN only: one entry per snapshot, `NaN` when compression was skipped.
    pub reconstruction_errors: Vec<f64>,
    pub instability: Option<InstabilityWarning>,
}

impl RunResult {
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }

    /// Snapshot captured at exactly `time`, if any.
    pub fn snapshot_at(&self, time: f64) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.time == time)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn is_unstable(&self) -> bool {
        self.instability.is_some()
    }

    /// Mean compression ratio over snapshots that were compressed.
    pub fn mean_compression_ratio(&self) -> Option<f64> {
        let valid: Vec<f64> = self
            .compression_ratios
            .iter()
            .copied()
            .filter(|r| r.is_finite())
            .collect();
        if valid.is_empty() {
            None
        } else {
            Some(valid.iter().sum::<f64>() / valid.len() as f64)
        }
    }
}

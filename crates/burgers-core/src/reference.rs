//! Cole–Hopf reference solution.
//!
//! With `u = -2ν ∂ₓ ln φ`, viscous Burgers becomes the heat equation
//! `∂φ/∂t = ν ∂²φ/∂x²`. For a zero-mean periodic `u₀`,
//! `φ₀ = exp(-∫u₀ / 2ν)` is periodic, so `φ(t)` follows from the exact
//! spectral heat propagator and `u(t)` is recovered without any time
//! stepping. Spatial accuracy is spectral as long as `φ₀` is resolved.

use crate::diffusion::DiffusionPropagator;
use burgers_math::fft::Fft1D;
use burgers_types::error::{BurgersError, BurgersResult};
use burgers_types::state::Grid1D;
use ndarray::{Array1, Zip};
use num_complex::Complex64;

/// Relative tolerance on the mean of `u₀`.
const MEAN_TOL: f64 = 1e-10;

/// Largest near-Nyquist Fourier magnitude of `φ₀` allowed, relative to
/// its mean mode.
const RESOLUTION_TOL: f64 = 1e-6;

/// Smallest `min φ₀ / max φ₀` allowed. Below this the trough of `φ` sits
/// under FFT roundoff and `φₓ/φ` is noise there.
const PHI_FLOOR: f64 = 1e-12;

/// Precomputed `φ₀` for one initial field, evaluated at arbitrary times.
#[derive(Debug, Clone)]
pub struct ColeHopf {
    nu: f64,
    plan: Fft1D,
    k: Array1<f64>,
    heat: DiffusionPropagator,
    phi0: Array1<f64>,
}

impl ColeHopf {
    pub fn new(grid: &Grid1D, u0: &Array1<f64>, nu: f64) -> BurgersResult<Self> {
        if !(nu > 0.0) || !nu.is_finite() {
            return Err(BurgersError::InvalidParams(format!(
                "Cole-Hopf needs a positive viscosity, got {nu}"
            )));
        }
        if u0.len() != grid.nx() {
            return Err(BurgersError::InvalidParams(format!(
                "initial field has {} points, grid has {}",
                u0.len(),
                grid.nx()
            )));
        }

        let n = grid.nx();
        let mean = u0.sum() / n as f64;
        let scale = u0.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        if mean.abs() > MEAN_TOL * scale {
            return Err(BurgersError::NonPeriodic(format!(
                "initial field mean {mean:.3e} is not zero"
            )));
        }

        let plan = Fft1D::new(n);
        let k = grid.k().clone();

        // Antiderivative: Û / (i k), mean and Nyquist dropped
        let mut spectrum = plan.forward(u0);
        let iu = Complex64::new(0.0, 1.0);
        for (j, c) in spectrum.iter_mut().enumerate() {
            let kj = k[j];
            if j == 0 || (n % 2 == 0 && j == n / 2) {
                *c = Complex64::new(0.0, 0.0);
            } else {
                *c /= iu * kj;
            }
        }
        let integral = plan.inverse_real(&spectrum);

        // Shift the exponent so the largest value of φ₀ is 1
        let exponent = integral.mapv(|v| -v / (2.0 * nu));
        let peak = exponent.iter().fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        let phi0 = exponent.mapv(|e| (e - peak).exp());
        check_resolved(&plan, &phi0, nu)?;

        Ok(ColeHopf {
            nu,
            plan,
            k,
            heat: DiffusionPropagator::new(grid),
            phi0,
        })
    }

    /// `u(x, t)` on the grid.
    pub fn evaluate(&self, t: f64) -> Array1<f64> {
        let phi = self.heat.propagate(&self.phi0, self.nu, t);
        let dphi = self.plan.derivative(&phi, &self.k);
        let two_nu = 2.0 * self.nu;
        Zip::from(&phi)
            .and(&dphi)
            .map_collect(|&p, &dp| -two_nu * dp / p)
    }
}

/// Rejects a `φ₀` the grid cannot represent. Heat propagation only damps
/// modes, so a resolved `φ₀` stays resolved for all `t ≥ 0`.
fn check_resolved(plan: &Fft1D, phi0: &Array1<f64>, nu: f64) -> BurgersResult<()> {
    let n = phi0.len();
    let floor = phi0.iter().fold(f64::INFINITY, |acc, &v| acc.min(v));
    if floor < PHI_FLOOR {
        return Err(BurgersError::InvalidParams(format!(
            "Cole-Hopf φ₀ spans more than {:.0} e-folds at ν = {nu}; raise ν",
            -PHI_FLOOR.ln()
        )));
    }

    let spectrum = plan.forward(phi0);
    let dc = spectrum[0].norm();
    let half = n / 2;
    let tail = spectrum
        .iter()
        .enumerate()
        .filter(|(j, _)| {
            let m = (*j).min(n - *j);
            m > 0 && m + 1 >= half
        })
        .fold(0.0_f64, |acc, (_, c)| acc.max(c.norm()));
    let ratio = tail / dc;
    if ratio > RESOLUTION_TOL {
        return Err(BurgersError::InvalidParams(format!(
            "Cole-Hopf φ₀ is under-resolved on {n} points at ν = {nu} \
             (tail {ratio:.1e}); refine the grid or raise ν"
        )));
    }
    Ok(())
}

/// One-shot Cole–Hopf solution at time `t`.
pub fn cole_hopf(grid: &Grid1D, u0: &Array1<f64>, nu: f64, t: f64) -> BurgersResult<Array1<f64>> {
    Ok(ColeHopf::new(grid, u0, nu)?.evaluate(t))
}

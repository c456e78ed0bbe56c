// ─────────────────────────────────────────────────────────────────────
// SCPN Burgers Core — Advection
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Nonlinear advection `∂u/∂t = -u ∂u/∂x`, explicit RK2 midpoint.
//!
//! Stability is the caller's job: `dt · max|u| / dx` must stay well below
//! one. The stepper never clamps `dt`; it reports the L2 growth of each step
//! so the driver can flag blow-up.

use burgers_math::fft::Fft1D;
use burgers_math::norms::l2_norm;
use burgers_types::config::DerivativeScheme;
use burgers_types::state::Grid1D;
use ndarray::{Array1, Zip};

/// Output of one advection step.
#[derive(Debug, Clone)]
pub struct AdvectionStep {
    pub state: Array1<f64>,
    /// ‖u_out‖₂ / ‖u_in‖₂. Infinite if the output is not finite.
    pub growth: f64,
}

#[derive(Debug, Clone)]
pub struct AdvectionStepper {
    plan: Fft1D,
    k: Array1<f64>,
    dx: f64,
    scheme: DerivativeScheme,
}

impl AdvectionStepper {
    pub fn new(grid: &Grid1D, scheme: DerivativeScheme) -> Self {
        AdvectionStepper {
            plan: Fft1D::new(grid.nx()),
            k: grid.k().clone(),
            dx: grid.dx(),
            scheme,
        }
    }

    pub fn scheme(&self) -> DerivativeScheme {
        self.scheme
    }

    /// ∂ₓu with the configured scheme.
    pub fn derivative(&self, u: &Array1<f64>) -> Array1<f64> {
        match self.scheme {
            DerivativeScheme::Spectral => self.plan.derivative(u, &self.k),
            DerivativeScheme::CentralDifference => {
                let n = u.len();
                let inv_2dx = 0.5 / self.dx;
                Array1::from_shape_fn(n, |j| {
                    let right = u[(j + 1) % n];
                    let left = u[(j + n - 1) % n];
                    (right - left) * inv_2dx
                })
            }
        }
    }

    /// Right-hand side `-u ∂ₓu`.
    pub fn rhs(&self, u: &Array1<f64>) -> Array1<f64> {
        let du = self.derivative(u);
        Zip::from(u).and(&du).map_collect(|&v, &d| -v * d)
    }

    /// RK2 midpoint: `u_mid = u + dt/2·f(u)`, `u_out = u + dt·f(u_mid)`.
    pub fn step(&self, u: &Array1<f64>, dt: f64) -> AdvectionStep {
        let k1 = self.rhs(u);
        let u_mid = Zip::from(u).and(&k1).map_collect(|&v, &k| v + 0.5 * dt * k);
        let k2 = self.rhs(&u_mid);
        let state = Zip::from(u).and(&k2).map_collect(|&v, &k| v + dt * k);
        let growth = growth_ratio(u, &state);
        AdvectionStep { state, growth }
    }

    /// Advective CFL number `dt · max|u| / dx`.
    pub fn cfl(&self, u: &Array1<f64>, dt: f64) -> f64 {
        let u_max = u.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        dt * u_max / self.dx
    }
}

/// ‖out‖₂ / ‖input‖₂, with the degenerate cases pinned down:
/// zero → zero is 1, zero → nonzero and non-finite output are infinite.
pub fn growth_ratio(input: &Array1<f64>, output: &Array1<f64>) -> f64 {
    let out = l2_norm(output);
    if !out.is_finite() {
        return f64::INFINITY;
    }
    let inp = l2_norm(input);
    if inp > 0.0 {
        out / inp
    } else if out > 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}

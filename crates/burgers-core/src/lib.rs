//! Time integration of the 1D viscous Burgers equation
//! `∂u/∂t + u ∂u/∂x = ν ∂²u/∂x²` on a periodic grid.
//!
//! Propagators: exact spectral diffusion, RK2 midpoint advection.
//! Integrators: Lie (baseline) and Strang (HSE) compositions.
//! Drivers: baseline, HSE, QTN (HSE + MPS snapshot compression), Cole–Hopf reference.

pub mod advection;
pub mod diffusion;
pub mod driver;
pub mod initial;
pub mod integrator;
pub mod reference;
pub mod schedule;

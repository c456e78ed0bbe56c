//! Compositions of the diffusion and advection propagators.
//!
//! - [`BaselineIntegrator`]: Lie splitting, full advection then full
//!   diffusion. First order in time, one diffusion transform pair per step.
//! - [`StrangIntegrator`]: `D(dt/2) ∘ A(dt) ∘ D(dt/2)`. Second order in time.

use crate::advection::AdvectionStepper;
use crate::diffusion::DiffusionPropagator;
use burgers_types::config::DerivativeScheme;
use burgers_types::state::Grid1D;
use ndarray::Array1;

/// Result of one full time step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub state: Array1<f64>,
    /// L2 growth of the advection sub-step.
    pub advection_growth: f64,
}

/// A one-step map `u(t) → u(t + dt)`.
pub trait Integrator {
    fn name(&self) -> &'static str;

    fn step(&self, u: &Array1<f64>, dt: f64) -> StepOutcome;
}

#[derive(Debug, Clone)]
pub struct BaselineIntegrator {
    nu: f64,
    diffusion: DiffusionPropagator,
    advection: AdvectionStepper,
}

impl BaselineIntegrator {
    pub fn new(grid: &Grid1D, nu: f64, scheme: DerivativeScheme) -> Self {
        BaselineIntegrator {
            nu,
            diffusion: DiffusionPropagator::new(grid),
            advection: AdvectionStepper::new(grid, scheme),
        }
    }
}

impl Integrator for BaselineIntegrator {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn step(&self, u: &Array1<f64>, dt: f64) -> StepOutcome {
        let advected = self.advection.step(u, dt);
        StepOutcome {
            state: self.diffusion.propagate(&advected.state, self.nu, dt),
            advection_growth: advected.growth,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StrangIntegrator {
    nu: f64,
    diffusion: DiffusionPropagator,
    advection: AdvectionStepper,
}

impl StrangIntegrator {
    pub fn new(grid: &Grid1D, nu: f64, scheme: DerivativeScheme) -> Self {
        StrangIntegrator {
            nu,
            diffusion: DiffusionPropagator::new(grid),
            advection: AdvectionStepper::new(grid, scheme),
        }
    }
}

impl Integrator for StrangIntegrator {
    fn name(&self) -> &'static str {
        "hse"
    }

    fn step(&self, u: &Array1<f64>, dt: f64) -> StepOutcome {
        let half = 0.5 * dt;
        let first = self.diffusion.propagate(u, self.nu, half);
        let advected = self.advection.step(&first, dt);
        StepOutcome {
            state: self.diffusion.propagate(&advected.state, self.nu, half),
            advection_growth: advected.growth,
        }
    }
}

//! Step scheduling with exact landing on requested output times.
//!
//! Between the current time `t` and the next target `t*`, the marcher takes
//! `n = ceil((t* - t) / dt)` equal sub-steps of size `(t* - t) / n ≤ dt`.
//! Snapshots are therefore never interpolated: every captured field is an
//! integrator output at exactly the requested time.

use crate::integrator::Integrator;
use burgers_types::config::SolverParams;
use burgers_types::state::{InstabilityWarning, Snapshot};
use ndarray::Array1;

/// Slack on `(t* - t) / dt` so that round-off in e.g. `0.05 / 0.001` does
/// not add a spurious extra step.
const STEP_COUNT_SLACK: f64 = 1e-9;

/// Outcome of marching one field through a schedule.
#[derive(Debug, Clone)]
pub struct March {
    pub snapshots: Vec<Snapshot>,
    pub steps: usize,
    pub final_state: Array1<f64>,
    pub instability: Option<InstabilityWarning>,
}

/// Number of sub-steps needed to cover `span` with steps no larger than `dt`.
pub fn substeps(span: f64, dt: f64) -> usize {
    if span <= 0.0 {
        return 0;
    }
    ((span / dt - STEP_COUNT_SLACK).ceil() as usize).max(1)
}

/// Advance `u0` from `t = 0` to `params.final_time`, capturing a snapshot at
/// each requested output time.
///
/// `params` is assumed validated. The first step whose advection growth
/// exceeds `params.blowup_factor` is recorded and logged; marching continues.
pub fn march<I: Integrator>(integrator: &I, params: &SolverParams, u0: Array1<f64>) -> March {
    let mut u = u0;
    let mut t = 0.0;
    let mut steps = 0;
    let mut snapshots = Vec::with_capacity(params.output_times.len());
    let mut instability = None;

    let targets = params
        .output_times
        .iter()
        .map(|&t_out| (t_out, true))
        .chain(std::iter::once((params.final_time, false)));

    for (target, capture) in targets {
        let n = substeps(target - t, params.dt);
        if n > 0 {
            let start = t;
            let h = (target - start) / n as f64;
            for i in 0..n {
                let outcome = integrator.step(&u, h);
                let growth = outcome.advection_growth;
                if instability.is_none() && !(growth <= params.blowup_factor) {
                    let t_step = start + i as f64 * h;
                    log::warn!(
                        "{}: advection blow-up at step {steps} (t={t_step:.6}), growth {growth:.3e}",
                        integrator.name()
                    );
                    instability = Some(InstabilityWarning {
                        step: steps,
                        time: t_step,
                        growth,
                    });
                }
                u = outcome.state;
                steps += 1;
            }
            t = target;
        }

        if capture {
            snapshots.push(Snapshot {
                time: target,
                state: u.clone(),
            });
        }
    }

    March {
        snapshots,
        steps,
        final_state: u,
        instability,
    }
}

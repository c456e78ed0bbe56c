// ─────────────────────────────────────────────────────────────────────
// SCPN Burgers Core — Solver Drivers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Solver drivers: baseline, HSE (Strang), QTN (Strang + MPS snapshots)
//! and the Cole–Hopf reference.
//!
//! Every driver is a pure function of its inputs apart from the wall-clock
//! measurement: the same params, grid and initial condition give
//! bit-identical snapshots.

use crate::initial::sample_initial;
use crate::integrator::{BaselineIntegrator, Integrator, StrangIntegrator};
use crate::reference::ColeHopf;
use crate::schedule::{march, March};
use burgers_math::norms::l2_relative_error;
use burgers_qtn::mps::MpsCompressor;
use burgers_types::config::{MpsConfig, RunConfig, SolverParams};
use burgers_types::error::{BurgersError, BurgersResult};
use burgers_types::state::{Grid1D, RunResult, Snapshot};
use ndarray::Array1;
use std::time::Instant;

/// Solver variants exposed to sweep drivers.
#[derive(Debug, Clone, PartialEq)]
pub enum Solver {
    Baseline,
    Hse,
    Qtn(MpsConfig),
    ColeHopf,
}

impl Solver {
    pub fn name(&self) -> &'static str {
        match self {
            Solver::Baseline => "baseline",
            Solver::Hse => "hse",
            Solver::Qtn(_) => "qtn",
            Solver::ColeHopf => "cole_hopf",
        }
    }

    pub fn run<F: Fn(f64) -> f64>(
        &self,
        params: &SolverParams,
        grid: &Grid1D,
        initial_condition: F,
    ) -> BurgersResult<RunResult> {
        match self {
            Solver::Baseline => run_baseline(params, grid, initial_condition),
            Solver::Hse => run_hse(params, grid, initial_condition),
            Solver::Qtn(mps) => run_qtn(params, grid, initial_condition, mps),
            Solver::ColeHopf => run_cole_hopf(params, grid, initial_condition),
        }
    }
}

/// Run a config loaded from JSON. `Qtn` falls back to the config's `mps`
/// section when present.
pub fn run_config(config: &RunConfig, solver: &Solver) -> BurgersResult<RunResult> {
    let grid = config.create_grid()?;
    let ic = config.initial_condition;
    let solver = match (solver, &config.mps) {
        (Solver::Qtn(_), Some(mps)) => Solver::Qtn(mps.clone()),
        _ => solver.clone(),
    };
    solver.run(&config.solver, &grid, |x| ic.evaluate(x))
}

fn run_dense<I: Integrator>(
    integrator: &I,
    params: &SolverParams,
    grid: &Grid1D,
    u0: Array1<f64>,
) -> March {
    log::debug!(
        "{}: nx={} nu={} dt={} T={} outputs={}",
        integrator.name(),
        grid.nx(),
        params.nu,
        params.dt,
        params.final_time,
        params.output_times.len()
    );
    let marched = march(integrator, params, u0);
    log::debug!("{}: finished after {} steps", integrator.name(), marched.steps);
    marched
}

fn dense_result(solver: &str, marched: March, runtime_seconds: f64) -> RunResult {
    RunResult {
        solver: solver.to_string(),
        snapshots: marched.snapshots,
        runtime_seconds,
        steps: marched.steps,
        compression_ratios: Vec::new(),
        reconstruction_errors: Vec::new(),
        instability: marched.instability,
    }
}

/// Classical reference: Lie-split advection + exact diffusion.
pub fn run_baseline<F: Fn(f64) -> f64>(
    params: &SolverParams,
    grid: &Grid1D,
    initial_condition: F,
) -> BurgersResult<RunResult> {
    params.validate()?;
    let start = Instant::now();
    let integrator = BaselineIntegrator::new(grid, params.nu, params.scheme);
    let u0 = sample_initial(grid, initial_condition, params.noise.as_ref());
    let marched = run_dense(&integrator, params, grid, u0);
    Ok(dense_result(
        integrator.name(),
        marched,
        start.elapsed().as_secs_f64(),
    ))
}

/// Strang-split solver (half diffusion, full advection, half diffusion).
pub fn run_hse<F: Fn(f64) -> f64>(
    params: &SolverParams,
    grid: &Grid1D,
    initial_condition: F,
) -> BurgersResult<RunResult> {
    params.validate()?;
    let start = Instant::now();
    let integrator = StrangIntegrator::new(grid, params.nu, params.scheme);
    let u0 = sample_initial(grid, initial_condition, params.noise.as_ref());
    let marched = run_dense(&integrator, params, grid, u0);
    Ok(dense_result(
        integrator.name(),
        marched,
        start.elapsed().as_secs_f64(),
    ))
}

/// Strang-split solver whose snapshots are stored as MPS.
///
/// Each snapshot field is replaced by its MPS reconstruction and the
/// compression ratio and relative reconstruction error are appended. When
/// compression fails (e.g. `nx` doesn't factor into the configured sites)
/// the dense field is kept and both metrics are `NaN`. Integration itself
/// always continues on the dense field.
pub fn run_qtn<F: Fn(f64) -> f64>(
    params: &SolverParams,
    grid: &Grid1D,
    initial_condition: F,
    mps: &MpsConfig,
) -> BurgersResult<RunResult> {
    params.validate()?;
    mps.validate()?;
    let start = Instant::now();

    let compressor = match MpsCompressor::from_config(mps, grid.nx()) {
        Ok(c) => Some(c),
        Err(BurgersError::Factorization(msg)) => {
            log::warn!("qtn: compression disabled for this run: {msg}");
            None
        }
        Err(e) => return Err(e),
    };

    let integrator = StrangIntegrator::new(grid, params.nu, params.scheme);
    let u0 = sample_initial(grid, initial_condition, params.noise.as_ref());
    let marched = run_dense(&integrator, params, grid, u0);

    let mut snapshots = Vec::with_capacity(marched.snapshots.len());
    let mut ratios = Vec::with_capacity(marched.snapshots.len());
    let mut errors = Vec::with_capacity(marched.snapshots.len());

    for snap in marched.snapshots {
        match compressor.as_ref().map(|c| c.compress(&snap.state)) {
            Some(Ok(report)) => {
                ratios.push(report.compression_ratio);
                errors.push(report.reconstruction_error);
                snapshots.push(Snapshot {
                    time: snap.time,
                    state: report.reconstructed,
                });
            }
            Some(Err(e)) => {
                log::warn!("qtn: compression skipped at t={}: {e}", snap.time);
                ratios.push(f64::NAN);
                errors.push(f64::NAN);
                snapshots.push(snap);
            }
            None => {
                ratios.push(f64::NAN);
                errors.push(f64::NAN);
                snapshots.push(snap);
            }
        }
    }

    Ok(RunResult {
        solver: "qtn".to_string(),
        snapshots,
        runtime_seconds: start.elapsed().as_secs_f64(),
        steps: marched.steps,
        compression_ratios: ratios,
        reconstruction_errors: errors,
        instability: marched.instability,
    })
}

/// Exact-in-time Cole–Hopf solution at the requested output times.
///
/// Requires `nu > 0` and a zero-mean initial field.
pub fn run_cole_hopf<F: Fn(f64) -> f64>(
    params: &SolverParams,
    grid: &Grid1D,
    initial_condition: F,
) -> BurgersResult<RunResult> {
    params.validate()?;
    let start = Instant::now();
    let u0 = sample_initial(grid, initial_condition, params.noise.as_ref());
    let reference = ColeHopf::new(grid, &u0, params.nu)?;
    let snapshots = params
        .output_times
        .iter()
        .map(|&t| Snapshot {
            time: t,
            state: reference.evaluate(t),
        })
        .collect();
    Ok(RunResult {
        solver: "cole_hopf".to_string(),
        snapshots,
        runtime_seconds: start.elapsed().as_secs_f64(),
        steps: 0,
        compression_ratios: Vec::new(),
        reconstruction_errors: Vec::new(),
        instability: None,
    })
}

/// Relative L2 error of each snapshot of `result` against the snapshot of
/// `reference` at the same time. Times missing from `reference` are skipped.
pub fn relative_errors(result: &RunResult, reference: &RunResult) -> Vec<(f64, f64)> {
    result
        .snapshots
        .iter()
        .filter_map(|snap| {
            reference
                .snapshot_at(snap.time)
                .map(|r| (snap.time, l2_relative_error(&snap.state, &r.state)))
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────
// SCPN Burgers Core — End-to-End Solver Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Full runs of every driver on the canonical `-sin x` problem:
//! Nx = 64, L = 2π, ν = 0.1, dt = 1e-3, T = 0.1.

use burgers_core::advection::AdvectionStepper;
use burgers_core::driver::{
    relative_errors, run_baseline, run_cole_hopf, run_config, run_hse, run_qtn, Solver,
};
use burgers_math::norms::l2_relative_error;
use burgers_qtn::mps::MpsCompressor;
use burgers_qtn::sites::SiteDims;
use burgers_types::config::{DerivativeScheme, MpsConfig, RunConfig, SolverParams};
use burgers_types::state::Grid1D;
use std::f64::consts::PI;

fn canonical() -> (SolverParams, Grid1D) {
    (
        SolverParams::new(0.1, 1e-3, 0.1, vec![0.0, 0.05, 0.1]),
        Grid1D::new(64, 2.0 * PI).unwrap(),
    )
}

fn neg_sine(x: f64) -> f64 {
    -x.sin()
}

#[test]
fn baseline_and_hse_agree() {
    let (params, grid) = canonical();
    let baseline = run_baseline(&params, &grid, neg_sine).unwrap();
    let hse = run_hse(&params, &grid, neg_sine).unwrap();

    assert_eq!(baseline.times(), vec![0.0, 0.05, 0.1]);
    assert_eq!(hse.times(), vec![0.0, 0.05, 0.1]);
    assert_eq!(baseline.steps, 100);
    assert_eq!(hse.steps, 100);
    assert!(!baseline.is_unstable());
    assert!(!hse.is_unstable());

    let err = l2_relative_error(
        &hse.snapshot_at(0.1).unwrap().state,
        &baseline.snapshot_at(0.1).unwrap().state,
    );
    assert!(err < 1e-2, "baseline vs hse at T: {err}");
}

#[test]
fn solvers_track_cole_hopf() {
    let (params, grid) = canonical();
    let exact = run_cole_hopf(&params, &grid, neg_sine).unwrap();
    let hse = run_hse(&params, &grid, neg_sine).unwrap();
    let baseline = run_baseline(&params, &grid, neg_sine).unwrap();

    let hse_errs = relative_errors(&hse, &exact);
    let baseline_errs = relative_errors(&baseline, &exact);
    assert_eq!(hse_errs.len(), 3);
    assert_eq!(baseline_errs.len(), 3);
    for &(t, e) in &hse_errs {
        assert!(e < 1e-4, "hse error {e} at t={t}");
    }
    for &(t, e) in &baseline_errs {
        assert!(e < 1e-3, "baseline error {e} at t={t}");
    }
    // Strang is the more accurate splitting
    assert!(hse_errs[2].1 < baseline_errs[2].1);
}

#[test]
fn central_difference_converges_to_reference() {
    let (params, grid) = canonical();
    let params = params.with_scheme(DerivativeScheme::CentralDifference);
    let exact = run_cole_hopf(&params, &grid, neg_sine).unwrap();
    let hse = run_hse(&params, &grid, neg_sine).unwrap();
    let errs = relative_errors(&hse, &exact);
    assert!(errs[2].1 < 1e-2, "central difference error {}", errs[2].1);
}

#[test]
fn qtn_compresses_with_bounded_error() {
    let (params, grid) = canonical();
    let mps = MpsConfig::new(8, 1e-3).with_site_dims(vec![16, 4]);
    let qtn = run_qtn(&params, &grid, neg_sine, &mps).unwrap();

    assert_eq!(qtn.solver, "qtn");
    assert_eq!(qtn.compression_ratios.len(), 3);
    assert_eq!(qtn.reconstruction_errors.len(), 3);

    // -sin x unfolds to rank 2: 16·2 + 2·4 = 40 stored values
    assert!((qtn.compression_ratios[0] - 1.6).abs() < 1e-12);

    let ratio = qtn.compression_ratios[2];
    let error = qtn.reconstruction_errors[2];
    assert!(ratio > 1.0, "ratio at T: {ratio}");
    assert!(error < 1e-3, "reconstruction error at T: {error}");

    // Stored snapshots stay close to the dense HSE fields
    let hse = run_hse(&params, &grid, neg_sine).unwrap();
    for (t, e) in relative_errors(&qtn, &hse) {
        assert!(e < 1e-3, "qtn vs hse {e} at t={t}");
    }
}

#[test]
fn qtn_quantics_layout_is_lossless_when_uncapped() {
    let (params, grid) = canonical();
    let qtn = run_qtn(&params, &grid, neg_sine, &MpsConfig::new(64, 0.0)).unwrap();
    assert!(qtn.reconstruction_errors.iter().all(|&e| e < 1e-10));
    assert!(qtn.mean_compression_ratio().is_some());
}

#[test]
fn bond_dimension_sweep_is_monotone() {
    let (params, grid) = canonical();
    let hse = run_hse(&params, &grid, neg_sine).unwrap();
    let field = &hse.snapshot_at(0.1).unwrap().state;

    for dims in [SiteDims::new(vec![16, 4]).unwrap(), SiteDims::binary(64).unwrap()] {
        let sweep: Vec<(f64, f64)> = (1..=8)
            .map(|chi| {
                let result = MpsCompressor::new(dims.clone(), chi, 0.0)
                    .unwrap()
                    .compress(field)
                    .unwrap();
                (result.reconstruction_error, result.compression_ratio)
            })
            .collect();

        for (chi, pair) in sweep.windows(2).enumerate() {
            let ((e_lo, r_lo), (e_hi, r_hi)) = (pair[0], pair[1]);
            assert!(
                e_hi <= e_lo + 1e-12,
                "{:?}: error rose from {e_lo:.3e} to {e_hi:.3e} at χ = {}",
                dims.as_slice(),
                chi + 2
            );
            assert!(
                r_hi <= r_lo,
                "{:?}: ratio rose from {r_lo} to {r_hi} at χ = {}",
                dims.as_slice(),
                chi + 2
            );
        }
        // χ = 1 is lossy; the largest χ is not
        assert!(sweep[0].0 > 1e-3, "{:?}: χ = 1 error {}", dims.as_slice(), sweep[0].0);
        assert!(sweep[7].0 < 1e-6, "{:?}: χ = 8 error {}", dims.as_slice(), sweep[7].0);
    }
}

#[test]
fn runs_are_bit_identical() {
    let (params, grid) = canonical();
    let params = params.with_noise(0.01, 7);
    let mps = MpsConfig::new(4, 1e-4);

    for solver in [Solver::Baseline, Solver::Hse, Solver::Qtn(mps)] {
        let a = solver.run(&params, &grid, neg_sine).unwrap();
        let b = solver.run(&params, &grid, neg_sine).unwrap();
        assert_eq!(a.snapshots, b.snapshots, "{} snapshots differ", solver.name());
        assert_eq!(a.compression_ratios, b.compression_ratios);
        assert_eq!(a.reconstruction_errors, b.reconstruction_errors);
        assert_eq!(a.steps, b.steps);
    }
}

#[test]
fn inviscid_hse_is_pure_advection() {
    let grid = Grid1D::new(64, 2.0 * PI).unwrap();
    let params = SolverParams::new(0.0, 1e-3, 0.1, vec![0.1]);
    let hse = run_hse(&params, &grid, |x| -0.5 * x.sin()).unwrap();

    let stepper = AdvectionStepper::new(&grid, DerivativeScheme::Spectral);
    let mut u = grid.sample(|x| -0.5 * x.sin());
    let h = 0.1 / 100.0;
    for _ in 0..100 {
        u = stepper.step(&u, h).state;
    }
    let err = l2_relative_error(&hse.snapshots[0].state, &u);
    assert!(err < 1e-12, "inviscid hse vs advection: {err}");
}

#[test]
fn zero_field_stays_zero() {
    let (params, grid) = canonical();
    for solver in [
        Solver::Baseline,
        Solver::Hse,
        Solver::Qtn(MpsConfig::default()),
        Solver::ColeHopf,
    ] {
        let result = solver.run(&params, &grid, |_| 0.0).unwrap();
        for snap in &result.snapshots {
            assert!(
                snap.state.iter().all(|&v| v == 0.0),
                "{} drifted from zero at t={}",
                solver.name(),
                snap.time
            );
        }
        assert!(!result.is_unstable());
    }
}

#[test]
fn oversized_step_is_flagged_not_fatal() {
    let grid = Grid1D::new(64, 2.0 * PI).unwrap();
    let params = SolverParams::new(0.01, 0.5, 1.0, vec![1.0]);
    let result = run_baseline(&params, &grid, |x| -10.0 * x.sin()).unwrap();

    assert!(result.is_unstable());
    let warning = result.instability.unwrap();
    assert_eq!(warning.step, 0);
    assert!(warning.growth > params.blowup_factor);
    assert_eq!(result.steps, 2);
    assert_eq!(result.snapshots.len(), 1);
}

#[test]
fn config_file_drives_a_run() {
    let json = r#"{
        "grid": { "nx": 64 },
        "solver": {
            "nu": 0.1,
            "dt": 0.001,
            "final_time": 0.05,
            "output_times": [0.0, 0.05]
        },
        "initial_condition": { "kind": "sine", "amplitude": -1.0, "wavenumber": 1.0 }
    }"#;
    let path = std::env::temp_dir().join(format!("burgers_config_{}.json", std::process::id()));
    std::fs::write(&path, json).unwrap();
    let config = RunConfig::from_file(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).ok();

    let from_file = run_config(&config, &Solver::Hse).unwrap();
    let (_, grid) = canonical();
    let direct = run_hse(&config.solver, &grid, neg_sine).unwrap();
    assert_eq!(from_file.snapshots, direct.snapshots);
}

#[test]
fn run_result_persists_as_json() {
    let (params, grid) = canonical();
    let hse = run_hse(&params, &grid, neg_sine).unwrap();
    let json = serde_json::to_string(&hse).unwrap();
    let back: burgers_types::state::RunResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.solver, "hse");
    assert_eq!(back.times(), hse.times());
    assert_eq!(back.steps, hse.steps);
    let err = l2_relative_error(&back.last().unwrap().state, &hse.last().unwrap().state);
    assert!(err < 1e-15);
}

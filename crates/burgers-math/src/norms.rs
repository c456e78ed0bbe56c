//! Vector norms and error metrics shared by solvers and reporting.

use ndarray::Array1;

pub fn l2_norm(u: &Array1<f64>) -> f64 {
    u.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// ‖approx - reference‖₂ / ‖reference‖₂.
///
/// Falls back to the absolute difference norm when the reference is zero.
pub fn l2_relative_error(approx: &Array1<f64>, reference: &Array1<f64>) -> f64 {
    let diff: f64 = approx
        .iter()
        .zip(reference.iter())
        .map(|(a, r)| (a - r) * (a - r))
        .sum::<f64>()
        .sqrt();
    let ref_norm = l2_norm(reference);
    if ref_norm > 0.0 {
        diff / ref_norm
    } else {
        diff
    }
}

/// max |approx - reference|
pub fn linf_error(approx: &Array1<f64>, reference: &Array1<f64>) -> f64 {
    approx
        .iter()
        .zip(reference.iter())
        .fold(0.0_f64, |acc, (a, r)| acc.max((a - r).abs()))
}

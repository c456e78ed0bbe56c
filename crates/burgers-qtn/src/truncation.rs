//! Deterministic singular-value truncation.

use ndarray::Array1;

/// Number of singular values to keep at one junction.
///
/// `sigma` must be sorted descending. The smallest values are discarded,
/// last index first, while the relative discarded mass
/// `sqrt(Σ σ_discarded²) / sqrt(Σ σ²)` stays within `tolerance`; the result
/// is then capped at `max_rank`. At least one value is always kept.
pub fn truncation_rank(sigma: &Array1<f64>, max_rank: usize, tolerance: f64) -> usize {
    let n = sigma.len();
    if n == 0 {
        return 0;
    }
    let total_sq: f64 = sigma.iter().map(|s| s * s).sum();
    let budget_sq = tolerance * tolerance * total_sq;

    let mut kept = n;
    let mut discarded_sq = 0.0;
    while kept > 1 {
        let s = sigma[kept - 1];
        let next = discarded_sq + s * s;
        if next > budget_sq {
            break;
        }
        discarded_sq = next;
        kept -= 1;
    }

    kept.min(max_rank).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_truncation_at_zero_tolerance() {
        let sigma = Array1::from(vec![3.0, 2.0, 1.0]);
        assert_eq!(truncation_rank(&sigma, 10, 0.0), 3);
    }

    #[test]
    fn test_exact_zeros_dropped() {
        let sigma = Array1::from(vec![3.0, 1.0, 0.0, 0.0]);
        assert_eq!(truncation_rank(&sigma, 10, 0.0), 2);
    }

    #[test]
    fn test_max_rank_cap() {
        let sigma = Array1::from(vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(truncation_rank(&sigma, 2, 0.0), 2);
        assert_eq!(truncation_rank(&sigma, 0, 0.0), 1);
    }

    #[test]
    fn test_tolerance_bound() {
        // total² = 100 + 1 + 0.01; dropping 0.1 costs ~0.00995 relative,
        // dropping 1.0 as well costs ~0.1
        let sigma = Array1::from(vec![10.0, 1.0, 0.1]);
        assert_eq!(truncation_rank(&sigma, 10, 0.01), 2);
        assert_eq!(truncation_rank(&sigma, 10, 0.2), 1);
        assert_eq!(truncation_rank(&sigma, 10, 1e-4), 3);
    }

    #[test]
    fn test_tighter_bound_wins() {
        let sigma = Array1::from(vec![10.0, 1.0, 0.1]);
        // tolerance allows 2, cap allows 1
        assert_eq!(truncation_rank(&sigma, 1, 0.01), 1);
        // cap allows 3, tolerance allows 2
        assert_eq!(truncation_rank(&sigma, 3, 0.01), 2);
    }

    #[test]
    fn test_all_zero_keeps_one() {
        let sigma = Array1::from(vec![0.0, 0.0]);
        assert_eq!(truncation_rank(&sigma, 4, 0.0), 1);
    }
}

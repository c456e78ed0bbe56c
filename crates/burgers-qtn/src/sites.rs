//! Site factorizations `Nx = d₁·d₂·…·dₙ`.

use burgers_types::config::MpsConfig;
use burgers_types::error::{BurgersError, BurgersResult};

/// Physical dimensions of the MPS sites, most significant index first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDims(Vec<usize>);

impl SiteDims {
    pub fn new(dims: Vec<usize>) -> BurgersResult<Self> {
        if dims.is_empty() {
            return Err(BurgersError::Factorization(
                "site dimensions must not be empty".to_string(),
            ));
        }
        if let Some(pos) = dims.iter().position(|&d| d == 0) {
            return Err(BurgersError::Factorization(format!(
                "site dimension {pos} is zero"
            )));
        }
        Ok(SiteDims(dims))
    }

    /// Quantics layout: `nx = 2ⁿ`, every site of dimension 2.
    pub fn binary(nx: usize) -> BurgersResult<Self> {
        if nx < 2 || !nx.is_power_of_two() {
            return Err(BurgersError::Factorization(format!(
                "nx={nx} is not a power of two >= 2"
            )));
        }
        let n = nx.trailing_zeros() as usize;
        Ok(SiteDims(vec![2; n]))
    }

    /// Site layout requested by a config, checked against `nx`.
    pub fn from_config(config: &MpsConfig, nx: usize) -> BurgersResult<Self> {
        let dims = match &config.site_dims {
            Some(dims) => SiteDims::new(dims.clone())?,
            None => SiteDims::binary(nx)?,
        };
        dims.check(nx)?;
        Ok(dims)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Product of all site dimensions. `None` on overflow.
    pub fn total(&self) -> Option<usize> {
        self.0.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    pub fn check(&self, nx: usize) -> BurgersResult<()> {
        match self.total() {
            Some(total) if total == nx => Ok(()),
            Some(total) => Err(BurgersError::Factorization(format!(
                "site dimensions {:?} multiply to {total}, field has {nx} points",
                self.0
            ))),
            None => Err(BurgersError::Factorization(format!(
                "site dimensions {:?} overflow usize",
                self.0
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_factorization() {
        let dims = SiteDims::binary(64).unwrap();
        assert_eq!(dims.as_slice(), &[2, 2, 2, 2, 2, 2]);
        assert_eq!(dims.total(), Some(64));
        assert!(SiteDims::binary(48).is_err());
        assert!(SiteDims::binary(1).is_err());
    }

    #[test]
    fn test_custom_dims_checked() {
        let dims = SiteDims::new(vec![16, 4]).unwrap();
        assert!(dims.check(64).is_ok());
        assert!(matches!(
            dims.check(60),
            Err(BurgersError::Factorization(_))
        ));
        assert!(SiteDims::new(vec![]).is_err());
        assert!(SiteDims::new(vec![4, 0]).is_err());
    }

    #[test]
    fn test_from_config() {
        let cfg = MpsConfig::new(4, 1e-6);
        assert_eq!(SiteDims::from_config(&cfg, 32).unwrap().len(), 5);
        assert!(SiteDims::from_config(&cfg, 24).is_err());

        let cfg = cfg.with_site_dims(vec![2, 3, 4]);
        assert!(SiteDims::from_config(&cfg, 24).is_ok());
        assert!(SiteDims::from_config(&cfg, 32).is_err());
    }

    #[test]
    fn test_overflow_detected() {
        let dims = SiteDims::new(vec![usize::MAX, 2]).unwrap();
        assert_eq!(dims.total(), None);
        assert!(dims.check(16).is_err());
    }
}

// ─────────────────────────────────────────────────────────────────────
// SCPN Burgers Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{BurgersError, BurgersResult};
use crate::state::Grid1D;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Top-level run configuration, as loaded by sweep drivers from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub solver: SolverParams,
    #[serde(default)]
    pub initial_condition: InitialCondition,
    /// Compression settings for the QTN solver. Absent for dense-only runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mps: Option<MpsConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridConfig {
    pub nx: usize,
    #[serde(default = "default_length")]
    pub length: f64,
}

fn default_length() -> f64 {
    2.0 * PI
}

/// Spatial derivative used by the advection term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivativeScheme {
    /// ∂ₓu = F⁻¹[i k F[u]], Nyquist mode zeroed.
    #[default]
    Spectral,
    /// Second-order periodic central difference.
    CentralDifference,
}

/// Seeded Gaussian perturbation added to the sampled initial condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub scale: f64,
    #[serde(default)]
    pub seed: u64,
}

/// Read-only parameters of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverParams {
    /// Viscosity ν.
    pub nu: f64,
    pub dt: f64,
    pub final_time: f64,
    /// Ascending, inside `[0, final_time]`.
    #[serde(default)]
    pub output_times: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseConfig>,
    #[serde(default)]
    pub scheme: DerivativeScheme,
    /// Per-step ‖u_out‖/‖u_in‖ above which the advection step is flagged.
    #[serde(default = "default_blowup_factor")]
    pub blowup_factor: f64,
}

fn default_blowup_factor() -> f64 {
    1.5
}

impl SolverParams {
    pub fn new(nu: f64, dt: f64, final_time: f64, output_times: Vec<f64>) -> Self {
        SolverParams {
            nu,
            dt,
            final_time,
            output_times,
            noise: None,
            scheme: DerivativeScheme::default(),
            blowup_factor: default_blowup_factor(),
        }
    }

    pub fn with_noise(mut self, scale: f64, seed: u64) -> Self {
        self.noise = Some(NoiseConfig { scale, seed });
        self
    }

    pub fn with_scheme(mut self, scheme: DerivativeScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn validate(&self) -> BurgersResult<()> {
        if !self.nu.is_finite() || self.nu < 0.0 {
            return Err(BurgersError::InvalidParams(format!(
                "viscosity must be finite and >= 0, got {}",
                self.nu
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(BurgersError::InvalidParams(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if !self.final_time.is_finite() || self.final_time < 0.0 {
            return Err(BurgersError::InvalidParams(format!(
                "final_time must be finite and >= 0, got {}",
                self.final_time
            )));
        }
        if !(self.blowup_factor > 1.0) {
            return Err(BurgersError::InvalidParams(format!(
                "blowup_factor must be > 1, got {}",
                self.blowup_factor
            )));
        }
        for (i, &t) in self.output_times.iter().enumerate() {
            if !t.is_finite() || t < 0.0 || t > self.final_time {
                return Err(BurgersError::InvalidParams(format!(
                    "output time {t} outside [0, {}]",
                    self.final_time
                )));
            }
            if i > 0 && t < self.output_times[i - 1] {
                return Err(BurgersError::InvalidParams(
                    "output times must be ascending".to_string(),
                ));
            }
        }
        if let Some(noise) = &self.noise {
            if !noise.scale.is_finite() || noise.scale < 0.0 {
                return Err(BurgersError::InvalidParams(format!(
                    "noise scale must be finite and >= 0, got {}",
                    noise.scale
                )));
            }
        }
        Ok(())
    }
}

/// Named initial fields for config-driven runs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialCondition {
    /// u₀(x) = -sin(x)
    #[default]
    NegativeSine,
    /// u₀(x) = A sin(m x)
    Sine { amplitude: f64, wavenumber: f64 },
    /// u₀(x) = A exp(-(x - c)² / (2 w²))
    Gaussian {
        amplitude: f64,
        center: f64,
        width: f64,
    },
}

impl InitialCondition {
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            InitialCondition::NegativeSine => -x.sin(),
            InitialCondition::Sine {
                amplitude,
                wavenumber,
            } => amplitude * (wavenumber * x).sin(),
            InitialCondition::Gaussian {
                amplitude,
                center,
                width,
            } => {
                let d = x - center;
                amplitude * (-d * d / (2.0 * width * width)).exp()
            }
        }
    }
}

/// Tensor-train compression bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MpsConfig {
    /// Site dimensions whose product must equal `nx`. `None` = all twos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_dims: Option<Vec<usize>>,
    /// χ: maximum bond dimension kept at every junction.
    #[serde(default = "default_max_bond_dim")]
    pub max_bond_dim: usize,
    /// ε: relative discarded singular-value mass allowed per junction.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_max_bond_dim() -> usize {
    8
}
fn default_tolerance() -> f64 {
    1e-6
}

impl Default for MpsConfig {
    fn default() -> Self {
        MpsConfig {
            site_dims: None,
            max_bond_dim: default_max_bond_dim(),
            tolerance: default_tolerance(),
        }
    }
}

impl MpsConfig {
    pub fn new(max_bond_dim: usize, tolerance: f64) -> Self {
        MpsConfig {
            site_dims: None,
            max_bond_dim,
            tolerance,
        }
    }

    pub fn with_site_dims(mut self, dims: Vec<usize>) -> Self {
        self.site_dims = Some(dims);
        self
    }

    pub fn validate(&self) -> BurgersResult<()> {
        if self.max_bond_dim == 0 {
            return Err(BurgersError::InvalidParams(
                "max_bond_dim must be >= 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(BurgersError::InvalidParams(format!(
                "tolerance must be finite and >= 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl RunConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> BurgersResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> BurgersResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.solver.validate()?;
        if let Some(mps) = &config.mps {
            mps.validate()?;
        }
        Ok(config)
    }

    pub fn create_grid(&self) -> BurgersResult<Grid1D> {
        Grid1D::new(self.grid.nx, self.grid.length)
    }
}

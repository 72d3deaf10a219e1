//! Energy sensitivity to terrain orientation
//!
//! Evaluates the energy model over a regular slope × aspect grid at a fixed
//! irradiance, giving the numbers behind "how much does a site lose by facing
//! the wrong way" comparisons.

use ndarray::Array2;
use terrasun_core::geo::linspace;
use terrasun_core::{Error, Result};
use tracing::debug;

use super::model::{energy_production, EnergyParams};

/// Parameters of the sensitivity grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityParams {
    /// Site latitude in degrees (default -45)
    pub latitude: f64,
    /// Irradiance in W/m² (default 1000, clear-sky peak)
    pub irradiance: f64,
    /// Number of slopes from 0 to `max_slope` (default 10)
    pub slope_steps: usize,
    /// Largest slope in degrees (default 45)
    pub max_slope: f64,
    /// Number of aspects from 0 to `max_aspect` (default 36)
    pub aspect_steps: usize,
    /// Largest aspect in degrees (default 359)
    pub max_aspect: f64,
    pub energy: EnergyParams,
}

impl Default for SensitivityParams {
    fn default() -> Self {
        Self {
            latitude: -45.0,
            irradiance: 1000.0,
            slope_steps: 10,
            max_slope: 45.0,
            aspect_steps: 36,
            max_aspect: 359.0,
            energy: EnergyParams::default(),
        }
    }
}

/// Energy over a slope × aspect grid
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityMatrix {
    /// Slope axis in degrees
    pub slopes: Vec<f64>,
    /// Aspect axis in degrees
    pub aspects: Vec<f64>,
    /// Energy in W, shape `(aspects, slopes)`
    pub energy: Array2<f64>,
    /// Energy as a percentage of the grid maximum, same shape
    pub relative: Array2<f64>,
}

impl SensitivityMatrix {
    /// Largest energy in the grid
    pub fn max_energy(&self) -> f64 {
        self.energy.iter().copied().fold(0.0, f64::max)
    }

    /// `(slope, aspect, energy)` of the best grid cell; the first one wins ties
    pub fn optimum(&self) -> Option<(f64, f64, f64)> {
        let mut best: Option<(f64, f64, f64)> = None;
        for ((ai, si), &e) in self.energy.indexed_iter() {
            if best.map_or(true, |(_, _, b)| e > b) {
                best = Some((self.slopes[si], self.aspects[ai], e));
            }
        }
        best
    }

    /// Relative energy against aspect for the grid slope closest to `slope`.
    ///
    /// Returns the grid slope actually used with the column, or `None` for an
    /// empty grid.
    pub fn curve(&self, slope: f64) -> Option<(f64, Vec<f64>)> {
        let si = self
            .slopes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - slope).abs().total_cmp(&(*b - slope).abs()))
            .map(|(i, _)| i)?;
        Some((self.slopes[si], self.relative.column(si).to_vec()))
    }
}

/// Evaluate the energy model over the sensitivity grid.
///
/// # Errors
///
/// [`Error::InvalidParameter`] for empty axes, non-finite latitude or
/// irradiance, or invalid panel parameters.
pub fn sensitivity_matrix(params: &SensitivityParams) -> Result<SensitivityMatrix> {
    params.energy.validate()?;
    if params.slope_steps == 0 || params.aspect_steps == 0 {
        return Err(Error::InvalidParameter {
            name: "steps",
            value: format!("{} x {}", params.slope_steps, params.aspect_steps),
            reason: "both axes need at least one step".into(),
        });
    }
    if !params.latitude.is_finite() || !params.irradiance.is_finite() {
        return Err(Error::InvalidParameter {
            name: "latitude/irradiance",
            value: format!("{} / {}", params.latitude, params.irradiance),
            reason: "must be finite".into(),
        });
    }

    let slopes = linspace(0.0, params.max_slope, params.slope_steps);
    let aspects = linspace(0.0, params.max_aspect, params.aspect_steps);

    let energy = Array2::from_shape_fn((aspects.len(), slopes.len()), |(ai, si)| {
        energy_production(
            slopes[si],
            aspects[ai],
            params.irradiance,
            params.latitude,
            &params.energy,
        )
    });

    let max = energy.iter().copied().fold(0.0, f64::max);
    let relative = if max > 0.0 {
        energy.mapv(|e| e / max * 100.0)
    } else {
        Array2::zeros(energy.dim())
    };

    debug!(
        "sensitivity grid {}x{} at latitude {}, max {:.2} W",
        slopes.len(),
        aspects.len(),
        params.latitude,
        max
    );

    Ok(SensitivityMatrix {
        slopes,
        aspects,
        energy,
        relative,
    })
}

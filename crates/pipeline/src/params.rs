//! Pipeline inputs

use terrasun_algorithms::energy::EnergyParams;
use terrasun_core::IrradianceSample;

/// Clear-sky peak irradiance, W/m²
pub const PEAK_IRRADIANCE: f64 = 1000.0;

/// Where the irradiance of each lattice point comes from
#[derive(Debug, Clone, Copy)]
pub enum IrradianceInput<'a> {
    /// Measured samples, interpolated onto the lattice
    Samples(&'a [IrradianceSample]),
    /// The same irradiance everywhere, W/m²
    Uniform(f64),
}

impl IrradianceInput<'_> {
    /// Uniform clear-sky peak irradiance
    pub fn peak() -> Self {
        IrradianceInput::Uniform(PEAK_IRRADIANCE)
    }
}

/// Parameters for a pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PipelineParams {
    /// Panel model (efficiency, area, aspect weighting)
    pub energy: EnergyParams,
}

impl PipelineParams {
    /// Defaults with optional panel overrides; `None` keeps the default
    pub fn with_panel(panel_efficiency: Option<f64>, panel_area: Option<f64>) -> Self {
        let defaults = EnergyParams::default();
        Self {
            energy: EnergyParams {
                panel_efficiency: panel_efficiency.unwrap_or(defaults.panel_efficiency),
                panel_area: panel_area.unwrap_or(defaults.panel_area),
                ..defaults
            },
        }
    }
}

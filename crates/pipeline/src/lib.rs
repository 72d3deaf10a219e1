//! # TerraSun Pipeline
//!
//! Single entry point for the terrain-to-energy computation:
//!
//! ```text
//! BoundingBox -> Lattice -> elevations -> slope/aspect
//!             -> irradiance per point -> energy per point -> EnergyTable
//! ```
//!
//! Every stage is a forward-only transform over lattice-ordered columns.
//! The only I/O is the elevation lookup, which is hidden behind
//! [`ElevationLookup`] and never fails on unavailable data.
//!
//! # Example
//!
//! ```ignore
//! use terrasun_cloud::SyntheticElevation;
//! use terrasun_pipeline::{estimate_energy, IrradianceInput};
//!
//! let table = estimate_energy(
//!     -26.0, -25.0, -71.0, -70.0, 30.0,
//!     None, None,
//!     &IrradianceInput::peak(),
//!     &SyntheticElevation::new(),
//! )?;
//! println!("{} points, {:.1} W total", table.len(), table.total_energy());
//! ```

mod params;
pub mod stages;

pub use params::{IrradianceInput, PipelineParams, PEAK_IRRADIANCE};
pub use terrasun_cloud::ElevationLookup;

use terrasun_core::{BoundingBox, EnergyTable, Lattice, Result};
use tracing::info;

use stages::{energy_stage, irradiance_stage, terrain_stage};

/// Run the full pipeline over a bounding box.
///
/// Panel parameters are validated before any elevation lookup.
pub fn run_pipeline(
    bbox: &BoundingBox,
    irradiance: &IrradianceInput<'_>,
    elevation: &dyn ElevationLookup,
    params: &PipelineParams,
) -> Result<EnergyTable> {
    params.energy.validate()?;

    let lattice = Lattice::from_bbox(bbox);
    let terrain = terrain_stage(&lattice, elevation)?;
    let (values, repaired) = irradiance_stage(&terrain, irradiance)?;
    let table = energy_stage(terrain, &values, repaired, params)?;

    info!(
        "estimated {} points ({} elevations, {} irradiance points repaired), total {:.1} W",
        table.len(),
        table.provenance,
        table.repaired_points,
        table.total_energy()
    );
    Ok(table)
}

/// Estimate energy production over a box given by its edges.
///
/// `panel_efficiency` and `panel_area` default to 0.2 and 1.0 m² when `None`.
/// The bounding box is validated before any I/O.
#[allow(clippy::too_many_arguments)]
pub fn estimate_energy(
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    resolution_m: f64,
    panel_efficiency: Option<f64>,
    panel_area: Option<f64>,
    irradiance: &IrradianceInput<'_>,
    elevation: &dyn ElevationLookup,
) -> Result<EnergyTable> {
    let bbox = BoundingBox::new(min_lat, max_lat, min_lon, max_lon, resolution_m)?;
    let params = PipelineParams::with_panel(panel_efficiency, panel_area);
    run_pipeline(&bbox, irradiance, elevation, &params)
}

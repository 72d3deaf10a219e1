//! The pipeline stages, each a separate step over lattice-ordered columns

use terrasun_algorithms::energy::{energy_production_grid, IrradianceValues};
use terrasun_algorithms::interpolation::interpolate_irradiance;
use terrasun_algorithms::terrain::{analyze_terrain, TerrainParams};
use terrasun_cloud::ElevationLookup;
use terrasun_core::{EnergyTable, Error, Lattice, Result, TerrainCell, TerrainTable};
use tracing::{debug, info};

use crate::params::{IrradianceInput, PipelineParams};

/// Elevations for the lattice turned into per-point slope and aspect
pub fn terrain_stage(lattice: &Lattice, elevation: &dyn ElevationLookup) -> Result<TerrainTable> {
    let data = elevation.elevations(lattice)?;
    let provenance = data.provenance();
    let dem = data.into_raster();
    if dem.shape() != lattice.shape() {
        return Err(Error::SizeMismatch {
            what: "elevation raster",
            expected: lattice.len(),
            actual: dem.len(),
        });
    }

    let params = TerrainParams::new(lattice.spacing());
    let surface = analyze_terrain(&dem, &params)?;

    let cells = lattice
        .points()
        .zip(surface.slope.data().iter().zip(surface.aspect.data().iter()))
        .map(|((latitude, longitude), (&slope, &aspect))| TerrainCell {
            latitude,
            longitude,
            slope,
            aspect,
        })
        .collect();

    info!(
        "terrain: {} x {} lattice, {} elevations",
        lattice.n_lon(),
        lattice.n_lat(),
        provenance
    );

    Ok(TerrainTable {
        cells,
        shape: lattice.shape(),
        provenance,
    })
}

/// Irradiance at every terrain cell, plus the number of repaired points
pub fn irradiance_stage(table: &TerrainTable, input: &IrradianceInput<'_>) -> Result<(Vec<f64>, usize)> {
    match *input {
        IrradianceInput::Uniform(value) => {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidParameter {
                    name: "irradiance",
                    value: value.to_string(),
                    reason: "uniform irradiance must be a non-negative number".into(),
                });
            }
            debug!("uniform irradiance {value} W/m²");
            Ok((vec![value; table.len()], 0))
        }
        IrradianceInput::Samples(samples) => {
            let targets: Vec<(f64, f64)> =
                table.cells.iter().map(|c| (c.latitude, c.longitude)).collect();
            let result = interpolate_irradiance(samples, &targets)?;
            Ok((result.values, result.repaired))
        }
    }
}

/// Add irradiance and energy to the terrain table
pub fn energy_stage(
    table: TerrainTable,
    irradiance: &[f64],
    repaired: usize,
    params: &PipelineParams,
) -> Result<EnergyTable> {
    let Some(latitude) = table.representative_latitude() else {
        return Err(Error::Algorithm("terrain table is empty".into()));
    };

    let energy = energy_production_grid(
        &table.slopes(),
        &table.aspects(),
        IrradianceValues::PerPoint(irradiance),
        latitude,
        &params.energy,
    )?;

    debug!("energy model at representative latitude {latitude:.4}");
    table.enrich(irradiance, &energy, repaired)
}

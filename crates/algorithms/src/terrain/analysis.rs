//! Slope and aspect from one gradient pass

use terrasun_core::raster::Raster;
use terrasun_core::{Algorithm, Error, Result};

use super::aspect::aspect_from_gradient;
use super::gradient::gradient;
use super::slope::slope_from_gradient;
use super::TerrainParams;

/// Per-cell terrain geometry, aligned with the input DEM
#[derive(Debug, Clone)]
pub struct TerrainSurface {
    /// Degrees from horizontal, [0, 90]
    pub slope: Raster<f64>,
    /// Degrees clockwise from north, [0, 360)
    pub aspect: Raster<f64>,
}

/// Combined slope/aspect algorithm
#[derive(Debug, Clone, Default)]
pub struct TerrainAnalysis;

impl Algorithm for TerrainAnalysis {
    type Input = Raster<f64>;
    type Output = TerrainSurface;
    type Params = TerrainParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "TerrainAnalysis"
    }

    fn description(&self) -> &'static str {
        "Derive slope and aspect from a lattice DEM"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        analyze_terrain(&input, &params)
    }
}

/// Compute slope and aspect of a DEM, sharing the gradient
pub fn analyze_terrain(dem: &Raster<f64>, params: &TerrainParams) -> Result<TerrainSurface> {
    let g = gradient(dem, params)?;
    let surface = TerrainSurface {
        slope: slope_from_gradient(&g),
        aspect: aspect_from_gradient(&g),
    };

    let stats = surface.slope.statistics();
    tracing::debug!(
        "terrain {}x{}: slope min={:?} max={:?} mean={:?}",
        dem.rows(),
        dem.cols(),
        stats.min,
        stats.max,
        stats.mean
    );

    Ok(surface)
}

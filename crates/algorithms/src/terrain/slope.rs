//! Slope calculation from lattice DEMs
//!
//! slope = atan(√((∂z/∂east)² + (∂z/∂north)²)), in degrees (0-90).

use terrasun_core::raster::Raster;
use terrasun_core::{Algorithm, Error, Result};

use super::gradient::{gradient, Gradient};
use super::TerrainParams;

/// Slope algorithm
#[derive(Debug, Clone, Default)]
pub struct Slope;

impl Algorithm for Slope {
    type Input = Raster<f64>;
    type Output = Raster<f64>;
    type Params = TerrainParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Slope"
    }

    fn description(&self) -> &'static str {
        "Calculate slope in degrees from a lattice DEM using central differences"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        slope(&input, &params)
    }
}

/// Calculate slope in degrees from a DEM
pub fn slope(dem: &Raster<f64>, params: &TerrainParams) -> Result<Raster<f64>> {
    let g = gradient(dem, params)?;
    Ok(slope_from_gradient(&g))
}

/// Slope in degrees from a precomputed gradient
pub fn slope_from_gradient(g: &Gradient) -> Raster<f64> {
    let data = ndarray::Zip::from(g.east.data())
        .and(g.north.data())
        .map_collect(|&gx, &gy| slope_degrees(gx, gy));
    Raster::from_array(data)
}

#[inline]
pub(crate) fn slope_degrees(gx: f64, gy: f64) -> f64 {
    gx.hypot(gy).atan().to_degrees()
}

//! Aspect calculation from lattice DEMs
//!
//! Aspect is the compass bearing of steepest descent, clockwise from north:
//! - 0° = North
//! - 90° = East
//! - 180° = South
//! - 270° = West
//!
//! The descent direction is `(-∂z/∂east, -∂z/∂north)`, so the bearing is
//! `atan2(-∂z/∂east, -∂z/∂north)` normalized into [0, 360). Flat cells get 0.
//! Edge cells use the same convention; only their differences are one-sided.

use terrasun_core::raster::Raster;
use terrasun_core::{Algorithm, Error, Result};

use super::gradient::{gradient, Gradient};
use super::TerrainParams;

/// Gradient magnitude below which a cell is treated as flat
const FLAT_THRESHOLD: f64 = 1e-12;

/// Aspect algorithm
#[derive(Debug, Clone, Default)]
pub struct Aspect;

impl Algorithm for Aspect {
    type Input = Raster<f64>;
    type Output = Raster<f64>;
    type Params = TerrainParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Aspect"
    }

    fn description(&self) -> &'static str {
        "Calculate aspect (bearing of steepest descent) from a lattice DEM"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        aspect(&input, &params)
    }
}

/// Calculate aspect in degrees from a DEM
pub fn aspect(dem: &Raster<f64>, params: &TerrainParams) -> Result<Raster<f64>> {
    let g = gradient(dem, params)?;
    Ok(aspect_from_gradient(&g))
}

/// Aspect in degrees from a precomputed gradient
pub fn aspect_from_gradient(g: &Gradient) -> Raster<f64> {
    let data = ndarray::Zip::from(g.east.data())
        .and(g.north.data())
        .map_collect(|&gx, &gy| aspect_degrees(gx, gy));
    Raster::from_array(data)
}

#[inline]
pub(crate) fn aspect_degrees(gx: f64, gy: f64) -> f64 {
    if gx.hypot(gy) < FLAT_THRESHOLD {
        return 0.0;
    }
    // `+ 0.0` turns a due-north -0.0 into 0.0
    let bearing = (-gx).atan2(-gy).to_degrees().rem_euclid(360.0) + 0.0;
    // rem_euclid can round a tiny negative angle up to exactly 360
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// DEM whose elevation changes by `d_east` per row and `d_north` per column
    fn plane(d_east: f64, d_north: f64) -> Raster<f64> {
        let mut dem = Raster::new(6, 6);
        for row in 0..6 {
            for col in 0..6 {
                dem.set(row, col, d_east * row as f64 + d_north * col as f64)
                    .unwrap();
            }
        }
        dem
    }

    fn aspect_of(dem: &Raster<f64>) -> Vec<f64> {
        aspect(dem, &TerrainParams::default()).unwrap().to_flat()
    }

    #[test]
    fn test_aspect_cardinal_directions() {
        // Higher in the south, lower in the north -> faces north
        for v in aspect_of(&plane(0.0, -1.0)) {
            assert!(v < 1e-9 || v > 360.0 - 1e-9, "expected ~0, got {v}");
        }
        // Lower towards the east -> faces east
        for v in aspect_of(&plane(-1.0, 0.0)) {
            assert_relative_eq!(v, 90.0, epsilon = 1e-9);
        }
        for v in aspect_of(&plane(0.0, 1.0)) {
            assert_relative_eq!(v, 180.0, epsilon = 1e-9);
        }
        for v in aspect_of(&plane(1.0, 0.0)) {
            assert_relative_eq!(v, 270.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_aspect_diagonal() {
        // Descending towards south-east
        for v in aspect_of(&plane(-1.0, 1.0)) {
            assert_relative_eq!(v, 135.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_aspect_flat_is_zero() {
        let dem: Raster<f64> = Raster::filled(5, 5, 250.0);
        let result = Aspect.execute_default(dem).unwrap();
        assert!(result.to_flat().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_aspect_range() {
        for gx in [-3.0, -1e-15, 0.0, 1e-15, 2.0] {
            for gy in [-2.0, -1e-15, 0.0, 1e-15, 5.0] {
                let a = aspect_degrees(gx, gy);
                assert!((0.0..360.0).contains(&a), "aspect({gx}, {gy}) = {a}");
            }
        }
        assert!((0.0..360.0).contains(&aspect_degrees(-1e-300, 1.0)));
    }
}

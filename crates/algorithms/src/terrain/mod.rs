//! Terrain analysis algorithms
//!
//! Derive per-cell terrain geometry from a lattice elevation raster:
//! - Gradient: numerical partial derivatives in metres per metre
//! - Slope: steepness in degrees from horizontal
//! - Aspect: compass bearing of steepest descent
//! - Analysis: slope and aspect from a single gradient pass

mod analysis;
mod aspect;
mod gradient;
mod slope;

pub use analysis::{analyze_terrain, TerrainAnalysis, TerrainSurface};
pub use aspect::{aspect, aspect_from_gradient, Aspect};
pub use gradient::{gradient, Gradient};
pub use slope::{slope, slope_from_gradient, Slope};

use terrasun_core::CellSpacing;

/// Parameters shared by the terrain algorithms
#[derive(Debug, Clone, Copy)]
pub struct TerrainParams {
    /// Physical distance between lattice samples
    pub spacing: CellSpacing,
    /// Vertical exaggeration applied to elevations (default 1.0)
    pub z_factor: f64,
}

impl TerrainParams {
    pub fn new(spacing: CellSpacing) -> Self {
        Self {
            spacing,
            z_factor: 1.0,
        }
    }
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self::new(CellSpacing::new(1.0, 1.0))
    }
}

//! # TerraSun Algorithms
//!
//! The numerical stages of the terrain-to-energy pipeline.
//!
//! ## Available Algorithm Categories
//!
//! - **terrain**: gradient, slope, aspect
//! - **interpolation**: Delaunay triangulation, Clough-Tocher cubic, nearest neighbor,
//!   irradiance interpolation with gap repair
//! - **energy**: panel production model and slope/aspect sensitivity matrix

pub mod energy;
pub mod interpolation;
pub(crate) mod maybe_rayon;
pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::energy::{
        energy_production, energy_production_grid, sensitivity_matrix, AspectWeighting,
        EnergyParams, IrradianceValues, SensitivityMatrix, SensitivityParams,
    };
    pub use crate::interpolation::{
        cubic_interpolation, interpolate_irradiance, nearest_neighbor, InterpolatedIrradiance,
        SamplePoint,
    };
    pub use crate::terrain::{
        analyze_terrain, aspect, gradient, slope, Aspect, Slope, TerrainAnalysis, TerrainParams,
        TerrainSurface,
    };
    pub use terrasun_core::prelude::*;
}

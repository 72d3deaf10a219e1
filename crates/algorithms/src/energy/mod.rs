//! Solar panel energy model
//!
//! Combines terrain orientation, site latitude and irradiance into an
//! estimated panel output:
//! - Model: slope and aspect correction factors, per-point energy
//! - Sensitivity: energy over a slope × aspect grid at fixed irradiance

mod model;
mod sensitivity;

pub use model::{
    aspect_difference, aspect_factor, direct_factor, energy_production, energy_production_grid,
    optimal_orientation, slope_factor, AspectWeighting, EnergyParams, IrradianceValues,
};
pub use sensitivity::{sensitivity_matrix, SensitivityMatrix, SensitivityParams};

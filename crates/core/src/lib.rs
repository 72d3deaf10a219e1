//! # TerraSun Core
//!
//! Core types, traits and I/O for the TerraSun terrain-to-energy pipeline.
//!
//! This crate provides:
//! - `Raster<T>`: Generic 2D grid aligned with a lattice
//! - `BoundingBox` and `Lattice`: the geographic sampling of a study area
//! - Result tables (`TerrainTable`, `EnergyTable`) and their CSV export
//! - Algorithm trait for consistent API

pub mod error;
pub mod geo;
pub mod io;
pub mod raster;
pub mod table;

pub use error::{Error, Result};
pub use geo::{BoundingBox, CellSpacing, Lattice};
pub use raster::{Raster, RasterElement};
pub use table::{
    ColumnStats, ElevationProvenance, EnergyEstimate, EnergyTable, IrradianceSample,
    TerrainCell, TerrainTable,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geo::{BoundingBox, CellSpacing, Lattice};
    pub use crate::raster::{Raster, RasterElement};
    pub use crate::table::{
        ElevationProvenance, EnergyEstimate, EnergyTable, IrradianceSample, TerrainCell,
        TerrainTable,
    };
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in TerraSun.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}

//! Raster data structures aligned with a sampling lattice

mod element;
mod grid;

pub use element::RasterElement;
pub use grid::{Raster, RasterStatistics};

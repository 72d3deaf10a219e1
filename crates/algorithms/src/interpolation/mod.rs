//! Spatial interpolation of scattered samples onto lattice points
//!
//! - Delaunay: Bowyer-Watson triangulation of the sample cloud
//! - Cubic: Clough-Tocher piecewise-cubic C¹ surface over the triangulation
//! - Nearest Neighbor: value of the closest sample (k-d tree)
//! - Irradiance: cubic first, nearest neighbor for every point the cubic
//!   surface leaves undefined

use std::collections::HashSet;

use terrasun_core::{Error, Result};

mod clough_tocher;
mod delaunay;
pub mod kdtree;
mod irradiance;
mod nearest;

pub use clough_tocher::{cubic_interpolation, CloughTocher};
pub use delaunay::{Triangle, Triangulation};
pub use irradiance::{interpolate_irradiance, InterpolatedIrradiance};
pub use kdtree::{KdTree, NearestResult};
pub use nearest::nearest_neighbor;

/// A sample point with x, y coordinates and a value.
///
/// Geographic samples use `x = longitude`, `y = latitude`, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn dist_sq(&self, other_x: f64, other_y: f64) -> f64 {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        dx * dx + dy * dy
    }
}

/// Reject empty sample sets and non-finite inputs
pub(crate) fn check_inputs(points: &[SamplePoint], targets: &[(f64, f64)]) -> Result<()> {
    if points.is_empty() {
        return Err(Error::Algorithm("No sample points provided".into()));
    }
    if let Some(p) = points
        .iter()
        .find(|p| !(p.x.is_finite() && p.y.is_finite() && p.value.is_finite()))
    {
        return Err(Error::InvalidParameter {
            name: "points",
            value: format!("({}, {}) = {}", p.x, p.y, p.value),
            reason: "sample coordinates and values must be finite".into(),
        });
    }
    if let Some(&(x, y)) = targets.iter().find(|t| !(t.0.is_finite() && t.1.is_finite())) {
        return Err(Error::InvalidParameter {
            name: "targets",
            value: format!("({x}, {y})"),
            reason: "target coordinates must be finite".into(),
        });
    }
    Ok(())
}

/// Drop samples whose location repeats an earlier one; the first wins
pub(crate) fn dedup_locations(points: &[SamplePoint]) -> Vec<SamplePoint> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())))
        .copied()
        .collect()
}

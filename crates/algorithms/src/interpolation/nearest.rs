//! Nearest Neighbor interpolation
//!
//! Assigns each target the value of the closest sample point.
//! Fast and simple, produces a Voronoi-like tessellation.

use terrasun_core::{Error, Result};

use super::{check_inputs, KdTree, SamplePoint};
use crate::maybe_rayon::*;

/// Interpolate scattered samples onto `targets` given as `(x, y)`.
///
/// Every target receives a value: the one of its closest sample, ties going
/// to the sample listed first.
///
/// # Errors
///
/// * [`Error::Algorithm`] when `points` is empty
/// * [`Error::InvalidParameter`] on non-finite coordinates or values
pub fn nearest_neighbor(points: &[SamplePoint], targets: &[(f64, f64)]) -> Result<Vec<f64>> {
    check_inputs(points, targets)?;

    let tree = KdTree::build(points);
    (0..targets.len())
        .into_par_iter()
        .map(|i| {
            let (x, y) = targets[i];
            tree.nearest(x, y)
                .map(|r| r.point.value)
                .ok_or_else(|| Error::Algorithm("No sample points provided".into()))
        })
        .collect()
}

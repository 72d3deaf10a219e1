//! Irradiance interpolation with gap repair
//!
//! Measured irradiance samples are spread onto lattice coordinates with the
//! cubic interpolant. Every target the cubic surface leaves undefined is then
//! filled by nearest neighbour over the same samples, so the result never
//! contains gaps.

use terrasun_core::{IrradianceSample, Result};
use tracing::{debug, warn};

use super::{check_inputs, cubic_interpolation, KdTree, SamplePoint};

/// One irradiance value per target, in target order
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedIrradiance {
    /// W/m², all finite
    pub values: Vec<f64>,
    /// Number of targets filled by the nearest-neighbour fallback
    pub repaired: usize,
}

/// Interpolate irradiance samples at `targets` given as `(latitude, longitude)`.
///
/// Interpolation is planar in degrees with `x = longitude`, `y = latitude`.
///
/// # Errors
///
/// * [`Error::Algorithm`](terrasun_core::Error::Algorithm) when `samples` is empty
/// * [`Error::InvalidParameter`](terrasun_core::Error::InvalidParameter) on
///   non-finite coordinates or values
pub fn interpolate_irradiance(
    samples: &[IrradianceSample],
    targets: &[(f64, f64)],
) -> Result<InterpolatedIrradiance> {
    let points: Vec<SamplePoint> = samples
        .iter()
        .map(|s| SamplePoint::new(s.longitude, s.latitude, s.irradiance))
        .collect();
    let xy: Vec<(f64, f64)> = targets.iter().map(|&(lat, lon)| (lon, lat)).collect();
    check_inputs(&points, &xy)?;

    let mut values = cubic_interpolation(&points, &xy)?;

    let missing: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_finite())
        .map(|(i, _)| i)
        .collect();

    if !missing.is_empty() {
        let tree = KdTree::build(&points);
        for &i in &missing {
            let (x, y) = xy[i];
            if let Some(nearest) = tree.nearest(x, y) {
                values[i] = nearest.point.value;
            }
        }
        warn!(
            "{} of {} irradiance points outside the sample hull, filled by nearest neighbour",
            missing.len(),
            targets.len()
        );
    }

    debug!(
        "interpolated irradiance at {} points from {} samples",
        targets.len(),
        samples.len()
    );

    Ok(InterpolatedIrradiance {
        values,
        repaired: missing.len(),
    })
}

//! Validated latitude/longitude bounding boxes

use serde::{Deserialize, Serialize};

use super::{MAX_SAMPLES_PER_AXIS, METERS_PER_DEGREE};
use crate::error::{Error, Result};

/// A latitude/longitude rectangle plus the requested ground resolution.
///
/// Always valid once constructed: both axes have `min < max`, latitudes lie
/// in `[-90, 90]`, longitudes in `[-180, 180]` and `resolution_m > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    resolution_m: f64,
}

impl BoundingBox {
    /// Create a bounding box, rejecting degenerate or out-of-range input.
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
        resolution_m: f64,
    ) -> Result<Self> {
        let values = [min_lat, max_lat, min_lon, max_lon, resolution_m];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid(format!("non-finite value in {values:?}")));
        }
        if min_lat >= max_lat {
            return Err(invalid(format!(
                "min_lat ({min_lat}) must be below max_lat ({max_lat})"
            )));
        }
        if min_lon >= max_lon {
            return Err(invalid(format!(
                "min_lon ({min_lon}) must be below max_lon ({max_lon})"
            )));
        }
        if min_lat < -90.0 || max_lat > 90.0 {
            return Err(invalid(format!(
                "latitudes [{min_lat}, {max_lat}] outside [-90, 90]"
            )));
        }
        if min_lon < -180.0 || max_lon > 180.0 {
            return Err(invalid(format!(
                "longitudes [{min_lon}, {max_lon}] outside [-180, 180]"
            )));
        }
        if resolution_m <= 0.0 {
            return Err(invalid(format!(
                "resolution must be positive, got {resolution_m}"
            )));
        }

        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
            resolution_m,
        })
    }

    /// Square box of half-width `radius_km` around a point picked on a map.
    ///
    /// Degrees are approximated as 111 km on both axes. The box is clipped to
    /// the valid latitude/longitude range.
    pub fn around(
        center_lat: f64,
        center_lon: f64,
        radius_km: f64,
        resolution_m: f64,
    ) -> Result<Self> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(Error::InvalidParameter {
                name: "radius_km",
                value: radius_km.to_string(),
                reason: "must be a positive number".into(),
            });
        }
        let half = radius_km * 1000.0 / METERS_PER_DEGREE;
        Self::new(
            (center_lat - half).max(-90.0),
            (center_lat + half).min(90.0),
            (center_lon - half).max(-180.0),
            (center_lon + half).min(180.0),
            resolution_m,
        )
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn resolution_m(&self) -> f64 {
        self.resolution_m
    }

    /// Midpoint of the latitude range
    pub fn mean_latitude(&self) -> f64 {
        (self.min_lat + self.max_lat) / 2.0
    }

    /// Samples along the latitude axis, in `[1, MAX_SAMPLES_PER_AXIS]`
    pub fn lat_samples(&self) -> usize {
        axis_samples(self.max_lat - self.min_lat, self.resolution_m)
    }

    /// Samples along the longitude axis, in `[1, MAX_SAMPLES_PER_AXIS]`
    pub fn lon_samples(&self) -> usize {
        axis_samples(self.max_lon - self.min_lon, self.resolution_m)
    }
}

/// `floor(extent_m / resolution) + 1`, capped to bound compute cost.
///
/// The extent is measured with the equatorial degree length on both axes.
fn axis_samples(extent_deg: f64, resolution_m: f64) -> usize {
    let steps = (extent_deg * METERS_PER_DEGREE / resolution_m).floor();
    // f64 -> usize saturates, so absurdly fine resolutions still hit the cap
    (steps as usize).saturating_add(1).min(MAX_SAMPLES_PER_AXIS)
}

fn invalid(reason: String) -> Error {
    Error::InvalidBoundingBox { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_inverted_axes() {
        assert!(BoundingBox::new(-25.0, -26.0, -71.0, -70.0, 30.0).is_err());
        assert!(BoundingBox::new(-26.0, -25.0, -70.0, -71.0, 30.0).is_err());
        assert!(BoundingBox::new(-26.0, -26.0, -71.0, -70.0, 30.0).is_err());
    }

    #[test]
    fn test_rejects_bad_resolution() {
        let zero = BoundingBox::new(-26.0, -25.0, -71.0, -70.0, 0.0);
        assert!(matches!(zero, Err(Error::InvalidBoundingBox { .. })));
        assert!(BoundingBox::new(-26.0, -25.0, -71.0, -70.0, -5.0).is_err());
        assert!(BoundingBox::new(-26.0, -25.0, -71.0, -70.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(BoundingBox::new(80.0, 91.0, 0.0, 1.0, 30.0).is_err());
        assert!(BoundingBox::new(0.0, 1.0, 179.5, 180.5, 30.0).is_err());
    }

    #[test]
    fn test_samples_capped_at_100() {
        let bbox = BoundingBox::new(-26.0, -25.0, -71.0, -70.0, 30.0).unwrap();
        assert_eq!(bbox.lat_samples(), 100);
        assert_eq!(bbox.lon_samples(), 100);

        let tiny_res = BoundingBox::new(0.0, 10.0, 0.0, 10.0, 1e-12).unwrap();
        assert_eq!(tiny_res.lat_samples(), MAX_SAMPLES_PER_AXIS);
    }

    #[test]
    fn test_resolution_coarser_than_box_gives_one_sample() {
        let bbox = BoundingBox::new(41.35, 41.36, 2.10, 2.11, 50_000.0).unwrap();
        assert_eq!(bbox.lat_samples(), 1);
        assert_eq!(bbox.lon_samples(), 1);
    }

    #[test]
    fn test_sample_count_formula() {
        // 0.01 deg * 111000 / 100 m = 11.1 -> 11 steps -> 12 samples
        let bbox = BoundingBox::new(41.35, 41.36, 2.10, 2.12, 100.0).unwrap();
        assert_eq!(bbox.lat_samples(), 12);
        // 0.02 deg -> 22.2 -> 23 samples
        assert_eq!(bbox.lon_samples(), 23);
    }

    #[test]
    fn test_around() {
        let bbox = BoundingBox::around(-33.45, -70.66, 2.0, 30.0).unwrap();
        let half = 2.0 / 111.0;
        assert_relative_eq!(bbox.min_lat(), -33.45 - half, epsilon = 1e-12);
        assert_relative_eq!(bbox.max_lon(), -70.66 + half, epsilon = 1e-12);
        assert_relative_eq!(bbox.mean_latitude(), -33.45, epsilon = 1e-12);

        assert!(BoundingBox::around(0.0, 0.0, 0.0, 30.0).is_err());
    }
}

//! Open-Elevation lookup data types.
//!
//! Serde models for `POST /api/v1/lookup`: a list of locations goes in, the
//! same list annotated with elevations in metres comes back.

use serde::{Deserialize, Serialize};

/// One point to look up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body for `POST /lookup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    pub locations: Vec<Location>,
}

impl LookupRequest {
    /// Build a request from `(latitude, longitude)` pairs, preserving order.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            locations: points
                .into_iter()
                .map(|(latitude, longitude)| Location {
                    latitude,
                    longitude,
                })
                .collect(),
        }
    }
}

/// One looked-up point.
///
/// `elevation` is optional because some servers answer `null` for points
/// they have no data for; that is treated as a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationResult {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
}

/// Response of `POST /lookup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub results: Vec<ElevationResult>,
}

//! Async Open-Elevation client.
//!
//! Looks up every lattice point in one batched POST. The answer is accepted
//! only if it is complete and lines up with the request: one finite
//! elevation per submitted point, in the same order, at the same
//! coordinates.

use std::time::Duration;

use terrasun_core::{Lattice, Raster};
use tracing::{debug, info, warn};

use crate::elevation_models::{LookupRequest, LookupResponse};
use crate::error::{CloudError, Result};
use crate::http::HttpClient;
use crate::provider::ElevationData;
use crate::synthetic::synthetic_surface;

/// Public Open-Elevation lookup endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.open-elevation.com/api/v1/lookup";

/// Largest accepted difference, in degrees, between a submitted coordinate
/// and the one echoed back by the service.
pub const COORDINATE_TOLERANCE: f64 = 1e-4;

/// Configuration for [`ElevationClient`].
#[derive(Debug, Clone)]
pub struct ElevationClientOptions {
    /// Lookup URL (default: public Open-Elevation API).
    pub endpoint: String,
    /// Per-request timeout (default 30 s). Requests are never retried.
    pub request_timeout: Duration,
}

impl Default for ElevationClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Async client for an Open-Elevation compatible lookup service.
pub struct ElevationClient {
    http: HttpClient,
    endpoint: String,
}

impl ElevationClient {
    /// Create a new client.
    pub fn new(options: ElevationClientOptions) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(options.request_timeout)?,
            endpoint: options.endpoint,
        })
    }

    /// The lookup URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Elevations in metres for `(latitude, longitude)` points, in order.
    pub async fn lookup(&self, points: &[(f64, f64)]) -> Result<Vec<f64>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        debug!("looking up {} elevations at {}", points.len(), self.endpoint);
        let request = LookupRequest::from_points(points.iter().copied());
        let response: LookupResponse = self.http.post_json(&self.endpoint, &request).await?;
        validate_response(points, response)
    }

    /// Elevation raster for every lattice point, without any fallback.
    pub async fn fetch_lattice(&self, lattice: &Lattice) -> Result<Raster<f64>> {
        let points: Vec<(f64, f64)> = lattice.points().collect();
        let elevations = self.lookup(&points).await?;
        Ok(lattice.raster_from_flat(elevations)?)
    }
}

/// Live elevations for the lattice, or the synthetic surface if the lookup
/// fails for any reason. The failure is logged, never returned.
pub async fn fetch_or_synthesize(client: &ElevationClient, lattice: &Lattice) -> ElevationData {
    match client.fetch_lattice(lattice).await {
        Ok(raster) => {
            info!(
                "fetched {} live elevations from {}",
                raster.len(),
                client.endpoint()
            );
            ElevationData::Live(raster)
        }
        Err(e) => {
            warn!(
                "elevation lookup failed ({e}); using synthetic terrain for {} points",
                lattice.len()
            );
            ElevationData::Synthetic(synthetic_surface(lattice))
        }
    }
}

/// Check a lookup response against the submitted points and extract the
/// elevations in submission order.
pub fn validate_response(submitted: &[(f64, f64)], response: LookupResponse) -> Result<Vec<f64>> {
    if response.results.len() != submitted.len() {
        return Err(CloudError::InvalidResponse {
            reason: format!(
                "expected {} results, got {}",
                submitted.len(),
                response.results.len()
            ),
        });
    }

    submitted
        .iter()
        .zip(&response.results)
        .enumerate()
        .map(|(i, (&(lat, lon), r))| {
            if (r.latitude - lat).abs() > COORDINATE_TOLERANCE
                || (r.longitude - lon).abs() > COORDINATE_TOLERANCE
            {
                return Err(CloudError::InvalidResponse {
                    reason: format!(
                        "result {i} is for ({}, {}), submitted ({lat}, {lon})",
                        r.latitude, r.longitude
                    ),
                });
            }
            match r.elevation {
                Some(z) if z.is_finite() => Ok(z),
                other => Err(CloudError::InvalidResponse {
                    reason: format!("result {i} has no finite elevation ({other:?})"),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation_models::ElevationResult;

    fn response(rows: &[(f64, f64, Option<f64>)]) -> LookupResponse {
        LookupResponse {
            results: rows
                .iter()
                .map(|&(latitude, longitude, elevation)| ElevationResult {
                    latitude,
                    longitude,
                    elevation,
                })
                .collect(),
        }
    }

    #[test]
    fn test_validate_accepts_matching_response() {
        let pts = [(-25.5, -70.5), (-25.4, -70.5)];
        let resp = response(&[(-25.5, -70.5, Some(1200.0)), (-25.40004, -70.5, Some(1210.0))]);
        assert_eq!(validate_response(&pts, resp).unwrap(), vec![1200.0, 1210.0]);
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let pts = [(-25.5, -70.5), (-25.4, -70.5)];
        let resp = response(&[(-25.5, -70.5, Some(1200.0))]);
        assert!(matches!(
            validate_response(&pts, resp),
            Err(CloudError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_reordered_points() {
        let pts = [(-25.5, -70.5), (-25.4, -70.5)];
        let resp = response(&[(-25.4, -70.5, Some(1.0)), (-25.5, -70.5, Some(2.0))]);
        assert!(validate_response(&pts, resp).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_or_non_finite() {
        let pts = [(0.0, 0.0)];
        assert!(validate_response(&pts, response(&[(0.0, 0.0, None)])).is_err());
        assert!(validate_response(&pts, response(&[(0.0, 0.0, Some(f64::NAN))])).is_err());
    }

    #[test]
    fn test_default_options() {
        let opts = ElevationClientOptions::default();
        assert_eq!(opts.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(opts.request_timeout, Duration::from_secs(30));
    }
}

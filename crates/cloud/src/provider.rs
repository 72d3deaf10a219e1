//! Elevation sources behind a single lookup trait.

use terrasun_core::{ElevationProvenance, Error, Lattice, Raster, Result};

use crate::synthetic::{synthetic_surface, synthetic_surface_seeded};

/// Elevations for a lattice, tagged with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ElevationData {
    /// Looked up from the elevation service
    Live(Raster<f64>),
    /// Produced by the synthetic fallback surface
    Synthetic(Raster<f64>),
}

impl ElevationData {
    pub fn raster(&self) -> &Raster<f64> {
        match self {
            ElevationData::Live(r) | ElevationData::Synthetic(r) => r,
        }
    }

    pub fn into_raster(self) -> Raster<f64> {
        match self {
            ElevationData::Live(r) | ElevationData::Synthetic(r) => r,
        }
    }

    pub fn provenance(&self) -> ElevationProvenance {
        match self {
            ElevationData::Live(_) => ElevationProvenance::Live,
            ElevationData::Synthetic(_) => ElevationProvenance::Synthetic,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ElevationData::Live(_))
    }
}

/// Anything that can produce an elevation for every lattice point.
///
/// Implementations recover from unavailable data themselves; an error means
/// the request itself was inconsistent.
pub trait ElevationLookup {
    fn elevations(&self, lattice: &Lattice) -> Result<ElevationData>;
}

/// Always answers with the synthetic surface (offline mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticElevation {
    seed: Option<u64>,
}

impl SyntheticElevation {
    /// Fresh random noise on every call
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// The same surface on every call
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl ElevationLookup for SyntheticElevation {
    fn elevations(&self, lattice: &Lattice) -> Result<ElevationData> {
        let raster = match self.seed {
            Some(seed) => synthetic_surface_seeded(lattice, seed),
            None => synthetic_surface(lattice),
        };
        Ok(ElevationData::Synthetic(raster))
    }
}

/// Caller-supplied elevations in lattice order, reported as live data.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedElevation {
    values: Vec<f64>,
}

impl FixedElevation {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Elevations computed from `(latitude, longitude)` for every point
    pub fn from_fn<F: Fn(f64, f64) -> f64>(lattice: &Lattice, f: F) -> Self {
        Self::new(lattice.points().map(|(lat, lon)| f(lat, lon)).collect())
    }
}

impl ElevationLookup for FixedElevation {
    fn elevations(&self, lattice: &Lattice) -> Result<ElevationData> {
        if let Some(z) = self.values.iter().find(|z| !z.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "elevations",
                value: z.to_string(),
                reason: "elevations must be finite".into(),
            });
        }
        let raster = lattice.raster_from_flat(self.values.clone())?;
        Ok(ElevationData::Live(raster))
    }
}

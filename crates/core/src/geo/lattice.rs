//! Regular latitude/longitude sampling lattice

use super::{BoundingBox, METERS_PER_DEGREE};
use crate::error::{Error, Result};
use crate::raster::{Raster, RasterElement};

/// Evenly spaced sample points covering a [`BoundingBox`].
///
/// Point order is fixed: longitude is the outer loop and latitude the inner
/// loop, so flat index `i` maps to `(lon_idx, lat_idx) = (i / n_lat, i % n_lat)`.
/// Rasters over the lattice have shape `(n_lon, n_lat)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    bbox: BoundingBox,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

/// Physical distance between neighbouring lattice samples, in metres.
///
/// An axis with a single sample has no spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpacing {
    /// Distance between longitude samples (east-west)
    pub east_m: Option<f64>,
    /// Distance between latitude samples (north-south)
    pub north_m: Option<f64>,
}

impl CellSpacing {
    pub fn new(east_m: f64, north_m: f64) -> Self {
        Self {
            east_m: positive(east_m),
            north_m: positive(north_m),
        }
    }
}

impl Lattice {
    /// Sample the bounding box at its resolution (at most 100 samples per axis)
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        Self {
            bbox: *bbox,
            latitudes: linspace(bbox.min_lat(), bbox.max_lat(), bbox.lat_samples()),
            longitudes: linspace(bbox.min_lon(), bbox.max_lon(), bbox.lon_samples()),
        }
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Latitude axis values (south to north)
    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Longitude axis values (west to east)
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn n_lat(&self) -> usize {
        self.latitudes.len()
    }

    pub fn n_lon(&self) -> usize {
        self.longitudes.len()
    }

    /// Raster shape `(rows, cols) = (n_lon, n_lat)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_lon(), self.n_lat())
    }

    /// Total number of points
    pub fn len(&self) -> usize {
        self.n_lat() * self.n_lon()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(latitude, longitude)` of the point at flat index `i`
    pub fn point(&self, i: usize) -> Option<(f64, f64)> {
        if i >= self.len() {
            return None;
        }
        let n_lat = self.n_lat();
        Some((self.latitudes[i % n_lat], self.longitudes[i / n_lat]))
    }

    /// All points as `(latitude, longitude)` in canonical order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.longitudes
            .iter()
            .flat_map(move |&lon| self.latitudes.iter().map(move |&lat| (lat, lon)))
    }

    /// Physical sample spacing.
    ///
    /// North-south spacing uses 111 km per degree; east-west spacing is
    /// additionally scaled by `cos(mean latitude)`.
    pub fn spacing(&self) -> CellSpacing {
        let bbox = &self.bbox;
        let north = step(bbox.min_lat(), bbox.max_lat(), self.n_lat()) * METERS_PER_DEGREE;
        let east = step(bbox.min_lon(), bbox.max_lon(), self.n_lon())
            * METERS_PER_DEGREE
            * bbox.mean_latitude().to_radians().cos();
        CellSpacing::new(east, north)
    }

    /// Wrap flat, lattice-ordered values as a raster of this lattice's shape
    pub fn raster_from_flat<T: RasterElement>(&self, values: Vec<T>) -> Result<Raster<T>> {
        if values.len() != self.len() {
            return Err(Error::SizeMismatch {
                what: "lattice values",
                expected: self.len(),
                actual: values.len(),
            });
        }
        let (rows, cols) = self.shape();
        Raster::from_vec(values, rows, cols)
    }
}

/// Inclusive evenly spaced values; a single sample sits at `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

fn step(start: f64, end: f64, n: usize) -> f64 {
    if n < 2 {
        0.0
    } else {
        (end - start) / (n - 1) as f64
    }
}

fn positive(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}

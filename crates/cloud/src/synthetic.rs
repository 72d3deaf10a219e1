//! Synthetic fallback terrain.
//!
//! A gently undulating surface with uniform noise, used whenever live
//! elevations are unavailable:
//!
//! ```text
//! z = 500 + 200·U[0,1) + 300·sin(5·lon)·cos(5·lat)
//! ```
//!
//! `lat` and `lon` enter the trigonometric terms as raw degree values. The
//! surface only has to give plausible slope and aspect structure.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrasun_core::{Lattice, Raster};

/// Synthetic elevation at one point for a noise draw in `[0, 1)`
pub fn synthetic_elevation(latitude: f64, longitude: f64, noise: f64) -> f64 {
    500.0 + 200.0 * noise + 300.0 * (5.0 * longitude).sin() * (5.0 * latitude).cos()
}

/// Synthetic surface over the lattice with fresh random noise
pub fn synthetic_surface(lattice: &Lattice) -> Raster<f64> {
    surface_with(lattice, &mut rand::thread_rng())
}

/// Reproducible synthetic surface for a given seed
pub fn synthetic_surface_seeded(lattice: &Lattice, seed: u64) -> Raster<f64> {
    surface_with(lattice, &mut StdRng::seed_from_u64(seed))
}

fn surface_with<R: Rng>(lattice: &Lattice, rng: &mut R) -> Raster<f64> {
    let lats = lattice.latitudes();
    let lons = lattice.longitudes();
    // Row-major fill, so noise is drawn in lattice order
    let data = Array2::from_shape_fn(lattice.shape(), |(lon_idx, lat_idx)| {
        synthetic_elevation(lats[lat_idx], lons[lon_idx], rng.gen::<f64>())
    });
    Raster::from_array(data)
}

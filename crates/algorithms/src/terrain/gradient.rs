//! Numerical gradient of a lattice elevation raster
//!
//! Second-order central differences in the interior and first-order
//! one-sided differences on the edges, along both lattice axes:
//!
//! ```text
//! interior:  dz/dx[i] = (z[i+1] - z[i-1]) / (2 h)
//! first:     dz/dx[0] = (z[1] - z[0]) / h
//! last:      dz/dx[n] = (z[n] - z[n-1]) / h
//! ```
//!
//! Raster rows run west to east (the lattice's longitude axis) and columns
//! south to north (its latitude axis), so the row derivative is the eastward
//! gradient and the column derivative the northward gradient. An axis with a
//! single sample, or without a spacing, has zero gradient.

use ndarray::{Array2, ArrayView1, Axis};
use terrasun_core::raster::Raster;
use terrasun_core::{Error, Result};

use super::TerrainParams;

/// Eastward and northward elevation gradients, dimensionless (m/m)
#[derive(Debug, Clone)]
pub struct Gradient {
    /// ∂z/∂east
    pub east: Raster<f64>,
    /// ∂z/∂north
    pub north: Raster<f64>,
}

impl Gradient {
    /// Gradient components at (row, col)
    pub fn at(&self, row: usize, col: usize) -> Result<(f64, f64)> {
        Ok((self.east.get(row, col)?, self.north.get(row, col)?))
    }
}

/// Compute the elevation gradient of a DEM laid out on a lattice
pub fn gradient(dem: &Raster<f64>, params: &TerrainParams) -> Result<Gradient> {
    if dem.is_empty() {
        return Err(Error::InvalidDimensions {
            width: dem.cols(),
            height: dem.rows(),
        });
    }
    if !(params.z_factor.is_finite() && params.z_factor > 0.0) {
        return Err(Error::InvalidParameter {
            name: "z_factor",
            value: params.z_factor.to_string(),
            reason: "must be a positive number".into(),
        });
    }

    let data = dem.data();
    let east = axis_derivative(data, Axis(0), params.spacing.east_m, params.z_factor);
    let north = axis_derivative(data, Axis(1), params.spacing.north_m, params.z_factor);

    Ok(Gradient {
        east: Raster::from_array(east),
        north: Raster::from_array(north),
    })
}

fn axis_derivative(data: &Array2<f64>, axis: Axis, spacing: Option<f64>, z_factor: f64) -> Array2<f64> {
    let mut out = Array2::zeros(data.dim());
    let Some(h) = spacing else {
        return out;
    };
    if data.len_of(axis) < 2 {
        return out;
    }

    for (lane, mut out_lane) in data.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        let d = lane_derivative(lane, h);
        for (o, v) in out_lane.iter_mut().zip(d) {
            *o = v * z_factor;
        }
    }
    out
}

fn lane_derivative(z: ArrayView1<'_, f64>, h: f64) -> Vec<f64> {
    let n = z.len();
    (0..n)
        .map(|i| {
            if i == 0 {
                (z[1] - z[0]) / h
            } else if i == n - 1 {
                (z[n - 1] - z[n - 2]) / h
            } else {
                (z[i + 1] - z[i - 1]) / (2.0 * h)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use terrasun_core::CellSpacing;

    fn params(east: f64, north: f64) -> TerrainParams {
        TerrainParams::new(CellSpacing::new(east, north))
    }

    #[test]
    fn test_plane_gradient_exact_everywhere() {
        // z = 2 * east_m + 3 * north_m with 10 m east and 5 m north spacing
        let mut dem = Raster::new(6, 4);
        for row in 0..6 {
            for col in 0..4 {
                let z = 2.0 * (row as f64 * 10.0) + 3.0 * (col as f64 * 5.0);
                dem.set(row, col, z).unwrap();
            }
        }

        let g = gradient(&dem, &params(10.0, 5.0)).unwrap();
        for row in 0..6 {
            for col in 0..4 {
                let (gx, gy) = g.at(row, col).unwrap();
                assert_relative_eq!(gx, 2.0, epsilon = 1e-12);
                assert_relative_eq!(gy, 3.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_edges_one_sided() {
        // Quadratic along rows: z = row^2, spacing 1
        let dem = Raster::from_vec(vec![0.0, 1.0, 4.0, 9.0], 4, 1).unwrap();
        let g = gradient(&dem, &params(1.0, 1.0)).unwrap();
        assert_eq!(g.east.to_flat(), vec![1.0, 2.0, 4.0, 5.0]);
        // Single column: no northward gradient
        assert_eq!(g.north.to_flat(), vec![0.0; 4]);
    }

    #[test]
    fn test_missing_spacing_gives_zero() {
        let dem = Raster::from_vec(vec![0.0, 10.0, 20.0, 30.0], 2, 2).unwrap();
        let p = TerrainParams::new(CellSpacing {
            east_m: None,
            north_m: Some(1.0),
        });
        let g = gradient(&dem, &p).unwrap();
        assert_eq!(g.east.to_flat(), vec![0.0; 4]);
        assert_eq!(g.north.to_flat(), vec![10.0; 4]);
    }

    #[test]
    fn test_z_factor_scales() {
        let dem = Raster::from_vec(vec![0.0, 1.0, 2.0], 3, 1).unwrap();
        let mut p = params(1.0, 1.0);
        p.z_factor = 2.5;
        let g = gradient(&dem, &p).unwrap();
        assert_eq!(g.east.to_flat(), vec![2.5; 3]);

        p.z_factor = 0.0;
        assert!(gradient(&dem, &p).is_err());
    }
}

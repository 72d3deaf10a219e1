//! Clough-Tocher piecewise-cubic interpolation
//!
//! Each Delaunay triangle is split at its centroid into three sub-triangles
//! carrying a cubic Bézier patch. Patch control points come from the sample
//! values and estimated vertex gradients; the inner control points are set
//! so that the surface is C¹ across every edge.
//!
//! Vertex gradients are estimated by inverse-distance-squared weighted least
//! squares over each vertex's triangulation neighbours, so linear data is
//! reproduced exactly.
//!
//! The surface is only defined inside the convex hull of the samples.
//!
//! Reference:
//! Clough, R.W. & Tocher, J.L. (1965). Finite element stiffness matrices for
//! analysis of plates in bending.
//! Farin, G. (1986). Triangular Bernstein-Bézier patches. CAGD, 3(2).

use terrasun_core::Result;

use super::delaunay::Triangulation;
use super::{check_inputs, dedup_locations, SamplePoint};
use crate::maybe_rayon::*;

/// Cubic C¹ interpolant over a Delaunay triangulation of samples
#[derive(Debug, Clone)]
pub struct CloughTocher {
    triangulation: Triangulation,
    values: Vec<f64>,
    gradients: Vec<[f64; 2]>,
    /// One patch per triangle, same order as `triangulation.triangles()`
    patches: Vec<Patch>,
}

/// Bézier control net of one split triangle.
///
/// Index `cIJKL` weighs vertex 1, 2, 3 and the centroid with powers I, J, K, L.
#[derive(Debug, Clone, Copy)]
struct Patch {
    c3000: f64,
    c0300: f64,
    c0030: f64,
    c0003: f64,
    c2100: f64,
    c1200: f64,
    c0210: f64,
    c0120: f64,
    c1020: f64,
    c2010: f64,
    c2001: f64,
    c0201: f64,
    c0021: f64,
    c1101: f64,
    c0111: f64,
    c1011: f64,
    c1002: f64,
    c0102: f64,
    c0012: f64,
}

impl CloughTocher {
    /// Build the interpolant.
    ///
    /// Samples repeating an earlier location are dropped. Returns `None` when
    /// the remaining samples cannot be triangulated (fewer than three, or all
    /// collinear).
    pub fn new(points: &[SamplePoint]) -> Option<Self> {
        let points = dedup_locations(points);
        let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        let triangulation = Triangulation::new(&coords)?;

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let gradients = estimate_gradients(&triangulation, &values);

        let patches = triangulation
            .triangles()
            .iter()
            .map(|tri| {
                let [a, b, c] = tri.v;
                let pts = [coords[a], coords[b], coords[c]];
                let f = [values[a], values[b], values[c]];
                let df = [gradients[a], gradients[b], gradients[c]];
                Patch::new(pts, f, df)
            })
            .collect();

        Some(Self {
            triangulation,
            values,
            gradients,
            patches,
        })
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    /// Estimated gradient `[∂f/∂x, ∂f/∂y]` at each retained sample
    pub fn gradients(&self) -> &[[f64; 2]] {
        &self.gradients
    }

    /// Sample values retained after de-duplication
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Interpolated value at (x, y), or `None` outside the convex hull
    pub fn evaluate(&self, x: f64, y: f64) -> Option<f64> {
        let (ti, b) = self.triangulation.locate(x, y)?;
        Some(self.patches[ti].evaluate(b))
    }
}

impl Patch {
    fn new(p: [[f64; 2]; 3], f: [f64; 3], df: [[f64; 2]; 3]) -> Self {
        let sub = |a: [f64; 2], b: [f64; 2]| [a[0] - b[0], a[1] - b[1]];
        let dot = |a: [f64; 2], b: [f64; 2]| a[0] * b[0] + a[1] * b[1];

        let e12 = sub(p[1], p[0]);
        let e23 = sub(p[2], p[1]);
        let e31 = sub(p[0], p[2]);

        let centroid = [
            (p[0][0] + p[1][0] + p[2][0]) / 3.0,
            (p[0][1] + p[1][1] + p[2][1]) / 3.0,
        ];
        let e14 = sub(centroid, p[0]);
        let e24 = sub(centroid, p[1]);
        let e34 = sub(centroid, p[2]);

        // Edge control points from the vertex tangent planes
        let c3000 = f[0];
        let c0300 = f[1];
        let c0030 = f[2];
        let c2100 = f[0] + dot(df[0], e12) / 3.0;
        let c2010 = f[0] - dot(df[0], e31) / 3.0;
        let c1200 = f[1] - dot(df[1], e12) / 3.0;
        let c0210 = f[1] + dot(df[1], e23) / 3.0;
        let c1020 = f[2] + dot(df[2], e31) / 3.0;
        let c0120 = f[2] - dot(df[2], e23) / 3.0;

        let c2001 = (c3000 + c2100 + c2010) / 3.0;
        let c0201 = (c1200 + c0300 + c0210) / 3.0;
        let c0021 = (c1020 + c0120 + c0030) / 3.0;

        // Cross-boundary derivative along each edge's normal must be linear.
        // g is minus the projection of the vertex-to-centroid vector onto the edge.
        let g12 = -dot(e14, e12) / dot(e12, e12);
        let g23 = -dot(e24, e23) / dot(e23, e23);
        let g31 = -dot(e34, e31) / dot(e31, e31);

        let c1101 = (g12 * (-c3000 + 3.0 * c2100 - 3.0 * c1200 + c0300)
            + (-c3000 + 2.0 * c2100 - c1200 + c2001 + c0201))
            / 2.0;
        let c0111 = (g23 * (-c0300 + 3.0 * c0210 - 3.0 * c0120 + c0030)
            + (-c0300 + 2.0 * c0210 - c0120 + c0021 + c0201))
            / 2.0;
        let c1011 = (g31 * (-c0030 + 3.0 * c1020 - 3.0 * c2010 + c3000)
            + (-c0030 + 2.0 * c1020 - c2010 + c2001 + c0021))
            / 2.0;

        let c1002 = (c1101 + c1011 + c2001) / 3.0;
        let c0102 = (c1101 + c0111 + c0201) / 3.0;
        let c0012 = (c1011 + c0111 + c0021) / 3.0;
        let c0003 = (c1002 + c0102 + c0012) / 3.0;

        Self {
            c3000,
            c0300,
            c0030,
            c0003,
            c2100,
            c1200,
            c0210,
            c0120,
            c1020,
            c2010,
            c2001,
            c0201,
            c0021,
            c1101,
            c0111,
            c1011,
            c1002,
            c0102,
            c0012,
        }
    }

    /// Evaluate at barycentric coordinates of the outer triangle
    fn evaluate(&self, b: [f64; 3]) -> f64 {
        // Sub-triangle coordinates: the smallest outer coordinate moves to
        // the centroid, so exactly one of b1, b2, b3 is zero.
        let min = b[0].min(b[1]).min(b[2]);
        let b1 = b[0] - min;
        let b2 = b[1] - min;
        let b3 = b[2] - min;
        let b4 = 3.0 * min;

        b1.powi(3) * self.c3000
            + b2.powi(3) * self.c0300
            + b3.powi(3) * self.c0030
            + b4.powi(3) * self.c0003
            + 3.0 * b1 * b1 * b2 * self.c2100
            + 3.0 * b1 * b1 * b3 * self.c2010
            + 3.0 * b1 * b1 * b4 * self.c2001
            + 3.0 * b1 * b2 * b2 * self.c1200
            + 3.0 * b1 * b3 * b3 * self.c1020
            + 3.0 * b1 * b4 * b4 * self.c1002
            + 3.0 * b2 * b2 * b3 * self.c0210
            + 3.0 * b2 * b2 * b4 * self.c0201
            + 3.0 * b2 * b3 * b3 * self.c0120
            + 3.0 * b2 * b4 * b4 * self.c0102
            + 3.0 * b3 * b3 * b4 * self.c0021
            + 3.0 * b3 * b4 * b4 * self.c0012
            + 6.0 * b1 * b2 * b4 * self.c1101
            + 6.0 * b2 * b3 * b4 * self.c0111
            + 6.0 * b1 * b3 * b4 * self.c1011
    }
}

/// Weighted least-squares gradient at every vertex.
///
/// Solves `min Σ w_j (f_j - f_i - g·d_j)²` with `w_j = 1/|d_j|²` over the
/// neighbours `j`. Vertices whose normal equations are singular get a zero
/// gradient.
fn estimate_gradients(triangulation: &Triangulation, values: &[f64]) -> Vec<[f64; 2]> {
    let points = triangulation.points();
    triangulation
        .vertex_neighbors()
        .iter()
        .enumerate()
        .map(|(i, neighbors)| {
            let (mut a11, mut a12, mut a22) = (0.0, 0.0, 0.0);
            let (mut r1, mut r2) = (0.0, 0.0);

            for &j in neighbors {
                let dx = points[j][0] - points[i][0];
                let dy = points[j][1] - points[i][1];
                let d2 = dx * dx + dy * dy;
                if d2 == 0.0 {
                    continue;
                }
                let w = 1.0 / d2;
                let df = values[j] - values[i];
                a11 += w * dx * dx;
                a12 += w * dx * dy;
                a22 += w * dy * dy;
                r1 += w * dx * df;
                r2 += w * dy * df;
            }

            let det = a11 * a22 - a12 * a12;
            if !det.is_finite() || det.abs() <= 1e-12 * (a11 * a22).abs() || det == 0.0 {
                return [0.0, 0.0];
            }
            [(a22 * r1 - a12 * r2) / det, (a11 * r2 - a12 * r1) / det]
        })
        .collect()
}

/// Cubic interpolation of scattered samples at `targets` given as `(x, y)`.
///
/// Targets outside the convex hull of the samples, or every target when the
/// samples cannot be triangulated, are NaN.
///
/// # Errors
///
/// * [`Error::Algorithm`](terrasun_core::Error::Algorithm) when `points` is empty
/// * [`Error::InvalidParameter`](terrasun_core::Error::InvalidParameter) on
///   non-finite coordinates or values
pub fn cubic_interpolation(points: &[SamplePoint], targets: &[(f64, f64)]) -> Result<Vec<f64>> {
    check_inputs(points, targets)?;

    let Some(interpolant) = CloughTocher::new(points) else {
        return Ok(vec![f64::NAN; targets.len()]);
    };

    Ok((0..targets.len())
        .into_par_iter()
        .map(|i| {
            let (x, y) = targets[i];
            interpolant.evaluate(x, y).unwrap_or(f64::NAN)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use terrasun_core::Error;

    fn scattered<F: Fn(f64, f64) -> f64>(f: F) -> Vec<SamplePoint> {
        let mut pts = vec![
            SamplePoint::new(0.0, 0.0, 0.0),
            SamplePoint::new(10.0, 0.0, 0.0),
            SamplePoint::new(0.0, 10.0, 0.0),
            SamplePoint::new(10.0, 10.0, 0.0),
        ];
        for i in 0..20 {
            let x = 0.5 + ((i * 37) % 19) as f64 * 0.5;
            let y = 0.5 + ((i * 53) % 17) as f64 * 0.55;
            pts.push(SamplePoint::new(x, y, 0.0));
        }
        for p in &mut pts {
            p.value = f(p.x, p.y);
        }
        pts
    }

    #[test]
    fn test_reproduces_samples() {
        let pts = scattered(|x, y| (x * 0.3).sin() + y * y * 0.05);
        let ct = CloughTocher::new(&pts).unwrap();
        for p in &pts {
            let v = ct.evaluate(p.x, p.y).unwrap();
            assert_relative_eq!(v, p.value, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_linear_field_exact() {
        let f = |x: f64, y: f64| 2.0 * x - 3.0 * y + 7.0;
        let pts = scattered(f);
        let ct = CloughTocher::new(&pts).unwrap();

        for g in ct.gradients() {
            assert_relative_eq!(g[0], 2.0, epsilon = 1e-9);
            assert_relative_eq!(g[1], -3.0, epsilon = 1e-9);
        }

        for i in 0..15 {
            for j in 0..15 {
                let (x, y) = (0.3 + i as f64 * 0.65, 0.2 + j as f64 * 0.66);
                let v = ct.evaluate(x, y).unwrap();
                assert_relative_eq!(v, f(x, y), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_smooth_field_close() {
        let f = |x: f64, y: f64| 100.0 + 5.0 * (x / 4.0).sin() * (y / 5.0).cos();
        let pts = scattered(f);
        let targets: Vec<(f64, f64)> = (0..10)
            .flat_map(|i| (0..10).map(move |j| (1.0 + i as f64 * 0.9, 1.0 + j as f64 * 0.9)))
            .collect();
        let result = cubic_interpolation(&pts, &targets).unwrap();
        for (&(x, y), v) in targets.iter().zip(result) {
            assert!(v.is_finite());
            assert!((v - f(x, y)).abs() < 1.5, "({x}, {y}): {v} vs {}", f(x, y));
        }
    }

    #[test]
    fn test_outside_hull_is_nan() {
        let pts = scattered(|x, y| x + y);
        let result = cubic_interpolation(&pts, &[(5.0, 5.0), (-1.0, 5.0), (5.0, 11.0)]).unwrap();
        assert!(result[0].is_finite());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
    }

    #[test]
    fn test_collinear_samples_all_nan() {
        let pts: Vec<SamplePoint> = (0..5)
            .map(|i| SamplePoint::new(i as f64, i as f64, i as f64))
            .collect();
        let result = cubic_interpolation(&pts, &[(1.0, 1.0), (2.5, 2.5)]).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_duplicate_location_keeps_first() {
        let pts = vec![
            SamplePoint::new(0.0, 0.0, 1.0),
            SamplePoint::new(1.0, 0.0, 1.0),
            SamplePoint::new(0.0, 1.0, 1.0),
            SamplePoint::new(0.0, 0.0, 50.0),
        ];
        let ct = CloughTocher::new(&pts).unwrap();
        assert_eq!(ct.values(), &[1.0, 1.0, 1.0]);
        assert_relative_eq!(ct.evaluate(0.0, 0.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(ct.evaluate(0.2, 0.2).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_samples_error() {
        let result = cubic_interpolation(&[], &[(0.0, 0.0)]);
        assert!(matches!(result, Err(Error::Algorithm(_))));
    }

    #[test]
    fn test_continuity_across_shared_edge() {
        let f = |x: f64, y: f64| (x * 0.7).cos() * (y * 0.4).sin() * 10.0;
        let pts = scattered(f);
        let ct = CloughTocher::new(&pts).unwrap();

        // Points straddling a shared edge evaluate to nearly the same value
        let tri = ct.triangulation();
        let neighbors = tri.vertex_neighbors();
        let a = 4;
        let b = neighbors[a][0];
        let pa = tri.points()[a];
        let pb = tri.points()[b];
        let mid = [(pa[0] + pb[0]) / 2.0, (pa[1] + pb[1]) / 2.0];
        let normal = [-(pb[1] - pa[1]), pb[0] - pa[0]];
        let h = 1e-7;
        let left = ct.evaluate(mid[0] + h * normal[0], mid[1] + h * normal[1]);
        let right = ct.evaluate(mid[0] - h * normal[0], mid[1] - h * normal[1]);
        if let (Some(l), Some(r)) = (left, right) {
            assert!((l - r).abs() < 1e-5, "{l} vs {r}");
        }
    }
}

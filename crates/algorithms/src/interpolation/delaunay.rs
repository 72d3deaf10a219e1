//! Delaunay triangulation of scattered points
//!
//! Incremental Bowyer-Watson: every point is inserted into a large
//! enclosing super-triangle, the triangles whose circumcircle contains it
//! are removed, and the cavity is re-triangulated by joining its boundary
//! edges to the new point. Triangles touching the super-triangle are dropped
//! at the end, leaving a triangulation of the convex hull.
//!
//! Coordinates are shifted and scaled into a unit box before insertion so the
//! circumcircle tests do not lose precision on geographic coordinates. Input
//! points must be distinct.

use std::collections::HashMap;

/// Relative area below which a triangle is considered degenerate
const DEGENERATE_AREA: f64 = 1e-14;

/// Barycentric tolerance for point-in-triangle tests
const INSIDE_EPS: f64 = -1e-10;

/// A triangle as three counter-clockwise vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub v: [usize; 3],
}

/// Delaunay triangulation over a fixed point set
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<[f64; 2]>,
    triangles: Vec<Triangle>,
}

/// Triangle under construction with its cached circumcircle
#[derive(Debug, Clone, Copy)]
struct Cell {
    v: [usize; 3],
    /// (cx, cy, r²); `None` for degenerate triangles
    circle: Option<(f64, f64, f64)>,
}

impl Triangulation {
    /// Triangulate `points`.
    ///
    /// Returns `None` when no triangle can be formed: fewer than three
    /// points, or all points collinear.
    pub fn new(points: &[[f64; 2]]) -> Option<Self> {
        let n = points.len();
        if n < 3 {
            return None;
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p[0]);
            max_x = max_x.max(p[0]);
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
        }
        let scale = (max_x - min_x).max(max_y - min_y);
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

        // Unit-box coordinates followed by the three super-triangle vertices
        let mut verts: Vec<[f64; 2]> = points
            .iter()
            .map(|p| [(p[0] - cx) / scale, (p[1] - cy) / scale])
            .collect();
        verts.extend_from_slice(&[[-100.0, -100.0], [100.0, -100.0], [0.0, 100.0]]);

        let mut cells = vec![make_cell(&verts, [n, n + 1, n + 2])];

        for i in 0..n {
            let p = verts[i];

            let mut bad = vec![false; cells.len()];
            let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
            let mut cavity_edges = Vec::new();

            for (ci, cell) in cells.iter().enumerate() {
                let Some((ccx, ccy, r2)) = cell.circle else {
                    continue;
                };
                let dx = p[0] - ccx;
                let dy = p[1] - ccy;
                if dx * dx + dy * dy <= r2 {
                    bad[ci] = true;
                    for k in 0..3 {
                        let a = cell.v[k];
                        let b = cell.v[(k + 1) % 3];
                        *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
                        cavity_edges.push((a, b));
                    }
                }
            }

            let mut idx = 0;
            cells.retain(|_| {
                let keep = !bad[idx];
                idx += 1;
                keep
            });

            for (a, b) in cavity_edges {
                if edge_count[&(a.min(b), a.max(b))] == 1 {
                    cells.push(make_cell(&verts, [a, b, i]));
                }
            }
        }

        let triangles: Vec<Triangle> = cells
            .into_iter()
            .filter(|c| c.v.iter().all(|&v| v < n))
            .filter(|c| signed_area(&verts, c.v).abs() > DEGENERATE_AREA)
            .map(|c| Triangle { v: c.v })
            .collect();

        if triangles.is_empty() {
            return None;
        }

        Some(Self {
            points: points.to_vec(),
            triangles,
        })
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Indices of the vertices sharing an edge with each vertex, sorted
    pub fn vertex_neighbors(&self) -> Vec<Vec<usize>> {
        let mut neighbors = vec![Vec::new(); self.points.len()];
        for tri in &self.triangles {
            for k in 0..3 {
                let a = tri.v[k];
                let b = tri.v[(k + 1) % 3];
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        neighbors
    }

    /// Find the triangle containing (x, y) and the barycentric coordinates
    /// of the point within it. `None` outside the convex hull.
    pub fn locate(&self, x: f64, y: f64) -> Option<(usize, [f64; 3])> {
        self.triangles.iter().enumerate().find_map(|(ti, tri)| {
            let [p0, p1, p2] = tri.v.map(|v| self.points[v]);

            // Cheap bounding-box rejection before the barycentric solve
            if x < p0[0].min(p1[0]).min(p2[0]) - 1e-12
                || x > p0[0].max(p1[0]).max(p2[0]) + 1e-12
                || y < p0[1].min(p1[1]).min(p2[1]) - 1e-12
                || y > p0[1].max(p1[1]).max(p2[1]) + 1e-12
            {
                return None;
            }

            let b = barycentric(x, y, p0, p1, p2)?;
            b.iter().all(|&w| w >= INSIDE_EPS).then_some((ti, b))
        })
    }
}

fn make_cell(verts: &[[f64; 2]], v: [usize; 3]) -> Cell {
    Cell {
        v,
        circle: circumcircle(verts[v[0]], verts[v[1]], verts[v[2]]),
    }
}

/// Circumcircle centre and squared radius of three points
fn circumcircle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<(f64, f64, f64)> {
    let d = 2.0 * (a[0] * (b[1] - c[1]) + b[0] * (c[1] - a[1]) + c[0] * (a[1] - b[1]));
    if d.abs() < 1e-14 {
        return None;
    }

    let a2 = a[0] * a[0] + a[1] * a[1];
    let b2 = b[0] * b[0] + b[1] * b[1];
    let c2 = c[0] * c[0] + c[1] * c[1];

    let ux = (a2 * (b[1] - c[1]) + b2 * (c[1] - a[1]) + c2 * (a[1] - b[1])) / d;
    let uy = (a2 * (c[0] - b[0]) + b2 * (a[0] - c[0]) + c2 * (b[0] - a[0])) / d;

    let dx = a[0] - ux;
    let dy = a[1] - uy;
    Some((ux, uy, dx * dx + dy * dy))
}

fn signed_area(verts: &[[f64; 2]], v: [usize; 3]) -> f64 {
    let [a, b, c] = v.map(|i| verts[i]);
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

/// Barycentric coordinates of (x, y) in triangle (p0, p1, p2)
pub(crate) fn barycentric(
    x: f64,
    y: f64,
    p0: [f64; 2],
    p1: [f64; 2],
    p2: [f64; 2],
) -> Option<[f64; 3]> {
    let det = (p1[1] - p2[1]) * (p0[0] - p2[0]) + (p2[0] - p1[0]) * (p0[1] - p2[1]);
    if det == 0.0 {
        return None;
    }
    let b0 = ((p1[1] - p2[1]) * (x - p2[0]) + (p2[0] - p1[0]) * (y - p2[1])) / det;
    let b1 = ((p2[1] - p0[1]) * (x - p2[0]) + (p0[0] - p2[0]) * (y - p2[1])) / det;
    Some([b0, b1, 1.0 - b0 - b1])
}

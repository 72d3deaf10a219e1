//! 2D k-d tree for nearest-sample queries
//!
//! Built once per sample set and queried once per lattice point, replacing
//! the O(n·m) brute-force scan of the nearest-neighbour fallback.
//!
//! Reference:
//! Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

use super::SamplePoint;

/// A 2D k-d tree over sample points.
#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    /// Points in their original order; nodes refer to them by index
    points: Vec<SamplePoint>,
}

#[derive(Debug, Clone)]
struct KdNode {
    /// Index into `points`
    point_idx: usize,
    /// Split dimension: 0 = x, 1 = y
    split_dim: u8,
    left: Option<usize>,
    right: Option<usize>,
}

/// Result of a nearest-neighbour query
#[derive(Debug, Clone, Copy)]
pub struct NearestResult {
    pub point: SamplePoint,
    pub distance_sq: f64,
    /// Position of the point in the slice the tree was built from
    pub index: usize,
}

impl KdTree {
    /// Build a tree from sample points, splitting at the median of
    /// alternating coordinates.
    pub fn build(points: &[SamplePoint]) -> Self {
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        if !points.is_empty() {
            build_recursive(points, &mut indices, 0, &mut nodes);
        }
        Self {
            nodes,
            points: points.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Find the point closest to (qx, qy).
    ///
    /// Among equidistant points the one built from the lowest index wins, so
    /// results do not depend on tree shape. `None` if the tree is empty.
    pub fn nearest(&self, qx: f64, qy: f64) -> Option<NearestResult> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut best = (f64::INFINITY, usize::MAX);
        self.nearest_recursive(0, qx, qy, &mut best);

        let (distance_sq, index) = best;
        Some(NearestResult {
            point: self.points[index],
            distance_sq,
            index,
        })
    }

    fn nearest_recursive(&self, node_idx: usize, qx: f64, qy: f64, best: &mut (f64, usize)) {
        let node = &self.nodes[node_idx];
        let p = &self.points[node.point_idx];

        let dx = qx - p.x;
        let dy = qy - p.y;
        let dist_sq = dx * dx + dy * dy;

        if dist_sq < best.0 || (dist_sq == best.0 && node.point_idx < best.1) {
            *best = (dist_sq, node.point_idx);
        }

        let diff = if node.split_dim == 0 { dx } else { dy };
        let (first, second) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = first {
            self.nearest_recursive(child, qx, qy, best);
        }

        // `<=` keeps equidistant candidates on the far side reachable
        if diff * diff <= best.0 {
            if let Some(child) = second {
                self.nearest_recursive(child, qx, qy, best);
            }
        }
    }
}

fn build_recursive(
    points: &[SamplePoint],
    indices: &mut [usize],
    depth: usize,
    nodes: &mut Vec<KdNode>,
) -> usize {
    let split_dim = (depth % 2) as u8;
    let coord = |i: usize| {
        if split_dim == 0 {
            points[i].x
        } else {
            points[i].y
        }
    };

    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| coord(a).total_cmp(&coord(b)));

    let node_idx = nodes.len();
    nodes.push(KdNode {
        point_idx: indices[mid],
        split_dim,
        left: None,
        right: None,
    });

    let (left, rest) = indices.split_at_mut(mid);
    let right = &mut rest[1..];

    if !left.is_empty() {
        let child = build_recursive(points, left, depth + 1, nodes);
        nodes[node_idx].left = Some(child);
    }
    if !right.is_empty() {
        let child = build_recursive(points, right, depth + 1, nodes);
        nodes[node_idx].right = Some(child);
    }

    node_idx
}

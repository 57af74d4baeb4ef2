use glam::Vec2;

/// A triangle referencing three points of a point set by index.
///
/// The triple is unordered: `(i, j, k)` and any permutation describe the same
/// triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub usize, pub usize, pub usize);

impl Triangle {
    /// The vertex indices of the triangle.
    pub fn indices(&self) -> [usize; 3] {
        [self.0, self.1, self.2]
    }

    fn edges(&self) -> [(usize, usize); 3] {
        [(self.0, self.1), (self.1, self.2), (self.2, self.0)]
    }

    fn has_vertex_at_or_above(&self, n: usize) -> bool {
        self.0 >= n || self.1 >= n || self.2 >= n
    }
}

/// Undirected edge comparison: `(u, v)` equals `(v, u)`.
fn same_edge(a: (usize, usize), b: (usize, usize)) -> bool {
    a == b || (a.0, a.1) == (b.1, b.0)
}

/// Tests whether `p` lies strictly inside the circumcircle of `(a, b, c)`.
///
/// The signed in-circle determinant flips its meaning with the winding order
/// of the triangle, so the result is corrected by the triangle's orientation
/// sign. Points exactly on the circle (and degenerate triangles) test as
/// outside.
///
/// Evaluated in f64: the incremental algorithm needs this predicate to be
/// consistent across insertions, and cocircular landmark configurations
/// (grid-like detector output) sit exactly on the f32 rounding boundary.
fn in_circumcircle(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    let perp = |ux: f64, uy: f64, vx: f64, vy: f64| ux * vy - uy * vx;

    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (cx, cy) = (c.x as f64, c.y as f64);
    let (px, py) = (p.x as f64, p.y as f64);

    let orient = perp(ax - cx, ay - cy, bx - cx, by - cy);
    if orient == 0.0 {
        return false;
    }

    let (dax, day) = (ax - px, ay - py);
    let (dbx, dby) = (bx - px, by - py);
    let (dcx, dcy) = (cx - px, cy - py);

    let det = (dax * dax + day * day) * perp(dbx, dby, dcx, dcy)
        - (dbx * dbx + dby * dby) * perp(dax, day, dcx, dcy)
        + (dcx * dcx + dcy * dcy) * perp(dax, day, dbx, dby);

    if orient > 0.0 {
        det > 0.0
    } else {
        det < 0.0
    }
}

/// Computes a Delaunay triangulation of the given points with the incremental
/// Bowyer-Watson algorithm.
///
/// Returns index triples into `points`. Fewer than 3 points yield an empty
/// triangulation. Degenerate configurations (collinear or duplicate points)
/// yield an empty or partial triangulation and never panic; duplicates are
/// kept as-is rather than merged or perturbed, so the indices of the input
/// stay meaningful to the caller.
///
/// # Example
///
/// ```
/// use facemorph_geometry::triangulate;
/// use glam::Vec2;
///
/// let points = [
///     Vec2::new(0.0, 0.0),
///     Vec2::new(10.0, 0.0),
///     Vec2::new(0.0, 10.0),
/// ];
/// let triangles = triangulate(&points);
/// assert_eq!(triangles.len(), 1);
/// ```
pub fn triangulate(points: &[Vec2]) -> Vec<Triangle> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // bounding box of the input, then a super-triangle far outside it that is
    // guaranteed to contain every point
    let (mut min, mut max) = (points[0], points[0]);
    for &p in points {
        min = min.min(p);
        max = max.max(p);
    }
    let extent = (max - min).max_element().max(1.0);
    let margin = 2.0 * extent;
    let mid = (min + max) * 0.5;

    let mut work = points.to_vec();
    work.push(Vec2::new(mid.x - 2.0 * margin, mid.y - margin));
    work.push(Vec2::new(mid.x + 2.0 * margin, mid.y - margin));
    work.push(Vec2::new(mid.x, mid.y + 2.0 * margin));

    let mut triangles = vec![Triangle(n, n + 1, n + 2)];

    // insertion is inherently sequential: each step depends on the
    // triangulation left by the previous one
    for i in 0..n {
        insert_point(&work, &mut triangles, i);
    }

    triangles.retain(|t| !t.has_vertex_at_or_above(n));
    triangles
}

/// One Bowyer-Watson insertion: carve out the cavity of triangles whose
/// circumcircle contains the point and re-triangulate it against the point.
fn insert_point(points: &[Vec2], triangles: &mut Vec<Triangle>, idx: usize) {
    let p = points[idx];

    let (bad, keep): (Vec<Triangle>, Vec<Triangle>) = triangles
        .drain(..)
        .partition(|t| in_circumcircle(points[t.0], points[t.1], points[t.2], p));
    *triangles = keep;

    // cavity boundary: edges not shared by two removed triangles. The
    // pairwise scan is O(bad^2) per insertion, fine for landmark-sized inputs.
    for (i, tri) in bad.iter().enumerate() {
        for edge in tri.edges() {
            let shared = bad.iter().enumerate().any(|(j, other)| {
                i != j && other.edges().iter().any(|&e| same_edge(e, edge))
            });
            if !shared {
                triangles.push(Triangle(edge.0, edge.1, idx));
            }
        }
    }
}

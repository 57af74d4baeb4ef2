use glam::Vec2;

/// Threshold below which the 3-point system is treated as collinear.
const DEGENERATE_EPS: f32 = 1e-10;

/// A 2D affine transform stored as 6 coefficients `(a, b, c, d, e, f)`
/// mapping `(x, y)` to `(a*x + b*y + c, d*x + e*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform(pub [f32; 6]);

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);

    /// Solves the unique affine map taking the `src` triangle vertices onto
    /// the `dst` triangle vertices, by Cramer's rule on the 2x2 system of
    /// vertex differences.
    ///
    /// A (near-)collinear `src` triangle has no unique solution; the identity
    /// map is returned instead so no NaN can leak into the warp.
    ///
    /// # Example
    ///
    /// ```
    /// use facemorph_geometry::AffineTransform;
    /// use glam::Vec2;
    ///
    /// let tri = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
    /// let m = AffineTransform::from_triangles(&tri, &tri);
    /// assert_eq!(m, AffineTransform::IDENTITY);
    /// ```
    pub fn from_triangles(src: &[Vec2; 3], dst: &[Vec2; 3]) -> Self {
        let s0 = src[1] - src[0];
        let s1 = src[2] - src[0];

        let denom = s0.perp_dot(s1);
        if denom.abs() < DEGENERATE_EPS {
            return Self::IDENTITY;
        }

        let d0 = dst[1] - dst[0];
        let d1 = dst[2] - dst[0];

        let a = (d0.x * s1.y - d1.x * s0.y) / denom;
        let b = (d1.x * s0.x - d0.x * s1.x) / denom;
        let d = (d0.y * s1.y - d1.y * s0.y) / denom;
        let e = (d1.y * s0.x - d0.y * s1.x) / denom;

        // translation from the first correspondence
        let c = dst[0].x - a * src[0].x - b * src[0].y;
        let f = dst[0].y - d * src[0].x - e * src[0].y;

        Self([a, b, c, d, e, f])
    }

    /// Applies the transform to a point.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.0;
        Vec2::new(a * p.x + b * p.y + c, d * p.x + e * p.y + f)
    }
}

/// Barycentric coordinates `(u, v)` of `p` relative to the triangle
/// `(a, b, c)`, via the dot-product formulation.
///
/// Returns `None` for a degenerate (zero-area) triangle.
pub fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Option<(f32, f32)> {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 {
        return None;
    }

    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    Some((u, v))
}

/// Tests whether `p` lies inside the triangle `(a, b, c)`, edges included
/// (`u >= 0`, `v >= 0`, `u + v <= 1`).
///
/// Triangles sharing an edge both claim the boundary pixels; the warp accepts
/// this minor double-paint rather than leaving gaps. The comparison stays on
/// the barycentric numerators in f64: dividing by the Gram determinant would
/// round away the exact zero of a pixel sitting on a shared edge and open
/// single-pixel seams between neighboring triangles.
pub fn point_in_triangle(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    let (v0x, v0y) = ((c.x - a.x) as f64, (c.y - a.y) as f64);
    let (v1x, v1y) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let (v2x, v2y) = ((p.x - a.x) as f64, (p.y - a.y) as f64);

    let dot00 = v0x * v0x + v0y * v0y;
    let dot01 = v0x * v1x + v0y * v1y;
    let dot02 = v0x * v2x + v0y * v2y;
    let dot11 = v1x * v1x + v1y * v1y;
    let dot12 = v1x * v2x + v1y * v2y;

    // Gram determinant, never negative; zero for a degenerate triangle
    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 {
        return false;
    }

    let u_num = dot11 * dot02 - dot01 * dot12;
    let v_num = dot00 * dot12 - dot01 * dot02;

    u_num >= 0.0 && v_num >= 0.0 && u_num + v_num <= denom
}

use facemorph_image::ImageSize;
use glam::Vec2;

/// Number of points produced per face by the 68-point landmark convention.
pub const LANDMARK_COUNT: usize = 68;

/// Number of fixed canvas boundary points appended to each landmark set.
pub const BOUNDARY_COUNT: usize = 8;

/// Landmarks detected on one face, tagged with the pixel size of the image
/// they were detected on so they can be rescaled into the output canvas.
///
/// The detector contract is positional: index `i` denotes the same anatomical
/// point in every set, which is what allows two sets to be interpolated
/// point-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLandmarks {
    /// The detected points, in source-image pixel coordinates.
    pub points: Vec<Vec2>,
    /// The pixel size of the image the points were detected on.
    pub image_size: ImageSize,
}

impl FaceLandmarks {
    /// The points rescaled into `canvas` coordinates, with independent
    /// horizontal and vertical scale factors.
    pub fn normalized(&self, canvas: ImageSize) -> Vec<Vec2> {
        normalize_points(&self.points, self.image_size, canvas)
    }
}

/// Rescales points from `src` pixel space into `dst` pixel space.
///
/// Pure pass-through when the two sizes already agree.
pub fn normalize_points(points: &[Vec2], src: ImageSize, dst: ImageSize) -> Vec<Vec2> {
    let sx = dst.width as f32 / src.width as f32;
    let sy = dst.height as f32 / src.height as f32;
    points.iter().map(|p| Vec2::new(p.x * sx, p.y * sy)).collect()
}

/// The fixed ring of 4 corner and 4 edge-midpoint anchors for a canvas.
///
/// Appending these to each landmark set makes the triangulation cover the
/// whole canvas instead of just the face's convex hull. The order is
/// deterministic (clockwise from the top-left corner) and identical for
/// every call.
pub fn boundary_points(canvas: ImageSize) -> [Vec2; BOUNDARY_COUNT] {
    let w = (canvas.width - 1) as f32;
    let h = (canvas.height - 1) as f32;
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(w * 0.5, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(w, h * 0.5),
        Vec2::new(w, h),
        Vec2::new(w * 0.5, h),
        Vec2::new(0.0, h),
        Vec2::new(0.0, h * 0.5),
    ]
}

/// Point-wise linear interpolation of two equal-length point sets:
/// `p = p1 * (1 - t) + p2 * t`.
///
/// At `t = 0` the output equals `a` exactly, at `t = 1` it equals `b`
/// exactly. No clamping is performed; an out-of-range `t` extrapolates.
pub fn interpolate_points(a: &[Vec2], b: &[Vec2], t: f32) -> Vec<Vec2> {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| p * (1.0 - t) + q * t)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_rescales_per_axis() {
        let points = [Vec2::new(100.0, 50.0)];
        let src = ImageSize {
            width: 200,
            height: 100,
        };
        let dst = ImageSize {
            width: 400,
            height: 400,
        };
        let out = normalize_points(&points, src, dst);
        assert_relative_eq!(out[0].x, 200.0);
        assert_relative_eq!(out[0].y, 200.0);
    }

    #[test]
    fn normalize_is_identity_for_equal_sizes() {
        let points = vec![Vec2::new(12.5, 300.25)];
        let size = ImageSize {
            width: 400,
            height: 400,
        };
        assert_eq!(normalize_points(&points, size, size), points);
    }

    #[test]
    fn boundary_ring_is_fixed() {
        let canvas = ImageSize {
            width: 400,
            height: 400,
        };
        let ring = boundary_points(canvas);
        assert_eq!(ring.len(), BOUNDARY_COUNT);
        assert_eq!(ring[0], Vec2::new(0.0, 0.0));
        assert_eq!(ring[2], Vec2::new(399.0, 0.0));
        assert_eq!(ring[4], Vec2::new(399.0, 399.0));
        // deterministic: two calls agree
        assert_eq!(ring, boundary_points(canvas));
    }

    #[test]
    fn interpolation_endpoints_are_exact() {
        let a = vec![Vec2::new(1.0, 2.0), Vec2::new(3.5, -4.25)];
        let b = vec![Vec2::new(9.0, 8.0), Vec2::new(-7.5, 6.75)];
        assert_eq!(interpolate_points(&a, &b, 0.0), a);
        assert_eq!(interpolate_points(&a, &b, 1.0), b);
    }

    #[test]
    fn interpolation_midpoint() {
        let a = vec![Vec2::new(0.0, 0.0)];
        let b = vec![Vec2::new(10.0, 20.0)];
        let mid = interpolate_points(&a, &b, 0.5);
        assert_relative_eq!(mid[0].x, 5.0);
        assert_relative_eq!(mid[0].y, 10.0);
    }

    #[test]
    fn interpolation_extrapolates_out_of_range() {
        let a = vec![Vec2::new(0.0, 0.0)];
        let b = vec![Vec2::new(10.0, 0.0)];
        let out = interpolate_points(&a, &b, 2.0);
        assert_relative_eq!(out[0].x, 20.0);
    }
}

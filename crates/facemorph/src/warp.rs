use facemorph_geometry::{point_in_triangle, AffineTransform, Triangle};
use facemorph_image::{Image, ImageDtype};
use glam::Vec2;
use rayon::prelude::*;

use crate::interpolation::bilinear_sample;

/// Per-triangle state precomputed before the row-parallel fill: the
/// destination triangle, its integer bounding box clipped to the canvas and
/// the two inverse maps back into the source images.
struct TrianglePatch {
    dst: [Vec2; 3],
    to_src1: AffineTransform,
    to_src2: AffineTransform,
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl TrianglePatch {
    /// Builds the patch for one triangle, or `None` when its bounding box
    /// falls entirely outside the canvas.
    fn new(
        dst: [Vec2; 3],
        src1: [Vec2; 3],
        src2: [Vec2; 3],
        cols: usize,
        rows: usize,
    ) -> Option<Self> {
        let min_x = dst.iter().fold(f32::INFINITY, |m, p| m.min(p.x)).floor();
        let max_x = dst.iter().fold(f32::NEG_INFINITY, |m, p| m.max(p.x)).ceil();
        let min_y = dst.iter().fold(f32::INFINITY, |m, p| m.min(p.y)).floor();
        let max_y = dst.iter().fold(f32::NEG_INFINITY, |m, p| m.max(p.y)).ceil();

        let (w, h) = ((cols - 1) as f32, (rows - 1) as f32);
        if max_x < 0.0 || min_x > w || max_y < 0.0 || min_y > h {
            return None;
        }

        Some(Self {
            // the destination triangle plays the "source" role here: mapping
            // output space back into each image is what lets the rasterizer
            // walk output pixels without leaving gaps
            to_src1: AffineTransform::from_triangles(&dst, &src1),
            to_src2: AffineTransform::from_triangles(&dst, &src2),
            dst,
            x0: min_x.max(0.0) as usize,
            x1: max_x.min(w) as usize,
            y0: min_y.max(0.0) as usize,
            y1: max_y.min(h) as usize,
        })
    }
}

/// Rasterizes the triangulation into `dst`, cross-fading both source images.
///
/// For every triangle, each covered output pixel is inverse-mapped into both
/// source images, bilinearly sampled, and blended as
/// `c1 * (1 - t) + c2 * t` with the alpha channel forced to fully opaque.
/// Membership is edge-inclusive, so triangles sharing an edge both claim the
/// boundary pixels (they agree on their colors up to sampling noise).
///
/// The fill is row-parallel: each output row is owned by exactly one task,
/// so no two tasks ever write the same pixel.
///
/// The three point sets are index-aligned; `triangles` indexes into them.
#[allow(clippy::too_many_arguments)]
pub fn warp_blend(
    src1: &Image<u8, 4>,
    src2: &Image<u8, 4>,
    points1: &[Vec2],
    points2: &[Vec2],
    points_mid: &[Vec2],
    triangles: &[Triangle],
    t: f32,
    dst: &mut Image<u8, 4>,
) {
    let (cols, rows) = (dst.cols(), dst.rows());
    if cols == 0 || rows == 0 {
        return;
    }

    let patches: Vec<TrianglePatch> = triangles
        .iter()
        .filter_map(|tri| {
            let [i, j, k] = tri.indices();
            TrianglePatch::new(
                [points_mid[i], points_mid[j], points_mid[k]],
                [points1[i], points1[j], points1[k]],
                [points2[i], points2[j], points2[k]],
                cols,
                rows,
            )
        })
        .collect();

    dst.as_slice_mut()
        .par_chunks_exact_mut(4 * cols)
        .enumerate()
        .for_each(|(y, row)| {
            for patch in &patches {
                if y < patch.y0 || y > patch.y1 {
                    continue;
                }
                for x in patch.x0..=patch.x1 {
                    let p = Vec2::new(x as f32, y as f32);
                    if !point_in_triangle(patch.dst[0], patch.dst[1], patch.dst[2], p) {
                        continue;
                    }

                    let q1 = patch.to_src1.transform_point(p);
                    let q2 = patch.to_src2.transform_point(p);
                    let c1 = bilinear_sample(src1, q1.x, q1.y);
                    let c2 = bilinear_sample(src2, q2.x, q2.y);

                    let pixel = &mut row[x * 4..x * 4 + 4];
                    for k in 0..3 {
                        pixel[k] = u8::from_f32(c1[k] * (1.0 - t) + c2[k] * t);
                    }
                    pixel[3] = 255;
                }
            }
        });
}

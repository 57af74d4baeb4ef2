use facemorph_geometry::triangulate;
use facemorph_image::{Image, ImageSize};
use log::debug;

use crate::error::MorphError;
use crate::landmarks::{boundary_points, interpolate_points, FaceLandmarks};
use crate::warp::warp_blend;

/// Configuration for a morph operation.
///
/// The canvas size is threaded through the call explicitly so concurrent
/// morphs with different target resolutions cannot interfere; there is no
/// global state anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphConfig {
    /// Size of the output canvas. Both source images must already be resized
    /// to it by the caller; landmark coordinates are rescaled into it here.
    pub output_size: ImageSize,
}

impl Default for MorphConfig {
    /// The conventional 400x400 canvas.
    fn default() -> Self {
        Self {
            output_size: ImageSize {
                width: 400,
                height: 400,
            },
        }
    }
}

/// Morphs two faces into one image.
///
/// Sequences the whole pipeline: landmark normalization into the canvas,
/// boundary augmentation, point interpolation by `ratio`, Delaunay
/// triangulation of the intermediate point set, and per-triangle inverse
/// affine warping with cross-fade blending.
///
/// `ratio` is expected in `[0, 1]` (0 reproduces `src1`, 1 reproduces
/// `src2`); out-of-range values extrapolate the landmark geometry and are
/// not rejected. The returned buffer is freshly allocated per call and owned
/// by the caller; the pipeline keeps no state between calls.
///
/// # Errors
///
/// Fails fast when the two landmark sets differ in length or are empty, or
/// when a source image does not match the configured canvas. Degenerate
/// geometry (collinear or duplicate landmarks, near-singular triangles) is
/// handled by documented fallbacks further down the pipeline, not errors.
pub fn morph(
    src1: &Image<u8, 4>,
    src2: &Image<u8, 4>,
    landmarks1: &FaceLandmarks,
    landmarks2: &FaceLandmarks,
    ratio: f32,
    config: &MorphConfig,
) -> Result<Image<u8, 4>, MorphError> {
    if landmarks1.points.len() != landmarks2.points.len() {
        return Err(MorphError::LandmarkCountMismatch(
            landmarks1.points.len(),
            landmarks2.points.len(),
        ));
    }
    if landmarks1.points.is_empty() {
        return Err(MorphError::EmptyLandmarks);
    }
    for src in [src1, src2] {
        if src.size() != config.output_size {
            return Err(MorphError::ImageSizeMismatch {
                expected: config.output_size,
                got: src.size(),
            });
        }
    }

    let canvas = config.output_size;

    let mut points1 = landmarks1.normalized(canvas);
    let mut points2 = landmarks2.normalized(canvas);
    points1.extend(boundary_points(canvas));
    points2.extend(boundary_points(canvas));

    let points_mid = interpolate_points(&points1, &points2, ratio);
    let triangles = triangulate(&points_mid);

    debug!(
        "morphing {} points into {} triangles at ratio {}",
        points_mid.len(),
        triangles.len(),
        ratio
    );

    // opaque black canvas; triangles overwrite their own pixels
    let mut data = vec![0u8; canvas.width * canvas.height * 4];
    for pixel in data.chunks_exact_mut(4) {
        pixel[3] = 255;
    }
    let mut dst = Image::new(canvas, data)?;

    warp_blend(
        src1,
        src2,
        &points1,
        &points2,
        &points_mid,
        &triangles,
        ratio,
        &mut dst,
    );

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn flat_image(size: ImageSize, rgba: [u8; 4]) -> Image<u8, 4> {
        let data = rgba
            .iter()
            .cycle()
            .take(size.width * size.height * 4)
            .copied()
            .collect();
        Image::new(size, data).unwrap()
    }

    fn landmarks_with(points: Vec<Vec2>, size: ImageSize) -> FaceLandmarks {
        FaceLandmarks {
            points,
            image_size: size,
        }
    }

    #[test]
    fn rejects_mismatched_landmark_counts() {
        let config = MorphConfig::default();
        let img = flat_image(config.output_size, [0, 0, 0, 255]);
        let lm1 = landmarks_with(vec![Vec2::ZERO; 68], config.output_size);
        let lm2 = landmarks_with(vec![Vec2::ZERO; 67], config.output_size);

        let res = morph(&img, &img, &lm1, &lm2, 0.5, &config);
        assert!(matches!(
            res,
            Err(MorphError::LandmarkCountMismatch(68, 67))
        ));
    }

    #[test]
    fn rejects_empty_landmarks() {
        let config = MorphConfig::default();
        let img = flat_image(config.output_size, [0, 0, 0, 255]);
        let lm = landmarks_with(vec![], config.output_size);

        let res = morph(&img, &img, &lm, &lm, 0.5, &config);
        assert!(matches!(res, Err(MorphError::EmptyLandmarks)));
    }

    #[test]
    fn rejects_wrong_image_size() {
        let config = MorphConfig::default();
        let small = ImageSize {
            width: 100,
            height: 100,
        };
        let img1 = flat_image(small, [0, 0, 0, 255]);
        let img2 = flat_image(config.output_size, [0, 0, 0, 255]);
        let lm = landmarks_with(vec![Vec2::new(50.0, 50.0); 68], config.output_size);

        let res = morph(&img1, &img2, &lm, &lm, 0.5, &config);
        assert!(matches!(res, Err(MorphError::ImageSizeMismatch { .. })));
    }

    #[test]
    fn output_matches_canvas_size() {
        let config = MorphConfig {
            output_size: ImageSize {
                width: 64,
                height: 64,
            },
        };
        let img = flat_image(config.output_size, [10, 20, 30, 255]);
        let points: Vec<Vec2> = (0..68)
            .map(|i| Vec2::new(8.0 + (i % 8) as f32 * 6.0, 8.0 + (i / 8) as f32 * 5.0))
            .collect();
        let lm = landmarks_with(points, config.output_size);

        let out = morph(&img, &img, &lm, &lm, 0.5, &config).unwrap();
        assert_eq!(out.size(), config.output_size);
        assert_eq!(out.num_channels(), 4);
    }
}

use facemorph_image::{ImageError, ImageSize};

/// Errors that can occur while morphing two faces.
#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    /// The two landmark sets must be index-aligned and therefore equal in length.
    #[error("landmark sets must have the same length, got {0} and {1}")]
    LandmarkCountMismatch(usize, usize),

    /// Landmark sets must contain at least one point.
    #[error("landmark sets must not be empty")]
    EmptyLandmarks,

    /// A source image does not match the configured output canvas.
    #[error("source image size {got} does not match the output canvas {expected}")]
    ImageSizeMismatch {
        /// The configured output canvas size.
        expected: ImageSize,
        /// The size of the offending source image.
        got: ImageSize,
    },

    /// Error related to image construction.
    #[error(transparent)]
    ImageError(#[from] ImageError),
}

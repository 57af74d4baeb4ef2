#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types for the morphing pipeline.
pub mod error;

/// bilinear pixel sampling.
pub mod interpolation;

/// landmark normalization, boundary augmentation and interpolation.
pub mod landmarks;

/// the morph orchestrator.
pub mod morph;

/// triangle warping and cross-fade rasterization.
pub mod warp;

pub use crate::error::MorphError;
pub use crate::landmarks::FaceLandmarks;
pub use crate::morph::{morph, MorphConfig};

#[doc(inline)]
pub use facemorph_geometry as geometry;

#[doc(inline)]
pub use facemorph_image as image;

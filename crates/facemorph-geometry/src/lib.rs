#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// affine transform estimation and barycentric tests.
pub mod affine;

/// incremental Delaunay triangulation.
pub mod delaunay;

pub use crate::affine::{barycentric, point_in_triangle, AffineTransform};
pub use crate::delaunay::{triangulate, Triangle};

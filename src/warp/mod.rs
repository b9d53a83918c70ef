//! The warp itself: projecting positions, geometries and whole feature
//! collections from the source space into the destination space.
//!
//! The layers build on one another. [`engine`] projects a single
//! position through a grid pair. [`geometry`] walks a GeoJSON geometry
//! and projects every position in it. [`features`] handles features and
//! collections, with an optional clipping stage in front.

pub mod engine;
pub mod features;
pub mod geometry;

pub use engine::{project_between_grids, GridProjection};
pub use features::{
    clip_and_project, clip_and_project_feature, clip_and_project_feature_collection, Clip,
};
pub use geometry::project_geometry;

use crate::error::WarpError;

/// A position-level projection between two coordinate spaces.
///
/// `Ok(None)` means the position has no image (outside the mesh, or too
/// few ordinates) and the caller should drop it. Closures with the right
/// signature implement this directly, so a geometry can be warped through
/// any ad-hoc mapping, not just a grid pair.
pub trait Projection {
    fn project(&self, position: &[f64]) -> Result<Option<Vec<f64>>, WarpError>;
}

impl<F> Projection for F
where
    F: Fn(&[f64]) -> Result<Option<Vec<f64>>, WarpError>,
{
    fn project(&self, position: &[f64]) -> Result<Option<Vec<f64>>, WarpError> {
        self(position)
    }
}

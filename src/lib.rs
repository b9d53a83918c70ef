//! Piecewise-affine warping of GeoJSON between two matched triangulated
//! grids.
//!
//! A warp is described by two triangulations sharing triangle ids, one
//! over the source space and one over the destination space. Every
//! position is located in the source grid, decomposed into barycentric
//! coordinates, and re-evaluated against the same-id triangle on the
//! other side. Geometries, features and whole feature collections ride
//! on top of that single-position projection; positions the mesh does
//! not cover drop out instead of failing the batch.
//!
//! ```
//! use gridwarp::{GridIndex, GridProjection, Point, QuadTree, Triangle};
//!
//! // Unit square, and the same square stretched to twice its width
//! let source: GridIndex = [
//!     Triangle::new("t1", Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)),
//!     Triangle::new("t2", Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)),
//! ]
//! .into_iter()
//! .collect();
//! let target: GridIndex = [
//!     Triangle::new("t1", Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, 1.0)),
//!     Triangle::new("t2", Point::new(0.0, 0.0), Point::new(2.0, 1.0), Point::new(0.0, 1.0)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let index = QuadTree::build(&source);
//! let projection = GridProjection::new(&index, &target);
//!
//! let out = gridwarp::project_geometry(
//!     &geojson::Geometry::new(geojson::Value::Point(vec![0.5, 0.5])),
//!     &projection,
//! )?;
//! assert_eq!(out.map(|g| g.value), Some(geojson::Value::Point(vec![1.0, 0.5])));
//! # Ok::<(), gridwarp::WarpError>(())
//! ```

pub mod barycentric;
pub mod error;
pub mod grid;
pub mod locate;
pub mod warp;

pub use barycentric::Barycentric;
pub use error::WarpError;
pub use grid::{Bounds, GridIndex, Point, Triangle};
pub use locate::{PointLocator, QuadTree};
pub use warp::{
    clip_and_project, clip_and_project_feature, clip_and_project_feature_collection,
    project_between_grids, project_geometry, Clip, GridProjection, Projection,
};

//! Point location over the source grid.
//!
//! Finding which triangle contains a query point is the hot path of the
//! warp. The [`PointLocator`] trait is the seam between the engine and the
//! lookup strategy: a plain [`GridIndex`] scans every triangle, while a
//! [`QuadTree`] narrows the search spatially. Both return the exact same
//! projection results; the tree is only faster.
//!
//! [`QuadTree`]: quadtree::QuadTree

pub mod quadtree;

pub use quadtree::QuadTree;

use crate::grid::{GridIndex, Point, Triangle};

/// A strategy for narrowing down which triangles may contain a point.
///
/// The returned candidates are a superset of the triangles actually
/// containing the point; the caller still runs the exact inside test on
/// each. Implementations must return candidates in triangle id order so
/// that a point covered by several triangles resolves identically under
/// every locator.
pub trait PointLocator {
    fn candidates_near(&self, point: Point) -> Vec<&Triangle>;
}

/// Exhaustive scan: every triangle is a candidate for every point.
impl PointLocator for GridIndex {
    fn candidates_near(&self, _point: Point) -> Vec<&Triangle> {
        self.triangles().collect()
    }
}

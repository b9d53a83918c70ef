//! Position projection through a pair of matched grids.
//!
//! Locate the triangle of the source grid containing the position, read
//! the position's barycentric coordinates there, then evaluate those
//! coordinates against the same-id triangle of the destination grid.

use crate::barycentric::Barycentric;
use crate::error::WarpError;
use crate::grid::{GridIndex, Point};
use crate::locate::PointLocator;
use crate::warp::Projection;

/// Project one GeoJSON position from the source space to the destination
/// space.
///
/// Returns `Ok(None)` when the position cannot be projected: fewer than
/// two ordinates, outside every source triangle, or covered only by
/// degenerate triangles. Any altitude ordinate is dropped; the output is
/// always `[x, y]`.
///
/// Candidates are tried in triangle id order, so a position sitting on a
/// shared edge resolves to the same triangle no matter which
/// [`PointLocator`] serves the query.
///
/// # Errors
///
/// [`WarpError::MissingDestinationTriangle`] when the containing source
/// triangle has no same-id counterpart in `target`.
pub fn project_between_grids<L>(
    source: &L,
    target: &GridIndex,
    position: &[f64],
) -> Result<Option<Vec<f64>>, WarpError>
where
    L: PointLocator + ?Sized,
{
    let Some(point) = Point::from_position(position) else {
        return Ok(None);
    };

    for triangle in source.candidates_near(point) {
        let bary = Barycentric::of(point, triangle);
        if !bary.is_inside() {
            continue;
        }
        let id = triangle.id();
        let counterpart = target
            .get(id)
            .ok_or_else(|| WarpError::MissingDestinationTriangle(id.to_owned()))?;
        let projected = bary.interpolate(counterpart);
        return Ok(Some(vec![projected.x, projected.y]));
    }

    Ok(None)
}

/// A grid pair packaged as a reusable [`Projection`].
///
/// Build the locator once, then hand this to the geometry and feature
/// layers for the whole session.
pub struct GridProjection<'a, L: PointLocator + ?Sized> {
    source: &'a L,
    target: &'a GridIndex,
}

impl<'a, L: PointLocator + ?Sized> GridProjection<'a, L> {
    pub fn new(source: &'a L, target: &'a GridIndex) -> Self {
        Self { source, target }
    }
}

impl<L: PointLocator + ?Sized> Projection for GridProjection<'_, L> {
    fn project(&self, position: &[f64]) -> Result<Option<Vec<f64>>, WarpError> {
        project_between_grids(self.source, self.target, position)
    }
}

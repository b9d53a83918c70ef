//! Barycentric coordinates over a triangle.
//!
//! These carry a position between the two grids of a warp: compute the
//! coordinates of a point against the source triangle, then evaluate the
//! same coordinates against the matching destination triangle. Affine on
//! each cell, continuous across shared edges.

use crate::grid::{Point, Triangle};

/// Slack applied to the inside test so points sitting numerically on an
/// edge or vertex still count as inside.
pub const INSIDE_TOLERANCE: f64 = 1e-9;

/// The three barycentric weights of a point relative to a triangle, in
/// vertex order. They always sum to one; each is in `[0, 1]` iff the
/// point is inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Barycentric {
    /// Coordinates of `point` relative to `triangle`.
    ///
    /// For a degenerate triangle (collinear vertices) the determinant is
    /// zero and the weights come out non-finite, which [`is_inside`] then
    /// rejects; no point ever maps through a zero-area cell.
    ///
    /// [`is_inside`]: Barycentric::is_inside
    pub fn of(point: Point, triangle: &Triangle) -> Self {
        let [a, b, c] = triangle.vertices();
        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        let la = ((b.y - c.y) * (point.x - c.x) + (c.x - b.x) * (point.y - c.y)) / det;
        let lb = ((c.y - a.y) * (point.x - c.x) + (a.x - c.x) * (point.y - c.y)) / det;
        Self {
            a: la,
            b: lb,
            c: 1.0 - la - lb,
        }
    }

    /// Whether the weighted point lies inside the triangle, edges and
    /// vertices included.
    pub fn is_inside(&self) -> bool {
        [self.a, self.b, self.c]
            .iter()
            .all(|l| l.is_finite() && *l >= -INSIDE_TOLERANCE && *l <= 1.0 + INSIDE_TOLERANCE)
    }

    /// Evaluate the weights against another triangle's vertices.
    pub fn interpolate(&self, triangle: &Triangle) -> Point {
        let [a, b, c] = triangle.vertices();
        Point::new(
            self.a * a.x + self.b * b.x + self.c * c.x,
            self.a * a.y + self.b * b.y + self.c * c.y,
        )
    }
}

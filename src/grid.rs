//! Grid data model: points, bounding boxes, triangles and the id-indexed
//! triangulation of one coordinate space.
//!
//! A warp is defined by two [`GridIndex`] values sharing triangle ids: the
//! same id designates the same cell in the source and destination spaces.
//! Grids are built once per session and read-only afterwards.

use std::collections::BTreeMap;

/// A 2D position in one coordinate space.
///
/// Coordinates are opaque to the engine beyond arithmetic: geographic
/// degrees and warped schematic units flow through the same code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Read the first two ordinates of a GeoJSON position.
    ///
    /// Returns `None` for positions with fewer than two ordinates; any
    /// additional ordinates (altitude) are ignored.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [x, y, ..] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }
}

/// An axis-aligned bounding box with inclusive edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// The empty box: contains nothing, unions as a no-op.
    pub const EMPTY: Bounds = Bounds {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Whether the point lies inside the box. Edges count as inside, so
    /// hull vertices of a mesh still locate.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Whether the two boxes overlap. Touching edges count as overlap;
    /// the quadtree relies on this so that a triangle ending exactly on a
    /// cell boundary is registered on both sides.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Split into four quadrants around the center.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let c = self.center();
        [
            Bounds::new(self.min_x, self.min_y, c.x, c.y),
            Bounds::new(c.x, self.min_y, self.max_x, c.y),
            Bounds::new(self.min_x, c.y, c.x, self.max_y),
            Bounds::new(c.x, c.y, self.max_x, self.max_y),
        ]
    }
}

/// One cell of a triangulation: three ordered vertices plus the id that
/// ties this cell to its counterpart in the paired grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    id: String,
    vertices: [Point; 3],
}

impl Triangle {
    pub fn new(id: impl Into<String>, a: Point, b: Point, c: Point) -> Self {
        Self {
            id: id.into(),
            vertices: [a, b, c],
        }
    }

    /// The id shared with the corresponding cell of the paired grid.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vertices(&self) -> [Point; 3] {
        self.vertices
    }

    /// Bounding box of the three vertices.
    pub fn bounds(&self) -> Bounds {
        let [a, b, c] = self.vertices;
        Bounds {
            min_x: a.x.min(b.x).min(c.x),
            min_y: a.y.min(b.y).min(c.y),
            max_x: a.x.max(b.x).max(c.x),
            max_y: a.y.max(b.y).max(c.y),
        }
    }
}

/// One full triangulation of a coordinate space, indexed by triangle id.
///
/// Ids are unique within a grid; inserting a triangle under an existing id
/// replaces the previous one. The map is ordered, so [`triangles`] always
/// iterates in id order, which keeps every downstream tie-break
/// deterministic.
///
/// [`triangles`]: GridIndex::triangles
#[derive(Clone, Debug, Default)]
pub struct GridIndex {
    triangles: BTreeMap<String, Triangle>,
}

impl GridIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, triangle: Triangle) {
        self.triangles.insert(triangle.id.clone(), triangle);
    }

    pub fn get(&self, id: &str) -> Option<&Triangle> {
        self.triangles.get(id)
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// All triangles, in id order.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.values()
    }

    /// Bounding box of the whole triangulation; [`Bounds::EMPTY`] for an
    /// empty grid.
    pub fn bounds(&self) -> Bounds {
        self.triangles()
            .fold(Bounds::EMPTY, |acc, t| acc.union(&t.bounds()))
    }
}

impl FromIterator<Triangle> for GridIndex {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        let mut grid = GridIndex::new();
        for triangle in iter {
            grid.insert(triangle);
        }
        grid
    }
}

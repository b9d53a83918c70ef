//! Quadtree over the source grid's triangle bounding boxes.
//!
//! Built once per warp session, queried for every projected position.
//! Leaves split as they fill up, so dense regions of the mesh get deeper
//! subdivision than sparse ones. A triangle is registered in every leaf
//! its bounding box touches, which makes the candidate set a strict
//! superset of the true containing triangles for any query point.

use std::collections::BTreeMap;
use std::mem;

use crate::grid::{Bounds, GridIndex, Point, Triangle};
use crate::locate::PointLocator;

/// A leaf splits once it holds more triangles than this.
const LEAF_CAPACITY: usize = 16;

/// Subdivision stops at this depth no matter how full a leaf is, so
/// heavily overlapping triangles cannot recurse forever.
const DEFAULT_MAX_DEPTH: usize = 8;

#[derive(Debug)]
enum Node {
    Branch {
        bounds: Bounds,
        children: Box<[Node; 4]>,
    },
    Leaf {
        bounds: Bounds,
        triangles: Vec<Triangle>,
    },
}

impl Node {
    fn bounds(&self) -> &Bounds {
        match self {
            Node::Branch { bounds, .. } | Node::Leaf { bounds, .. } => bounds,
        }
    }

    fn insert(&mut self, triangle: Triangle, depth: usize, max_depth: usize) {
        match self {
            Node::Branch { children, .. } => {
                let tb = triangle.bounds();
                for child in children.iter_mut() {
                    if child.bounds().intersects(&tb) {
                        child.insert(triangle.clone(), depth + 1, max_depth);
                    }
                }
            }
            Node::Leaf { bounds, triangles } => {
                triangles.push(triangle);
                if triangles.len() <= LEAF_CAPACITY || depth >= max_depth {
                    return;
                }
                // Split: redistribute this leaf's triangles over four
                // fresh quadrant leaves, then replace self in place.
                let bounds = *bounds;
                let items = mem::take(triangles);
                let mut children = Box::new(
                    bounds
                        .quadrants()
                        .map(|q| Node::Leaf { bounds: q, triangles: Vec::new() }),
                );
                for item in items {
                    let tb = item.bounds();
                    for child in children.iter_mut() {
                        if child.bounds().intersects(&tb) {
                            child.insert(item.clone(), depth + 1, max_depth);
                        }
                    }
                }
                *self = Node::Branch { bounds, children };
            }
        }
    }

    fn collect<'a>(&'a self, point: Point, out: &mut Vec<&'a Triangle>) {
        if !self.bounds().contains(point) {
            return;
        }
        match self {
            Node::Branch { children, .. } => {
                for child in children.iter() {
                    child.collect(point, out);
                }
            }
            Node::Leaf { triangles, .. } => out.extend(triangles.iter()),
        }
    }
}

/// Spatial index over one grid, serving candidate triangles for point
/// queries. Owns copies of the triangles; the grid it was built from can
/// be dropped afterwards.
#[derive(Debug)]
pub struct QuadTree {
    root: Node,
}

impl QuadTree {
    /// Index the grid with the default depth limit.
    pub fn build(grid: &GridIndex) -> Self {
        Self::with_max_depth(grid, DEFAULT_MAX_DEPTH)
    }

    /// Index the grid, splitting leaves at most `max_depth` levels deep.
    /// The root covers the grid's full bounding box.
    pub fn with_max_depth(grid: &GridIndex, max_depth: usize) -> Self {
        let mut root = Node::Leaf {
            bounds: grid.bounds(),
            triangles: Vec::new(),
        };
        for triangle in grid.triangles() {
            root.insert(triangle.clone(), 0, max_depth);
        }
        tracing::debug!(
            triangles = grid.len(),
            max_depth,
            "built quadtree over source grid"
        );
        QuadTree { root }
    }
}

impl PointLocator for QuadTree {
    /// Triangles whose leaf cells contain the point, deduplicated and in
    /// id order. A point outside the root bounds gets no candidates.
    fn candidates_near(&self, point: Point) -> Vec<&Triangle> {
        let mut found = Vec::new();
        self.root.collect(point, &mut found);
        let mut unique: BTreeMap<&str, &Triangle> = BTreeMap::new();
        for triangle in found {
            unique.entry(triangle.id()).or_insert(triangle);
        }
        unique.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barycentric::Barycentric;

    /// A k-by-k field of unit cells, each cut into two triangles along
    /// its diagonal.
    fn make_grid(k: usize) -> GridIndex {
        let mut grid = GridIndex::new();
        for i in 0..k {
            for j in 0..k {
                let (x, y) = (i as f64, j as f64);
                let sw = Point::new(x, y);
                let se = Point::new(x + 1.0, y);
                let ne = Point::new(x + 1.0, y + 1.0);
                let nw = Point::new(x, y + 1.0);
                grid.insert(Triangle::new(format!("cell_{i}_{j}_low"), sw, se, ne));
                grid.insert(Triangle::new(format!("cell_{i}_{j}_high"), sw, ne, nw));
            }
        }
        grid
    }

    fn containing_ids(grid: &GridIndex, point: Point) -> Vec<&str> {
        grid.triangles()
            .filter(|t| Barycentric::of(point, t).is_inside())
            .map(Triangle::id)
            .collect()
    }

    #[test]
    fn test_containing_triangle_is_always_a_candidate() {
        let grid = make_grid(6);
        let tree = QuadTree::build(&grid);

        for i in 0..6 {
            for j in 0..6 {
                let point = Point::new(i as f64 + 0.25, j as f64 + 0.75);
                let candidate_ids: Vec<&str> = tree
                    .candidates_near(point)
                    .into_iter()
                    .map(Triangle::id)
                    .collect();
                for id in containing_ids(&grid, point) {
                    assert!(
                        candidate_ids.contains(&id),
                        "triangle {id} contains {point:?} but was not a candidate"
                    );
                }
            }
        }
    }

    #[test]
    fn test_candidates_are_unique_and_id_ordered() {
        let grid = make_grid(6);
        let tree = QuadTree::build(&grid);
        // On the corner shared by four cells, several leaves answer
        let ids: Vec<&str> = tree
            .candidates_near(Point::new(3.0, 3.0))
            .into_iter()
            .map(Triangle::id)
            .collect();

        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
        assert!(!ids.is_empty());
    }

    #[test]
    fn test_narrows_the_search() {
        let grid = make_grid(6);
        let tree = QuadTree::build(&grid);
        let candidates = tree.candidates_near(Point::new(0.3, 0.3));
        assert!(!candidates.is_empty());
        assert!(candidates.len() < grid.len());
    }

    #[test]
    fn test_point_outside_root_has_no_candidates() {
        let grid = make_grid(4);
        let tree = QuadTree::build(&grid);
        assert!(tree.candidates_near(Point::new(10.0, 10.0)).is_empty());
        assert!(tree.candidates_near(Point::new(-0.5, 2.0)).is_empty());
    }

    #[test]
    fn test_point_on_root_edge_is_served() {
        let grid = make_grid(4);
        let tree = QuadTree::build(&grid);
        let ids: Vec<&str> = tree
            .candidates_near(Point::new(4.0, 4.0))
            .into_iter()
            .map(Triangle::id)
            .collect();
        assert!(ids.contains(&"cell_3_3_low"));
    }

    #[test]
    fn test_empty_grid_builds_an_empty_tree() {
        let tree = QuadTree::build(&GridIndex::new());
        assert!(tree.candidates_near(Point::new(0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_depth_limit_caps_subdivision() {
        // Identical bounding boxes would split forever without the cap
        let mut grid = GridIndex::new();
        for n in 0..100 {
            grid.insert(Triangle::new(
                format!("stack_{n:03}"),
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ));
        }
        let tree = QuadTree::with_max_depth(&grid, 3);
        assert_eq!(tree.candidates_near(Point::new(0.25, 0.25)).len(), 100);
    }
}

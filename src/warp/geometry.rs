//! Projecting whole GeoJSON geometries.
//!
//! Every coordinate of a geometry goes through one [`Projection`];
//! positions without an image are dropped according to per-kind rules
//! rather than failing the whole geometry. The match over
//! [`Value`] is total, so a new geometry kind in the GeoJSON model will
//! refuse to compile here instead of passing through unhandled.

use geojson::{Geometry, Position, Value};

use crate::error::WarpError;
use crate::warp::Projection;

/// Project every position of `geometry`, dropping what has no image.
///
/// Aggregation rules per kind:
/// - `Point`: no image means no geometry, `Ok(None)`.
/// - `MultiPoint` and `LineString`: positions without an image are
///   dropped, surviving positions keep their relative order; an empty
///   result means `Ok(None)`.
/// - `Polygon` and `MultiLineString`: each ring or line is filtered the
///   same way and dropped when it empties; `Ok(None)` when none remain.
///   Rings are not re-closed or repaired after losing positions.
/// - `MultiPolygon`: one more nesting level of the same rule.
/// - `GeometryCollection`: members project independently; members with
///   no image are compacted out, but the collection itself always
///   survives, possibly empty.
///
/// The geometry's `bbox` and foreign members are carried over untouched.
pub fn project_geometry<P>(
    geometry: &Geometry,
    projection: &P,
) -> Result<Option<Geometry>, WarpError>
where
    P: Projection + ?Sized,
{
    let value = match &geometry.value {
        Value::Point(position) => projection.project(position)?.map(Value::Point),
        Value::MultiPoint(positions) => {
            let kept = project_positions(positions, projection)?;
            (!kept.is_empty()).then_some(Value::MultiPoint(kept))
        }
        Value::LineString(positions) => {
            let kept = project_positions(positions, projection)?;
            (!kept.is_empty()).then_some(Value::LineString(kept))
        }
        Value::MultiLineString(lines) => {
            let kept = project_lines(lines, projection)?;
            (!kept.is_empty()).then_some(Value::MultiLineString(kept))
        }
        Value::Polygon(rings) => {
            let kept = project_lines(rings, projection)?;
            (!kept.is_empty()).then_some(Value::Polygon(kept))
        }
        Value::MultiPolygon(polygons) => {
            let mut kept = Vec::with_capacity(polygons.len());
            for rings in polygons {
                let rings = project_lines(rings, projection)?;
                if !rings.is_empty() {
                    kept.push(rings);
                }
            }
            (!kept.is_empty()).then_some(Value::MultiPolygon(kept))
        }
        Value::GeometryCollection(members) => {
            let mut kept = Vec::with_capacity(members.len());
            for member in members {
                if let Some(projected) = project_geometry(member, projection)? {
                    kept.push(projected);
                }
            }
            Some(Value::GeometryCollection(kept))
        }
    };

    Ok(value.map(|value| Geometry {
        bbox: geometry.bbox.clone(),
        value,
        foreign_members: geometry.foreign_members.clone(),
    }))
}

/// Project a position list, keeping survivors in order.
fn project_positions<P>(positions: &[Position], projection: &P) -> Result<Vec<Position>, WarpError>
where
    P: Projection + ?Sized,
{
    let mut kept = Vec::with_capacity(positions.len());
    for position in positions {
        if let Some(projected) = projection.project(position)? {
            kept.push(projected);
        }
    }
    Ok(kept)
}

/// Project a list of rings or lines, dropping any that empty out.
fn project_lines<P>(
    lines: &[Vec<Position>],
    projection: &P,
) -> Result<Vec<Vec<Position>>, WarpError>
where
    P: Projection + ?Sized,
{
    let mut kept = Vec::with_capacity(lines.len());
    for line in lines {
        let positions = project_positions(line, projection)?;
        if !positions.is_empty() {
            kept.push(positions);
        }
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridIndex, Point, Triangle};
    use crate::warp::engine::project_between_grids;

    /// Keeps positions with non-negative x, shifting them east.
    fn shift_east(position: &[f64]) -> Result<Option<Vec<f64>>, WarpError> {
        match position {
            [x, y, ..] if *x >= 0.0 => Ok(Some(vec![*x + 10.0, *y])),
            _ => Ok(None),
        }
    }

    #[test]
    fn test_point_projects_or_vanishes_whole() {
        let inside = Geometry::new(Value::Point(vec![1.0, 2.0]));
        let projected = project_geometry(&inside, &shift_east).unwrap().unwrap();
        assert_eq!(projected.value, Value::Point(vec![11.0, 2.0]));

        let outside = Geometry::new(Value::Point(vec![-1.0, 2.0]));
        assert_eq!(project_geometry(&outside, &shift_east).unwrap(), None);
    }

    #[test]
    fn test_multi_point_filters_and_keeps_order() {
        let geometry = Geometry::new(Value::MultiPoint(vec![
            vec![0.0, 0.0],
            vec![-1.0, 1.0],
            vec![2.0, 2.0],
        ]));
        let projected = project_geometry(&geometry, &shift_east).unwrap().unwrap();
        assert_eq!(
            projected.value,
            Value::MultiPoint(vec![vec![10.0, 0.0], vec![12.0, 2.0]])
        );
    }

    #[test]
    fn test_line_string_empties_to_none() {
        let geometry = Geometry::new(Value::LineString(vec![vec![-1.0, 0.0], vec![-2.0, 0.0]]));
        assert_eq!(project_geometry(&geometry, &shift_east).unwrap(), None);
    }

    #[test]
    fn test_line_string_through_a_grid_pair() {
        // Unit square split along its diagonal, stretched to width 2 on
        // the other side; both cells induce the map (x, y) -> (2x, y)
        let source: GridIndex = [
            Triangle::new("t1", Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)),
            Triangle::new("t2", Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)),
        ]
        .into_iter()
        .collect();
        let target: GridIndex = [
            Triangle::new("t1", Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, 1.0)),
            Triangle::new("t2", Point::new(0.0, 0.0), Point::new(2.0, 1.0), Point::new(0.0, 1.0)),
        ]
        .into_iter()
        .collect();
        let projection = |position: &[f64]| project_between_grids(&source, &target, position);

        let geometry = Geometry::new(Value::LineString(vec![
            vec![0.25, 0.25],
            vec![5.0, 5.0],
            vec![0.75, 0.75],
        ]));
        let projected = project_geometry(&geometry, &projection).unwrap().unwrap();
        // The out-of-mesh middle position is dropped, the rest warp in
        // place and in order
        assert_eq!(
            projected.value,
            Value::LineString(vec![vec![0.5, 0.25], vec![1.5, 0.75]])
        );
    }

    #[test]
    fn test_polygon_drops_emptied_rings() {
        let geometry = Geometry::new(Value::Polygon(vec![
            vec![
                vec![0.0, 0.0],
                vec![4.0, 0.0],
                vec![4.0, 4.0],
                vec![0.0, 4.0],
                vec![0.0, 0.0],
            ],
            // Hole entirely without image
            vec![vec![-1.0, 1.0], vec![-2.0, 1.0], vec![-2.0, 2.0], vec![-1.0, 1.0]],
        ]));
        let projected = project_geometry(&geometry, &shift_east).unwrap().unwrap();
        match projected.value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 5);
            }
            other => panic!("expected a polygon, got {other:?}"),
        }

        let all_outside = Geometry::new(Value::Polygon(vec![vec![
            vec![-1.0, 0.0],
            vec![-2.0, 0.0],
            vec![-2.0, 1.0],
            vec![-1.0, 0.0],
        ]]));
        assert_eq!(project_geometry(&all_outside, &shift_east).unwrap(), None);
    }

    #[test]
    fn test_multi_polygon_drops_emptied_polygons() {
        let geometry = Geometry::new(Value::MultiPolygon(vec![
            vec![vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 0.0]]],
            vec![vec![vec![-1.0, 0.0], vec![-2.0, 0.0], vec![-2.0, 1.0], vec![-1.0, 0.0]]],
        ]));
        let projected = project_geometry(&geometry, &shift_east).unwrap().unwrap();
        match projected.value {
            Value::MultiPolygon(polygons) => assert_eq!(polygons.len(), 1),
            other => panic!("expected a multipolygon, got {other:?}"),
        }
    }

    #[test]
    fn test_geometry_collection_keeps_survivors_and_container() {
        let collection = Geometry::new(Value::GeometryCollection(vec![
            Geometry::new(Value::Point(vec![1.0, 1.0])),
            Geometry::new(Value::Point(vec![-1.0, 1.0])),
            Geometry::new(Value::LineString(vec![vec![0.0, 0.0], vec![-3.0, 0.0], vec![2.0, 0.0]])),
        ]));
        let projected = project_geometry(&collection, &shift_east).unwrap().unwrap();
        match projected.value {
            Value::GeometryCollection(members) => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[0].value, Value::Point(vec![11.0, 1.0]));
                assert_eq!(
                    members[1].value,
                    Value::LineString(vec![vec![10.0, 0.0], vec![12.0, 0.0]])
                );
            }
            other => panic!("expected a collection, got {other:?}"),
        }

        // Even a fully emptied collection survives as a container
        let emptied = Geometry::new(Value::GeometryCollection(vec![Geometry::new(Value::Point(
            vec![-1.0, -1.0],
        ))]));
        let projected = project_geometry(&emptied, &shift_east).unwrap().unwrap();
        assert_eq!(projected.value, Value::GeometryCollection(vec![]));
    }

    #[test]
    fn test_bbox_and_foreign_members_are_carried() {
        let mut foreign = geojson::JsonObject::new();
        foreign.insert("source".to_owned(), "survey".into());
        let geometry = Geometry {
            bbox: Some(vec![0.0, 0.0, 1.0, 1.0]),
            value: Value::Point(vec![0.5, 0.5]),
            foreign_members: Some(foreign.clone()),
        };

        let projected = project_geometry(&geometry, &shift_east).unwrap().unwrap();
        assert_eq!(projected.bbox, Some(vec![0.0, 0.0, 1.0, 1.0]));
        assert_eq!(projected.foreign_members, Some(foreign));
    }

    #[test]
    fn test_projection_errors_abort_the_walk() {
        let failing = |_position: &[f64]| -> Result<Option<Vec<f64>>, WarpError> {
            Err(WarpError::MissingDestinationTriangle("t9".to_owned()))
        };
        let geometry = Geometry::new(Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
        assert_eq!(
            project_geometry(&geometry, &failing),
            Err(WarpError::MissingDestinationTriangle("t9".to_owned()))
        );
    }
}

//! Clipping and projecting features and feature collections.
//!
//! The clipping primitive itself lives with the host application; here
//! it is just a stage in front of projection, already bound to whatever
//! zone the host wants to cut to. Passing `None` skips clipping for
//! that call, which hosts use when the input is known to be inside the
//! zone already.

use geojson::{Feature, FeatureCollection, GeoJson};

use crate::error::WarpError;
use crate::warp::geometry::project_geometry;
use crate::warp::Projection;

/// A feature-level clipping stage.
///
/// Returns the clipped feature, or `None` when the feature lies fully
/// outside the clip zone. Closures with the right signature implement
/// this directly.
pub trait Clip {
    fn clip(&self, feature: &Feature) -> Option<Feature>;
}

impl<F> Clip for F
where
    F: Fn(&Feature) -> Option<Feature>,
{
    fn clip(&self, feature: &Feature) -> Option<Feature> {
        self(feature)
    }
}

/// Clip a feature if a clipper is given, then project its geometry.
///
/// Returns `Ok(None)` when the feature is clipped away entirely, has no
/// geometry, or its geometry has no image under the projection. The
/// surviving feature keeps its id, properties, bbox and foreign members;
/// only the geometry is replaced.
pub fn clip_and_project_feature<P>(
    feature: &Feature,
    projection: &P,
    clip: Option<&dyn Clip>,
) -> Result<Option<Feature>, WarpError>
where
    P: Projection + ?Sized,
{
    let clipped;
    let feature = match clip {
        Some(clipper) => match clipper.clip(feature) {
            Some(inside) => {
                clipped = inside;
                &clipped
            }
            None => return Ok(None),
        },
        None => feature,
    };

    let Some(geometry) = &feature.geometry else {
        return Ok(None);
    };
    let Some(projected) = project_geometry(geometry, projection)? else {
        return Ok(None);
    };

    Ok(Some(Feature {
        bbox: feature.bbox.clone(),
        geometry: Some(projected),
        id: feature.id.clone(),
        properties: feature.properties.clone(),
        foreign_members: feature.foreign_members.clone(),
    }))
}

/// Clip and project every feature of a collection.
///
/// Features that clip away or lose their geometry are omitted; the rest
/// keep their relative order. The result is always a collection, empty
/// at worst. A structurally inconsistent grid aborts the whole batch
/// through the [`WarpError`].
pub fn clip_and_project_feature_collection<P>(
    collection: &FeatureCollection,
    projection: &P,
    clip: Option<&dyn Clip>,
) -> Result<FeatureCollection, WarpError>
where
    P: Projection + ?Sized,
{
    let mut features = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        if let Some(projected) = clip_and_project_feature(feature, projection, clip)? {
            features.push(projected);
        }
    }
    tracing::debug!(
        total = collection.features.len(),
        kept = features.len(),
        "clipped and projected feature collection"
    );
    Ok(FeatureCollection {
        bbox: collection.bbox.clone(),
        features,
        foreign_members: collection.foreign_members.clone(),
    })
}

/// Entry point over any GeoJSON value.
///
/// Bare geometries are projected without clipping; features and
/// collections go through [`clip_and_project_feature`]. A collection
/// always comes back as a collection, the other kinds return `None`
/// when nothing survives.
pub fn clip_and_project<P>(
    geojson: &GeoJson,
    projection: &P,
    clip: Option<&dyn Clip>,
) -> Result<Option<GeoJson>, WarpError>
where
    P: Projection + ?Sized,
{
    match geojson {
        GeoJson::Geometry(geometry) => {
            Ok(project_geometry(geometry, projection)?.map(GeoJson::Geometry))
        }
        GeoJson::Feature(feature) => {
            Ok(clip_and_project_feature(feature, projection, clip)?.map(GeoJson::Feature))
        }
        GeoJson::FeatureCollection(collection) => Ok(Some(GeoJson::FeatureCollection(
            clip_and_project_feature_collection(collection, projection, clip)?,
        ))),
    }
}

//! GeoJSON rendering of a computed footprint set.

use serde_json::{json, Value};

use crate::models::{BoundaryPoint, FootprintSet, MergedOutline, SiteMarker};

/// Render markers, outlines and label anchors as one FeatureCollection.
///
/// Coordinates are `[lon, lat]` and polygon rings are closed. Features carry a
/// `kind` property (`site`, `footprint` or `label`) so a map can style them.
pub fn to_geojson(set: &FootprintSet) -> Value {
    let mut features: Vec<Value> = set.markers.iter().map(marker_feature).collect();

    for band in &set.bands {
        for outline in &band.outlines {
            features.push(outline_feature(outline));
            features.extend(
                outline
                    .label_anchors
                    .iter()
                    .map(|anchor| label_feature(*anchor, outline.altitude_ft)),
            );
        }
    }

    json!({
        "type": "FeatureCollection",
        "center": position(set.centroid),
        "features": features,
    })
}

fn position(point: BoundaryPoint) -> Value {
    json!([point.lon, point.lat])
}

fn marker_feature(marker: &SiteMarker) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [marker.lon, marker.lat]},
        "properties": {
            "kind": "site",
            "id": marker.id,
            "name": marker.name,
            "category": marker.category,
            "arrival_altitude_msl": marker.arrival_altitude_msl,
            "popup": marker.popup,
        },
    })
}

fn outline_feature(outline: &MergedOutline) -> Value {
    let mut ring: Vec<Value> = outline.points.iter().copied().map(position).collect();
    if let Some(first) = outline.points.first() {
        ring.push(position(*first));
    }
    json!({
        "type": "Feature",
        "geometry": {"type": "Polygon", "coordinates": [ring]},
        "properties": {"kind": "footprint", "altitude_ft": outline.altitude_ft},
    })
}

fn label_feature(anchor: BoundaryPoint, altitude_ft: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": position(anchor)},
        "properties": {
            "kind": "label",
            "altitude_ft": altitude_ft,
            "text": format!("{altitude_ft:.0} ft"),
        },
    })
}

//! Union of footprint rings per altitude band.
//!
//! Rings are unioned in the lon/lat plane. At regional glide distances the
//! planar treatment is indistinguishable from a geodesic union and keeps the
//! outlines consistent with what a web map draws between the same vertices.

use geo::{Area, BooleanOps, LineString, MultiPolygon, Polygon};

use crate::error::GlideError;
use crate::models::{AltitudeBand, BoundaryPoint, MergedOutline, Ring};
use crate::rules::FootprintRules;
use crate::spatial::ring_self_intersects;

/// Coordinates closer than this (degrees) are the same vertex.
const SAME_POINT_EPS_DEG: f64 = 1e-12;

/// Rings or union results smaller than this (square degrees) are treated as empty.
const MIN_AREA_DEG2: f64 = 1e-12;

/// Result of merging one band's rings.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub outlines: Vec<MergedOutline>,
    /// Rings excluded from the union, as `DegenerateRing` errors
    pub dropped: Vec<GlideError>,
}

/// Union all rings of one altitude band into disjoint outlines.
///
/// Rings that cannot form a simple polygon are left out of the union and
/// reported in [`MergeOutcome::dropped`]; the rest still merge.
pub fn merge_rings(rings: &[Ring], band: AltitudeBand, rules: &FootprintRules) -> MergeOutcome {
    let mut dropped = Vec::new();
    let mut polygons = Vec::with_capacity(rings.len());

    for ring in rings {
        match prepare_ring(ring) {
            Ok(points) => polygons.push(to_polygon(&points)),
            Err(err) => {
                tracing::warn!("Dropping ring from {} ft union: {}", band.altitude_ft, err);
                dropped.push(err);
            }
        }
    }

    let merged = union_all(polygons);

    let mut outlines: Vec<MergedOutline> = merged
        .0
        .iter()
        .filter_map(|polygon| outline_from_polygon(polygon, band, rules))
        .collect();

    outlines.sort_by(|a, b| {
        let (pa, pb) = (a.points[0], b.points[0]);
        pb.lat.total_cmp(&pa.lat).then(pa.lon.total_cmp(&pb.lon))
    });

    tracing::debug!(
        altitude_ft = band.altitude_ft,
        rings = rings.len(),
        outlines = outlines.len(),
        dropped = dropped.len(),
        "Merged footprint rings"
    );

    MergeOutcome { outlines, dropped }
}

/// Clean a ring for polygon construction.
///
/// Repeated consecutive vertices (including last == first) collapse to one;
/// what remains must have at least three vertices, non-zero area and no
/// crossing edges.
pub fn prepare_ring(ring: &Ring) -> Result<Vec<BoundaryPoint>, GlideError> {
    let degenerate = |reason: &str| GlideError::DegenerateRing {
        site: ring.site.clone(),
        altitude_ft: ring.altitude_ft,
        reason: reason.to_string(),
    };

    if ring
        .points
        .iter()
        .any(|p| !p.lat.is_finite() || !p.lon.is_finite())
    {
        return Err(degenerate("non-finite boundary point"));
    }

    let points = dedup_consecutive(&ring.points);

    if points.len() < 3 {
        return Err(degenerate("fewer than 3 distinct boundary points"));
    }
    if to_polygon(&points).unsigned_area() <= MIN_AREA_DEG2 {
        return Err(degenerate("boundary encloses no area"));
    }
    if ring_self_intersects(&points) {
        return Err(degenerate("boundary crosses itself"));
    }
    Ok(points)
}

/// Pick label anchors at `offsets` into `points`, skipping offsets past the end.
pub fn label_anchors(points: &[BoundaryPoint], offsets: &[usize]) -> Vec<BoundaryPoint> {
    offsets
        .iter()
        .filter_map(|&index| points.get(index).copied())
        .collect()
}

fn same_point(a: &BoundaryPoint, b: &BoundaryPoint) -> bool {
    (a.lat - b.lat).abs() <= SAME_POINT_EPS_DEG && (a.lon - b.lon).abs() <= SAME_POINT_EPS_DEG
}

fn dedup_consecutive(points: &[BoundaryPoint]) -> Vec<BoundaryPoint> {
    let mut out: Vec<BoundaryPoint> = Vec::with_capacity(points.len());
    for point in points {
        if out.last().map_or(true, |last| !same_point(last, point)) {
            out.push(*point);
        }
    }
    while out.len() > 1 && same_point(&out[0], &out[out.len() - 1]) {
        out.pop();
    }
    out
}

fn to_polygon(points: &[BoundaryPoint]) -> Polygon<f64> {
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.lon, p.lat)).collect();
    Polygon::new(LineString::from(coords), Vec::new())
}

fn union_all(polygons: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut iter = polygons.into_iter();
    let Some(first) = iter.next() else {
        return MultiPolygon::new(Vec::new());
    };
    iter.fold(MultiPolygon::new(vec![first]), |acc, polygon| {
        acc.union(&MultiPolygon::new(vec![polygon]))
    })
}

fn outline_from_polygon(
    polygon: &Polygon<f64>,
    band: AltitudeBand,
    rules: &FootprintRules,
) -> Option<MergedOutline> {
    if polygon.unsigned_area() <= MIN_AREA_DEG2 {
        return None;
    }
    if !polygon.interiors().is_empty() {
        tracing::debug!(
            altitude_ft = band.altitude_ft,
            holes = polygon.interiors().len(),
            "Ignoring interior rings of merged footprint"
        );
    }

    let exterior: Vec<BoundaryPoint> = polygon
        .exterior()
        .coords()
        .map(|c| BoundaryPoint::new(c.y, c.x))
        .collect();
    let mut points = dedup_consecutive(&exterior);
    if points.len() < 3 {
        return None;
    }
    normalize_boundary(&mut points);

    let label_anchors = label_anchors(&points, &rules.label_offsets);
    Some(MergedOutline {
        altitude_ft: band.altitude_ft,
        points,
        label_anchors,
    })
}

/// Clockwise order (the sense of increasing heading), starting at the
/// northernmost vertex.
fn normalize_boundary(points: &mut [BoundaryPoint]) {
    if to_polygon(points).signed_area() > 0.0 {
        points.reverse();
    }
    let mut start = 0;
    for (index, point) in points.iter().enumerate() {
        if point.lat > points[start].lat {
            start = index;
        }
    }
    points.rotate_left(start);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::build_ring;
    use crate::models::{AircraftPerformance, Site, SiteCategory, WindModel};
    use crate::spatial::distance_nm;

    fn site(name: &str, lat: f64, lon: f64) -> Site {
        Site {
            id: name.to_lowercase(),
            name: name.to_string(),
            category: SiteCategory::Landable,
            type_code: "L".into(),
            description: String::new(),
            lat,
            lon,
            elevation_ft: 2500.0,
            arrival_altitude_msl: 4500.0,
        }
    }

    fn ring_for(site: &Site, altitude_ft: f64) -> Ring {
        build_ring(
            site,
            AltitudeBand::new(altitude_ft),
            &WindModel::calm(),
            &AircraftPerformance::new(40.0, 51.0, 0.0),
            10,
        )
        .unwrap()
        .unwrap()
    }

    fn lon_span(points: &[BoundaryPoint]) -> f64 {
        let min = points.iter().map(|p| p.lon).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.lon).fold(f64::NEG_INFINITY, f64::max);
        max - min
    }

    #[test]
    fn empty_band_has_no_outlines() {
        let outcome = merge_rings(&[], AltitudeBand::new(5000.0), &FootprintRules::default());
        assert!(outcome.outlines.is_empty());
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn single_ring_passes_through_unchanged() {
        let lake = site("Lake", 34.5614, -117.6045);
        let ring = ring_for(&lake, 6500.0);
        let outcome = merge_rings(
            std::slice::from_ref(&ring),
            AltitudeBand::new(6500.0),
            &FootprintRules::default(),
        );

        assert_eq!(outcome.outlines.len(), 1);
        let outline = &outcome.outlines[0];
        assert_eq!(outline.altitude_ft, 6500.0);
        assert_eq!(outline.points.len(), ring.points.len());
        for (a, b) in outline.points.iter().zip(&ring.points) {
            assert!((a.lat - b.lat).abs() < 1e-9 && (a.lon - b.lon).abs() < 1e-9);
        }
        let expected: Vec<BoundaryPoint> = [1, 10, 19, 28].iter().map(|&i| ring.points[i]).collect();
        assert_eq!(outline.label_anchors, expected);
    }

    #[test]
    fn distant_rings_stay_separate() {
        let west = site("West", 34.5, -118.5);
        let east = site("East", 34.5, -117.0);
        let rings = vec![ring_for(&west, 6500.0), ring_for(&east, 6500.0)];
        let outcome = merge_rings(&rings, AltitudeBand::new(6500.0), &FootprintRules::default());

        assert!(outcome.dropped.is_empty());
        assert_eq!(outcome.outlines.len(), 2);
        for outline in &outcome.outlines {
            assert!(outline.points.len() >= 29);
            assert_eq!(outline.label_anchors.len(), 4);
            let centre = if outline.points[0].lon < -117.75 { &west } else { &east };
            for point in &outline.points {
                let d = distance_nm(centre.lat, centre.lon, point.lat, point.lon);
                assert!((d - 13.166).abs() < 0.01, "distance {d}");
            }
        }
    }

    #[test]
    fn overlapping_rings_merge_into_one_outline() {
        let a = site("A", 34.5, -117.70);
        let b = site("B", 34.5, -117.55);
        let ring_a = ring_for(&a, 6500.0);
        let ring_b = ring_for(&b, 6500.0);
        let outcome = merge_rings(
            &[ring_a.clone(), ring_b.clone()],
            AltitudeBand::new(6500.0),
            &FootprintRules::default(),
        );

        assert_eq!(outcome.outlines.len(), 1);
        let outline = &outcome.outlines[0];
        assert_ne!(outline.points, ring_a.points);
        assert_ne!(outline.points, ring_b.points);
        // Spans both rings, and is no simple concatenation of their vertices.
        assert!(lon_span(&outline.points) > lon_span(&ring_a.points) + 0.1);
        assert!(outline.points.len() < ring_a.points.len() + ring_b.points.len());
        assert_eq!(outline.label_anchors.len(), 4);
    }

    #[test]
    fn collapsed_ring_is_dropped_but_others_merge() {
        let good = site("Good", 34.5, -117.6);
        let collapsed = Ring {
            site: "Collapsed".into(),
            altitude_ft: 6500.0,
            points: vec![BoundaryPoint::new(34.9, -117.9); 36],
        };
        let outcome = merge_rings(
            &[collapsed, ring_for(&good, 6500.0)],
            AltitudeBand::new(6500.0),
            &FootprintRules::default(),
        );
        assert_eq!(outcome.outlines.len(), 1);
        assert_eq!(outcome.dropped.len(), 1);
        assert!(matches!(
            &outcome.dropped[0],
            GlideError::DegenerateRing { site, .. } if site == "Collapsed"
        ));
    }

    #[test]
    fn self_intersecting_ring_is_dropped() {
        let bow_tie = Ring {
            site: "Twisted".into(),
            altitude_ft: 6500.0,
            points: vec![
                BoundaryPoint::new(34.0, -117.0),
                BoundaryPoint::new(34.1, -116.9),
                BoundaryPoint::new(34.0, -116.9),
                BoundaryPoint::new(34.1, -117.0),
            ],
        };
        let err = prepare_ring(&bow_tie).unwrap_err();
        assert!(matches!(err, GlideError::DegenerateRing { .. }));
        let outcome = merge_rings(&[bow_tie], AltitudeBand::new(6500.0), &FootprintRules::default());
        assert!(outcome.outlines.is_empty());
        assert_eq!(outcome.dropped.len(), 1);
    }

    #[test]
    fn collinear_ring_encloses_no_area() {
        let ring = Ring {
            site: "Line".into(),
            altitude_ft: 5000.0,
            points: (0..6)
                .map(|i| BoundaryPoint::new(34.0 + i as f64 * 0.01, -117.0 + i as f64 * 0.01))
                .collect(),
        };
        let err = prepare_ring(&ring).unwrap_err();
        assert!(matches!(
            err,
            GlideError::DegenerateRing { ref reason, .. } if reason == "boundary encloses no area"
        ));
    }

    #[test]
    fn wrap_around_duplicates_collapse() {
        let ring = Ring {
            site: "Square".into(),
            altitude_ft: 5000.0,
            points: vec![
                BoundaryPoint::new(34.1, -117.0),
                BoundaryPoint::new(34.1, -117.0),
                BoundaryPoint::new(34.1, -116.9),
                BoundaryPoint::new(34.0, -116.9),
                BoundaryPoint::new(34.0, -117.0),
                BoundaryPoint::new(34.1, -117.0),
            ],
        };
        let points = prepare_ring(&ring).unwrap();
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn boundary_is_normalized_clockwise_from_north() {
        // Counter-clockwise square starting at its south-west corner.
        let ring = Ring {
            site: "Square".into(),
            altitude_ft: 5000.0,
            points: vec![
                BoundaryPoint::new(34.0, -117.0),
                BoundaryPoint::new(34.0, -116.9),
                BoundaryPoint::new(34.2, -116.95),
                BoundaryPoint::new(34.1, -117.0),
            ],
        };
        let outcome = merge_rings(&[ring], AltitudeBand::new(5000.0), &FootprintRules::default());
        let outline = &outcome.outlines[0];
        assert!((outline.points[0].lat - 34.2).abs() < 1e-9);
        assert!(to_polygon(&outline.points).signed_area() < 0.0);
    }

    #[test]
    fn windy_ring_starts_at_its_northernmost_vertex() {
        let lake = site("Lake", 34.5614, -117.6045);
        let ring = build_ring(
            &lake,
            AltitudeBand::new(6500.0),
            &WindModel::new(51.0, 60.0),
            &AircraftPerformance::new(40.0, 51.0, 0.0),
            10,
        )
        .unwrap()
        .unwrap();
        let outcome = merge_rings(
            std::slice::from_ref(&ring),
            AltitudeBand::new(6500.0),
            &FootprintRules::default(),
        );

        let outline = &outcome.outlines[0];
        let start = outline.points[0];
        assert!((start.lat - ring.points[2].lat).abs() < 1e-9);
        assert!((start.lon - ring.points[2].lon).abs() < 1e-9);
        assert!(outline.points.iter().all(|p| p.lat <= start.lat));
        assert!(to_polygon(&outline.points).signed_area() < 0.0);
        assert!((outline.label_anchors[0].lat - ring.points[3].lat).abs() < 1e-9);
    }

    #[test]
    fn anchors_past_the_end_are_skipped() {
        let points: Vec<BoundaryPoint> =
            (0..12).map(|i| BoundaryPoint::new(i as f64, 0.0)).collect();
        let anchors = label_anchors(&points, &[1, 10, 19, 28]);
        assert_eq!(anchors, vec![points[1], points[10]]);
    }
}

//! Per-site footprint ring construction.

use crate::error::GlideError;
use crate::models::{AircraftPerformance, AltitudeBand, BoundaryPoint, Ring, Site, WindModel};
use crate::range::glide_range_for;
use crate::spatial::project_point;

/// Whether `site` gets a ring at `band`.
///
/// Turn points never do; everything else needs the band to be at or above the
/// site's arrival altitude.
pub fn is_eligible(site: &Site, band: AltitudeBand) -> bool {
    site.category.produces_footprint() && band.altitude_ft >= site.arrival_altitude_msl
}

/// Build the footprint ring for one site at one altitude.
///
/// Headings are swept clockwise from north in `heading_step_deg` increments.
/// Each heading's glide range is clamped at zero (the aircraft cannot glide
/// backward) and projected from the site. Returns `Ok(None)` when the site is
/// not eligible at this altitude.
pub fn build_ring(
    site: &Site,
    band: AltitudeBand,
    wind: &WindModel,
    performance: &AircraftPerformance,
    heading_step_deg: u32,
) -> Result<Option<Ring>, GlideError> {
    if !is_eligible(site, band) {
        return Ok(None);
    }
    if heading_step_deg == 0 {
        return Err(GlideError::InvalidRules(
            "heading step must be positive".to_string(),
        ));
    }

    let origin = BoundaryPoint::new(site.lat, site.lon);
    let mut points = Vec::with_capacity((360 / heading_step_deg) as usize);

    for heading in (0..360).step_by(heading_step_deg as usize) {
        let heading = heading as f64;
        let range_nm = glide_range_for(
            band.altitude_ft,
            site.arrival_altitude_msl,
            performance,
            wind,
            heading,
        )?;
        points.push(project_point(origin, range_nm.max(0.0), heading));
    }

    Ok(Some(Ring {
        site: site.name.clone(),
        altitude_ft: band.altitude_ft,
        points,
    }))
}

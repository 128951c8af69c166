//! Band orchestration: rings per (site, altitude), merged per altitude.

use crate::altitude::normalize_bands;
use crate::error::GlideError;
use crate::footprint::{build_ring, is_eligible};
use crate::merge::merge_rings;
use crate::models::{
    AircraftPerformance, AltitudeBand, BandFootprint, BoundaryPoint, FootprintSet,
    FootprintWarning, Ring, Site, SiteMarker, WindModel,
};
use crate::rules::FootprintRules;

/// Compute footprints for every site and altitude band.
///
/// Whole-input problems (no sites, bad rules, performance, wind or site
/// positions) abort before any geometry is built. Problems with a single ring
/// only exclude that ring and are listed in [`FootprintSet::warnings`].
pub fn compute_footprints(
    sites: &[Site],
    wind: &WindModel,
    performance: &AircraftPerformance,
    bands: &[AltitudeBand],
    rules: &FootprintRules,
) -> Result<FootprintSet, GlideError> {
    let centroid = centroid(sites)?;
    rules.validate()?;
    performance.validate()?;
    wind.validate()?;
    for site in sites {
        site.validate()?;
    }

    let markers: Vec<SiteMarker> = sites.iter().map(SiteMarker::from_site).collect();

    let mut warnings = Vec::new();
    let mut footprints = Vec::new();

    for band in normalize_bands(bands) {
        let eligible = eligible_sites(sites, band);
        if eligible.is_empty() {
            tracing::debug!(altitude_ft = band.altitude_ft, "No eligible sites");
        }

        let rings = build_band_rings(&eligible, band, wind, performance, rules, &mut warnings);
        let outcome = merge_rings(&rings, band, rules);
        warnings.extend(outcome.dropped.iter().map(|err| warning_from(err, band)));

        footprints.push(BandFootprint {
            altitude_ft: band.altitude_ft,
            outlines: outcome.outlines,
        });
    }

    tracing::info!(
        sites = sites.len(),
        bands = footprints.len(),
        outlines = footprints.iter().map(|b| b.outlines.len()).sum::<usize>(),
        warnings = warnings.len(),
        "Computed glide footprints"
    );

    Ok(FootprintSet {
        markers,
        bands: footprints,
        centroid,
        warnings,
    })
}

/// Sites that get a ring at `band`, in input order.
pub fn eligible_sites(sites: &[Site], band: AltitudeBand) -> Vec<&Site> {
    sites.iter().filter(|site| is_eligible(site, band)).collect()
}

/// Mean latitude and longitude of all sites.
pub fn centroid(sites: &[Site]) -> Result<BoundaryPoint, GlideError> {
    if sites.is_empty() {
        return Err(GlideError::EmptySiteSet);
    }
    let n = sites.len() as f64;
    let lat = sites.iter().map(|s| s.lat).sum::<f64>() / n;
    let lon = sites.iter().map(|s| s.lon).sum::<f64>() / n;
    Ok(BoundaryPoint::new(lat, lon))
}

fn build_band_rings(
    sites: &[&Site],
    band: AltitudeBand,
    wind: &WindModel,
    performance: &AircraftPerformance,
    rules: &FootprintRules,
    warnings: &mut Vec<FootprintWarning>,
) -> Vec<Ring> {
    let mut rings = Vec::with_capacity(sites.len());
    for site in sites {
        match build_ring(site, band, wind, performance, rules.heading_step_deg) {
            Ok(Some(ring)) => rings.push(ring),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Skipping ring for '{}' at {} ft: {}", site.name, band.altitude_ft, err);
                warnings.push(FootprintWarning {
                    site: site.name.clone(),
                    altitude_ft: band.altitude_ft,
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }
    rings
}

fn warning_from(err: &GlideError, band: AltitudeBand) -> FootprintWarning {
    let site = match err {
        GlideError::DegenerateRing { site, .. } => site.clone(),
        _ => String::new(),
    };
    FootprintWarning {
        site,
        altitude_ft: band.altitude_ft,
        kind: err.kind().to_string(),
        message: err.to_string(),
    }
}

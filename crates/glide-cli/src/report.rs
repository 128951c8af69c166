//! Run summary written to stderr after a computation.

use glide_core::{AircraftCatalog, AircraftSelection, FootprintSet};

/// Display name for the selected aircraft.
///
/// Catalog selections use the catalog's own spelling when the record is
/// present, so `schleicher / ask 21` reports as `Schleicher ASK 21`.
pub fn aircraft_label(selection: Option<&AircraftSelection>, catalog: &AircraftCatalog) -> Option<String> {
    match selection? {
        AircraftSelection::Catalog { make, model } => Some(
            catalog
                .find(make, model)
                .map(|record| record.label())
                .unwrap_or_else(|| format!("{make} {model}")),
        ),
        AircraftSelection::Custom {
            glide_ratio,
            still_air_speed_kt,
        } => Some(format!("custom {glide_ratio}:1 at {still_air_speed_kt} kt")),
    }
}

/// One-line summary of a footprint set.
pub fn summary(set: &FootprintSet, aircraft: Option<&str>) -> String {
    let counts = format!(
        "{} sites, {} bands, {} outlines",
        set.markers.len(),
        set.bands.len(),
        set.outline_count()
    );
    match aircraft {
        Some(label) => format!("{label}: {counts}"),
        None => counts,
    }
}

/// Print the summary and log each per-ring warning.
pub fn report(set: &FootprintSet, aircraft: Option<&str>) {
    eprintln!("{}", summary(set, aircraft));
    for warning in &set.warnings {
        tracing::warn!(
            site = %warning.site,
            altitude_ft = warning.altitude_ft,
            kind = %warning.kind,
            "{}",
            warning.message
        );
    }
}

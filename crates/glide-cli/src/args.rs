//! Parsers for command-line values.

use anyhow::{bail, Result};
use clap::ValueEnum;
use glide_core::{AircraftSelection, AltitudeSpacing, UserSite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Footprint set as JSON
    Json,
    /// GeoJSON FeatureCollection
    Geojson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpacingPreset {
    EveryThousand,
    EvenThousands,
    OddThousands,
    Legacy,
}

impl From<SpacingPreset> for AltitudeSpacing {
    fn from(preset: SpacingPreset) -> Self {
        match preset {
            SpacingPreset::EveryThousand => AltitudeSpacing::EveryThousand,
            SpacingPreset::EvenThousands => AltitudeSpacing::EvenThousands,
            SpacingPreset::OddThousands => AltitudeSpacing::OddThousands,
            SpacingPreset::Legacy => AltitudeSpacing::Legacy,
        }
    }
}

/// Parse `name,lat,lon,altitude_ft`.
///
/// The name may itself contain commas; the last three fields are numeric.
pub fn parse_user_site(raw: &str) -> Result<UserSite, String> {
    let mut parts: Vec<&str> = raw.rsplitn(4, ',').collect();
    if parts.len() != 4 {
        return Err(format!("expected name,lat,lon,altitude_ft but got '{raw}'"));
    }
    parts.reverse();

    let name = parts[0].trim();
    if name.is_empty() {
        return Err("site name is empty".to_string());
    }
    let number = |label: &str, value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("{label} '{}' is not a number", value.trim()))
    };

    Ok(UserSite {
        name: name.to_string(),
        lat: number("latitude", parts[1])?,
        lon: number("longitude", parts[2])?,
        altitude_ft: number("altitude", parts[3])?,
    })
}

/// Pick the band spacing: an explicit `start end step` range wins over a preset.
pub fn spacing(preset: Option<SpacingPreset>, range: Option<&[f64]>) -> Result<AltitudeSpacing> {
    match range {
        Some([start_ft, end_ft, step_ft]) => Ok(AltitudeSpacing::Range {
            start_ft: *start_ft,
            end_ft: *end_ft,
            step_ft: *step_ft,
        }),
        Some(other) => bail!("--range takes START END STEP, got {} values", other.len()),
        None => Ok(preset.map(AltitudeSpacing::from).unwrap_or_default()),
    }
}

/// Build the aircraft selection from either catalog or custom flags.
pub fn aircraft_selection(
    make: Option<&str>,
    model: Option<&str>,
    glide_ratio: Option<f64>,
    still_air_speed_kt: Option<f64>,
) -> Result<Option<AircraftSelection>> {
    match (glide_ratio, still_air_speed_kt) {
        (Some(glide_ratio), Some(still_air_speed_kt)) => {
            return Ok(Some(AircraftSelection::Custom {
                glide_ratio,
                still_air_speed_kt,
            }))
        }
        (Some(_), None) | (None, Some(_)) => {
            bail!("--glide-ratio and --still-air-speed must be given together")
        }
        (None, None) => {}
    }
    match (make, model) {
        (Some(make), Some(model)) => Ok(Some(AircraftSelection::Catalog {
            make: make.to_string(),
            model: model.to_string(),
        })),
        (None, None) => Ok(None),
        _ => bail!("--make and --model must be given together"),
    }
}

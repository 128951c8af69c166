//! Core data models for the glide footprint engine.

use serde::{Deserialize, Serialize};

use crate::error::GlideError;

// ========== SITES ==========

/// What a site can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteCategory {
    /// Outlanding field or other landable area
    Landable,
    /// Airport or gliderport
    Airfield,
    /// Turn point only; shown on the map but never gets a footprint
    TurnpointOnly,
}

impl SiteCategory {
    /// Map a catalog type code onto a category.
    ///
    /// Codes are attribute letters: `A` airfield, `L` landable, `T` turn point.
    /// Only a bare `T` is marker-only; unknown codes are treated as landable.
    pub fn from_type_code(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        if code.contains('A') {
            SiteCategory::Airfield
        } else if code.contains('L') {
            SiteCategory::Landable
        } else if code == "T" {
            SiteCategory::TurnpointOnly
        } else {
            SiteCategory::Landable
        }
    }

    pub fn produces_footprint(self) -> bool {
        self != SiteCategory::TurnpointOnly
    }
}

/// A landing or turn location, resolved for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub category: SiteCategory,
    /// Raw code from the catalog, kept for display
    #[serde(default)]
    pub type_code: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    /// Field elevation in feet MSL
    pub elevation_ft: f64,
    /// Altitude in feet MSL at which the site counts as reached
    pub arrival_altitude_msl: f64,
}

impl Site {
    pub fn validate(&self) -> Result<(), GlideError> {
        let invalid = |reason: &str| GlideError::InvalidSite {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid("latitude must be within -90..=90"));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(invalid("longitude must be within -180..=180"));
        }
        if !self.arrival_altitude_msl.is_finite() || !self.elevation_ft.is_finite() {
            return Err(invalid("altitudes must be finite"));
        }
        Ok(())
    }
}

// ========== ENVIRONMENT & AIRCRAFT ==========

/// Uniform wind for the whole computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindModel {
    /// Wind speed in knots
    pub speed_kt: f64,
    /// Direction the wind blows from, degrees true
    pub direction_from_deg: f64,
}

impl WindModel {
    pub fn new(speed_kt: f64, direction_from_deg: f64) -> Self {
        Self {
            speed_kt,
            direction_from_deg,
        }
    }

    pub fn calm() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), GlideError> {
        if !self.speed_kt.is_finite() || self.speed_kt < 0.0 {
            return Err(GlideError::InvalidWind(format!(
                "speed must be a non-negative number of knots, got {}",
                self.speed_kt
            )));
        }
        if !self.direction_from_deg.is_finite() {
            return Err(GlideError::InvalidWind("direction must be finite".to_string()));
        }
        Ok(())
    }
}

/// Glide performance of the selected aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftPerformance {
    /// Distance travelled per unit of altitude lost, in still air
    pub glide_ratio: f64,
    /// Best glide speed in still air, knots
    pub still_air_speed_kt: f64,
    /// Fractional derating of the glide ratio, 0..1
    #[serde(default)]
    pub safety_margin: f64,
}

impl AircraftPerformance {
    pub fn new(glide_ratio: f64, still_air_speed_kt: f64, safety_margin: f64) -> Self {
        Self {
            glide_ratio,
            still_air_speed_kt,
            safety_margin,
        }
    }

    pub fn validate(&self) -> Result<(), GlideError> {
        if !self.glide_ratio.is_finite() || self.glide_ratio <= 0.0 {
            return Err(GlideError::InvalidPerformance(format!(
                "glide ratio must be positive, got {}",
                self.glide_ratio
            )));
        }
        if !self.still_air_speed_kt.is_finite() || self.still_air_speed_kt <= 0.0 {
            return Err(GlideError::InvalidPerformance(format!(
                "still-air speed must be positive, got {}",
                self.still_air_speed_kt
            )));
        }
        if !self.safety_margin.is_finite() || !(0.0..1.0).contains(&self.safety_margin) {
            return Err(GlideError::InvalidPerformance(format!(
                "safety margin must be a fraction in 0..1, got {}",
                self.safety_margin
            )));
        }
        Ok(())
    }
}

/// A single altitude, in feet MSL, at which footprints are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AltitudeBand {
    pub altitude_ft: f64,
}

impl AltitudeBand {
    pub fn new(altitude_ft: f64) -> Self {
        Self { altitude_ft }
    }
}

// ========== GEOMETRY ==========

/// A position on the sphere, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub lat: f64,
    pub lon: f64,
}

impl BoundaryPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Footprint boundary for one site at one altitude.
/// One point per sampled heading; the closing point is not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub site: String,
    pub altitude_ft: f64,
    pub points: Vec<BoundaryPoint>,
}

/// Union of the rings of one altitude band that share a boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedOutline {
    pub altitude_ft: f64,
    /// Clockwise, starting at the northernmost vertex, not closed
    pub points: Vec<BoundaryPoint>,
    pub label_anchors: Vec<BoundaryPoint>,
}

// ========== OUTPUT ==========

/// Map marker for a site, emitted whether or not it has a footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMarker {
    pub id: String,
    pub name: String,
    pub category: SiteCategory,
    pub type_code: String,
    pub lat: f64,
    pub lon: f64,
    pub arrival_altitude_msl: f64,
    pub elevation_ft: f64,
    pub description: String,
    /// Display text for the marker popup
    pub popup: String,
}

impl SiteMarker {
    pub fn from_site(site: &Site) -> Self {
        let popup = format!(
            "{}\nType: {}\nArrival Alt: {:.0}ft\nLocation Alt: {:.0}ft\nDescription: {}",
            site.name, site.type_code, site.arrival_altitude_msl, site.elevation_ft, site.description
        );
        Self {
            id: site.id.clone(),
            name: site.name.clone(),
            category: site.category,
            type_code: site.type_code.clone(),
            lat: site.lat,
            lon: site.lon,
            arrival_altitude_msl: site.arrival_altitude_msl,
            elevation_ft: site.elevation_ft,
            description: site.description.clone(),
            popup,
        }
    }
}

/// All outlines computed for one altitude band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandFootprint {
    pub altitude_ft: f64,
    pub outlines: Vec<MergedOutline>,
}

impl BandFootprint {
    /// True when no site was eligible (or every ring was dropped) at this altitude.
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

/// A ring that was excluded from its band, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintWarning {
    pub site: String,
    pub altitude_ft: f64,
    pub kind: String,
    pub message: String,
}

/// Everything a renderer needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintSet {
    pub markers: Vec<SiteMarker>,
    pub bands: Vec<BandFootprint>,
    /// Mean position of all sites, for initial map framing
    pub centroid: BoundaryPoint,
    #[serde(default)]
    pub warnings: Vec<FootprintWarning>,
}

impl FootprintSet {
    pub fn outline_count(&self) -> usize {
        self.bands.iter().map(|band| band.outlines.len()).sum()
    }

    pub fn band(&self, altitude_ft: f64) -> Option<&BandFootprint> {
        self.bands
            .iter()
            .find(|band| (band.altitude_ft - altitude_ft).abs() < f64::EPSILON)
    }
}

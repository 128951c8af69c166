//! Turning a user request into validated engine inputs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::altitude::AltitudeSpacing;
use crate::catalog::{AircraftCatalog, SiteCatalog};
use crate::error::GlideError;
use crate::models::{AircraftPerformance, AltitudeBand, Site, SiteCategory, WindModel};

/// Arrival altitude above field elevation used when a request does not set one.
pub const DEFAULT_ARRIVAL_AGL_FT: f64 = 1000.0;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("unknown site id '{0}'")]
    UnknownSite(String),

    #[error("unknown aircraft '{make} {model}'")]
    UnknownAircraft { make: String, model: String },

    #[error("no aircraft selected")]
    MissingAircraft,

    #[error(transparent)]
    Invalid(#[from] GlideError),
}

impl RequestError {
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::UnknownSite(_) => "unknown_site",
            RequestError::UnknownAircraft { .. } => "unknown_aircraft",
            RequestError::MissingAircraft => "missing_aircraft",
            RequestError::Invalid(err) => err.kind(),
        }
    }
}

/// Ad-hoc landing site entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSite {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Field elevation, feet MSL
    pub altitude_ft: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AircraftSelection {
    Catalog { make: String, model: String },
    Custom { glide_ratio: f64, still_air_speed_kt: f64 },
}

/// A footprint request as submitted by a client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FootprintRequest {
    #[serde(default)]
    pub site_ids: Vec<String>,
    #[serde(default)]
    pub user_sites: Vec<UserSite>,
    #[serde(default)]
    pub aircraft: Option<AircraftSelection>,
    #[serde(default)]
    pub wind_speed_kt: f64,
    #[serde(default)]
    pub wind_direction_deg: f64,
    /// Derating of the glide ratio in percent
    #[serde(default)]
    pub safety_margin_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_agl_ft: Option<f64>,
    #[serde(default)]
    pub spacing: AltitudeSpacing,
}

/// Engine inputs for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub sites: Vec<Site>,
    pub wind: WindModel,
    pub performance: AircraftPerformance,
    pub bands: Vec<AltitudeBand>,
}

impl FootprintRequest {
    /// Look up catalog entries and build engine inputs.
    ///
    /// Catalog sites come first in the order requested, then user sites.
    pub fn resolve(
        &self,
        sites: &SiteCatalog,
        aircraft: &AircraftCatalog,
        default_arrival_agl_ft: f64,
    ) -> Result<ResolvedRequest, RequestError> {
        let arrival_agl_ft = self.arrival_agl_ft.unwrap_or(default_arrival_agl_ft);
        if !arrival_agl_ft.is_finite() || arrival_agl_ft < 0.0 {
            return Err(GlideError::InvalidSite {
                name: "*".to_string(),
                reason: format!("arrival height must be a non-negative number, got {arrival_agl_ft}"),
            }
            .into());
        }

        let mut resolved_sites = Vec::with_capacity(self.site_ids.len() + self.user_sites.len());
        for id in &self.site_ids {
            let record = sites
                .get(id)
                .ok_or_else(|| RequestError::UnknownSite(id.clone()))?;
            resolved_sites.push(record.to_site(arrival_agl_ft));
        }
        for (index, user) in self.user_sites.iter().enumerate() {
            resolved_sites.push(Site {
                id: format!("user-{}", index + 1),
                name: user.name.clone(),
                category: SiteCategory::Landable,
                type_code: "L".to_string(),
                description: "User-defined site".to_string(),
                lat: user.lat,
                lon: user.lon,
                elevation_ft: user.altitude_ft,
                arrival_altitude_msl: user.altitude_ft + arrival_agl_ft,
            });
        }

        let safety_margin = self.safety_margin_pct / 100.0;
        let performance = match &self.aircraft {
            Some(AircraftSelection::Catalog { make, model }) => aircraft
                .find(make, model)
                .ok_or_else(|| RequestError::UnknownAircraft {
                    make: make.clone(),
                    model: model.clone(),
                })?
                .performance(safety_margin),
            Some(AircraftSelection::Custom {
                glide_ratio,
                still_air_speed_kt,
            }) => AircraftPerformance::new(*glide_ratio, *still_air_speed_kt, safety_margin),
            None => return Err(RequestError::MissingAircraft),
        };
        performance.validate()?;

        let wind = WindModel::new(self.wind_speed_kt, self.wind_direction_deg);
        wind.validate()?;

        let bands = self.spacing.bands()?;

        Ok(ResolvedRequest {
            sites: resolved_sites,
            wind,
            performance,
            bands,
        })
    }
}

//! Error taxonomy for the footprint engine.

use thiserror::Error;

/// Failures raised by the geometry engine.
///
/// `InvalidPerformance` and `DegenerateRing` are scoped to a single
/// (site, altitude) computation and are normally turned into warnings by the
/// orchestrator. The remaining kinds describe whole-input problems and abort
/// a footprint computation before any geometry work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlideError {
    #[error("invalid aircraft performance: {0}")]
    InvalidPerformance(String),

    #[error("invalid wind: {0}")]
    InvalidWind(String),

    #[error("invalid site '{name}': {reason}")]
    InvalidSite { name: String, reason: String },

    #[error("degenerate ring for '{site}' at {altitude_ft} ft: {reason}")]
    DegenerateRing {
        site: String,
        altitude_ft: f64,
        reason: String,
    },

    #[error("no sites to compute footprints for")]
    EmptySiteSet,

    #[error("invalid altitude bands: {0}")]
    InvalidBands(String),

    #[error("invalid footprint rules: {0}")]
    InvalidRules(String),
}

impl GlideError {
    /// Stable snake_case name for API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            GlideError::InvalidPerformance(_) => "invalid_performance",
            GlideError::InvalidWind(_) => "invalid_wind",
            GlideError::InvalidSite { .. } => "invalid_site",
            GlideError::DegenerateRing { .. } => "degenerate_ring",
            GlideError::EmptySiteSet => "empty_site_set",
            GlideError::InvalidBands(_) => "invalid_bands",
            GlideError::InvalidRules(_) => "invalid_rules",
        }
    }
}

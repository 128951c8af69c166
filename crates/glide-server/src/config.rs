//! Server configuration from environment.

use std::env;
use std::path::PathBuf;

use glide_core::rules::DEFAULT_HEADING_STEP_DEG;
use glide_core::{FootprintRules, DEFAULT_ARRIVAL_AGL_FT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// `GLIDE_LOG_FORMAT=json` selects JSON lines; anything else is plain text.
    pub fn from_env() -> Self {
        match env::var("GLIDE_LOG_FORMAT") {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub sites_path: PathBuf,
    pub aircraft_path: PathBuf,
    /// Arrival height above field elevation when a request does not give one
    pub arrival_agl_ft: f64,
    pub heading_step_deg: u32,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sites_path: PathBuf::from("data/sites.csv"),
            aircraft_path: PathBuf::from("data/aircraft.csv"),
            arrival_agl_ft: DEFAULT_ARRIVAL_AGL_FT,
            heading_step_deg: DEFAULT_HEADING_STEP_DEG,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("GLIDE_PORT").unwrap_or(defaults.server_port),
            sites_path: env::var("GLIDE_SITES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.sites_path),
            aircraft_path: env::var("GLIDE_AIRCRAFT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.aircraft_path),
            arrival_agl_ft: parse_var("GLIDE_ARRIVAL_AGL_FT").unwrap_or(defaults.arrival_agl_ft),
            heading_step_deg: parse_var("GLIDE_HEADING_STEP_DEG")
                .unwrap_or(defaults.heading_step_deg),
            log_format: LogFormat::from_env(),
        }
    }

    pub fn rules(&self) -> FootprintRules {
        FootprintRules::with_heading_step(self.heading_step_deg)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

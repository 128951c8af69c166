//! Shared, read-only application state.

use std::path::Path;

use glide_core::{AircraftCatalog, CatalogError, FootprintRules, SiteCatalog};

use crate::config::Config;

/// Catalogs and engine settings shared by every request.
pub struct AppState {
    config: Config,
    sites: SiteCatalog,
    aircraft: AircraftCatalog,
    rules: FootprintRules,
}

impl AppState {
    /// Load both catalogs named in `config`.
    ///
    /// A missing catalog file starts the server with an empty catalog; a file
    /// that exists but cannot be read is an error.
    pub fn load(config: Config) -> Result<Self, CatalogError> {
        let sites = load_or_empty(&config.sites_path, |path| SiteCatalog::from_path(path))?;
        let aircraft = load_or_empty(&config.aircraft_path, |path| {
            AircraftCatalog::from_path(path)
        })?;
        Ok(Self::with_catalogs(config, sites, aircraft))
    }

    pub fn with_catalogs(config: Config, sites: SiteCatalog, aircraft: AircraftCatalog) -> Self {
        let rules = config.rules();
        Self {
            config,
            sites,
            aircraft,
            rules,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sites(&self) -> &SiteCatalog {
        &self.sites
    }

    pub fn aircraft(&self) -> &AircraftCatalog {
        &self.aircraft
    }

    pub fn rules(&self) -> &FootprintRules {
        &self.rules
    }
}

fn load_or_empty<T: Default>(
    path: &Path,
    load: impl FnOnce(&Path) -> Result<T, CatalogError>,
) -> Result<T, CatalogError> {
    if !path.exists() {
        tracing::warn!("Catalog {} not found, starting empty", path.display());
        return Ok(T::default());
    }
    load(path)
}

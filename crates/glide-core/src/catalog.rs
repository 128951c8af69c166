//! Landing-site and aircraft catalogs.
//!
//! Catalogs are loaded once (CSV or JSON) and looked up per request. CSV rows
//! that fail to parse are skipped and logged so one bad line does not take the
//! whole catalog down.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AircraftPerformance, Site, SiteCategory};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
}

// ========== RECORDS ==========

/// One row of the landing-site catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(default, alias = "Id", alias = "ID")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Code", alias = "Type")]
    pub type_code: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(alias = "Lat", alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "Long", alias = "Lon", alias = "lon")]
    pub longitude: f64,
    /// Field elevation, feet MSL
    #[serde(alias = "Elev", alias = "elevation_ft")]
    pub altitude_msl: f64,
}

impl SiteRecord {
    pub fn category(&self) -> SiteCategory {
        SiteCategory::from_type_code(&self.type_code)
    }

    /// Engine site with arrival altitude `arrival_agl_ft` above the field.
    pub fn to_site(&self, arrival_agl_ft: f64) -> Site {
        Site {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category(),
            type_code: self.type_code.clone(),
            description: self.description.clone(),
            lat: self.latitude,
            lon: self.longitude,
            elevation_ft: self.altitude_msl,
            arrival_altitude_msl: self.altitude_msl + arrival_agl_ft,
        }
    }
}

/// One row of the aircraft performance catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftRecord {
    #[serde(alias = "Make")]
    pub make: String,
    #[serde(alias = "Model")]
    pub model: String,
    #[serde(alias = "Glide Ratio", alias = "glide_ratio_ld")]
    pub glide_ratio: f64,
    /// Best glide speed in knots
    #[serde(alias = "Vg", alias = "still_air_speed_kt")]
    pub still_air_speed: f64,
}

impl AircraftRecord {
    pub fn performance(&self, safety_margin: f64) -> AircraftPerformance {
        AircraftPerformance::new(self.glide_ratio, self.still_air_speed, safety_margin)
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

// ========== CATALOGS ==========

/// Landing sites keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SiteCatalog {
    records: Vec<SiteRecord>,
}

impl SiteCatalog {
    /// Build a catalog, numbering records that arrive without an id.
    pub fn new(records: Vec<SiteRecord>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                if record.id.trim().is_empty() {
                    record.id = (index + 1).to_string();
                }
                record
            })
            .collect();
        Self { records }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self::new(read_csv_rows(reader, "site")?))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    /// Load from a `.json` file, or CSV for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = if is_json(path) {
            Self::from_json_reader(file)?
        } else {
            Self::from_csv_reader(file)?
        };
        tracing::info!("Loaded {} sites from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Case-insensitive lookup by id.
    pub fn get(&self, id: &str) -> Option<&SiteRecord> {
        let id = id.trim();
        self.records.iter().find(|r| r.id.eq_ignore_ascii_case(id))
    }

    pub fn records(&self) -> &[SiteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Aircraft performance keyed by make and model.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AircraftCatalog {
    records: Vec<AircraftRecord>,
}

impl AircraftCatalog {
    pub fn new(records: Vec<AircraftRecord>) -> Self {
        Self { records }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self::new(read_csv_rows(reader, "aircraft")?))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = if is_json(path) {
            Self::from_json_reader(file)?
        } else {
            Self::from_csv_reader(file)?
        };
        tracing::info!("Loaded {} aircraft from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Case-insensitive lookup by make and model.
    pub fn find(&self, make: &str, model: &str) -> Option<&AircraftRecord> {
        let (make, model) = (make.trim(), model.trim());
        self.records
            .iter()
            .find(|r| r.make.eq_ignore_ascii_case(make) && r.model.eq_ignore_ascii_case(model))
    }

    pub fn records(&self) -> &[AircraftRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_csv_rows<R, T>(reader: R, what: &str) -> Result<Vec<T>, CatalogError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    // Fail on an unreadable header rather than skipping every row.
    rdr.headers()?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!("Skipping {} row: {}", what, e);
            }
        }
    }
    Ok(rows)
}

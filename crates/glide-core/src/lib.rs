pub mod altitude;
pub mod catalog;
pub mod error;
pub mod footprint;
pub mod geojson;
pub mod merge;
pub mod models;
pub mod planner;
pub mod range;
pub mod request;
pub mod rules;
pub mod spatial;

pub use altitude::{normalize_bands, range_bands, AltitudeSpacing};
pub use catalog::{AircraftCatalog, AircraftRecord, CatalogError, SiteCatalog, SiteRecord};
pub use error::GlideError;
pub use footprint::{build_ring, is_eligible};
pub use geojson::to_geojson;
pub use merge::{merge_rings, MergeOutcome};
pub use models::{
    AircraftPerformance, AltitudeBand, BandFootprint, BoundaryPoint, FootprintSet,
    FootprintWarning, MergedOutline, Ring, Site, SiteCategory, SiteMarker, WindModel,
};
pub use planner::compute_footprints;
pub use range::{glide_range, glide_range_for};
pub use request::{
    AircraftSelection, FootprintRequest, RequestError, ResolvedRequest, UserSite,
    DEFAULT_ARRIVAL_AGL_FT,
};
pub use rules::FootprintRules;
pub use spatial::{distance_nm, project};

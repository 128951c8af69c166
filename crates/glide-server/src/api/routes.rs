//! REST API routes.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::footprints;
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    let catalog_routes = Router::new()
        .route("/v1/sites", get(footprints::list_sites))
        .route("/v1/aircraft", get(footprints::list_aircraft));

    let footprint_routes = Router::new()
        .route("/v1/footprints", post(footprints::compute))
        .route("/v1/footprints/geojson", post(footprints::compute_geojson));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(catalog_routes)
        .merge(footprint_routes)
}

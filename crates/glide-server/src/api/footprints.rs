//! Footprint computation endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use glide_core::{
    compute_footprints, to_geojson, AircraftRecord, FootprintRequest, FootprintSet, GlideError,
    RequestError, SiteRecord,
};

use crate::state::AppState;

pub type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Serialize, Deserialize)]
pub struct FootprintResponse {
    pub generated_at: DateTime<Utc>,
    pub footprints: FootprintSet,
}

/// List the landing-site catalog.
pub async fn list_sites(State(state): State<Arc<AppState>>) -> Json<Vec<SiteRecord>> {
    Json(state.sites().records().to_vec())
}

/// List the aircraft catalog.
pub async fn list_aircraft(State(state): State<Arc<AppState>>) -> Json<Vec<AircraftRecord>> {
    Json(state.aircraft().records().to_vec())
}

/// Compute footprints for a request.
pub async fn compute(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FootprintRequest>,
) -> Result<Json<FootprintResponse>, ApiError> {
    let footprints = run_blocking(state, request).await?;
    Ok(Json(FootprintResponse {
        generated_at: Utc::now(),
        footprints,
    }))
}

/// Compute footprints and return them as a GeoJSON FeatureCollection.
pub async fn compute_geojson(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FootprintRequest>,
) -> Result<Json<Value>, ApiError> {
    let footprints = run_blocking(state, request).await?;
    Ok(Json(to_geojson(&footprints)))
}

async fn run_blocking(
    state: Arc<AppState>,
    request: FootprintRequest,
) -> Result<FootprintSet, ApiError> {
    tokio::task::spawn_blocking(move || run(&state, &request))
        .await
        .map_err(|err| {
            tracing::error!("Footprint task failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "footprint computation failed", "kind": "internal"})),
            )
        })?
}

fn run(state: &AppState, request: &FootprintRequest) -> Result<FootprintSet, ApiError> {
    let resolved = request
        .resolve(state.sites(), state.aircraft(), state.config().arrival_agl_ft)
        .map_err(request_error)?;

    let set = compute_footprints(
        &resolved.sites,
        &resolved.wind,
        &resolved.performance,
        &resolved.bands,
        state.rules(),
    )
    .map_err(|err| request_error(RequestError::Invalid(err)))?;

    if !set.warnings.is_empty() {
        tracing::warn!("{} rings excluded from footprints", set.warnings.len());
    }
    Ok(set)
}

fn request_error(err: RequestError) -> ApiError {
    let status = match &err {
        RequestError::Invalid(GlideError::InvalidRules(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    tracing::info!("Rejected footprint request: {}", err);
    (
        status,
        Json(json!({
            "error": err.to_string(),
            "kind": err.kind(),
        })),
    )
}

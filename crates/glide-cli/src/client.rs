//! HTTP client for a running glide footprint server.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};

use glide_core::{FootprintRequest, FootprintSet};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct FootprintEnvelope {
    footprints: FootprintSet,
}

/// Blocking client for the footprint API.
pub struct FootprintClient {
    client: Client,
    base_url: String,
}

impl FootprintClient {
    /// # Arguments
    /// * `base_url` - Server root (e.g., "http://localhost:3000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Compute footprints on the server.
    pub fn compute(&self, request: &FootprintRequest) -> Result<FootprintSet> {
        let envelope: FootprintEnvelope = self.post("/v1/footprints", request)?;
        Ok(envelope.footprints)
    }

    /// Compute footprints on the server as GeoJSON.
    pub fn compute_geojson(&self, request: &FootprintRequest) -> Result<serde_json::Value> {
        self.post("/v1/footprints/geojson", request)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, request: &FootprintRequest) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .with_context(|| format!("Failed to reach {url}"))?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json().context("Failed to decode server response");
    }
    let text = response.text().unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) if !body.kind.is_empty() => bail!("server rejected request ({}): {}", body.kind, body.error),
        Ok(body) => bail!("server rejected request: {}", body.error),
        Err(_) => bail!("server returned {status}: {text}"),
    }
}

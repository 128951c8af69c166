//! Glide footprint server: catalogs plus on-demand footprint computation.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glide_server::api;
use glide_server::config::{Config, LogFormat};
use glide_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(LogFormat::from_env())?;
    let config = Config::from_env();

    tracing::info!("Starting glide footprint server...");

    let port = config.server_port;
    let state = AppState::load(config).context("loading catalogs")?;
    state
        .rules()
        .validate()
        .context("invalid GLIDE_HEADING_STEP_DEG")?;
    tracing::info!(
        sites = state.sites().len(),
        aircraft = state.aircraft().len(),
        heading_step_deg = state.rules().heading_step_deg,
        "Catalogs ready"
    );

    let app = api::app(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("glide_server=debug".parse()?)
        .add_directive("glide_core=info".parse()?);

    let (text, json) = match format {
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
    Ok(())
}

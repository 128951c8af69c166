use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glide_cli::{
    aircraft_label, aircraft_selection, parse_user_site, report, spacing, FootprintClient, OutputFormat,
    SpacingPreset,
};
use glide_core::rules::DEFAULT_HEADING_STEP_DEG;
use glide_core::{
    compute_footprints, to_geojson, AircraftCatalog, AircraftSelection, FootprintRequest,
    FootprintRules, FootprintSet, SiteCatalog, UserSite, DEFAULT_ARRIVAL_AGL_FT,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute glide footprints for landing sites", long_about = None)]
struct Args {
    /// Landing-site catalog (CSV or JSON)
    #[arg(long, default_value = "data/sites.csv")]
    sites: PathBuf,

    /// Aircraft catalog (CSV or JSON)
    #[arg(long, default_value = "data/aircraft.csv")]
    aircraft_catalog: PathBuf,

    /// Catalog site id; repeat for several sites
    #[arg(long = "site")]
    site_ids: Vec<String>,

    /// Ad-hoc landing site as name,lat,lon,altitude_ft
    #[arg(long = "user-site", value_parser = parse_user_site)]
    user_sites: Vec<UserSite>,

    /// Aircraft make from the catalog
    #[arg(long)]
    make: Option<String>,

    /// Aircraft model from the catalog
    #[arg(long)]
    model: Option<String>,

    /// Custom glide ratio (use with --still-air-speed)
    #[arg(long)]
    glide_ratio: Option<f64>,

    /// Custom best-glide speed in knots
    #[arg(long)]
    still_air_speed: Option<f64>,

    /// Wind speed in knots
    #[arg(long, default_value_t = 0.0)]
    wind_speed: f64,

    /// Direction the wind blows from, degrees true
    #[arg(long, default_value_t = 0.0)]
    wind_direction: f64,

    /// Glide ratio derating in percent
    #[arg(long, default_value_t = 0.0)]
    safety_margin: f64,

    /// Arrival height above field elevation, feet
    #[arg(long)]
    arrival_agl: Option<f64>,

    /// Preset altitude band spacing
    #[arg(long, value_enum)]
    spacing: Option<SpacingPreset>,

    /// Custom altitude bands: START END STEP in feet
    #[arg(long, num_args = 3, value_names = ["START", "END", "STEP"])]
    range: Option<Vec<f64>>,

    /// Heading step between ring points, degrees (local mode only)
    #[arg(long, default_value_t = DEFAULT_HEADING_STEP_DEG)]
    heading_step: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write output here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Submit the request to a running server instead of computing locally
    #[arg(long)]
    server: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let request = build_request(&args)?;

    let rendered = match &args.server {
        Some(url) => {
            let client = FootprintClient::new(url.clone());
            match args.format {
                OutputFormat::Json => {
                    let set = client.compute(&request)?;
                    let label = aircraft_label(request.aircraft.as_ref(), &AircraftCatalog::default());
                    report(&set, label.as_deref());
                    serde_json::to_string_pretty(&set)?
                }
                OutputFormat::Geojson => serde_json::to_string_pretty(&client.compute_geojson(&request)?)?,
            }
        }
        None => {
            let (set, label) = compute_local(&args, &request)?;
            report(&set, label.as_deref());
            match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&set)?,
                OutputFormat::Geojson => serde_json::to_string_pretty(&to_geojson(&set))?,
            }
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn build_request(args: &Args) -> Result<FootprintRequest> {
    Ok(FootprintRequest {
        site_ids: args.site_ids.clone(),
        user_sites: args.user_sites.clone(),
        aircraft: aircraft_selection(
            args.make.as_deref(),
            args.model.as_deref(),
            args.glide_ratio,
            args.still_air_speed,
        )?,
        wind_speed_kt: args.wind_speed,
        wind_direction_deg: args.wind_direction,
        safety_margin_pct: args.safety_margin,
        arrival_agl_ft: args.arrival_agl,
        spacing: spacing(args.spacing, args.range.as_deref())?,
    })
}

fn compute_local(args: &Args, request: &FootprintRequest) -> Result<(FootprintSet, Option<String>)> {
    let sites = if request.site_ids.is_empty() {
        SiteCatalog::default()
    } else {
        SiteCatalog::from_path(&args.sites)
            .with_context(|| format!("Failed to load sites from {}", args.sites.display()))?
    };
    let aircraft = match request.aircraft {
        Some(AircraftSelection::Catalog { .. }) => AircraftCatalog::from_path(&args.aircraft_catalog)
            .with_context(|| {
                format!("Failed to load aircraft from {}", args.aircraft_catalog.display())
            })?,
        _ => AircraftCatalog::default(),
    };

    let resolved = request.resolve(&sites, &aircraft, DEFAULT_ARRIVAL_AGL_FT)?;
    let rules = FootprintRules::with_heading_step(args.heading_step);
    let set = compute_footprints(
        &resolved.sites,
        &resolved.wind,
        &resolved.performance,
        &resolved.bands,
        &rules,
    )?;
    Ok((set, aircraft_label(request.aircraft.as_ref(), &aircraft)))
}

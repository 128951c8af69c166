//! Glide footprint CLI.
//!
//! Computes footprints locally from catalog files, or submits the same
//! request to a running glide server.

pub mod args;
pub mod client;
pub mod report;

pub use args::{aircraft_selection, parse_user_site, spacing, OutputFormat, SpacingPreset};
pub use client::FootprintClient;
pub use report::{aircraft_label, report, summary};

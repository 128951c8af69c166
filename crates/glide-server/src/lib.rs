//! Shared library surface for the glide footprint server and its tests.

pub mod api;
pub mod config;
pub mod state;

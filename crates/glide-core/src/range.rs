//! Wind-corrected glide range for a single heading.

use crate::error::GlideError;
use crate::models::{AircraftPerformance, WindModel};

/// Knots to feet per second.
pub const KNOTS_TO_FPS: f64 = 1.68781;

/// Feet per nautical mile.
pub const FEET_PER_NM: f64 = 6076.12;

/// Lower bound on `1 - safety_margin` so the derating never zeroes or
/// inverts the glide ratio.
pub const MIN_MARGIN_FACTOR: f64 = 0.01;

/// Glide distance in nautical miles along `heading_deg`, starting at
/// `altitude_start_ft` and arriving at `altitude_arrival_ft`.
///
/// `heading_deg` is the bearing from the landing site out to the start
/// point; the aircraft glides home along the reciprocal. Wind blowing toward
/// `heading_deg` is therefore a headwind on the way back, and the along-track
/// component scales the still-air glide ratio by `(Vg - Vw) / Vg`. The result
/// is negative when the start is below the arrival altitude or the headwind
/// exceeds the glide speed; callers clamp.
///
/// # Errors
/// `InvalidPerformance` when the still-air speed or glide ratio is not positive.
#[allow(clippy::too_many_arguments)]
pub fn glide_range(
    altitude_start_ft: f64,
    altitude_arrival_ft: f64,
    glide_ratio: f64,
    safety_margin: f64,
    still_air_speed_kt: f64,
    wind_speed_kt: f64,
    wind_direction_from_deg: f64,
    heading_deg: f64,
) -> Result<f64, GlideError> {
    if !still_air_speed_kt.is_finite() || still_air_speed_kt <= 0.0 {
        return Err(GlideError::InvalidPerformance(format!(
            "still-air speed must be positive, got {still_air_speed_kt}"
        )));
    }
    if !glide_ratio.is_finite() || glide_ratio <= 0.0 {
        return Err(GlideError::InvalidPerformance(format!(
            "glide ratio must be positive, got {glide_ratio}"
        )));
    }

    let height_to_lose_ft = altitude_start_ft - altitude_arrival_ft;

    let glide_speed_fps = still_air_speed_kt * KNOTS_TO_FPS;
    let wind_speed_fps = wind_speed_kt * KNOTS_TO_FPS;

    let wind_toward_deg = (wind_direction_from_deg + 180.0).rem_euclid(360.0);
    let angle_diff = (wind_toward_deg - heading_deg).to_radians();

    // Positive when the wind opposes the glide back to the site.
    let headwind_fps = wind_speed_fps * angle_diff.cos();

    let margin_factor = (1.0 - safety_margin).max(MIN_MARGIN_FACTOR);
    let effective_glide_ratio =
        ((glide_speed_fps - headwind_fps) / glide_speed_fps) * glide_ratio * margin_factor;

    Ok(height_to_lose_ft * effective_glide_ratio / FEET_PER_NM)
}

/// [`glide_range`] with the aircraft and wind taken from their models.
pub fn glide_range_for(
    altitude_start_ft: f64,
    altitude_arrival_ft: f64,
    performance: &AircraftPerformance,
    wind: &WindModel,
    heading_deg: f64,
) -> Result<f64, GlideError> {
    glide_range(
        altitude_start_ft,
        altitude_arrival_ft,
        performance.glide_ratio,
        performance.safety_margin,
        performance.still_air_speed_kt,
        wind.speed_kt,
        wind.direction_from_deg,
        heading_deg,
    )
}

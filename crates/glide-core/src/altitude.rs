//! Altitude band selection.

use serde::{Deserialize, Serialize};

use crate::error::GlideError;
use crate::models::AltitudeBand;

/// Band altitudes used before spacing became selectable.
pub const LEGACY_BANDS_FT: [f64; 7] = [3000.0, 5000.0, 7000.0, 9000.0, 11000.0, 13000.0, 15000.0];

/// Bounds for the preset spacings.
pub const PRESET_FLOOR_FT: f64 = 2000.0;
pub const PRESET_CEILING_FT: f64 = 18000.0;

/// Upper bound on bands generated from a custom range.
pub const MAX_BANDS: usize = 200;

/// How the altitude bands for a request are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeSpacing {
    /// Every 1000 ft from 2000 to 18000
    #[default]
    EveryThousand,
    /// 2000, 4000, ... 18000
    EvenThousands,
    /// 3000, 5000, ... 17000
    OddThousands,
    /// Fixed 3000..15000 set
    Legacy,
    /// Custom inclusive range
    Range {
        start_ft: f64,
        end_ft: f64,
        step_ft: f64,
    },
}

impl AltitudeSpacing {
    /// Ascending bands for this selection.
    pub fn bands(&self) -> Result<Vec<AltitudeBand>, GlideError> {
        match *self {
            AltitudeSpacing::EveryThousand => range_bands(PRESET_FLOOR_FT, PRESET_CEILING_FT, 1000.0),
            AltitudeSpacing::EvenThousands => range_bands(PRESET_FLOOR_FT, PRESET_CEILING_FT, 2000.0),
            AltitudeSpacing::OddThousands => {
                range_bands(PRESET_FLOOR_FT + 1000.0, PRESET_CEILING_FT, 2000.0)
            }
            AltitudeSpacing::Legacy => Ok(LEGACY_BANDS_FT.iter().copied().map(AltitudeBand::new).collect()),
            AltitudeSpacing::Range {
                start_ft,
                end_ft,
                step_ft,
            } => range_bands(start_ft, end_ft, step_ft),
        }
    }
}

/// Bands from `start_ft` to `end_ft` inclusive, every `step_ft`.
pub fn range_bands(start_ft: f64, end_ft: f64, step_ft: f64) -> Result<Vec<AltitudeBand>, GlideError> {
    if !start_ft.is_finite() || !end_ft.is_finite() || !step_ft.is_finite() {
        return Err(GlideError::InvalidBands("range values must be finite".to_string()));
    }
    if step_ft <= 0.0 {
        return Err(GlideError::InvalidBands(format!(
            "step must be positive, got {step_ft}"
        )));
    }
    if start_ft > end_ft {
        return Err(GlideError::InvalidBands(format!(
            "start {start_ft} ft is above end {end_ft} ft"
        )));
    }

    let count = ((end_ft - start_ft) / step_ft + 1e-9).floor() as usize + 1;
    if count > MAX_BANDS {
        return Err(GlideError::InvalidBands(format!(
            "{count} bands requested, limit is {MAX_BANDS}"
        )));
    }

    Ok((0..count)
        .map(|i| AltitudeBand::new(start_ft + i as f64 * step_ft))
        .collect())
}

/// Sort ascending and drop duplicate altitudes.
pub fn normalize_bands(bands: &[AltitudeBand]) -> Vec<AltitudeBand> {
    let mut sorted: Vec<AltitudeBand> = bands.to_vec();
    sorted.sort_by(|a, b| a.altitude_ft.total_cmp(&b.altitude_ft));
    sorted.dedup_by(|a, b| a.altitude_ft == b.altitude_ft);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn altitudes(bands: &[AltitudeBand]) -> Vec<f64> {
        bands.iter().map(|b| b.altitude_ft).collect()
    }

    #[test]
    fn preset_spacings() {
        let every = AltitudeSpacing::EveryThousand.bands().unwrap();
        assert_eq!(every.len(), 17);
        assert_eq!(every.first().unwrap().altitude_ft, 2000.0);
        assert_eq!(every.last().unwrap().altitude_ft, 18000.0);

        let even = altitudes(&AltitudeSpacing::EvenThousands.bands().unwrap());
        assert_eq!(
            even,
            vec![2000.0, 4000.0, 6000.0, 8000.0, 10000.0, 12000.0, 14000.0, 16000.0, 18000.0]
        );

        let odd = altitudes(&AltitudeSpacing::OddThousands.bands().unwrap());
        assert_eq!(
            odd,
            vec![3000.0, 5000.0, 7000.0, 9000.0, 11000.0, 13000.0, 15000.0, 17000.0]
        );

        let legacy = altitudes(&AltitudeSpacing::Legacy.bands().unwrap());
        assert_eq!(legacy, LEGACY_BANDS_FT.to_vec());
    }

    #[test]
    fn custom_range_is_inclusive() {
        let bands = AltitudeSpacing::Range {
            start_ft: 4500.0,
            end_ft: 6000.0,
            step_ft: 500.0,
        }
        .bands()
        .unwrap();
        assert_eq!(altitudes(&bands), vec![4500.0, 5000.0, 5500.0, 6000.0]);

        let single = range_bands(6500.0, 6500.0, 1000.0).unwrap();
        assert_eq!(altitudes(&single), vec![6500.0]);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(matches!(range_bands(5000.0, 4000.0, 500.0), Err(GlideError::InvalidBands(_))));
        assert!(matches!(range_bands(4000.0, 5000.0, 0.0), Err(GlideError::InvalidBands(_))));
        assert!(matches!(range_bands(0.0, 1_000_000.0, 1.0), Err(GlideError::InvalidBands(_))));
        assert!(matches!(range_bands(f64::NAN, 5000.0, 1.0), Err(GlideError::InvalidBands(_))));
    }

    #[test]
    fn spacing_deserializes_from_snake_case() {
        let spacing: AltitudeSpacing = serde_json::from_str("\"odd_thousands\"").unwrap();
        assert_eq!(spacing, AltitudeSpacing::OddThousands);
        let custom: AltitudeSpacing = serde_json::from_str(
            r#"{"range": {"start_ft": 3000, "end_ft": 9000, "step_ft": 1500}}"#,
        )
        .unwrap();
        assert_eq!(custom.bands().unwrap().len(), 5);
    }

    #[test]
    fn normalize_sorts_and_dedups() {
        let bands = [5000.0, 3000.0, 5000.0, 4000.0].map(AltitudeBand::new);
        assert_eq!(altitudes(&normalize_bands(&bands)), vec![3000.0, 4000.0, 5000.0]);
    }
}

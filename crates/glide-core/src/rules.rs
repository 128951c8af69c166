//! Tunables for ring sampling and label placement.

use serde::{Deserialize, Serialize};

use crate::error::GlideError;

/// Default heading sampling step (36 points per ring).
pub const DEFAULT_HEADING_STEP_DEG: u32 = 10;

/// Boundary indices used for altitude labels, roughly 90 degrees apart.
/// Index 0 is skipped so a label never sits on the ring seam.
pub const DEFAULT_LABEL_OFFSETS: [usize; 4] = [1, 10, 19, 28];

/// Configuration for footprint construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintRules {
    /// Heading increment between ring points in degrees; must divide 360
    pub heading_step_deg: u32,
    /// Indices into a merged boundary that receive an altitude label
    pub label_offsets: Vec<usize>,
}

impl Default for FootprintRules {
    fn default() -> Self {
        Self {
            heading_step_deg: DEFAULT_HEADING_STEP_DEG,
            label_offsets: DEFAULT_LABEL_OFFSETS.to_vec(),
        }
    }
}

impl FootprintRules {
    pub fn with_heading_step(heading_step_deg: u32) -> Self {
        Self {
            heading_step_deg,
            ..Self::default()
        }
    }

    /// Number of points every ring will have.
    pub fn points_per_ring(&self) -> usize {
        if self.heading_step_deg == 0 {
            return 0;
        }
        (360 / self.heading_step_deg) as usize
    }

    pub fn validate(&self) -> Result<(), GlideError> {
        let step = self.heading_step_deg;
        if step == 0 || step > 360 || 360 % step != 0 {
            return Err(GlideError::InvalidRules(format!(
                "heading step must divide 360 evenly, got {step}"
            )));
        }
        if self.points_per_ring() < 3 {
            return Err(GlideError::InvalidRules(format!(
                "heading step {step} yields fewer than 3 ring points"
            )));
        }
        Ok(())
    }
}

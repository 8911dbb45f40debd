//! # Soil Swell and Shrink
//!
//! Converts an in-situ (bank, "cut") volume to the volume it occupies when
//! loosened for hauling, and when compacted as fill:
//!
//! - V_loose = V_cut × (1 + expansion_rate)
//! - V_compacted = V_cut × (1 − contraction_rate)

use serde::{Deserialize, Serialize};

use crate::presets::SoilFactors;

/// Cut volume with its loose and compacted equivalents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwellShrink {
    pub cut_volume_m3: f64,
    pub loose_volume_m3: f64,
    pub compacted_volume_m3: f64,
    pub expansion_rate: f64,
    pub contraction_rate: f64,
}

#[inline]
pub fn loose_volume(cut_volume: f64, expansion_rate: f64) -> f64 {
    cut_volume * (1.0 + expansion_rate)
}

#[inline]
pub fn compacted_volume(cut_volume: f64, contraction_rate: f64) -> f64 {
    cut_volume * (1.0 - contraction_rate)
}

/// Apply both factors to a cut volume.
///
/// ```rust
/// use takeoff_core::formulas::soil::swell_shrink;
/// use takeoff_core::presets::SoilFactors;
///
/// let clay = SoilFactors::new(0.25, 0.10);
/// let result = swell_shrink(10.0, clay);
/// assert_eq!(result.loose_volume_m3, 12.5);
/// assert_eq!(result.compacted_volume_m3, 9.0);
/// ```
pub fn swell_shrink(cut_volume: f64, factors: SoilFactors) -> SwellShrink {
    SwellShrink {
        cut_volume_m3: cut_volume,
        loose_volume_m3: loose_volume(cut_volume, factors.expansion_rate),
        compacted_volume_m3: compacted_volume(cut_volume, factors.contraction_rate),
        expansion_rate: factors.expansion_rate,
        contraction_rate: factors.contraction_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clay_loose_volume() {
        assert_eq!(loose_volume(10.0, 0.25), 12.5);
    }

    #[test]
    fn test_zero_rates_are_identity() {
        let result = swell_shrink(7.0, SoilFactors::new(0.0, 0.0));
        assert_eq!(result.loose_volume_m3, 7.0);
        assert_eq!(result.compacted_volume_m3, 7.0);
    }

    #[test]
    fn test_compacted_volume() {
        assert_eq!(compacted_volume(20.0, 0.5), 10.0);
    }
}

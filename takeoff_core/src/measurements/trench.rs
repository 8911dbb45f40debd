//! # Trench Measurement
//!
//! Open-cut excavation along a digitized polyline, with a constant section or
//! per-vertex depths, plus swell/shrink of the cut spoil.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::measurements::trench::{build, TrenchInput, TrenchProfile};
//! use takeoff_core::geometry::Coordinate;
//! use takeoff_core::presets::Presets;
//! use takeoff_core::scale::ScaleContext;
//!
//! let input = TrenchInput {
//!     points: vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.1, 0.0)],
//!     profile: TrenchProfile::Constant { width_m: 0.6, depth_m: 1.2 },
//!     soil: None,
//!     expansion_rate: None,
//!     contraction_rate: None,
//! };
//!
//! // 0.1 drawing units at 1:50 → 5 m of trench
//! let scale = ScaleContext::new("1:50").resolve().unwrap();
//! let q = build(&input, &scale, Presets::builtin()).unwrap();
//! assert!((q.cut_volume_m3 - 3.6).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::checks::{non_negative_opt, require_polyline, require_positive};
use crate::errors::{TakeoffError, TakeoffResult};
use crate::formulas::soil::swell_shrink;
use crate::formulas::trench::{self, TrenchSegment};
use crate::geometry::{segment_lengths, Coordinate};
use crate::guard::non_negative;
use crate::presets::{Presets, SoilType};
use crate::scale::ResolvedScale;

/// Trench cross-section along the run.
///
/// ## JSON Examples
///
/// ```json
/// { "section": "constant", "width_m": 0.6, "depth_m": 1.2 }
/// { "section": "variable", "widths_m": [0.6], "depths_m": [1.0, 1.4, 1.1] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum TrenchProfile {
    Constant { width_m: f64, depth_m: f64 },
    /// `depths_m` has one entry per vertex; `widths_m` one entry (used for
    /// every segment) or one per segment
    Variable { widths_m: Vec<f64>, depths_m: Vec<f64> },
}

/// Trench input as digitized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrenchInput {
    /// Centerline, drawing units
    pub points: Vec<Coordinate>,

    pub profile: TrenchProfile,

    /// Soil type for swell/shrink; the preset default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilType>,

    /// Overrides the soil table's expansion rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion_rate: Option<f64>,

    /// Overrides the soil table's contraction rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraction_rate: Option<f64>,
}

impl TrenchInput {
    pub fn validate(&self) -> TakeoffResult<()> {
        require_polyline("points", &self.points)?;
        let segments = self.points.len() - 1;

        match &self.profile {
            TrenchProfile::Constant { width_m, depth_m } => {
                require_positive("profile.width_m", *width_m)?;
                require_positive("profile.depth_m", *depth_m)?;
            }
            TrenchProfile::Variable { widths_m, depths_m } => {
                if depths_m.len() != self.points.len() {
                    return Err(TakeoffError::invalid_input(
                        "profile.depths_m",
                        format!("{} values", depths_m.len()),
                        format!("expected one depth per vertex ({})", self.points.len()),
                    ));
                }
                if widths_m.len() != 1 && widths_m.len() != segments {
                    return Err(TakeoffError::invalid_input(
                        "profile.widths_m",
                        format!("{} values", widths_m.len()),
                        format!("expected 1 width or one per segment ({})", segments),
                    ));
                }
                for (i, w) in widths_m.iter().enumerate() {
                    require_positive(&format!("profile.widths_m[{}]", i), *w)?;
                }
                for (i, d) in depths_m.iter().enumerate() {
                    require_positive(&format!("profile.depths_m[{}]", i), *d)?;
                }
            }
        }

        non_negative_opt("expansion_rate", self.expansion_rate)?;
        non_negative_opt("contraction_rate", self.contraction_rate)?;
        if let Some(rate) = self.contraction_rate {
            if rate >= 1.0 {
                return Err(TakeoffError::invalid_input(
                    "contraction_rate",
                    rate.to_string(),
                    "must be below 1",
                ));
            }
        }
        Ok(())
    }
}

/// Trench quantities, real-world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrenchQuantities {
    /// Plan length of the centerline (m)
    pub length_m: f64,
    /// Area opened at grade (m²)
    pub surface_area_m2: f64,
    /// Length-weighted mean depth (m)
    pub average_depth_m: f64,
    /// In-situ excavation (m³)
    pub cut_volume_m3: f64,
    /// Spoil volume to haul (m³)
    pub loose_volume_m3: f64,
    /// Volume once compacted as fill (m³)
    pub compacted_volume_m3: f64,
    pub soil: SoilType,
    pub expansion_rate: f64,
    pub contraction_rate: f64,
    pub segments: Vec<TrenchSegment>,
}

pub fn build(input: &TrenchInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<TrenchQuantities> {
    input.validate()?;

    let lengths: Vec<f64> = segment_lengths(&input.points).into_iter().map(|l| scale.length(l)).collect();
    let n_segments = lengths.len();

    let (widths, depths, cut_volume) = match &input.profile {
        TrenchProfile::Constant { width_m, depth_m } => {
            let length: f64 = lengths.iter().sum();
            (
                vec![*width_m; n_segments],
                vec![*depth_m; n_segments + 1],
                Some(trench::constant_section_volume(length, *width_m, *depth_m)),
            )
        }
        TrenchProfile::Variable { widths_m, depths_m } => {
            let widths = if widths_m.len() == 1 {
                vec![widths_m[0]; n_segments]
            } else {
                widths_m.clone()
            };
            (widths, depths_m.clone(), None)
        }
    };

    let segments: Vec<TrenchSegment> = trench::variable_section_segments(&lengths, &widths, &depths)
        .into_iter()
        .map(|s| TrenchSegment {
            length_m: non_negative("trench.segment.length_m", s.length_m),
            volume_m3: non_negative("trench.segment.volume_m3", s.volume_m3),
            ..s
        })
        .collect();

    let cut = cut_volume.unwrap_or_else(|| trench::total_volume(&segments));
    let (soil, factors) = presets
        .soil
        .resolve(input.soil, input.expansion_rate, input.contraction_rate);
    let spoil = swell_shrink(cut, factors);

    Ok(TrenchQuantities {
        length_m: non_negative("trench.length_m", lengths.iter().sum()),
        surface_area_m2: non_negative("trench.surface_area_m2", trench::surface_area(&segments)),
        average_depth_m: non_negative("trench.average_depth_m", trench::weighted_average_depth(&segments)),
        cut_volume_m3: non_negative("trench.cut_volume_m3", spoil.cut_volume_m3),
        loose_volume_m3: non_negative("trench.loose_volume_m3", spoil.loose_volume_m3),
        compacted_volume_m3: non_negative("trench.compacted_volume_m3", spoil.compacted_volume_m3),
        soil,
        expansion_rate: factors.expansion_rate,
        contraction_rate: factors.contraction_rate,
        segments,
    })
}

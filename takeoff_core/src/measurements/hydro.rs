//! # Hydro-Excavation Measurement

use serde::{Deserialize, Serialize};

use super::checks::{require_efficiency, require_points, require_positive};
use crate::errors::{TakeoffError, TakeoffResult};
use crate::formulas::hydro::{self, HydroMode};
use crate::formulas::section::CrossSection;
use crate::geometry::{polyline_length, Coordinate};
use crate::guard::non_negative;
use crate::presets::Presets;
use crate::scale::ResolvedScale;

/// Hydro-excavation input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mode": "potholing",
///   "points": [{ "x": 10, "y": 4 }, { "x": 80, "y": 4 }, { "x": 150, "y": 4 }],
///   "cross_section": { "shape": "circular", "diameter_m": 0.45 },
///   "depth_m": 1.8,
///   "efficiency_ratio": 0.9
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydroInput {
    #[serde(default)]
    pub mode: HydroMode,

    /// Trench centerline, or one point per hole
    pub points: Vec<Coordinate>,

    /// Cut footprint (horizontal section)
    pub cross_section: CrossSection,

    /// Required for `hole` and `potholing`; for `trench` the section is vertical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_m: Option<f64>,

    /// Fraction of the nominal volume actually removed, in (0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_ratio: Option<f64>,
}

impl HydroInput {
    pub fn validate(&self) -> TakeoffResult<()> {
        require_points("points", &self.points, self.mode.min_points())?;
        self.cross_section.validate("cross_section")?;

        match (self.mode.requires_depth(), self.depth_m) {
            (true, None) => return Err(TakeoffError::missing_field("depth_m")),
            (_, Some(depth)) => {
                require_positive("depth_m", depth)?;
            }
            (false, None) => {}
        }

        if let Some(ratio) = self.efficiency_ratio {
            require_efficiency("efficiency_ratio", ratio)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydroQuantities {
    pub mode: HydroMode,
    pub section_area_m2: f64,
    /// Trench mode run length (m); 0 otherwise
    pub length_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_m: Option<f64>,
    /// Number of holes (potholing), 1 for a hole, 0 for a trench
    pub holes: usize,
    /// Volume before efficiency (m³)
    pub gross_volume_m3: f64,
    pub efficiency_ratio: f64,
    /// Volume removed (m³)
    pub volume_m3: f64,
}

pub fn build(input: &HydroInput, scale: &ResolvedScale, _presets: &Presets) -> TakeoffResult<HydroQuantities> {
    input.validate()?;

    let section = &input.cross_section;
    let depth = input.depth_m.unwrap_or(0.0);
    let (length, holes, gross) = match input.mode {
        HydroMode::Trench => {
            let length = scale.length(polyline_length(&input.points));
            (length, 0, hydro::trench_volume(section, length))
        }
        HydroMode::Hole => (0.0, 1, hydro::hole_volume(section, depth)),
        HydroMode::Potholing => {
            let holes = input.points.len();
            (0.0, holes, hydro::potholing_volume(section, depth, holes))
        }
    };

    let gross = non_negative("hydro.gross_volume_m3", gross);
    Ok(HydroQuantities {
        mode: input.mode,
        section_area_m2: non_negative("hydro.section_area_m2", section.area()),
        length_m: non_negative("hydro.length_m", length),
        depth_m: input.depth_m,
        holes,
        gross_volume_m3: gross,
        efficiency_ratio: input.efficiency_ratio.unwrap_or(1.0),
        volume_m3: non_negative("hydro.volume_m3", hydro::apply_efficiency(gross, input.efficiency_ratio)),
    })
}

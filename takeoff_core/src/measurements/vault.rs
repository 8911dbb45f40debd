//! # Vault Measurement
//!
//! Excavation, structure displacement and backfill for a buried vault,
//! plus the haul volume of the excavated spoil.

use serde::{Deserialize, Serialize};

use super::checks::{non_negative_opt, require_non_negative, require_polygon, require_positive};
use crate::errors::TakeoffResult;
use crate::formulas::soil::swell_shrink;
use crate::formulas::vault::{self, SurfaceRemoval};
use crate::geometry::{polygon_area_with_epsilon, Coordinate};
use crate::guard::non_negative;
use crate::presets::{Presets, SoilType};
use crate::scale::ResolvedScale;

/// Plan shape of the vault excavation.
///
/// ## JSON Examples
///
/// ```json
/// { "shape": "box", "length_m": 2.4, "width_m": 1.5 }
/// { "shape": "cylinder", "diameter_m": 1.8 }
/// { "shape": "footprint", "points": [{"x":0,"y":0},{"x":30,"y":0},{"x":30,"y":20},{"x":0,"y":0}] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum VaultShape {
    Box { length_m: f64, width_m: f64 },
    Cylinder { diameter_m: f64 },
    /// Excavation outline digitized on the drawing (closed polygon)
    Footprint { points: Vec<Coordinate> },
}

impl VaultShape {
    pub fn display_name(&self) -> &'static str {
        match self {
            VaultShape::Box { .. } => "Box",
            VaultShape::Cylinder { .. } => "Cylinder",
            VaultShape::Footprint { .. } => "Footprint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultInput {
    #[serde(flatten)]
    pub shape: VaultShape,

    /// Excavation depth (m)
    pub depth_m: f64,

    /// Volume displaced by the vault itself (m³); a preset share of the
    /// excavation when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_volume_m3: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surface_removals: Vec<SurfaceRemoval>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilType>,
}

impl VaultInput {
    pub fn validate(&self, closure_epsilon: f64) -> TakeoffResult<()> {
        match &self.shape {
            VaultShape::Box { length_m, width_m } => {
                require_positive("length_m", *length_m)?;
                require_positive("width_m", *width_m)?;
            }
            VaultShape::Cylinder { diameter_m } => {
                require_positive("diameter_m", *diameter_m)?;
            }
            VaultShape::Footprint { points } => require_polygon("points", points, closure_epsilon)?,
        }
        require_positive("depth_m", self.depth_m)?;
        non_negative_opt("structure_volume_m3", self.structure_volume_m3)?;
        for (i, removal) in self.surface_removals.iter().enumerate() {
            require_non_negative(&format!("surface_removals[{}].area_m2", i), removal.area_m2)?;
            require_non_negative(&format!("surface_removals[{}].thickness_m", i), removal.thickness_m)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultQuantities {
    pub shape: String,
    pub plan_area_m2: f64,
    pub depth_m: f64,
    pub excavation_m3: f64,
    pub structure_m3: f64,
    pub surface_removal_m3: f64,
    pub backfill_m3: f64,
    pub soil: SoilType,
    /// Loose volume of the excavated spoil (m³)
    pub spoil_loose_m3: f64,
}

pub fn build(input: &VaultInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<VaultQuantities> {
    let epsilon = presets.tolerances.closure_epsilon;
    input.validate(epsilon)?;

    let depth = input.depth_m;
    let (plan_area, excavation) = match &input.shape {
        VaultShape::Box { length_m, width_m } => {
            (length_m * width_m, vault::box_volume(*length_m, *width_m, depth))
        }
        VaultShape::Cylinder { diameter_m } => (
            crate::formulas::section::circular_area(*diameter_m),
            vault::cylinder_volume(*diameter_m, depth),
        ),
        VaultShape::Footprint { points } => {
            let area = scale.area(polygon_area_with_epsilon(points, epsilon));
            (area, vault::footprint_volume(area, depth))
        }
    };

    let structure = input
        .structure_volume_m3
        .unwrap_or_else(|| vault::default_structure_volume(excavation, presets.vault.structure_ratio));
    let (soil, factors) = presets.soil.resolve(input.soil, None, None);

    Ok(VaultQuantities {
        shape: input.shape.display_name().to_string(),
        plan_area_m2: non_negative("vault.plan_area_m2", plan_area),
        depth_m: depth,
        excavation_m3: non_negative("vault.excavation_m3", excavation),
        structure_m3: non_negative("vault.structure_m3", structure),
        surface_removal_m3: non_negative("vault.surface_removal_m3", vault::removal_volume(&input.surface_removals)),
        backfill_m3: non_negative(
            "vault.backfill_m3",
            vault::backfill_volume(excavation, structure, &input.surface_removals),
        ),
        soil,
        spoil_loose_m3: non_negative("vault.spoil_loose_m3", swell_shrink(excavation, factors).loose_volume_m3),
    })
}

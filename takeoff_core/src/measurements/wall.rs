//! # Masonry Wall Measurement
//!
//! A wall digitized as its centerline. Block sizing comes from, in order of
//! precedence: explicit `block_dims`, a named `block` preset, the preset
//! registry's default block.
//!
//! Wall thickness comes from `thickness_m`, else the chosen block's own
//! thickness when a block was named or given, else the standard wall
//! thickness.

use serde::{Deserialize, Serialize};

use super::checks::{non_negative_opt, positive_opt, require_non_negative, require_polyline, require_positive};
use crate::errors::TakeoffResult;
use crate::formulas::masonry::{self, Opening};
use crate::geometry::{polyline_length, Coordinate};
use crate::guard::non_negative;
use crate::presets::{BlockPreset, Presets};
use crate::scale::ResolvedScale;

/// Masonry wall input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "points": [{ "x": 0, "y": 0 }, { "x": 0.12, "y": 0 }],
///   "height_m": 2.8,
///   "block": "ceramic_block_14x19x29",
///   "openings": [{ "label": "W1", "width_m": 1.2, "height_m": 1.0, "count": 2 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallInput {
    /// Wall centerline
    pub points: Vec<Coordinate>,

    pub height_m: f64,

    /// Block preset name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,

    /// Explicit block dimensions, overriding `block`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_dims: Option<BlockPreset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_m: Option<f64>,

    /// Mortar joint (m); preset joint when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openings: Vec<Opening>,

    /// Finished wall density (kg/m³); preset when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
}

impl WallInput {
    pub fn validate(&self) -> TakeoffResult<()> {
        require_polyline("points", &self.points)?;
        require_positive("height_m", self.height_m)?;
        if let Some(dims) = &self.block_dims {
            require_positive("block_dims.length_m", dims.length_m)?;
            require_positive("block_dims.height_m", dims.height_m)?;
            require_positive("block_dims.thickness_m", dims.thickness_m)?;
        }
        positive_opt("thickness_m", self.thickness_m)?;
        non_negative_opt("joint_m", self.joint_m)?;
        positive_opt("density_kg_m3", self.density_kg_m3)?;
        for (i, opening) in self.openings.iter().enumerate() {
            require_non_negative(&format!("openings[{}].width_m", i), opening.width_m)?;
            require_non_negative(&format!("openings[{}].height_m", i), opening.height_m)?;
        }
        Ok(())
    }

    /// Block dimensions with their preset name, if they came from the catalogue
    fn resolve_block(&self, presets: &Presets) -> TakeoffResult<(BlockPreset, Option<String>)> {
        if let Some(dims) = self.block_dims {
            return Ok((dims, None));
        }
        match &self.block {
            Some(name) => Ok((presets.masonry.block(name)?, Some(name.clone()))),
            None => Ok((presets.masonry.default_block()?, Some(presets.masonry.default_block.clone()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallQuantities {
    pub length_m: f64,
    pub height_m: f64,
    pub gross_area_m2: f64,
    pub openings_area_m2: f64,
    pub net_area_m2: f64,
    pub thickness_m: f64,
    pub volume_m3: f64,
    /// Preset name of the block, `None` for explicit dimensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_name: Option<String>,
    pub block: BlockPreset,
    pub joint_m: f64,
    pub blocks_per_m2: f64,
    pub block_count: u64,
    pub mortar_volume_m3: f64,
    pub weight_kg: f64,
}

pub fn build(input: &WallInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<WallQuantities> {
    input.validate()?;
    let (block, block_name) = input.resolve_block(presets)?;
    let chosen_block = input.block_dims.is_some() || input.block.is_some();

    let thickness = match input.thickness_m {
        Some(t) => t,
        None if chosen_block => block.thickness_m,
        None => presets.thicknesses.wall_m,
    };
    let joint = input.joint_m.unwrap_or(presets.masonry.joint_m);
    let density = input.density_kg_m3.unwrap_or(presets.masonry.density_kg_m3);

    let length = scale.length(polyline_length(&input.points));
    let gross = masonry::gross_area(length, input.height_m);
    let net = non_negative("wall.net_area_m2", masonry::net_area(gross, &input.openings));
    let volume = non_negative("wall.volume_m3", masonry::wall_volume(net, thickness));

    Ok(WallQuantities {
        length_m: non_negative("wall.length_m", length),
        height_m: input.height_m,
        gross_area_m2: non_negative("wall.gross_area_m2", gross),
        openings_area_m2: non_negative("wall.openings_area_m2", masonry::openings_area(&input.openings)),
        net_area_m2: net,
        thickness_m: thickness,
        volume_m3: volume,
        block_name,
        block,
        joint_m: joint,
        blocks_per_m2: non_negative(
            "wall.blocks_per_m2",
            masonry::blocks_per_m2(block.length_m, block.height_m, joint),
        ),
        block_count: masonry::block_count(net, block.length_m, block.height_m, joint),
        mortar_volume_m3: non_negative(
            "wall.mortar_volume_m3",
            masonry::mortar_volume(volume, presets.masonry.mortar_ratio),
        ),
        weight_kg: non_negative("wall.weight_kg", masonry::wall_weight(volume, density)),
    })
}

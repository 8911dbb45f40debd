//! Masonry block presets.
//!
//! Block dimensions are nominal unit sizes without the joint. The joint is
//! added separately when counting blocks per square meter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// Dimensions of one masonry unit (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPreset {
    /// Face length, along the wall
    pub length_m: f64,
    /// Face height
    pub height_m: f64,
    /// Wall thickness the unit produces
    pub thickness_m: f64,
}

impl BlockPreset {
    pub const fn new(length_m: f64, height_m: f64, thickness_m: f64) -> Self {
        BlockPreset {
            length_m,
            height_m,
            thickness_m,
        }
    }
}

/// Masonry defaults: block catalogue, joint, mortar share and wall density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasonryPresets {
    /// Block used when a wall names none
    pub default_block: String,
    /// Mortar joint thickness (m)
    pub joint_m: f64,
    /// Mortar volume as a fraction of wall volume
    pub mortar_ratio: f64,
    /// Finished wall density (kg/m³)
    pub density_kg_m3: f64,
    /// Catalogue keyed by preset name
    pub blocks: BTreeMap<String, BlockPreset>,
}

impl Default for MasonryPresets {
    fn default() -> Self {
        let blocks = [
            ("concrete_block_14x19x39", BlockPreset::new(0.39, 0.19, 0.14)),
            ("concrete_block_19x19x39", BlockPreset::new(0.39, 0.19, 0.19)),
            ("concrete_block_9x19x39", BlockPreset::new(0.39, 0.19, 0.09)),
            ("ceramic_block_9x19x19", BlockPreset::new(0.19, 0.19, 0.09)),
            ("ceramic_block_14x19x29", BlockPreset::new(0.29, 0.19, 0.14)),
            ("solid_brick_10x5x20", BlockPreset::new(0.20, 0.05, 0.10)),
        ]
        .into_iter()
        .map(|(name, block)| (name.to_string(), block))
        .collect();

        MasonryPresets {
            default_block: "concrete_block_14x19x39".to_string(),
            joint_m: 0.01,
            mortar_ratio: 0.10,
            density_kg_m3: 1500.0,
            blocks,
        }
    }
}

impl MasonryPresets {
    /// Look up a block by name, case-insensitively
    pub fn block(&self, name: &str) -> TakeoffResult<BlockPreset> {
        let key = name.trim().to_lowercase();
        self.blocks
            .get(&key)
            .copied()
            .ok_or_else(|| TakeoffError::material_not_found(format!("masonry block '{}'", name)))
    }

    pub fn default_block(&self) -> TakeoffResult<BlockPreset> {
        self.block(&self.default_block)
    }

    /// Lay a loaded catalogue over the built-in one. Names are stored
    /// trimmed and lowercased, the form [`MasonryPresets::block`] looks up.
    pub(crate) fn merge_builtin_blocks(&mut self) {
        let loaded = std::mem::take(&mut self.blocks);
        self.blocks = MasonryPresets::default().blocks;
        for (name, block) in loaded {
            self.blocks.insert(name.trim().to_lowercase(), block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_exists() {
        let presets = MasonryPresets::default();
        let block = presets.default_block().unwrap();
        assert_eq!(block.thickness_m, 0.14);
    }

    #[test]
    fn test_block_lookup_is_case_insensitive() {
        let presets = MasonryPresets::default();
        assert!(presets.block("Ceramic_Block_9x19x19").is_ok());
        let err = presets.block("glass_block").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_merge_keeps_builtin_and_lowercases() {
        let mut presets = MasonryPresets {
            blocks: [("Tijolo_A ".to_string(), BlockPreset::new(0.24, 0.11, 0.115))].into(),
            ..MasonryPresets::default()
        };
        presets.merge_builtin_blocks();
        assert!(presets.blocks.contains_key("tijolo_a"));
        assert_eq!(presets.block("Tijolo_A").unwrap().height_m, 0.11);
        assert!(presets.block("ceramic_block_9x19x19").is_ok());
    }
}

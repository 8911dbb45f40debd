//! # Presets Registry
//!
//! Canonical physical defaults the measurement builders fall back on when
//! an input leaves an optional attribute out: soil factors, masonry blocks,
//! standard thicknesses, densities, rebar rate, waste allowances, drilling
//! compliance limits and the geometric closure tolerance.
//!
//! Every section is `#[serde(default)]`, so an override file only needs the
//! values it changes:
//!
//! ```rust
//! use takeoff_core::presets::Presets;
//!
//! let presets = Presets::from_toml_str(r#"
//!     [concrete]
//!     rebar_rate_kg_m3 = 90.0
//!
//!     [soil.clay]
//!     expansion_rate = 0.30
//!     contraction_rate = 0.12
//! "#).unwrap();
//!
//! assert_eq!(presets.concrete.rebar_rate_kg_m3, 90.0);
//! assert_eq!(presets.concrete.density_kg_m3, 2400.0); // untouched default
//! ```

pub mod masonry;
pub mod materials;
pub mod soil;

pub use masonry::{BlockPreset, MasonryPresets};
pub use materials::{ConduitDensities, ConduitMaterial, FinishKind, FinishingLosses};
pub use soil::{SoilFactors, SoilTable, SoilType};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::geometry::DEFAULT_CLOSURE_EPSILON;

/// Built-in presets, shared read-only by every build that is not given its own
pub static DEFAULT_PRESETS: Lazy<Presets> = Lazy::new(Presets::default);

/// Floating-point tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Max distance (drawing units, per axis) between first and last vertex of a closed polygon
    pub closure_epsilon: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            closure_epsilon: DEFAULT_CLOSURE_EPSILON,
        }
    }
}

/// Standard element thicknesses (m)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardThicknesses {
    pub wall_m: f64,
    pub slab_m: f64,
    pub radier_m: f64,
    pub structural_slab_m: f64,
}

impl Default for StandardThicknesses {
    fn default() -> Self {
        StandardThicknesses {
            wall_m: 0.15,
            slab_m: 0.10,
            radier_m: 0.20,
            structural_slab_m: 0.12,
        }
    }
}

/// Reinforced concrete defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcretePresets {
    /// Concrete density (kg/m³)
    pub density_kg_m3: f64,
    /// Reinforcement per cubic meter of concrete (kg/m³); 80–120 is typical
    pub rebar_rate_kg_m3: f64,
}

impl Default for ConcretePresets {
    fn default() -> Self {
        ConcretePresets {
            density_kg_m3: 2400.0,
            rebar_rate_kg_m3: 100.0,
        }
    }
}

/// Vault excavation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultPresets {
    /// Structure volume as a fraction of excavation when not supplied
    pub structure_ratio: f64,
}

impl Default for VaultPresets {
    fn default() -> Self {
        VaultPresets { structure_ratio: 0.10 }
    }
}

/// Directional-drilling compliance limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillingPresets {
    /// Minimum allowed bend radius (m)
    pub min_radius_m: f64,
    /// Minimum cover depth at every vertex (m)
    pub min_depth_m: f64,
}

impl Default for DrillingPresets {
    fn default() -> Self {
        DrillingPresets {
            min_radius_m: 100.0,
            min_depth_m: 1.0,
        }
    }
}

/// Complete preset registry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    pub tolerances: Tolerances,
    pub soil: SoilTable,
    pub masonry: MasonryPresets,
    pub thicknesses: StandardThicknesses,
    pub concrete: ConcretePresets,
    pub conduit: ConduitDensities,
    pub vault: VaultPresets,
    pub drilling: DrillingPresets,
    pub finishing: FinishingLosses,
}

impl Presets {
    /// The shared built-in registry
    pub fn builtin() -> &'static Presets {
        &DEFAULT_PRESETS
    }

    /// Parse an override document; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> TakeoffResult<Self> {
        let mut presets: Presets = toml::from_str(s).map_err(|e| TakeoffError::Config { reason: e.to_string() })?;
        presets.masonry.merge_builtin_blocks();
        presets.validate()?;
        Ok(presets)
    }

    /// Render the registry as TOML (e.g. to seed an override file)
    pub fn to_toml_string(&self) -> TakeoffResult<String> {
        toml::to_string_pretty(self).map_err(|e| TakeoffError::Config { reason: e.to_string() })
    }

    /// Reject values that would make every formula using them meaningless
    pub fn validate(&self) -> TakeoffResult<()> {
        let positive = [
            ("tolerances.closure_epsilon", self.tolerances.closure_epsilon),
            ("thicknesses.wall_m", self.thicknesses.wall_m),
            ("thicknesses.slab_m", self.thicknesses.slab_m),
            ("thicknesses.radier_m", self.thicknesses.radier_m),
            ("thicknesses.structural_slab_m", self.thicknesses.structural_slab_m),
            ("concrete.density_kg_m3", self.concrete.density_kg_m3),
            ("masonry.density_kg_m3", self.masonry.density_kg_m3),
            ("drilling.min_radius_m", self.drilling.min_radius_m),
            ("drilling.min_depth_m", self.drilling.min_depth_m),
        ];
        for (field, value) in positive {
            require_positive(field, value)?;
        }
        for material in ConduitMaterial::ALL {
            require_positive(&format!("conduit.{}", material.key()), self.conduit.density(material))?;
        }
        for (name, block) in &self.masonry.blocks {
            require_positive(&format!("masonry.blocks.{}.length_m", name), block.length_m)?;
            require_positive(&format!("masonry.blocks.{}.height_m", name), block.height_m)?;
            require_positive(&format!("masonry.blocks.{}.thickness_m", name), block.thickness_m)?;
        }

        require_non_negative("masonry.joint_m", self.masonry.joint_m)?;
        for kind in FinishKind::ALL {
            require_non_negative(&format!("finishing.{}", kind.key()), self.finishing.loss_percent(kind))?;
        }
        for soil in SoilType::ALL {
            let factors = self.soil.factors(soil);
            require_non_negative(&format!("soil.{}.expansion_rate", soil.key()), factors.expansion_rate)?;
            require_fraction(&format!("soil.{}.contraction_rate", soil.key()), factors.contraction_rate)?;
        }

        let fractions = [
            ("masonry.mortar_ratio", self.masonry.mortar_ratio),
            ("vault.structure_ratio", self.vault.structure_ratio),
        ];
        for (field, value) in fractions {
            require_fraction(field, value)?;
        }

        if self.masonry.block(&self.masonry.default_block).is_err() {
            return Err(TakeoffError::Config {
                reason: format!("masonry.default_block '{}' is not in masonry.blocks", self.masonry.default_block),
            });
        }

        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> TakeoffResult<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(TakeoffError::Config {
        reason: format!("{} must be a positive number, got {}", field, value),
    })
}

fn require_non_negative(field: &str, value: f64) -> TakeoffResult<()> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(TakeoffError::Config {
        reason: format!("{} must be zero or more, got {}", field, value),
    })
}

fn require_fraction(field: &str, value: f64) -> TakeoffResult<()> {
    if (0.0..1.0).contains(&value) {
        return Ok(());
    }
    Err(TakeoffError::Config {
        reason: format!("{} must be within [0, 1), got {}", field, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        assert!(Presets::builtin().validate().is_ok());
        assert_eq!(Presets::builtin().tolerances.closure_epsilon, 1e-6);
    }

    #[test]
    fn test_partial_override() {
        let presets = Presets::from_toml_str(
            r#"
            [drilling]
            min_radius_m = 250.0
            "#,
        )
        .unwrap();
        assert_eq!(presets.drilling.min_radius_m, 250.0);
        assert_eq!(presets.drilling.min_depth_m, 1.0);
        assert_eq!(presets.soil, SoilTable::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let original = Presets::default();
        let text = original.to_toml_string().unwrap();
        let parsed = Presets::from_toml_str(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_bad_override_rejected() {
        let err = Presets::from_toml_str("[vault]\nstructure_ratio = 1.5\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let err = Presets::from_toml_str("[masonry]\ndefault_block = \"adobe\"\n").unwrap_err();
        assert!(err.to_string().contains("adobe"));

        assert!(Presets::from_toml_str("not toml at all [").is_err());
    }

    #[test]
    fn test_bad_soil_override_rejected() {
        let err = Presets::from_toml_str("[soil.clay]\nexpansion_rate = -0.5\ncontraction_rate = 0.1\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("soil.clay.expansion_rate"));

        let err = Presets::from_toml_str("[soil.sand]\nexpansion_rate = 0.1\ncontraction_rate = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("soil.sand.contraction_rate"));

        // a full shrink would compact every trench to nothing
        assert!(Presets::from_toml_str("[soil.rock]\nexpansion_rate = 0.5\ncontraction_rate = 1.0\n").is_err());
    }

    #[test]
    fn test_bad_material_override_rejected() {
        let cases = [
            ("[conduit]\nsteel = 0.0\n", "conduit.steel"),
            ("[drilling]\nmin_radius_m = -1.0\n", "drilling.min_radius_m"),
            ("[drilling]\nmin_depth_m = 0.0\n", "drilling.min_depth_m"),
            ("[masonry]\njoint_m = -0.01\n", "masonry.joint_m"),
            (
                "[masonry.blocks.flat]\nlength_m = 0.39\nheight_m = 0.0\nthickness_m = 0.14\n",
                "masonry.blocks.flat.height_m",
            ),
            ("[finishing]\npaint = -5.0\n", "finishing.paint"),
        ];
        for (toml, field) in cases {
            let err = Presets::from_toml_str(toml).unwrap_err();
            assert_eq!(err.error_code(), "CONFIG_ERROR", "{}", toml);
            assert!(err.to_string().contains(field), "{} -> {}", toml, err);
        }
    }

    #[test]
    fn test_zero_joint_and_loss_allowed() {
        let presets = Presets::from_toml_str("[masonry]\njoint_m = 0.0\n\n[finishing]\nflooring = 0.0\n").unwrap();
        assert_eq!(presets.masonry.joint_m, 0.0);
        assert_eq!(presets.finishing.flooring, 0.0);
    }

    #[test]
    fn test_custom_block_extends_catalogue() {
        let presets = Presets::from_toml_str(
            r#"
            [masonry.blocks.Adobe_30]
            length_m = 0.30
            height_m = 0.10
            thickness_m = 0.15
            "#,
        )
        .unwrap();

        assert_eq!(presets.masonry.block("adobe_30").unwrap().length_m, 0.30);
        assert_eq!(presets.masonry.block("Adobe_30").unwrap().thickness_m, 0.15);
        assert!(presets.masonry.block("concrete_block_19x19x39").is_ok());
        assert!(presets.masonry.default_block().is_ok());
        assert_eq!(presets.masonry.blocks.len(), MasonryPresets::default().blocks.len() + 1);
    }

    #[test]
    fn test_block_override_replaces_builtin_entry() {
        let presets = Presets::from_toml_str(
            r#"
            [masonry.blocks.SOLID_BRICK_10x5x20]
            length_m = 0.22
            height_m = 0.055
            thickness_m = 0.10
            "#,
        )
        .unwrap();
        assert_eq!(presets.masonry.block("solid_brick_10x5x20").unwrap().length_m, 0.22);
        assert_eq!(presets.masonry.blocks.len(), MasonryPresets::default().blocks.len());
    }
}

//! Material densities and finish defaults.
//!
//! All densities are kg/m³ of solid material.

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// Conduit wall materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConduitMaterial {
    Pvc,
    Hdpe,
    Steel,
    Aluminum,
    /// Fiberglass (RTRC) duct
    Fiber,
    Copper,
}

impl ConduitMaterial {
    pub const ALL: [ConduitMaterial; 6] = [
        ConduitMaterial::Pvc,
        ConduitMaterial::Hdpe,
        ConduitMaterial::Steel,
        ConduitMaterial::Aluminum,
        ConduitMaterial::Fiber,
        ConduitMaterial::Copper,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> TakeoffResult<Self> {
        match s.trim().to_uppercase().replace([' ', '-', '_'], "").as_str() {
            "PVC" => Ok(ConduitMaterial::Pvc),
            "HDPE" | "POLYETHYLENE" => Ok(ConduitMaterial::Hdpe),
            "STEEL" | "GALVANIZED" | "RMC" | "EMT" => Ok(ConduitMaterial::Steel),
            "ALUMINUM" | "ALUMINIUM" => Ok(ConduitMaterial::Aluminum),
            "FIBER" | "FIBRE" | "FIBERGLASS" | "RTRC" => Ok(ConduitMaterial::Fiber),
            "COPPER" => Ok(ConduitMaterial::Copper),
            _ => Err(TakeoffError::material_not_found(s)),
        }
    }

    /// Field name in the `[conduit]` preset table
    pub fn key(&self) -> &'static str {
        match self {
            ConduitMaterial::Pvc => "pvc",
            ConduitMaterial::Hdpe => "hdpe",
            ConduitMaterial::Steel => "steel",
            ConduitMaterial::Aluminum => "aluminum",
            ConduitMaterial::Fiber => "fiber",
            ConduitMaterial::Copper => "copper",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitMaterial::Pvc => "PVC",
            ConduitMaterial::Hdpe => "HDPE",
            ConduitMaterial::Steel => "Steel",
            ConduitMaterial::Aluminum => "Aluminum",
            ConduitMaterial::Fiber => "Fiberglass",
            ConduitMaterial::Copper => "Copper",
        }
    }
}

impl std::fmt::Display for ConduitMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Density per conduit material (kg/m³)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConduitDensities {
    pub pvc: f64,
    pub hdpe: f64,
    pub steel: f64,
    pub aluminum: f64,
    pub fiber: f64,
    pub copper: f64,
}

impl Default for ConduitDensities {
    fn default() -> Self {
        ConduitDensities {
            pvc: 1400.0,
            hdpe: 950.0,
            steel: 7850.0,
            aluminum: 2700.0,
            fiber: 1900.0,
            copper: 8960.0,
        }
    }
}

impl ConduitDensities {
    pub fn density(&self, material: ConduitMaterial) -> f64 {
        match material {
            ConduitMaterial::Pvc => self.pvc,
            ConduitMaterial::Hdpe => self.hdpe,
            ConduitMaterial::Steel => self.steel,
            ConduitMaterial::Aluminum => self.aluminum,
            ConduitMaterial::Fiber => self.fiber,
            ConduitMaterial::Copper => self.copper,
        }
    }
}

/// Finish families with their own waste allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishKind {
    Paint,
    Plaster,
    Tile,
    Flooring,
    Waterproofing,
    #[default]
    Other,
}

impl FinishKind {
    pub const ALL: [FinishKind; 6] = [
        FinishKind::Paint,
        FinishKind::Plaster,
        FinishKind::Tile,
        FinishKind::Flooring,
        FinishKind::Waterproofing,
        FinishKind::Other,
    ];

    /// Field name in the `[finishing]` preset table
    pub fn key(&self) -> &'static str {
        match self {
            FinishKind::Paint => "paint",
            FinishKind::Plaster => "plaster",
            FinishKind::Tile => "tile",
            FinishKind::Flooring => "flooring",
            FinishKind::Waterproofing => "waterproofing",
            FinishKind::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FinishKind::Paint => "Paint",
            FinishKind::Plaster => "Plaster",
            FinishKind::Tile => "Tile",
            FinishKind::Flooring => "Flooring",
            FinishKind::Waterproofing => "Waterproofing",
            FinishKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for FinishKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Default loss (waste) percentage per finish family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishingLosses {
    pub paint: f64,
    pub plaster: f64,
    pub tile: f64,
    pub flooring: f64,
    pub waterproofing: f64,
    pub other: f64,
}

impl Default for FinishingLosses {
    fn default() -> Self {
        FinishingLosses {
            paint: 10.0,
            plaster: 10.0,
            tile: 10.0,
            flooring: 5.0,
            waterproofing: 15.0,
            other: 10.0,
        }
    }
}

impl FinishingLosses {
    pub fn loss_percent(&self, kind: FinishKind) -> f64 {
        match kind {
            FinishKind::Paint => self.paint,
            FinishKind::Plaster => self.plaster,
            FinishKind::Tile => self.tile,
            FinishKind::Flooring => self.flooring,
            FinishKind::Waterproofing => self.waterproofing,
            FinishKind::Other => self.other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conduit_density_lookup() {
        let densities = ConduitDensities::default();
        assert_eq!(densities.density(ConduitMaterial::Steel), 7850.0);
        for material in ConduitMaterial::ALL {
            assert!(densities.density(material) > 0.0, "{} has no density", material);
        }
    }

    #[test]
    fn test_conduit_flexible_parse() {
        assert_eq!(ConduitMaterial::from_str_flexible("hdpe").unwrap(), ConduitMaterial::Hdpe);
        assert_eq!(ConduitMaterial::from_str_flexible("Fiber-glass").unwrap(), ConduitMaterial::Fiber);
        assert!(ConduitMaterial::from_str_flexible("bamboo").is_err());
    }

    #[test]
    fn test_finishing_losses() {
        let losses = FinishingLosses::default();
        assert_eq!(losses.loss_percent(FinishKind::Flooring), 5.0);
        assert_eq!(losses.loss_percent(FinishKind::default()), 10.0);
    }
}

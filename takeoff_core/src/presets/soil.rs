//! Soil swell/shrink factors.
//!
//! Soil is modeled only through two constant rates: how much a cut volume
//! grows when loosened for hauling, and how much it shrinks when compacted
//! back in place. The default table carries the values the estimating
//! templates have always used; they have no cited geotechnical source and
//! should be overridden per project when a soil report is available.

use serde::{Deserialize, Serialize};

/// Soil classes with distinct default factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Clay,
    Sand,
    Rock,
    #[default]
    Mixed,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [SoilType::Clay, SoilType::Sand, SoilType::Rock, SoilType::Mixed];

    /// Table name in the `[soil]` preset section
    pub fn key(&self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Sand => "sand",
            SoilType::Rock => "rock",
            SoilType::Mixed => "mixed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Sand => "Sand",
            SoilType::Rock => "Rock",
            SoilType::Mixed => "Mixed soil",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Expansion (swell) and contraction (shrink) rates as fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilFactors {
    /// loose = cut × (1 + expansion_rate)
    pub expansion_rate: f64,
    /// compacted = cut × (1 − contraction_rate)
    pub contraction_rate: f64,
}

impl SoilFactors {
    pub const fn new(expansion_rate: f64, contraction_rate: f64) -> Self {
        SoilFactors {
            expansion_rate,
            contraction_rate,
        }
    }
}

/// Soil factor table, one entry per [`SoilType`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilTable {
    /// Soil assumed when a measurement names none
    pub default_soil: SoilType,
    pub clay: SoilFactors,
    pub sand: SoilFactors,
    pub rock: SoilFactors,
    pub mixed: SoilFactors,
}

impl Default for SoilTable {
    fn default() -> Self {
        SoilTable {
            default_soil: SoilType::Mixed,
            clay: SoilFactors::new(0.25, 0.10),
            sand: SoilFactors::new(0.12, 0.08),
            rock: SoilFactors::new(0.50, 0.0),
            mixed: SoilFactors::new(0.20, 0.10),
        }
    }
}

impl SoilTable {
    pub fn factors(&self, soil: SoilType) -> SoilFactors {
        match soil {
            SoilType::Clay => self.clay,
            SoilType::Sand => self.sand,
            SoilType::Rock => self.rock,
            SoilType::Mixed => self.mixed,
        }
    }

    /// Factors for an optional soil with optional explicit overrides.
    ///
    /// Explicit rates win over the table; the table fills whatever is missing.
    pub fn resolve(
        &self,
        soil: Option<SoilType>,
        expansion_rate: Option<f64>,
        contraction_rate: Option<f64>,
    ) -> (SoilType, SoilFactors) {
        let soil = soil.unwrap_or(self.default_soil);
        let table = self.factors(soil);
        (
            soil,
            SoilFactors {
                expansion_rate: expansion_rate.unwrap_or(table.expansion_rate),
                contraction_rate: contraction_rate.unwrap_or(table.contraction_rate),
            },
        )
    }
}

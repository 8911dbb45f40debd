//! # Unit Types
//!
//! Type-safe wrappers for takeoff quantities. The engine computes in SI
//! (meters, square meters, cubic meters, kilograms) and nothing else;
//! imperial units exist only here, for presenting totals to estimators who
//! price in feet, square feet, cubic yards and pounds.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{CubicMeters, CubicYards, Feet, Meters};
//!
//! let run: Feet = Meters(30.48).into();
//! assert!((run.0 - 100.0).abs() < 1e-9);
//!
//! let spoil: CubicYards = CubicMeters(1.0).into();
//! assert!((spoil.0 - 1.307_950_6).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

const FEET_PER_METER: f64 = 1.0 / 0.3048;
const SQFT_PER_SQM: f64 = FEET_PER_METER * FEET_PER_METER;
const CUYD_PER_CUM: f64 = FEET_PER_METER * FEET_PER_METER * FEET_PER_METER / 27.0;
const LB_PER_KG: f64 = 1.0 / 0.453_592_37;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 * FEET_PER_METER)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 / FEET_PER_METER)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareFeet(pub f64);

impl From<SquareMeters> for SquareFeet {
    fn from(sqm: SquareMeters) -> Self {
        SquareFeet(sqm.0 * SQFT_PER_SQM)
    }
}

impl From<SquareFeet> for SquareMeters {
    fn from(sqft: SquareFeet) -> Self {
        SquareMeters(sqft.0 / SQFT_PER_SQM)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

/// Volume in cubic yards (earthwork and concrete are priced per yard)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

impl From<CubicMeters> for CubicYards {
    fn from(cum: CubicMeters) -> Self {
        CubicYards(cum.0 * CUYD_PER_CUM)
    }
}

impl From<CubicYards> for CubicMeters {
    fn from(cuyd: CubicYards) -> Self {
        CubicMeters(cuyd.0 / CUYD_PER_CUM)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LB_PER_KG)
    }
}

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 / LB_PER_KG)
    }
}

// ============================================================================
// Display unit system
// ============================================================================

/// Unit system used when presenting totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn length_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    pub fn area_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m²",
            UnitSystem::Imperial => "ft²",
        }
    }

    pub fn volume_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m³",
            UnitSystem::Imperial => "yd³",
        }
    }

    pub fn mass_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    /// Express a length in meters in this system
    pub fn length(&self, m: f64) -> f64 {
        match self {
            UnitSystem::Metric => m,
            UnitSystem::Imperial => Feet::from(Meters(m)).0,
        }
    }

    /// Express an area in square meters in this system
    pub fn area(&self, sqm: f64) -> f64 {
        match self {
            UnitSystem::Metric => sqm,
            UnitSystem::Imperial => SquareFeet::from(SquareMeters(sqm)).0,
        }
    }

    /// Express a volume in cubic meters in this system
    pub fn volume(&self, cum: f64) -> f64 {
        match self {
            UnitSystem::Metric => cum,
            UnitSystem::Imperial => CubicYards::from(CubicMeters(cum)).0,
        }
    }

    /// Express a mass in kilograms in this system
    pub fn mass(&self, kg: f64) -> f64 {
        match self {
            UnitSystem::Metric => kg,
            UnitSystem::Imperial => Pounds::from(Kilograms(kg)).0,
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "si" | "m" => Ok(UnitSystem::Metric),
            "imperial" | "us" | "ft" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meters_to_feet() {
        let ft: Feet = Meters(3.048).into();
        assert_relative_eq!(ft.0, 10.0, epsilon = 1e-9);

        let back: Meters = ft.into();
        assert_relative_eq!(back.0, 3.048, epsilon = 1e-12);
    }

    #[test]
    fn test_area_and_volume_conversions() {
        let sqft: SquareFeet = SquareMeters(1.0).into();
        assert_relative_eq!(sqft.0, 10.763_910_4, epsilon = 1e-6);

        // 1 yd³ = 0.764555 m³
        let cum: CubicMeters = CubicYards(1.0).into();
        assert_relative_eq!(cum.0, 0.764_554_858, epsilon = 1e-9);
    }

    #[test]
    fn test_kilograms_to_pounds() {
        let lb: Pounds = Kilograms(100.0).into();
        assert_relative_eq!(lb.0, 220.462_262, epsilon = 1e-5);
    }

    #[test]
    fn test_unit_system_passthrough_and_parse() {
        assert_eq!(UnitSystem::Metric.volume(12.5), 12.5);
        assert_relative_eq!(UnitSystem::Imperial.length(1.0), 3.280_839_9, epsilon = 1e-6);
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert!("cubits".parse::<UnitSystem>().is_err());
    }

    #[test]
    fn test_serialization() {
        let m = Meters(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");

        let system = serde_json::to_string(&UnitSystem::Imperial).unwrap();
        assert_eq!(system, "\"imperial\"");
    }
}

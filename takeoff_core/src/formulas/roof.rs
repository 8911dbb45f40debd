//! # Roof Areas
//!
//! A roof plane digitized on a plan shows its horizontal projection. The true
//! (sloped) area is the projection divided by cos θ, written here as
//!
//! ```text
//!   real = projected × sqrt(1 + tan²θ)
//! ```
//!
//! so a slope given as a percent (rise/run × 100) plugs in directly.

use serde::{Deserialize, Serialize};

/// Inclination of a roof plane
///
/// ## JSON Example
///
/// ```json
/// { "degrees": 30.0 }
/// { "percent": 35.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofInclination {
    /// Angle from horizontal, 0 ≤ θ < 90
    Degrees(f64),
    /// Rise over run × 100
    Percent(f64),
}

impl RoofInclination {
    /// tan θ
    pub fn tangent(&self) -> f64 {
        match *self {
            RoofInclination::Degrees(deg) => deg.to_radians().tan(),
            RoofInclination::Percent(pct) => pct / 100.0,
        }
    }

    pub fn degrees(&self) -> f64 {
        match *self {
            RoofInclination::Degrees(deg) => deg,
            RoofInclination::Percent(pct) => (pct / 100.0).atan().to_degrees(),
        }
    }

    /// Whether the plane can be measured at all: finite, not negative, and
    /// not vertical
    pub fn is_valid(&self) -> bool {
        match *self {
            RoofInclination::Degrees(deg) => deg.is_finite() && (0.0..90.0).contains(&deg),
            RoofInclination::Percent(pct) => pct.is_finite() && pct >= 0.0,
        }
    }

    /// sqrt(1 + tan²θ)
    pub fn slope_factor(&self) -> f64 {
        slope_factor(self.tangent())
    }
}

impl Default for RoofInclination {
    fn default() -> Self {
        RoofInclination::Degrees(0.0)
    }
}

/// sqrt(1 + tan²θ)
#[inline]
pub fn slope_factor(tangent: f64) -> f64 {
    (1.0 + tangent * tangent).sqrt()
}

/// Sloped area from a plan projection
///
/// ```rust
/// use takeoff_core::formulas::roof::{real_area, RoofInclination};
///
/// let real = real_area(100.0, RoofInclination::Degrees(45.0));
/// assert!((real - 141.42).abs() < 0.01);
/// ```
pub fn real_area(projected_area: f64, inclination: RoofInclination) -> f64 {
    projected_area * inclination.slope_factor()
}

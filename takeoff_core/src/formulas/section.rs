//! # Cross-Section Areas
//!
//! Sections shared by hydro-excavation (the footprint of the nozzle cut) and
//! structural members (beam/column sections).
//!
//! ```text
//!   Rectangular        Circular          Custom
//!   ┌─────────┐          ____
//!   │         │ h      /      \         A given
//!   │         │       |   d    |        directly
//!   └─────────┘        \ ____ /
//!        w
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// A cross-section in meters.
///
/// ## JSON Example
///
/// ```json
/// { "shape": "rectangular", "width_m": 0.2, "height_m": 0.5 }
/// { "shape": "circular", "diameter_m": 0.3 }
/// { "shape": "custom", "area_m2": 0.085 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CrossSection {
    Rectangular {
        width_m: f64,
        /// Section height, or plan length for a horizontal cut
        #[serde(alias = "length_m")]
        height_m: f64,
    },
    Circular { diameter_m: f64 },
    Custom { area_m2: f64 },
}

impl CrossSection {
    /// Section area (m²)
    pub fn area(&self) -> f64 {
        match *self {
            CrossSection::Rectangular { width_m, height_m } => rectangular_area(width_m, height_m),
            CrossSection::Circular { diameter_m } => circular_area(diameter_m),
            CrossSection::Custom { area_m2 } => area_m2,
        }
    }

    /// Section perimeter (m); unknown for a custom area
    pub fn perimeter(&self) -> Option<f64> {
        match *self {
            CrossSection::Rectangular { width_m, height_m } => Some(2.0 * (width_m + height_m)),
            CrossSection::Circular { diameter_m } => Some(PI * diameter_m),
            CrossSection::Custom { .. } => None,
        }
    }

    /// Every dimension must be strictly positive
    pub fn validate(&self, field: &str) -> TakeoffResult<()> {
        let dims = match *self {
            CrossSection::Rectangular { width_m, height_m } => vec![("width_m", width_m), ("height_m", height_m)],
            CrossSection::Circular { diameter_m } => vec![("diameter_m", diameter_m)],
            CrossSection::Custom { area_m2 } => vec![("area_m2", area_m2)],
        };
        for (name, value) in dims {
            if !(value.is_finite() && value > 0.0) {
                return Err(TakeoffError::non_positive(format!("{}.{}", field, name), value));
            }
        }
        Ok(())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CrossSection::Rectangular { .. } => "Rectangular",
            CrossSection::Circular { .. } => "Circular",
            CrossSection::Custom { .. } => "Custom",
        }
    }
}

/// A = w × h
#[inline]
pub fn rectangular_area(width: f64, height: f64) -> f64 {
    width * height
}

/// A = π r², r = d / 2
#[inline]
pub fn circular_area(diameter: f64) -> f64 {
    let r = diameter / 2.0;
    PI * r * r
}

//! # Roof Measurement
//!
//! One or more roof planes, each digitized as its plan projection with its
//! own inclination. Totals are summed over the planes.

use serde::{Deserialize, Serialize};

use super::checks::require_polygon;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::formulas::roof::{self, RoofInclination};
use crate::geometry::{polygon_area_with_epsilon, Coordinate};
use crate::guard::non_negative;
use crate::presets::Presets;
use crate::scale::ResolvedScale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofPlane {
    #[serde(default)]
    pub label: String,
    /// Plan outline, closed
    pub points: Vec<Coordinate>,
    pub inclination: RoofInclination,
}

/// Roof input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "planes": [
///     { "label": "N", "points": [...], "inclination": { "degrees": 30.0 } },
///     { "label": "S", "points": [...], "inclination": { "percent": 57.7 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofInput {
    pub planes: Vec<RoofPlane>,
}

impl RoofInput {
    pub fn validate(&self, closure_epsilon: f64) -> TakeoffResult<()> {
        if self.planes.is_empty() {
            return Err(TakeoffError::missing_field("planes"));
        }
        for (i, plane) in self.planes.iter().enumerate() {
            require_polygon(&format!("planes[{}].points", i), &plane.points, closure_epsilon)?;
            if !plane.inclination.is_valid() {
                return Err(TakeoffError::invalid_input(
                    format!("planes[{}].inclination", i),
                    format!("{:?}", plane.inclination),
                    "must be finite, not negative, and below 90 degrees",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofPlaneQuantities {
    #[serde(default)]
    pub label: String,
    pub inclination_deg: f64,
    pub slope_factor: f64,
    pub projected_area_m2: f64,
    pub real_area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofQuantities {
    pub planes: Vec<RoofPlaneQuantities>,
    pub projected_area_m2: f64,
    /// Sloped area to cover (m²)
    pub real_area_m2: f64,
}

pub fn build(input: &RoofInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<RoofQuantities> {
    let epsilon = presets.tolerances.closure_epsilon;
    input.validate(epsilon)?;

    let planes: Vec<RoofPlaneQuantities> = input
        .planes
        .iter()
        .map(|plane| {
            let projected = scale.area(polygon_area_with_epsilon(&plane.points, epsilon));
            RoofPlaneQuantities {
                label: plane.label.clone(),
                inclination_deg: plane.inclination.degrees(),
                slope_factor: plane.inclination.slope_factor(),
                projected_area_m2: non_negative("roof.projected_area_m2", projected),
                real_area_m2: non_negative("roof.real_area_m2", roof::real_area(projected, plane.inclination)),
            }
        })
        .collect();

    Ok(RoofQuantities {
        projected_area_m2: planes.iter().map(|p| p.projected_area_m2).sum(),
        real_area_m2: planes.iter().map(|p| p.real_area_m2).sum(),
        planes,
    })
}

//! # Finishing Measurement
//!
//! Finish area over a room outline and/or a list of named surfaces, with
//! deductions and a purchase quantity that includes losses.
//!
//! A surface takes its area from, in order: an explicit `area_m2`, the
//! room outline (plan area for floor and ceiling, perimeter × height for
//! walls). Without surfaces the outline's plan area is the finish area.

use serde::{Deserialize, Serialize};

use super::checks::{non_negative_opt, positive_opt, require_non_negative, require_polygon};
use crate::errors::{TakeoffError, TakeoffResult};
use crate::formulas::finishing::{self, SurfaceKind};
use crate::geometry::{polygon_area_with_epsilon, polygon_perimeter_with_epsilon, Coordinate};
use crate::guard::non_negative;
use crate::presets::{FinishKind, Presets};
use crate::scale::ResolvedScale;

/// A named surface to finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishSurface {
    pub surface: SurfaceKind,
    /// Measured area (m²) overriding the outline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
}

/// Finishing input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "points": [{"x":0,"y":0},{"x":0.05,"y":0},{"x":0.05,"y":0.04},{"x":0,"y":0.04},{"x":0,"y":0}],
///   "surfaces": [{ "surface": "walls" }, { "surface": "ceiling" }],
///   "height_m": 2.7,
///   "finish": "paint",
///   "deductions_m2": 3.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingInput {
    /// Room outline, closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Coordinate>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<FinishSurface>,

    /// Room height, needed by wall surfaces taken from the outline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_m: Option<f64>,

    #[serde(default)]
    pub finish: FinishKind,

    /// Loss allowance (%); preset for the finish when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_percent: Option<f64>,

    /// Area excluded from the finish (doors, windows, built-ins), m²
    #[serde(default)]
    pub deductions_m2: f64,
}

impl FinishingInput {
    pub fn validate(&self, closure_epsilon: f64) -> TakeoffResult<()> {
        if let Some(points) = &self.points {
            require_polygon("points", points, closure_epsilon)?;
        }
        positive_opt("height_m", self.height_m)?;
        non_negative_opt("loss_percent", self.loss_percent)?;
        require_non_negative("deductions_m2", self.deductions_m2)?;

        for (i, s) in self.surfaces.iter().enumerate() {
            match s.area_m2 {
                Some(area) => {
                    require_non_negative(&format!("surfaces[{}].area_m2", i), area)?;
                }
                None if self.points.is_none() => return Err(TakeoffError::missing_field("points")),
                None if s.surface.is_vertical() && self.height_m.is_none() => {
                    return Err(TakeoffError::missing_field("height_m"));
                }
                None => {}
            }
        }

        if self.surfaces.is_empty() && self.points.is_none() {
            return Err(TakeoffError::missing_field("points"));
        }
        Ok(())
    }
}

/// Area of one finished surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceArea {
    pub surface: SurfaceKind,
    pub area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingQuantities {
    pub finish: FinishKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<SurfaceArea>,
    pub gross_area_m2: f64,
    pub deductions_m2: f64,
    pub net_area_m2: f64,
    pub loss_percent: f64,
    /// Net area plus losses: the quantity to purchase (m²)
    pub consumption_m2: f64,
}

pub fn build(input: &FinishingInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<FinishingQuantities> {
    let epsilon = presets.tolerances.closure_epsilon;
    input.validate(epsilon)?;

    let (plan_area, perimeter) = match &input.points {
        Some(points) => (
            scale.area(polygon_area_with_epsilon(points, epsilon)),
            scale.length(polygon_perimeter_with_epsilon(points, epsilon)),
        ),
        None => (0.0, 0.0),
    };
    let height = input.height_m.unwrap_or(0.0);

    let surfaces: Vec<SurfaceArea> = input
        .surfaces
        .iter()
        .map(|s| SurfaceArea {
            surface: s.surface,
            area_m2: non_negative(
                "finishing.surface_area_m2",
                s.area_m2
                    .unwrap_or_else(|| finishing::surface_area(s.surface, plan_area, perimeter, height)),
            ),
        })
        .collect();

    let gross = if surfaces.is_empty() {
        plan_area
    } else {
        surfaces.iter().map(|s| s.area_m2).sum()
    };
    let loss = input
        .loss_percent
        .unwrap_or_else(|| presets.finishing.loss_percent(input.finish));
    let net = non_negative("finishing.net_area_m2", finishing::net_area(gross, input.deductions_m2));

    Ok(FinishingQuantities {
        finish: input.finish,
        surfaces,
        gross_area_m2: non_negative("finishing.gross_area_m2", gross),
        deductions_m2: input.deductions_m2,
        net_area_m2: net,
        loss_percent: loss,
        consumption_m2: non_negative("finishing.consumption_m2", finishing::consumption(net, loss)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;
    use approx::assert_relative_eq;

    fn room() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(5.0, 0.0),
            Coordinate::new(5.0, 4.0),
            Coordinate::new(0.0, 4.0),
            Coordinate::new(0.0, 0.0),
        ]
    }

    fn unit() -> ResolvedScale {
        ScaleContext::default().resolve().unwrap()
    }

    #[test]
    fn test_floor_from_outline_with_preset_loss() {
        let input = FinishingInput {
            points: Some(room()),
            surfaces: Vec::new(),
            height_m: None,
            finish: FinishKind::Flooring,
            loss_percent: None,
            deductions_m2: 0.0,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_eq!(q.net_area_m2, 20.0);
        assert_eq!(q.loss_percent, 5.0);
        assert_relative_eq!(q.consumption_m2, 21.0, epsilon = 1e-12);
    }

    #[test]
    fn test_walls_and_ceiling() {
        let input = FinishingInput {
            points: Some(room()),
            surfaces: vec![
                FinishSurface {
                    surface: SurfaceKind::Walls,
                    area_m2: None,
                },
                FinishSurface {
                    surface: SurfaceKind::Ceiling,
                    area_m2: None,
                },
            ],
            height_m: Some(2.5),
            finish: FinishKind::Paint,
            loss_percent: Some(0.0),
            deductions_m2: 5.0,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        // walls 18 × 2.5 = 45, ceiling 20
        assert_eq!(q.surfaces[0].area_m2, 45.0);
        assert_eq!(q.gross_area_m2, 65.0);
        assert_eq!(q.net_area_m2, 60.0);
        assert_eq!(q.consumption_m2, 60.0);
    }

    #[test]
    fn test_explicit_surface_without_outline() {
        let input = FinishingInput {
            points: None,
            surfaces: vec![FinishSurface {
                surface: SurfaceKind::Walls,
                area_m2: Some(30.0),
            }],
            height_m: None,
            finish: FinishKind::Tile,
            loss_percent: None,
            deductions_m2: 0.0,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_relative_eq!(q.consumption_m2, 33.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wall_surface_needs_height() {
        let input = FinishingInput {
            points: Some(room()),
            surfaces: vec![FinishSurface {
                surface: SurfaceKind::Walls,
                area_m2: None,
            }],
            height_m: None,
            finish: FinishKind::Plaster,
            loss_percent: None,
            deductions_m2: 0.0,
        };
        assert_eq!(
            build(&input, &unit(), Presets::builtin()).unwrap_err(),
            TakeoffError::missing_field("height_m")
        );
    }

    #[test]
    fn test_nothing_to_measure() {
        let input = FinishingInput {
            points: None,
            surfaces: Vec::new(),
            height_m: None,
            finish: FinishKind::default(),
            loss_percent: None,
            deductions_m2: 0.0,
        };
        assert!(build(&input, &unit(), Presets::builtin()).is_err());
    }
}

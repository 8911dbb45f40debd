//! # Foundation Measurement
//!
//! | Kind | Geometry | Volume |
//! |------|----------|--------|
//! | `radier` | closed polygon | plan area × thickness |
//! | `strip` | polyline | width × height × run length |
//! | `isolated` | one point per footing | l × w × h × count |

use serde::{Deserialize, Serialize};

use super::checks::{non_negative_opt, positive_opt, require_points, require_polygon, require_polyline, require_positive};
use super::concrete::{ConcreteElement, ConcreteQuantities};
use super::slab;
use crate::errors::TakeoffResult;
use crate::formulas::concrete;
use crate::geometry::{polyline_length, Coordinate};
use crate::presets::Presets;
use crate::scale::ResolvedScale;

/// Foundation type and its dimensions (m).
///
/// ## JSON Examples
///
/// ```json
/// { "kind": "radier", "thickness_m": 0.25 }
/// { "kind": "strip", "width_m": 0.6, "height_m": 0.4 }
/// { "kind": "isolated", "length_m": 1.2, "width_m": 1.2, "height_m": 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoundationElement {
    Radier {
        /// Standard radier thickness when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness_m: Option<f64>,
    },
    Strip { width_m: f64, height_m: f64 },
    Isolated { length_m: f64, width_m: f64, height_m: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationInput {
    pub points: Vec<Coordinate>,

    pub element: FoundationElement,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebar_rate_kg_m3: Option<f64>,
}

impl FoundationInput {
    pub fn validate(&self, closure_epsilon: f64) -> TakeoffResult<()> {
        match &self.element {
            FoundationElement::Radier { thickness_m } => {
                require_polygon("points", &self.points, closure_epsilon)?;
                positive_opt("element.thickness_m", *thickness_m)?;
            }
            FoundationElement::Strip { width_m, height_m } => {
                require_polyline("points", &self.points)?;
                require_positive("element.width_m", *width_m)?;
                require_positive("element.height_m", *height_m)?;
            }
            FoundationElement::Isolated {
                length_m,
                width_m,
                height_m,
            } => {
                require_points("points", &self.points, 1)?;
                require_positive("element.length_m", *length_m)?;
                require_positive("element.width_m", *width_m)?;
                require_positive("element.height_m", *height_m)?;
            }
        }
        non_negative_opt("rebar_rate_kg_m3", self.rebar_rate_kg_m3)?;
        Ok(())
    }
}

pub fn build(input: &FoundationInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<ConcreteQuantities> {
    input.validate(presets.tolerances.closure_epsilon)?;
    let rebar_rate = input.rebar_rate_kg_m3.unwrap_or(presets.concrete.rebar_rate_kg_m3);
    let density = presets.concrete.density_kg_m3;

    let quantities = match input.element {
        FoundationElement::Radier { thickness_m } => {
            let thickness = thickness_m.unwrap_or(presets.thicknesses.radier_m);
            let plate = slab::plate(&input.points, thickness, rebar_rate, scale, presets);
            ConcreteQuantities::from_plate(ConcreteElement::Radier, plate)
        }
        FoundationElement::Strip { width_m, height_m } => {
            let length = scale.length(polyline_length(&input.points));
            ConcreteQuantities {
                length_m: length,
                plan_area_m2: width_m * length,
                section_area_m2: Some(width_m * height_m),
                thickness_m: Some(height_m),
                volume_m3: concrete::member_volume(width_m * height_m, length),
                // both sides of the run
                formwork_m2: Some(2.0 * height_m * length),
                ..ConcreteQuantities::new(ConcreteElement::StripFooting, 1)
            }
        }
        FoundationElement::Isolated {
            length_m,
            width_m,
            height_m,
        } => {
            let count = input.points.len();
            ConcreteQuantities {
                plan_area_m2: length_m * width_m * count as f64,
                section_area_m2: Some(length_m * width_m),
                thickness_m: Some(height_m),
                volume_m3: concrete::footing_volume(length_m, width_m, height_m, count),
                formwork_m2: Some(2.0 * (length_m + width_m) * height_m * count as f64),
                ..ConcreteQuantities::new(ConcreteElement::IsolatedFooting, count)
            }
        }
    };

    Ok(quantities.reinforce(rebar_rate, density))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;
    use approx::assert_relative_eq;

    fn unit() -> ResolvedScale {
        ScaleContext::default().resolve().unwrap()
    }

    #[test]
    fn test_radier_uses_standard_thickness() {
        let input = FoundationInput {
            points: vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(10.0, 0.0),
                Coordinate::new(10.0, 5.0),
                Coordinate::new(0.0, 5.0),
                Coordinate::new(0.0, 0.0),
            ],
            element: FoundationElement::Radier { thickness_m: None },
            rebar_rate_kg_m3: None,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_eq!(q.element, ConcreteElement::Radier);
        assert_eq!(q.thickness_m, Some(0.20));
        assert_relative_eq!(q.volume_m3, 10.0, epsilon = 1e-12);
        assert_relative_eq!(q.rebar_kg, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_strip_footing() {
        let input = FoundationInput {
            points: vec![Coordinate::new(0.0, 0.0), Coordinate::new(20.0, 0.0)],
            element: FoundationElement::Strip {
                width_m: 0.5,
                height_m: 0.4,
            },
            rebar_rate_kg_m3: Some(80.0),
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_relative_eq!(q.volume_m3, 4.0, epsilon = 1e-12);
        assert_relative_eq!(q.rebar_kg, 320.0, epsilon = 1e-9);
        assert_relative_eq!(q.formwork_m2.unwrap(), 16.0, epsilon = 1e-12);
    }

    #[test]
    fn test_isolated_footings_count_points() {
        let input = FoundationInput {
            points: vec![Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 0.0), Coordinate::new(10.0, 0.0)],
            element: FoundationElement::Isolated {
                length_m: 1.0,
                width_m: 1.0,
                height_m: 0.5,
            },
            rebar_rate_kg_m3: None,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_eq!(q.count, 3);
        assert_eq!(q.volume_m3, 1.5);
        assert_eq!(q.concrete_weight_kg, 3600.0);
    }

    #[test]
    fn test_radier_needs_closed_polygon() {
        let input = FoundationInput {
            points: vec![Coordinate::new(0.0, 0.0), Coordinate::new(20.0, 0.0)],
            element: FoundationElement::Radier { thickness_m: None },
            rebar_rate_kg_m3: None,
        };
        assert!(build(&input, &unit(), Presets::builtin()).unwrap_err().is_structural());
    }
}

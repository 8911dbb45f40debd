//! # Structural Member Measurement
//!
//! Reinforced concrete beams (along a polyline), columns (one point per
//! column) and structural slabs (closed polygon).

use serde::{Deserialize, Serialize};

use super::checks::{non_negative_opt, positive_opt, require_points, require_polygon, require_polyline, require_positive};
use super::concrete::{ConcreteElement, ConcreteQuantities};
use super::slab;
use crate::errors::TakeoffResult;
use crate::formulas::concrete;
use crate::formulas::section::CrossSection;
use crate::geometry::{polyline_length, Coordinate};
use crate::presets::Presets;
use crate::scale::ResolvedScale;

/// Structural element and its section.
///
/// ## JSON Examples
///
/// ```json
/// { "kind": "beam", "section": { "shape": "rectangular", "width_m": 0.2, "height_m": 0.5 } }
/// { "kind": "column", "section": { "shape": "circular", "diameter_m": 0.4 }, "height_m": 3.0 }
/// { "kind": "slab", "thickness_m": 0.15 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralElement {
    Beam {
        section: CrossSection,
    },
    Column {
        section: CrossSection,
        height_m: f64,
    },
    Slab {
        /// Standard structural slab thickness when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness_m: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureInput {
    pub points: Vec<Coordinate>,

    pub element: StructuralElement,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebar_rate_kg_m3: Option<f64>,
}

impl StructureInput {
    pub fn validate(&self, closure_epsilon: f64) -> TakeoffResult<()> {
        match &self.element {
            StructuralElement::Beam { section } => {
                require_polyline("points", &self.points)?;
                section.validate("element.section")?;
            }
            StructuralElement::Column { section, height_m } => {
                require_points("points", &self.points, 1)?;
                section.validate("element.section")?;
                require_positive("element.height_m", *height_m)?;
            }
            StructuralElement::Slab { thickness_m } => {
                require_polygon("points", &self.points, closure_epsilon)?;
                positive_opt("element.thickness_m", *thickness_m)?;
            }
        }
        non_negative_opt("rebar_rate_kg_m3", self.rebar_rate_kg_m3)?;
        Ok(())
    }
}

/// Beam formwork: sides and soffit of a rectangle, the full perimeter of a
/// round section, unknown for a custom area
fn beam_formwork(section: &CrossSection, length: f64) -> Option<f64> {
    match *section {
        CrossSection::Rectangular { width_m, height_m } => Some(concrete::beam_formwork_area(width_m, height_m, length)),
        _ => section.perimeter().map(|p| p * length),
    }
}

pub fn build(input: &StructureInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<ConcreteQuantities> {
    input.validate(presets.tolerances.closure_epsilon)?;
    let rebar_rate = input.rebar_rate_kg_m3.unwrap_or(presets.concrete.rebar_rate_kg_m3);
    let density = presets.concrete.density_kg_m3;

    let quantities = match &input.element {
        StructuralElement::Beam { section } => {
            let length = scale.length(polyline_length(&input.points));
            let plan_width = match *section {
                CrossSection::Rectangular { width_m, .. } => width_m,
                CrossSection::Circular { diameter_m } => diameter_m,
                CrossSection::Custom { .. } => 0.0,
            };
            ConcreteQuantities {
                length_m: length,
                plan_area_m2: plan_width * length,
                section_area_m2: Some(section.area()),
                volume_m3: concrete::member_volume(section.area(), length),
                formwork_m2: beam_formwork(section, length),
                ..ConcreteQuantities::new(ConcreteElement::Beam, 1)
            }
        }
        StructuralElement::Column { section, height_m } => {
            let count = input.points.len();
            let total_height = height_m * count as f64;
            ConcreteQuantities {
                length_m: total_height,
                plan_area_m2: section.area() * count as f64,
                section_area_m2: Some(section.area()),
                volume_m3: concrete::member_volume(section.area(), total_height),
                formwork_m2: section
                    .perimeter()
                    .map(|p| concrete::column_formwork_area(p, total_height)),
                ..ConcreteQuantities::new(ConcreteElement::Column, count)
            }
        }
        StructuralElement::Slab { thickness_m } => {
            let thickness = thickness_m.unwrap_or(presets.thicknesses.structural_slab_m);
            let plate = slab::plate(&input.points, thickness, rebar_rate, scale, presets);
            ConcreteQuantities::from_plate(ConcreteElement::StructuralSlab, plate)
        }
    };

    Ok(quantities.reinforce(rebar_rate, density))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn unit() -> ResolvedScale {
        ScaleContext::default().resolve().unwrap()
    }

    #[test]
    fn test_beam() {
        let input = StructureInput {
            points: vec![Coordinate::new(0.0, 0.0), Coordinate::new(6.0, 0.0)],
            element: StructuralElement::Beam {
                section: CrossSection::Rectangular {
                    width_m: 0.2,
                    height_m: 0.5,
                },
            },
            rebar_rate_kg_m3: None,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_relative_eq!(q.volume_m3, 0.6, epsilon = 1e-12);
        assert_relative_eq!(q.rebar_kg, 60.0, epsilon = 1e-9);
        assert_relative_eq!(q.formwork_m2.unwrap(), 7.2, epsilon = 1e-12);
    }

    #[test]
    fn test_round_columns() {
        let input = StructureInput {
            points: vec![Coordinate::new(0.0, 0.0), Coordinate::new(4.0, 0.0)],
            element: StructuralElement::Column {
                section: CrossSection::Circular { diameter_m: 0.4 },
                height_m: 3.0,
            },
            rebar_rate_kg_m3: Some(120.0),
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_eq!(q.count, 2);
        assert_eq!(q.length_m, 6.0);
        assert_relative_eq!(q.volume_m3, PI * 0.04 * 6.0, epsilon = 1e-12);
        assert_relative_eq!(q.formwork_m2.unwrap(), PI * 0.4 * 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_custom_section_has_no_formwork() {
        let input = StructureInput {
            points: vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)],
            element: StructuralElement::Beam {
                section: CrossSection::Custom { area_m2: 0.15 },
            },
            rebar_rate_kg_m3: None,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_eq!(q.formwork_m2, None);
        assert_relative_eq!(q.volume_m3, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_structural_slab_default_thickness() {
        let input = StructureInput {
            points: vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(5.0, 0.0),
                Coordinate::new(5.0, 4.0),
                Coordinate::new(0.0, 4.0),
                Coordinate::new(0.0, 0.0),
            ],
            element: StructuralElement::Slab { thickness_m: None },
            rebar_rate_kg_m3: None,
        };
        let q = build(&input, &unit(), Presets::builtin()).unwrap();
        assert_eq!(q.element, ConcreteElement::StructuralSlab);
        assert_eq!(q.thickness_m, Some(0.12));
        assert_relative_eq!(q.volume_m3, 2.4, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_section_rejected() {
        let input = StructureInput {
            points: vec![Coordinate::new(0.0, 0.0)],
            element: StructuralElement::Column {
                section: CrossSection::Rectangular {
                    width_m: 0.0,
                    height_m: 0.3,
                },
                height_m: 3.0,
            },
            rebar_rate_kg_m3: None,
        };
        let err = build(&input, &unit(), Presets::builtin()).unwrap_err();
        assert!(err.to_string().contains("element.section.width_m"));
    }
}

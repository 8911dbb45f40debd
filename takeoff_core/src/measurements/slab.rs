//! # Slab Measurement
//!
//! Slab-on-grade or floor slab over a closed outline: concrete volume,
//! reinforcement, weight and edge formwork.

use serde::{Deserialize, Serialize};

use super::checks::{non_negative_opt, positive_opt, require_polygon};
use crate::errors::TakeoffResult;
use crate::formulas::concrete;
use crate::geometry::{polygon_area_with_epsilon, polygon_perimeter_with_epsilon, Coordinate};
use crate::guard::non_negative;
use crate::presets::Presets;
use crate::scale::ResolvedScale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabInput {
    pub points: Vec<Coordinate>,

    /// Standard slab thickness when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_m: Option<f64>,

    /// Preset rebar rate when absent (kg/m³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebar_rate_kg_m3: Option<f64>,
}

impl SlabInput {
    pub fn validate(&self, closure_epsilon: f64) -> TakeoffResult<()> {
        require_polygon("points", &self.points, closure_epsilon)?;
        positive_opt("thickness_m", self.thickness_m)?;
        non_negative_opt("rebar_rate_kg_m3", self.rebar_rate_kg_m3)?;
        Ok(())
    }
}

/// Concrete plate quantities, shared by slabs, mat foundations and
/// structural slabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabQuantities {
    pub area_m2: f64,
    pub perimeter_m: f64,
    pub thickness_m: f64,
    pub volume_m3: f64,
    pub rebar_rate_kg_m3: f64,
    pub rebar_kg: f64,
    pub concrete_weight_kg: f64,
    pub edge_formwork_m2: f64,
}

/// Plate quantities for a validated closed outline
pub(crate) fn plate(
    points: &[Coordinate],
    thickness: f64,
    rebar_rate: f64,
    scale: &ResolvedScale,
    presets: &Presets,
) -> SlabQuantities {
    let epsilon = presets.tolerances.closure_epsilon;
    let area = non_negative("slab.area_m2", scale.area(polygon_area_with_epsilon(points, epsilon)));
    let perimeter = non_negative("slab.perimeter_m", scale.length(polygon_perimeter_with_epsilon(points, epsilon)));
    let volume = non_negative("slab.volume_m3", concrete::slab_volume(area, thickness));

    SlabQuantities {
        area_m2: area,
        perimeter_m: perimeter,
        thickness_m: thickness,
        volume_m3: volume,
        rebar_rate_kg_m3: rebar_rate,
        rebar_kg: non_negative("slab.rebar_kg", concrete::rebar_weight(volume, rebar_rate)),
        concrete_weight_kg: non_negative(
            "slab.concrete_weight_kg",
            concrete::concrete_weight(volume, presets.concrete.density_kg_m3),
        ),
        edge_formwork_m2: non_negative("slab.edge_formwork_m2", concrete::edge_formwork_area(perimeter, thickness)),
    }
}

pub fn build(input: &SlabInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<SlabQuantities> {
    input.validate(presets.tolerances.closure_epsilon)?;
    let thickness = input.thickness_m.unwrap_or(presets.thicknesses.slab_m);
    let rebar_rate = input.rebar_rate_kg_m3.unwrap_or(presets.concrete.rebar_rate_kg_m3);
    Ok(plate(&input.points, thickness, rebar_rate, scale, presets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;
    use approx::assert_relative_eq;

    fn square(side: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(side, 0.0),
            Coordinate::new(side, side),
            Coordinate::new(0.0, side),
            Coordinate::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_defaults_from_presets() {
        let input = SlabInput {
            points: square(10.0),
            thickness_m: None,
            rebar_rate_kg_m3: None,
        };
        let q = build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).unwrap();
        assert_eq!(q.area_m2, 100.0);
        assert_eq!(q.thickness_m, 0.10);
        assert_relative_eq!(q.volume_m3, 10.0, epsilon = 1e-12);
        assert_relative_eq!(q.rebar_kg, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(q.concrete_weight_kg, 24_000.0, epsilon = 1e-9);
        assert_relative_eq!(q.edge_formwork_m2, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_explicit_values() {
        let input = SlabInput {
            points: square(0.05),
            thickness_m: Some(0.2),
            rebar_rate_kg_m3: Some(80.0),
        };
        // 0.05 units at 1:100 → 5 m
        let q = build(&input, &ScaleContext::new("1:100").resolve().unwrap(), Presets::builtin()).unwrap();
        assert_relative_eq!(q.area_m2, 25.0, epsilon = 1e-9);
        assert_relative_eq!(q.rebar_kg, 25.0 * 0.2 * 80.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_thickness_rejected() {
        let input = SlabInput {
            points: square(10.0),
            thickness_m: Some(0.0),
            rebar_rate_kg_m3: None,
        };
        assert!(build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).is_err());
    }
}

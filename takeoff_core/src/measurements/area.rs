//! # Area Measurement
//!
//! Generic plan area of a closed polygon with polygonal deductions (holes,
//! shafts, excluded zones), optionally extruded to a volume.

use serde::{Deserialize, Serialize};

use super::checks::{positive_opt, require_polygon};
use crate::errors::TakeoffResult;
use crate::geometry::{polygon_area_with_epsilon, polygon_perimeter_with_epsilon, Coordinate};
use crate::guard::non_negative;
use crate::presets::Presets;
use crate::scale::ResolvedScale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaInput {
    /// Outer boundary, closed
    pub points: Vec<Coordinate>,

    /// Closed polygons subtracted from the boundary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deductions: Vec<Vec<Coordinate>>,

    /// When present, volume = net area × thickness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_m: Option<f64>,
}

impl AreaInput {
    pub fn validate(&self, closure_epsilon: f64) -> TakeoffResult<()> {
        require_polygon("points", &self.points, closure_epsilon)?;
        for (i, hole) in self.deductions.iter().enumerate() {
            require_polygon(&format!("deductions[{}]", i), hole, closure_epsilon)?;
        }
        positive_opt("thickness_m", self.thickness_m)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaQuantities {
    pub gross_area_m2: f64,
    pub deductions_m2: f64,
    pub net_area_m2: f64,
    pub perimeter_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_m3: Option<f64>,
}

pub fn build(input: &AreaInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<AreaQuantities> {
    let epsilon = presets.tolerances.closure_epsilon;
    input.validate(epsilon)?;

    let gross = scale.area(polygon_area_with_epsilon(&input.points, epsilon));
    let deductions: f64 = input
        .deductions
        .iter()
        .map(|hole| scale.area(polygon_area_with_epsilon(hole, epsilon)))
        .sum();
    let net = non_negative("area.net_area_m2", gross - deductions);

    Ok(AreaQuantities {
        gross_area_m2: non_negative("area.gross_area_m2", gross),
        deductions_m2: non_negative("area.deductions_m2", deductions),
        net_area_m2: net,
        perimeter_m: non_negative(
            "area.perimeter_m",
            scale.length(polygon_perimeter_with_epsilon(&input.points, epsilon)),
        ),
        volume_m3: input.thickness_m.map(|t| non_negative("area.volume_m3", net * t)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(x0, y0),
            Coordinate::new(x1, y0),
            Coordinate::new(x1, y1),
            Coordinate::new(x0, y1),
            Coordinate::new(x0, y0),
        ]
    }

    #[test]
    fn test_net_area_with_hole() {
        let input = AreaInput {
            points: rect(0.0, 0.0, 10.0, 10.0),
            deductions: vec![rect(2.0, 2.0, 4.0, 4.0)],
            thickness_m: Some(0.5),
        };
        let q = build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).unwrap();
        assert_eq!(q.gross_area_m2, 100.0);
        assert_eq!(q.deductions_m2, 4.0);
        assert_eq!(q.net_area_m2, 96.0);
        assert_eq!(q.perimeter_m, 40.0);
        assert_eq!(q.volume_m3, Some(48.0));
    }

    #[test]
    fn test_oversized_deduction_clamps() {
        let input = AreaInput {
            points: rect(0.0, 0.0, 1.0, 1.0),
            deductions: vec![rect(0.0, 0.0, 2.0, 2.0)],
            thickness_m: None,
        };
        let q = build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).unwrap();
        assert_eq!(q.net_area_m2, 0.0);
    }

    #[test]
    fn test_open_deduction_names_index() {
        let mut hole = rect(2.0, 2.0, 4.0, 4.0);
        hole.pop();
        let input = AreaInput {
            points: rect(0.0, 0.0, 10.0, 10.0),
            deductions: vec![hole],
            thickness_m: None,
        };
        let err = build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).unwrap_err();
        assert!(err.to_string().contains("deductions[0]"));
    }
}

//! # Conduit Measurement
//!
//! A conduit bank along a 3D path: length, bore volume and pipe weight by
//! material, multiplied by the number of parallel runs.

use serde::{Deserialize, Serialize};

use super::checks::{require_polyline, require_positive};
use crate::errors::{TakeoffError, TakeoffResult};
use crate::formulas::conduit;
use crate::geometry::{polyline_length_3d, Coordinate};
use crate::guard::non_negative;
use crate::presets::{ConduitMaterial, Presets};
use crate::scale::ResolvedScale;

/// Conduit input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "points": [{ "x": 0, "y": 0, "z": 0.9 }, { "x": 400, "y": 0, "z": 0.9 }],
///   "material": "HDPE",
///   "inner_diameter_m": 0.1016,
///   "outer_diameter_m": 0.1143,
///   "runs": 4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitInput {
    pub points: Vec<Coordinate>,

    /// Material name (PVC, HDPE, steel, aluminum, fiber, copper)
    pub material: String,

    pub inner_diameter_m: f64,

    pub outer_diameter_m: f64,

    /// Parallel conduits laid in the same path
    #[serde(default = "default_runs")]
    pub runs: u32,
}

fn default_runs() -> u32 {
    1
}

impl ConduitInput {
    pub fn validate(&self) -> TakeoffResult<ConduitMaterial> {
        require_polyline("points", &self.points)?;
        let material = ConduitMaterial::from_str_flexible(&self.material)?;
        require_positive("inner_diameter_m", self.inner_diameter_m)?;
        require_positive("outer_diameter_m", self.outer_diameter_m)?;
        if self.outer_diameter_m <= self.inner_diameter_m {
            return Err(TakeoffError::invalid_input(
                "outer_diameter_m",
                self.outer_diameter_m.to_string(),
                format!("must exceed inner_diameter_m ({})", self.inner_diameter_m),
            ));
        }
        if self.runs == 0 {
            return Err(TakeoffError::invalid_input("runs", "0", "at least one run is required"));
        }
        Ok(material)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitQuantities {
    pub material: ConduitMaterial,
    /// Path length along the 3D route (m)
    pub path_length_m: f64,
    pub runs: u32,
    /// path length × runs (m)
    pub total_length_m: f64,
    /// Bore volume of all runs (m³)
    pub internal_volume_m3: f64,
    /// Pipe wall volume of all runs (m³)
    pub wall_volume_m3: f64,
    pub density_kg_m3: f64,
    pub weight_kg: f64,
}

pub fn build(input: &ConduitInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<ConduitQuantities> {
    let material = input.validate()?;
    let density = presets.conduit.density(material);

    let path_length = polyline_length_3d(&scale.points(&input.points));
    let total_length = path_length * f64::from(input.runs);
    let (d_in, d_out) = (input.inner_diameter_m, input.outer_diameter_m);

    Ok(ConduitQuantities {
        material,
        path_length_m: non_negative("conduit.path_length_m", path_length),
        runs: input.runs,
        total_length_m: non_negative("conduit.total_length_m", total_length),
        internal_volume_m3: non_negative("conduit.internal_volume_m3", conduit::internal_volume(d_in, total_length)),
        wall_volume_m3: non_negative("conduit.wall_volume_m3", conduit::wall_volume(d_in, d_out, total_length)),
        density_kg_m3: density,
        weight_kg: non_negative("conduit.weight_kg", conduit::weight(d_in, d_out, total_length, density)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn input(material: &str, runs: u32) -> ConduitInput {
        ConduitInput {
            points: vec![Coordinate::with_z(0.0, 0.0, 1.0), Coordinate::with_z(100.0, 0.0, 1.0)],
            material: material.to_string(),
            inner_diameter_m: 0.1,
            outer_diameter_m: 0.12,
            runs,
        }
    }

    #[test]
    fn test_runs_multiply_totals() {
        let scale = ScaleContext::new("1:1").resolve().unwrap();
        let one = build(&input("pvc", 1), &scale, Presets::builtin()).unwrap();
        let four = build(&input("pvc", 4), &scale, Presets::builtin()).unwrap();
        assert_eq!(one.path_length_m, 100.0);
        assert_eq!(four.total_length_m, 400.0);
        assert_relative_eq!(one.internal_volume_m3, PI * 0.0025 * 100.0, epsilon = 1e-12);
        assert_relative_eq!(four.weight_kg, one.weight_kg * 4.0, epsilon = 1e-9);
        assert_eq!(one.density_kg_m3, 1400.0);
    }

    #[test]
    fn test_unknown_material() {
        let scale = ScaleContext::new("1:1").resolve().unwrap();
        let err = build(&input("bamboo", 1), &scale, Presets::builtin()).unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_outer_must_exceed_inner() {
        let mut bad = input("steel", 1);
        bad.outer_diameter_m = 0.1;
        assert!(bad.validate().is_err());
    }
}

//! # Bore Shot (HDD) Measurement
//!
//! A directional-drilling path digitized in plan with depth at each vertex.
//! Produces bore length and reaming volume, and checks every interior bend
//! against the minimum radius and every vertex against the minimum cover.
//! Out-of-limit findings are reported as [`ValidationFailure`]s alongside the
//! quantities; they do not fail the build.

use serde::{Deserialize, Serialize};

use super::checks::{positive_opt, require_polyline};
use crate::errors::TakeoffResult;
use crate::formulas::drilling::{self, ValidationFailure};
use crate::geometry::Coordinate;
use crate::guard::{non_negative, non_negative_or_unbounded};
use crate::presets::Presets;
use crate::scale::ResolvedScale;

/// Bore path input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "points": [
///     { "x": 0, "y": 0, "z": 0.0 },
///     { "x": 120, "y": 0, "z": 2.5 },
///     { "x": 480, "y": 40, "z": 2.5 },
///     { "x": 600, "y": 40, "z": 0.0 }
///   ],
///   "min_radius_m": 150.0,
///   "pipe_diameter_m": 0.25
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoreShotInput {
    /// Path vertices; `z` is depth below grade in meters
    pub points: Vec<Coordinate>,

    /// Minimum bend radius (m); preset default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_radius_m: Option<f64>,

    /// Minimum cover depth (m); preset default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_depth_m: Option<f64>,

    /// Final reamed hole diameter (m), for the reaming volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe_diameter_m: Option<f64>,
}

impl BoreShotInput {
    pub fn validate(&self) -> TakeoffResult<()> {
        require_polyline("points", &self.points)?;
        positive_opt("min_radius_m", self.min_radius_m)?;
        positive_opt("min_depth_m", self.min_depth_m)?;
        positive_opt("pipe_diameter_m", self.pipe_diameter_m)?;
        Ok(())
    }
}

/// Bore shot quantities and compliance findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoreShotQuantities {
    /// Length along the 3D path (m)
    pub bore_length_m: f64,
    /// Horizontal length (m)
    pub plan_length_m: f64,
    /// Tightest bend; `None` when the path is straight
    pub min_bend_radius_m: Option<f64>,
    /// Radius at each interior vertex (entry `i` is vertex `i + 1`); `None` = straight
    pub bend_radii_m: Vec<Option<f64>>,
    pub shallowest_depth_m: f64,
    pub deepest_depth_m: f64,
    pub required_radius_m: f64,
    pub required_depth_m: f64,
    /// π (D/2)² × bore length, when a pipe diameter is given (m³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reamed_volume_m3: Option<f64>,
    pub violations: Vec<ValidationFailure>,
}

impl BoreShotQuantities {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn build(input: &BoreShotInput, scale: &ResolvedScale, presets: &Presets) -> TakeoffResult<BoreShotQuantities> {
    input.validate()?;

    let required_radius = input.min_radius_m.unwrap_or(presets.drilling.min_radius_m);
    let required_depth = input.min_depth_m.unwrap_or(presets.drilling.min_depth_m);

    let path = scale.points(&input.points);
    let bore_length = non_negative("bore_shot.bore_length_m", drilling::bore_length(&path));

    let mut violations = drilling::curvature_violations(&path, required_radius);
    violations.extend(drilling::depth_violations(&path, required_depth));
    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "bore shot compliance violations");
    }

    let depths = path.iter().map(Coordinate::z_or_zero);
    let shallowest = depths.clone().fold(f64::INFINITY, f64::min);
    let deepest = depths.fold(f64::NEG_INFINITY, f64::max);

    Ok(BoreShotQuantities {
        bore_length_m: bore_length,
        plan_length_m: non_negative("bore_shot.plan_length_m", drilling::plan_length(&path)),
        min_bend_radius_m: non_negative_or_unbounded("bore_shot.min_bend_radius_m", drilling::min_bend_radius(&path)),
        bend_radii_m: drilling::bend_radii(&path)
            .into_iter()
            .map(|r| non_negative_or_unbounded("bore_shot.bend_radius_m", r))
            .collect(),
        shallowest_depth_m: non_negative("bore_shot.shallowest_depth_m", shallowest),
        deepest_depth_m: non_negative("bore_shot.deepest_depth_m", deepest),
        required_radius_m: required_radius,
        required_depth_m: required_depth,
        reamed_volume_m3: input
            .pipe_diameter_m
            .map(|d| non_negative("bore_shot.reamed_volume_m3", drilling::reamed_volume(d, bore_length))),
        violations,
    })
}

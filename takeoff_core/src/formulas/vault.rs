//! # Vault Excavation and Backfill
//!
//! A vault (handhole, manhole, splice box) is set in an excavation that is
//! backfilled around the structure once it is placed:
//!
//! ```text
//!   excavation = box l × w × d | cylinder π r² d | footprint A × d
//!   structure  = given, or ratio × excavation
//!   backfill   = excavation − structure − Σ (removal area × removal thickness)
//! ```
//!
//! Surface removals (pavement, sidewalk slab) are taken out of the hole
//! before the vault goes in and are replaced by their own material, so they
//! do not count as backfill.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Surface layer removed above the vault before excavation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRemoval {
    /// What is removed ("asphalt", "concrete sidewalk")
    #[serde(default)]
    pub label: String,
    /// Removed area (m²)
    pub area_m2: f64,
    /// Layer thickness (m)
    pub thickness_m: f64,
}

impl SurfaceRemoval {
    pub fn volume(&self) -> f64 {
        self.area_m2 * self.thickness_m
    }
}

/// l × w × d
#[inline]
pub fn box_volume(length: f64, width: f64, depth: f64) -> f64 {
    length * width * depth
}

/// π r² d
#[inline]
pub fn cylinder_volume(diameter: f64, depth: f64) -> f64 {
    let r = diameter / 2.0;
    PI * r * r * depth
}

/// Footprint area × depth
#[inline]
pub fn footprint_volume(footprint_area: f64, depth: f64) -> f64 {
    footprint_area * depth
}

/// Structure volume when the vault's own volume is not given
#[inline]
pub fn default_structure_volume(excavation: f64, ratio: f64) -> f64 {
    excavation * ratio
}

/// Σ area × thickness over the removals
pub fn removal_volume(removals: &[SurfaceRemoval]) -> f64 {
    removals.iter().map(SurfaceRemoval::volume).sum()
}

/// excavation − structure − removals (may go negative; the caller clamps)
pub fn backfill_volume(excavation: f64, structure: f64, removals: &[SurfaceRemoval]) -> f64 {
    excavation - structure - removal_volume(removals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_backfill_with_default_structure() {
        let excavation = box_volume(2.0, 1.5, 1.2);
        assert_relative_eq!(excavation, 3.6, epsilon = 1e-12);
        let structure = default_structure_volume(excavation, 0.10);
        assert_relative_eq!(backfill_volume(excavation, structure, &[]), 3.24, epsilon = 1e-12);
    }

    #[test]
    fn test_removals_reduce_backfill() {
        let removals = [
            SurfaceRemoval {
                label: "asphalt".into(),
                area_m2: 4.0,
                thickness_m: 0.1,
            },
            SurfaceRemoval {
                label: String::new(),
                area_m2: 1.0,
                thickness_m: 0.2,
            },
        ];
        assert_relative_eq!(removal_volume(&removals), 0.6, epsilon = 1e-12);
        assert_relative_eq!(backfill_volume(5.0, 1.0, &removals), 3.4, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder() {
        assert_relative_eq!(cylinder_volume(2.0, 3.0), 3.0 * PI);
    }
}

//! # Hydro-Excavation
//!
//! Vacuum excavation volumes. The nozzle cut has a cross-section (see
//! [`CrossSection`]); the mode decides what it is multiplied by:
//!
//! | Mode | Volume |
//! |------|--------|
//! | `trench` | A × polyline length |
//! | `hole` | A × depth |
//! | `potholing` | A × depth × number of holes |
//!
//! An optional efficiency ratio in (0, 1] scales the result down for cuts
//! that do not clear the whole section.

use serde::{Deserialize, Serialize};

use super::section::CrossSection;

/// How a hydro-excavation is laid out on the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydroMode {
    /// Continuous slot along a polyline
    Trench,
    /// One hole at a point
    #[default]
    Hole,
    /// A series of test holes, one per digitized point
    Potholing,
}

impl HydroMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            HydroMode::Trench => "Trench",
            HydroMode::Hole => "Hole",
            HydroMode::Potholing => "Potholing",
        }
    }

    /// Fewest digitized points the mode can work with
    pub fn min_points(&self) -> usize {
        match self {
            HydroMode::Trench => 2,
            HydroMode::Hole | HydroMode::Potholing => 1,
        }
    }

    /// Whether the volume needs an explicit depth
    pub fn requires_depth(&self) -> bool {
        !matches!(self, HydroMode::Trench)
    }
}

impl std::fmt::Display for HydroMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A × L
#[inline]
pub fn trench_volume(section: &CrossSection, length: f64) -> f64 {
    section.area() * length
}

/// A × d
#[inline]
pub fn hole_volume(section: &CrossSection, depth: f64) -> f64 {
    section.area() * depth
}

/// A × d × n
#[inline]
pub fn potholing_volume(section: &CrossSection, depth: f64, holes: usize) -> f64 {
    hole_volume(section, depth) * holes as f64
}

/// Scale a gross volume by the excavation efficiency
#[inline]
pub fn apply_efficiency(volume: f64, efficiency_ratio: Option<f64>) -> f64 {
    volume * efficiency_ratio.unwrap_or(1.0)
}

//! # Conduit Runs
//!
//! - Internal (bore) volume: V = π r_in² L
//! - Wall volume: π (r_out² − r_in²) L
//! - Weight: wall volume × material density
//!
//! Parallel runs in the same path multiply every total.

use std::f64::consts::PI;

/// π r_in² L
#[inline]
pub fn internal_volume(inner_diameter: f64, length: f64) -> f64 {
    let r = inner_diameter / 2.0;
    PI * r * r * length
}

/// π (r_out² − r_in²) L
#[inline]
pub fn wall_volume(inner_diameter: f64, outer_diameter: f64, length: f64) -> f64 {
    let r_in = inner_diameter / 2.0;
    let r_out = outer_diameter / 2.0;
    PI * (r_out * r_out - r_in * r_in) * length
}

/// Conduit weight from its wall volume and density (kg/m³)
///
/// ```rust
/// use takeoff_core::formulas::conduit::weight;
///
/// // 100 m of 100/110 mm PVC
/// let kg = weight(0.100, 0.110, 100.0, 1400.0);
/// assert!((kg - 230.9).abs() < 0.1);
/// ```
#[inline]
pub fn weight(inner_diameter: f64, outer_diameter: f64, length: f64, density: f64) -> f64 {
    wall_volume(inner_diameter, outer_diameter, length) * density
}

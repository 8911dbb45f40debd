//! # Material-Planning Optimizations
//!
//! Closed-form answers to two classic sizing questions. They are not tied to
//! a measurement record; the CLI exposes them directly.
//!
//! ## Strongest beam from a round log
//!
//! For a rectangle inscribed in a circle of diameter D, the section modulus
//! S = b h² / 6 is maximised at
//!
//! ```text
//!   b = D / √3,   h = D · √(2/3)   (h = b √2)
//! ```
//!
//! ## Rectangles
//!
//! | Case | Fixed | Optimum |
//! |------|-------|---------|
//! | four sides | area A | square, x = y = √A, P = 4√A |
//! | four sides | perimeter P | square, x = y = P/4, A = P²/16 |
//! | three sides (wall on one long side) | area A | x = √(A/2), y = 2x, fenced = 2√(2A) |
//! | three sides | fenced length P | x = P/4, y = P/2, A = P²/8 |
//!
//! In the three-sided case `x` is each side perpendicular to the wall and
//! `y` the side parallel to it; only 2x + y is built.

use serde::{Deserialize, Serialize};

/// Beam section cut from a log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogBeam {
    pub log_diameter_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    /// b h² / 6 (m³)
    pub section_modulus_m3: f64,
}

/// Widest-strongest rectangular section for a log of diameter `diameter`
///
/// ```rust
/// use takeoff_core::formulas::optimization::strongest_beam_from_log;
///
/// let beam = strongest_beam_from_log(0.30);
/// assert!((beam.height_m / beam.width_m - 2f64.sqrt()).abs() < 1e-12);
/// ```
pub fn strongest_beam_from_log(diameter: f64) -> LogBeam {
    let width_m = diameter / 3f64.sqrt();
    let height_m = diameter * (2.0f64 / 3.0).sqrt();
    LogBeam {
        log_diameter_m: diameter,
        width_m,
        height_m,
        section_modulus_m3: section_modulus(width_m, height_m),
    }
}

/// S = b h² / 6
#[inline]
pub fn section_modulus(width: f64, height: f64) -> f64 {
    width * height * height / 6.0
}

/// An optimal rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleOptimum {
    /// Side perpendicular to the wall (or either side when four-sided)
    pub side_x_m: f64,
    /// Side parallel to the wall
    pub side_y_m: f64,
    pub area_m2: f64,
    /// Length actually built (4 sides, or 2x + y against a wall)
    pub built_length_m: f64,
    pub three_sided: bool,
}

/// Smallest built length enclosing `area`
pub fn min_perimeter_for_area(area: f64, three_sided: bool) -> RectangleOptimum {
    if three_sided {
        let x = (area / 2.0).sqrt();
        let y = 2.0 * x;
        RectangleOptimum {
            side_x_m: x,
            side_y_m: y,
            area_m2: area,
            built_length_m: 2.0 * x + y,
            three_sided,
        }
    } else {
        let side = area.sqrt();
        RectangleOptimum {
            side_x_m: side,
            side_y_m: side,
            area_m2: area,
            built_length_m: 4.0 * side,
            three_sided,
        }
    }
}

/// Largest area enclosed by a built length `perimeter`
pub fn max_area_for_perimeter(perimeter: f64, three_sided: bool) -> RectangleOptimum {
    if three_sided {
        let x = perimeter / 4.0;
        let y = perimeter / 2.0;
        RectangleOptimum {
            side_x_m: x,
            side_y_m: y,
            area_m2: x * y,
            built_length_m: perimeter,
            three_sided,
        }
    } else {
        let side = perimeter / 4.0;
        RectangleOptimum {
            side_x_m: side,
            side_y_m: side,
            area_m2: side * side,
            built_length_m: perimeter,
            three_sided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_beam_inscribed() {
        let beam = strongest_beam_from_log(0.6);
        // Diagonal equals the diameter
        assert_relative_eq!(beam.width_m.hypot(beam.height_m), 0.6, epsilon = 1e-12);
        // Nearby sections are weaker
        let w = beam.width_m * 1.05;
        let h = (0.36 - w * w).sqrt();
        assert!(section_modulus(w, h) < beam.section_modulus_m3);
    }

    #[test]
    fn test_square_is_optimal_four_sided() {
        let r = min_perimeter_for_area(16.0, false);
        assert_eq!(r.side_x_m, 4.0);
        assert_eq!(r.built_length_m, 16.0);

        let r = max_area_for_perimeter(20.0, false);
        assert_eq!(r.area_m2, 25.0);
    }

    #[test]
    fn test_three_sided() {
        let r = min_perimeter_for_area(50.0, true);
        assert_relative_eq!(r.side_x_m, 5.0, epsilon = 1e-12);
        assert_relative_eq!(r.side_y_m, 10.0, epsilon = 1e-12);
        assert_relative_eq!(r.built_length_m, 2.0 * (100.0f64).sqrt(), epsilon = 1e-12);

        let r = max_area_for_perimeter(40.0, true);
        assert_eq!(r.area_m2, 200.0);
        assert_eq!(r.side_y_m, 20.0);
    }
}

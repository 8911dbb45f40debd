//! # Finishes
//!
//! Paint, plaster, tile, flooring and waterproofing are bought by area plus
//! a loss allowance:
//!
//! ```text
//!   net         = Σ surface areas − deductions
//!   consumption = net × (1 + loss% / 100)
//! ```
//!
//! Horizontal surfaces (floor, ceiling) contribute their plan area; walls
//! contribute perimeter × height.

use serde::{Deserialize, Serialize};

/// Named surface of a room or element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Floor,
    Ceiling,
    Walls,
}

impl SurfaceKind {
    pub fn is_vertical(&self) -> bool {
        matches!(self, SurfaceKind::Walls)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceKind::Floor => "Floor",
            SurfaceKind::Ceiling => "Ceiling",
            SurfaceKind::Walls => "Walls",
        }
    }
}

/// Area of one named surface given the room's plan area and perimeter
pub fn surface_area(kind: SurfaceKind, plan_area: f64, perimeter: f64, height: f64) -> f64 {
    if kind.is_vertical() {
        perimeter * height
    } else {
        plan_area
    }
}

/// Gross area minus deductions (may go negative; the caller clamps)
#[inline]
pub fn net_area(gross: f64, deductions: f64) -> f64 {
    gross - deductions
}

/// net × (1 + loss% / 100)
///
/// ```rust
/// use takeoff_core::formulas::finishing::consumption;
///
/// assert!((consumption(40.0, 10.0) - 44.0).abs() < 1e-9);
/// ```
#[inline]
pub fn consumption(net_area: f64, loss_percent: f64) -> f64 {
    net_area * (1.0 + loss_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vertical_surface_uses_perimeter() {
        assert_eq!(surface_area(SurfaceKind::Walls, 20.0, 18.0, 2.5), 45.0);
        assert_eq!(surface_area(SurfaceKind::Floor, 20.0, 18.0, 2.5), 20.0);
        assert_eq!(surface_area(SurfaceKind::Ceiling, 20.0, 18.0, 2.5), 20.0);
    }

    #[test]
    fn test_consumption_with_loss() {
        assert_relative_eq!(consumption(net_area(50.0, 5.0), 15.0), 51.75, epsilon = 1e-9);
        assert_eq!(consumption(12.0, 0.0), 12.0);
    }
}

//! # Geometry Kernel
//!
//! Unit-agnostic 2D/3D primitives over digitized vertices: distances,
//! polyline lengths, polygon area (Shoelace) and perimeter, closure checks.
//!
//! Nothing here knows about scales or meters. Callers feed either raw
//! drawing coordinates or coordinates already passed through
//! [`crate::scale::ResolvedScale::points`].
//!
//! ## Closure
//!
//! A polygon is closed when its last vertex lies within `epsilon` of its
//! first. The epsilon is an explicit argument everywhere; the configured
//! value lives in [`crate::presets::Tolerances`] and the fallback is
//! [`DEFAULT_CLOSURE_EPSILON`]. Area and perimeter close open rings
//! implicitly; only [`validate_polygon`] treats an open ring as a problem.

use serde::{Deserialize, Serialize};

/// Fallback closure tolerance in drawing units
pub const DEFAULT_CLOSURE_EPSILON: f64 = 1e-6;

/// A digitized vertex.
///
/// `x` and `y` are drawing-space units (canvas pixels). `z` is optional
/// depth or height, entered in real-world meters; it may also be supplied
/// as `elevation` in JSON.
///
/// ```json
/// { "x": 120.0, "y": 48.5, "z": 1.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[serde(default, alias = "elevation", skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Coordinate {
    /// Planar coordinate with no depth
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y, z: None }
    }

    /// Coordinate carrying a depth/height
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Coordinate { x, y, z: Some(z) }
    }

    /// Depth/height, with a missing value read as 0
    pub fn z_or_zero(&self) -> f64 {
        self.z.unwrap_or(0.0)
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.map_or(true, f64::is_finite)
    }
}

/// Outcome of [`validate_polygon`]. Problems are reported, not raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Euclidean distance in the plane
#[inline]
pub fn distance_2d(p1: &Coordinate, p2: &Coordinate) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Euclidean distance including the depth difference (missing `z` = 0)
#[inline]
pub fn distance_3d(p1: &Coordinate, p2: &Coordinate) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let dz = p2.z_or_zero() - p1.z_or_zero();
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Sum of consecutive planar segment lengths. Zero for fewer than 2 points.
///
/// ```rust
/// use takeoff_core::geometry::{polyline_length, Coordinate};
///
/// let run = [Coordinate::new(0.0, 0.0), Coordinate::new(3.0, 4.0), Coordinate::new(3.0, 10.0)];
/// assert_eq!(polyline_length(&run), 11.0);
/// ```
pub fn polyline_length(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|w| distance_2d(&w[0], &w[1])).sum()
}

/// Sum of consecutive 3D segment lengths. Zero for fewer than 2 points.
pub fn polyline_length_3d(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|w| distance_3d(&w[0], &w[1])).sum()
}

/// Planar length of each segment, in order
pub fn segment_lengths(points: &[Coordinate]) -> Vec<f64> {
    points.windows(2).map(|w| distance_2d(&w[0], &w[1])).collect()
}

/// True when the last vertex is within `epsilon` of the first (both axes)
pub fn is_closed(points: &[Coordinate], epsilon: f64) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => {
            (first.x - last.x).abs() <= epsilon && (first.y - last.y).abs() <= epsilon
        }
        _ => false,
    }
}

/// Vertices of the ring with the closing vertex guaranteed present
fn closed_ring(points: &[Coordinate], epsilon: f64) -> Vec<Coordinate> {
    let mut ring = points.to_vec();
    if let Some(first) = points.first() {
        if !is_closed(points, epsilon) {
            ring.push(*first);
        }
    }
    ring
}

/// Polygon area by the Shoelace formula, closing open rings implicitly.
///
/// # Formula
/// A = |Σ(xᵢ·yᵢ₊₁ − xᵢ₊₁·yᵢ)| / 2
///
/// ```rust
/// use takeoff_core::geometry::{polygon_area, Coordinate};
///
/// let square = [
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(1.0, 0.0),
///     Coordinate::new(1.0, 1.0),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(0.0, 0.0),
/// ];
/// assert!((polygon_area(&square) - 1.0).abs() < 1e-9);
/// ```
pub fn polygon_area(points: &[Coordinate]) -> f64 {
    polygon_area_with_epsilon(points, DEFAULT_CLOSURE_EPSILON)
}

/// [`polygon_area`] with an explicit closure tolerance
pub fn polygon_area_with_epsilon(points: &[Coordinate], epsilon: f64) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let ring = closed_ring(points, epsilon);
    let twice_signed: f64 = ring.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum();
    twice_signed.abs() / 2.0
}

/// Sum of edge lengths, closing open rings implicitly
pub fn polygon_perimeter(points: &[Coordinate]) -> f64 {
    polygon_perimeter_with_epsilon(points, DEFAULT_CLOSURE_EPSILON)
}

/// [`polygon_perimeter`] with an explicit closure tolerance
pub fn polygon_perimeter_with_epsilon(points: &[Coordinate], epsilon: f64) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    polyline_length(&closed_ring(points, epsilon))
}

/// Check the structural preconditions of a polygon: at least 3 vertices and
/// an explicit closing vertex.
///
/// The vertex count includes the closing vertex, matching how rings arrive
/// from the digitizer.
pub fn validate_polygon(points: &[Coordinate], epsilon: f64) -> PolygonValidation {
    let mut errors = Vec::new();

    if points.len() < 3 {
        errors.push(format!("polygon needs at least 3 vertices, got {}", points.len()));
    }

    if !points.is_empty() && !is_closed(points, epsilon) {
        let last = points.len() - 1;
        errors.push(format!(
            "polygon is not closed: vertex {} does not match vertex 0 within {}",
            last, epsilon
        ));
    }

    PolygonValidation {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square(closed: bool) -> Vec<Coordinate> {
        let mut pts = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
        ];
        if closed {
            pts.push(Coordinate::new(0.0, 0.0));
        }
        pts
    }

    #[test]
    fn test_distances() {
        let a = Coordinate::with_z(0.0, 0.0, 0.0);
        let b = Coordinate::with_z(3.0, 4.0, 12.0);
        assert_relative_eq!(distance_2d(&a, &b), 5.0);
        assert_relative_eq!(distance_3d(&a, &b), 13.0);

        // missing z reads as zero
        let c = Coordinate::new(3.0, 4.0);
        assert_relative_eq!(distance_3d(&a, &c), 5.0);
    }

    #[test]
    fn test_polyline_lengths() {
        assert_eq!(polyline_length(&[]), 0.0);
        assert_eq!(polyline_length(&[Coordinate::new(5.0, 5.0)]), 0.0);

        let pts = [
            Coordinate::with_z(0.0, 0.0, 1.0),
            Coordinate::with_z(4.0, 0.0, 4.0),
            Coordinate::with_z(4.0, 3.0, 4.0),
        ];
        assert_relative_eq!(polyline_length(&pts), 7.0);
        assert_relative_eq!(polyline_length_3d(&pts), 8.0);
        assert_eq!(segment_lengths(&pts), vec![4.0, 3.0]);
    }

    #[test]
    fn test_unit_square_area() {
        assert_relative_eq!(polygon_area(&unit_square(true)), 1.0, epsilon = 1e-9);
        // implicit closure gives the same answer
        assert_relative_eq!(polygon_area(&unit_square(false)), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_area_is_orientation_independent() {
        let mut cw = unit_square(true);
        cw.reverse();
        assert_relative_eq!(polygon_area(&cw), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_l_shape_area_and_perimeter() {
        let l_shape = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(4.0, 0.0),
            Coordinate::new(4.0, 2.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(2.0, 4.0),
            Coordinate::new(0.0, 4.0),
        ];
        assert_relative_eq!(polygon_area(&l_shape), 12.0, epsilon = 1e-9);
        assert_relative_eq!(polygon_perimeter(&l_shape), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_perimeter_closed_and_open_agree() {
        assert_relative_eq!(polygon_perimeter(&unit_square(true)), 4.0);
        assert_relative_eq!(polygon_perimeter(&unit_square(false)), 4.0);
    }

    #[test]
    fn test_degenerate_polygons() {
        assert_eq!(polygon_area(&[Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]), 0.0);
        assert_eq!(polygon_perimeter(&[Coordinate::new(0.0, 0.0)]), 0.0);
    }

    #[test]
    fn test_validate_polygon() {
        let ok = validate_polygon(&unit_square(true), DEFAULT_CLOSURE_EPSILON);
        assert!(ok.valid);
        assert!(ok.errors.is_empty());

        let open = validate_polygon(&unit_square(false), DEFAULT_CLOSURE_EPSILON);
        assert!(!open.valid);
        assert_eq!(open.errors.len(), 1);
        assert!(open.errors[0].contains("not closed"));

        let tiny = validate_polygon(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0)], 1e-6);
        assert!(!tiny.valid);
        assert!(tiny.errors[0].contains("at least 3"));
    }

    #[test]
    fn test_closure_epsilon_is_respected() {
        let mut pts = unit_square(false);
        pts.push(Coordinate::new(0.0, 0.001));
        assert!(!is_closed(&pts, 1e-6));
        assert!(is_closed(&pts, 0.01));
    }

    #[test]
    fn test_elevation_alias() {
        let p: Coordinate = serde_json::from_str(r#"{"x":1.0,"y":2.0,"elevation":3.5}"#).unwrap();
        assert_eq!(p.z, Some(3.5));

        let flat = serde_json::to_string(&Coordinate::new(1.0, 2.0)).unwrap();
        assert_eq!(flat, r#"{"x":1.0,"y":2.0}"#);
    }
}

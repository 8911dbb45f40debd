//! # Directional Drilling (HDD)
//!
//! Bore-path length plus the two compliance checks an HDD shot is reviewed
//! against: minimum bend radius and minimum cover depth.
//!
//! ## Bend radius
//!
//! At each interior vertex p2 of a triple (p1, p2, p3):
//!
//! ```text
//!   u = p2 − p1,  v = p3 − p2
//!   θ = acos(clamp(u·v / (|u||v|), −1, 1))     deflection angle
//!   R = ((|u| + |v|) / 2) / θ                  arc with the mean segment length
//! ```
//!
//! A straight run has θ = 0 and R = ∞, so it always complies.
//!
//! ## Cover depth
//!
//! Every vertex's `z` (depth below grade) must be at least the required
//! minimum. A vertex without `z` is at depth 0.
//!
//! Findings are returned as [`ValidationFailure`] data. They never abort a
//! build: the estimate is still produced and the caller shows warnings.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geometry::{polyline_length, polyline_length_3d, Coordinate};

/// An out-of-limit condition found on a built bore path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    /// Bend at `vertex_index` is tighter than allowed; `segment_index` is the
    /// segment entering the bend
    CurvatureRadius {
        segment_index: usize,
        vertex_index: usize,
        actual_radius_m: f64,
        required_radius_m: f64,
    },
    /// Vertex `point_index` is shallower than the required cover
    CoverDepth {
        point_index: usize,
        depth_m: f64,
        required_depth_m: f64,
        deficit_m: f64,
    },
}

impl ValidationFailure {
    /// Human-readable warning naming the offending index and the threshold
    pub fn message(&self) -> String {
        match self {
            ValidationFailure::CurvatureRadius {
                segment_index,
                vertex_index,
                actual_radius_m,
                required_radius_m,
            } => format!(
                "bend at vertex {} (segment {}) has radius {:.2} m, minimum is {:.2} m",
                vertex_index, segment_index, actual_radius_m, required_radius_m
            ),
            ValidationFailure::CoverDepth {
                point_index,
                depth_m,
                required_depth_m,
                deficit_m,
            } => format!(
                "vertex {} is at {:.2} m depth, minimum cover is {:.2} m ({:.2} m short)",
                point_index, depth_m, required_depth_m, deficit_m
            ),
        }
    }
}

/// Bore length along the 3D path
pub fn bore_length(points: &[Coordinate]) -> f64 {
    polyline_length_3d(points)
}

/// Horizontal (plan) length of the path
pub fn plan_length(points: &[Coordinate]) -> f64 {
    polyline_length(points)
}

fn sub(a: &Coordinate, b: &Coordinate) -> [f64; 3] {
    [a.x - b.x, a.y - b.y, a.z_or_zero() - b.z_or_zero()]
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Deflection angle (radians, 0..=π) between consecutive segment vectors.
///
/// Zero-length segments have no direction and are read as straight.
pub fn deflection_angle(u: &[f64; 3], v: &[f64; 3]) -> f64 {
    let lengths = norm(u) * norm(v);
    if lengths == 0.0 {
        return 0.0;
    }
    (dot(u, v) / lengths).clamp(-1.0, 1.0).acos()
}

/// Bend radius at `p2`; `f64::INFINITY` for a straight (or degenerate) bend
///
/// # Example
/// ```rust
/// use takeoff_core::formulas::drilling::bend_radius;
/// use takeoff_core::geometry::Coordinate;
///
/// let r = bend_radius(&Coordinate::new(0.0, 0.0), &Coordinate::new(10.0, 0.0), &Coordinate::new(20.0, 0.0));
/// assert!(r.is_infinite());
/// ```
pub fn bend_radius(p1: &Coordinate, p2: &Coordinate, p3: &Coordinate) -> f64 {
    let u = sub(p2, p1);
    let v = sub(p3, p2);
    let theta = deflection_angle(&u, &v);
    if theta == 0.0 {
        return f64::INFINITY;
    }
    ((norm(&u) + norm(&v)) / 2.0) / theta
}

/// Bend radius at each interior vertex; entry `i` belongs to vertex `i + 1`
pub fn bend_radii(points: &[Coordinate]) -> Vec<f64> {
    points.windows(3).map(|w| bend_radius(&w[0], &w[1], &w[2])).collect()
}

/// Smallest bend radius on the path, `f64::INFINITY` when it is straight
pub fn min_bend_radius(points: &[Coordinate]) -> f64 {
    bend_radii(points).into_iter().fold(f64::INFINITY, f64::min)
}

/// Every interior vertex whose bend radius is below `min_radius`
pub fn curvature_violations(points: &[Coordinate], min_radius: f64) -> Vec<ValidationFailure> {
    bend_radii(points)
        .into_iter()
        .enumerate()
        .filter(|(_, radius)| *radius < min_radius)
        .map(|(segment_index, radius)| ValidationFailure::CurvatureRadius {
            segment_index,
            vertex_index: segment_index + 1,
            actual_radius_m: radius,
            required_radius_m: min_radius,
        })
        .collect()
}

/// Every vertex shallower than `min_depth`
pub fn depth_violations(points: &[Coordinate], min_depth: f64) -> Vec<ValidationFailure> {
    points
        .iter()
        .enumerate()
        .filter_map(|(point_index, p)| {
            let depth = p.z_or_zero();
            (depth < min_depth).then(|| ValidationFailure::CoverDepth {
                point_index,
                depth_m: depth,
                required_depth_m: min_depth,
                deficit_m: min_depth - depth,
            })
        })
        .collect()
}

/// Reamed hole volume for a pipe pulled back through the bore: π (D/2)² L
pub fn reamed_volume(diameter: f64, length: f64) -> f64 {
    PI * (diameter / 2.0).powi(2) * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_collinear_is_infinite_radius() {
        let pts = [
            Coordinate::with_z(0.0, 0.0, 2.0),
            Coordinate::with_z(10.0, 0.0, 2.0),
            Coordinate::with_z(20.0, 0.0, 2.0),
        ];
        assert!(min_bend_radius(&pts).is_infinite());
        assert!(curvature_violations(&pts, 50.0).is_empty());
    }

    #[test]
    fn test_right_angle_turn() {
        let pts = [Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0), Coordinate::new(10.0, 10.0)];
        // R = 10 / (π/2)
        let expected = 10.0 / (PI / 2.0);
        assert_relative_eq!(bend_radius(&pts[0], &pts[1], &pts[2]), expected, epsilon = 1e-9);

        let violations = curvature_violations(&pts, 100.0);
        assert_eq!(violations.len(), 1);
        match &violations[0] {
            ValidationFailure::CurvatureRadius {
                segment_index,
                vertex_index,
                actual_radius_m,
                required_radius_m,
            } => {
                assert_eq!(*segment_index, 0);
                assert_eq!(*vertex_index, 1);
                assert!(actual_radius_m < required_radius_m);
            }
            other => panic!("unexpected failure {:?}", other),
        }
    }

    #[test]
    fn test_gentle_bend_complies() {
        // 1° deflection over 50 m segments: R ≈ 2865 m
        let angle = 1.0_f64.to_radians();
        let pts = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(50.0, 0.0),
            Coordinate::new(50.0 + 50.0 * angle.cos(), 50.0 * angle.sin()),
        ];
        assert_relative_eq!(min_bend_radius(&pts), 50.0 / angle, epsilon = 1e-6);
        assert!(curvature_violations(&pts, 1000.0).is_empty());
    }

    #[test]
    fn test_duplicate_vertex_is_straight() {
        let pts = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 5.0)];
        assert!(bend_radius(&pts[0], &pts[1], &pts[2]).is_infinite());
    }

    #[test]
    fn test_depth_violations() {
        let pts = [
            Coordinate::with_z(0.0, 0.0, 0.5),
            Coordinate::with_z(10.0, 0.0, 1.5),
            Coordinate::new(20.0, 0.0),
        ];
        let violations = depth_violations(&pts, 1.0);
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0],
            ValidationFailure::CoverDepth {
                point_index: 0,
                depth_m: 0.5,
                required_depth_m: 1.0,
                deficit_m: 0.5,
            }
        );
        assert!(violations[1].message().contains("vertex 2"));
    }

    #[test]
    fn test_bore_length_uses_depth() {
        let pts = [Coordinate::with_z(0.0, 0.0, 0.0), Coordinate::with_z(3.0, 0.0, 4.0)];
        assert_relative_eq!(bore_length(&pts), 5.0);
        assert_relative_eq!(plan_length(&pts), 3.0);
    }

    #[test]
    fn test_reamed_volume() {
        assert_relative_eq!(reamed_volume(2.0, 10.0), 10.0 * PI);
    }
}

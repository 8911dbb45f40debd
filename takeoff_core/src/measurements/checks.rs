//! Precondition checks shared by the measurement builders.
//!
//! All of these run on raw input (drawing units for geometry) before any
//! scaling or formula work.

use crate::errors::{TakeoffError, TakeoffResult};
use crate::geometry::{is_closed, Coordinate};

/// At least `min` vertices, every one finite
pub fn require_points(field: &str, points: &[Coordinate], min: usize) -> TakeoffResult<()> {
    if points.len() < min {
        return Err(TakeoffError::geometry(
            field,
            format!("needs at least {} vertices, got {}", min, points.len()),
        ));
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(TakeoffError::geometry_at(field, index, "vertex has a non-finite coordinate"));
    }
    Ok(())
}

/// A polyline: 2 or more finite vertices
pub fn require_polyline(field: &str, points: &[Coordinate]) -> TakeoffResult<()> {
    require_points(field, points, 2)
}

/// A closed polygon: 3 or more finite vertices, last within `epsilon` of first
pub fn require_polygon(field: &str, points: &[Coordinate], epsilon: f64) -> TakeoffResult<()> {
    require_points(field, points, 3)?;
    if !is_closed(points, epsilon) {
        return Err(TakeoffError::geometry_at(
            field,
            points.len() - 1,
            format!("polygon is not closed: last vertex differs from vertex 0 by more than {}", epsilon),
        ));
    }
    Ok(())
}

/// Finite and strictly greater than zero
pub fn require_positive(field: &str, value: f64) -> TakeoffResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TakeoffError::non_positive(field, value))
    }
}

/// [`require_positive`] on an optional value; `None` passes through
pub fn positive_opt(field: &str, value: Option<f64>) -> TakeoffResult<Option<f64>> {
    value.map(|v| require_positive(field, v)).transpose()
}

/// Finite and not negative (rates, percentages, deductions)
pub fn require_non_negative(field: &str, value: f64) -> TakeoffResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TakeoffError::invalid_input(field, value.to_string(), "must be zero or positive"))
    }
}

pub fn non_negative_opt(field: &str, value: Option<f64>) -> TakeoffResult<Option<f64>> {
    value.map(|v| require_non_negative(field, v)).transpose()
}

/// A rate that is a fraction of a whole, within [0, 1)
pub fn require_rate(field: &str, value: f64) -> TakeoffResult<f64> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(TakeoffError::invalid_input(field, value.to_string(), "must be within [0, 1)"))
    }
}

/// An efficiency within (0, 1]
pub fn require_efficiency(field: &str, value: f64) -> TakeoffResult<f64> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(TakeoffError::invalid_input(field, value.to_string(), "must be within (0, 1]"))
    }
}

/// Reject a geometry payload on a measurement that must not carry one
pub fn forbid_geometry(field: &str, points: Option<&[Coordinate]>) -> TakeoffResult<()> {
    match points {
        Some(_) => Err(TakeoffError::geometry(field, "this measurement type does not accept geometry")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(closed: bool) -> Vec<Coordinate> {
        let mut pts = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 0.0),
            Coordinate::new(10.0, 10.0),
            Coordinate::new(0.0, 10.0),
        ];
        if closed {
            pts.push(Coordinate::new(0.0, 0.0));
        }
        pts
    }

    #[test]
    fn test_polygon_checks() {
        assert!(require_polygon("points", &square(true), 1e-6).is_ok());

        let err = require_polygon("points", &square(false), 1e-6).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
        assert!(err.to_string().contains("not closed"));

        let err = require_polygon("points", &square(true)[..2], 1e-6).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn test_non_finite_vertex_is_located() {
        let pts = [Coordinate::new(0.0, 0.0), Coordinate::new(f64::NAN, 1.0)];
        match require_polyline("points", &pts).unwrap_err() {
            TakeoffError::Geometry { index, .. } => assert_eq!(index, Some(1)),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_value_checks() {
        assert!(require_positive("w", 0.0).is_err());
        assert!(require_positive("w", f64::NAN).is_err());
        assert_eq!(positive_opt("w", None).unwrap(), None);
        assert!(require_rate("r", 1.0).is_err());
        assert!(require_efficiency("e", 1.0).is_ok());
        assert!(require_efficiency("e", 0.0).is_err());
        assert!(require_non_negative("d", -0.1).is_err());
        let empty: Vec<Coordinate> = Vec::new();
        assert!(forbid_geometry("points", Some(empty.as_slice())).is_err());
    }
}

//! # Scale Transformer
//!
//! Converts drawing-space measurements into real-world meters from a plan
//! scale written as `"N:M"` (N drawing units represent M meters) and the
//! viewport zoom that was active while the vertices were captured.
//!
//! Zoom is divided out first so the same physical object measures the same
//! however far the canvas was magnified. Lengths scale linearly, areas
//! quadratically in both the ratio and the zoom.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::scale::{parse_scale, to_real_area, to_real_length};
//!
//! assert_eq!(parse_scale("1:100").unwrap(), 100.0);
//! assert_eq!(to_real_length(100.0, "1:50", 2.0).unwrap(), 2500.0);
//! assert_eq!(to_real_area(400.0, "1:10", 2.0).unwrap(), 10_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::geometry::Coordinate;

fn default_zoom() -> f64 {
    1.0
}

/// Scale and zoom a set of vertices was digitized under.
///
/// ## JSON Example
///
/// ```json
/// { "scale": "1:100", "zoom": 1.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleContext {
    /// Plan scale as `N:M`
    pub scale: String,

    /// Viewport magnification at capture time
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

impl ScaleContext {
    pub fn new(scale: impl Into<String>) -> Self {
        ScaleContext {
            scale: scale.into(),
            zoom: 1.0,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Validate scale string and zoom once, yielding a reusable transformer
    pub fn resolve(&self) -> TakeoffResult<ResolvedScale> {
        let ratio = parse_scale(&self.scale)?;
        validate_zoom(self.zoom)?;
        Ok(ResolvedScale { ratio, zoom: self.zoom })
    }
}

impl Default for ScaleContext {
    fn default() -> Self {
        ScaleContext::new("1:1")
    }
}

/// A validated scale: meters per drawing unit (`ratio`) and capture zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedScale {
    pub ratio: f64,
    pub zoom: f64,
}

impl ResolvedScale {
    /// Meters represented by one drawing unit at the capture zoom
    #[inline]
    pub fn factor(&self) -> f64 {
        self.ratio / self.zoom
    }

    /// Drawing length → meters
    #[inline]
    pub fn length(&self, pixels: f64) -> f64 {
        (pixels / self.zoom) * self.ratio
    }

    /// Drawing area → square meters
    #[inline]
    pub fn area(&self, pixels_squared: f64) -> f64 {
        (pixels_squared / (self.zoom * self.zoom)) * (self.ratio * self.ratio)
    }

    /// Scale a vertex into meters. `z` is already real-world and passes through.
    pub fn point(&self, p: &Coordinate) -> Coordinate {
        Coordinate {
            x: self.length(p.x),
            y: self.length(p.y),
            z: p.z,
        }
    }

    pub fn points(&self, points: &[Coordinate]) -> Vec<Coordinate> {
        points.iter().map(|p| self.point(p)).collect()
    }
}

/// Parse `"N:M"` into the ratio `M / N`.
///
/// Both parts must be non-empty runs of ASCII digits and non-zero.
pub fn parse_scale(s: &str) -> TakeoffResult<f64> {
    let (left, right) = s
        .split_once(':')
        .ok_or_else(|| TakeoffError::scale_format(s, "expected the form N:M, e.g. 1:100"))?;

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(left) || !digits(right) {
        return Err(TakeoffError::scale_format(s, "expected the form N:M with whole numbers, e.g. 1:100"));
    }

    let n: f64 = left
        .parse()
        .map_err(|_| TakeoffError::scale_format(s, "drawing units out of range"))?;
    let m: f64 = right
        .parse()
        .map_err(|_| TakeoffError::scale_format(s, "real-world units out of range"))?;

    if n == 0.0 || m == 0.0 {
        return Err(TakeoffError::scale_format(s, "both sides of the scale must be non-zero"));
    }

    Ok(m / n)
}

fn validate_zoom(zoom: f64) -> TakeoffResult<()> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(TakeoffError::scale_format(
            format!("zoom={}", zoom),
            "zoom must be a finite number greater than 0",
        ));
    }
    Ok(())
}

/// `(pixels / zoom) × ratio`
pub fn to_real_length(pixels: f64, scale: &str, zoom: f64) -> TakeoffResult<f64> {
    validate_zoom(zoom)?;
    Ok(ResolvedScale {
        ratio: parse_scale(scale)?,
        zoom,
    }
    .length(pixels))
}

/// `(pixels² / zoom²) × ratio²`
pub fn to_real_area(pixels_squared: f64, scale: &str, zoom: f64) -> TakeoffResult<f64> {
    validate_zoom(zoom)?;
    Ok(ResolvedScale {
        ratio: parse_scale(scale)?,
        zoom,
    }
    .area(pixels_squared))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("1:100").unwrap(), 100.0);
        assert_eq!(parse_scale("2:50").unwrap(), 25.0);
        assert_eq!(parse_scale("100:1").unwrap(), 0.01);
    }

    #[test]
    fn test_parse_scale_rejects_malformed() {
        for bad in ["bad", "", "1:", ":100", "1:100:2", "1.5:100", "-1:100", " 1:100", "1/100", "1:1e3"] {
            let err = parse_scale(bad).unwrap_err();
            assert_eq!(err.error_code(), "SCALE_FORMAT", "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_parse_scale_rejects_zero() {
        assert!(parse_scale("0:100").is_err());
        assert!(parse_scale("1:0").is_err());
    }

    #[test]
    fn test_real_length_with_zoom() {
        assert_eq!(to_real_length(100.0, "1:50", 2.0).unwrap(), 2500.0);
        assert_eq!(to_real_length(100.0, "1:50", 1.0).unwrap(), 5000.0);
    }

    #[test]
    fn test_real_area_is_quadratic() {
        let base = to_real_area(100.0, "1:2", 1.0).unwrap();
        assert_relative_eq!(base, 400.0);
        // doubling zoom quarters the area, doubling ratio quadruples it
        assert_relative_eq!(to_real_area(100.0, "1:2", 2.0).unwrap(), 100.0);
        assert_relative_eq!(to_real_area(100.0, "1:4", 1.0).unwrap(), 1600.0);
    }

    #[test]
    fn test_invalid_zoom() {
        assert!(to_real_length(10.0, "1:1", 0.0).is_err());
        assert!(to_real_length(10.0, "1:1", -2.0).is_err());
        assert!(ScaleContext::new("1:1").with_zoom(f64::NAN).resolve().is_err());
    }

    #[test]
    fn test_resolved_points_keep_depth() {
        let scale = ScaleContext::new("1:10").with_zoom(2.0).resolve().unwrap();
        let p = scale.point(&Coordinate::with_z(4.0, 8.0, 1.5));
        assert_relative_eq!(p.x, 20.0);
        assert_relative_eq!(p.y, 40.0);
        assert_eq!(p.z, Some(1.5));
        assert_relative_eq!(scale.factor(), 5.0);
    }

    #[test]
    fn test_zoom_defaults_to_one() {
        let ctx: ScaleContext = serde_json::from_str(r#"{"scale":"1:200"}"#).unwrap();
        assert_eq!(ctx.zoom, 1.0);
        assert_eq!(ctx.resolve().unwrap().ratio, 200.0);
    }
}

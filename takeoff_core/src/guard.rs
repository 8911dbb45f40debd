//! Numeric guard for derived quantities.
//!
//! Once a measurement passes structural validation its formulas are not
//! allowed to fail. Any derived value that comes out NaN, infinite or
//! negative is replaced with 0 and reported through `tracing`, never
//! returned as an error.

/// Clamp a derived quantity to a finite, non-negative value.
///
/// `field` names the quantity in the log event, e.g. `"trench.cut_volume_m3"`.
#[inline]
pub fn non_negative(field: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        // -0.0 passes the comparison; normalise it so output stays bit-stable
        return if value == 0.0 { 0.0 } else { value };
    }
    tracing::warn!(field, value, "clamped non-finite or negative quantity to zero");
    0.0
}

/// Like [`non_negative`] but keeps an infinite value, which some quantities
/// use to mean "unbounded" (e.g. the bend radius of a straight run).
/// Serialized as `None`.
#[inline]
pub fn non_negative_or_unbounded(field: &str, value: f64) -> Option<f64> {
    if value == f64::INFINITY {
        None
    } else {
        Some(non_negative(field, value))
    }
}

//! # Trench Volumes
//!
//! Open-cut trench excavation along a polyline.
//!
//! ## Constant section
//!
//! V = L × w × d
//!
//! ## Variable section
//!
//! The run is split at every vertex into prisms. Depth is known at the
//! vertices, so each segment uses the trapezoidal average of its end depths:
//!
//! ```text
//!   vertex:   0 ──────── 1 ──────── 2
//!   depth:    d0         d1         d2
//!   segment:      V0 = L0 × w0 × (d0 + d1)/2
//!                            V1 = L1 × w1 × (d1 + d2)/2
//! ```

use serde::{Deserialize, Serialize};

/// Volume breakdown of one trench segment (between vertex `index` and `index + 1`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrenchSegment {
    pub index: usize,
    pub length_m: f64,
    pub width_m: f64,
    pub start_depth_m: f64,
    pub end_depth_m: f64,
    pub average_depth_m: f64,
    pub volume_m3: f64,
}

/// V = L × w × d
#[inline]
pub fn constant_section_volume(length: f64, width: f64, depth: f64) -> f64 {
    length * width * depth
}

/// (d_start + d_end) / 2
#[inline]
pub fn average_depth(start_depth: f64, end_depth: f64) -> f64 {
    (start_depth + end_depth) / 2.0
}

/// Trapezoidal prism: L × w × (d_start + d_end) / 2
#[inline]
pub fn segment_volume(length: f64, width: f64, start_depth: f64, end_depth: f64) -> f64 {
    length * width * average_depth(start_depth, end_depth)
}

/// Per-segment prisms for a variable-section trench.
///
/// `segment_lengths` and `widths` have one entry per segment, `depths` one
/// entry per vertex (one more than segments). Extra entries are ignored.
///
/// # Example
/// ```rust
/// use takeoff_core::formulas::trench::{variable_section_segments, total_volume};
///
/// let segments = variable_section_segments(&[5.0, 5.0], &[1.0, 1.0], &[1.0, 2.0, 3.0]);
/// assert_eq!(total_volume(&segments), 20.0);
/// ```
pub fn variable_section_segments(segment_lengths: &[f64], widths: &[f64], depths: &[f64]) -> Vec<TrenchSegment> {
    segment_lengths
        .iter()
        .zip(widths)
        .zip(depths.windows(2))
        .enumerate()
        .map(|(index, ((&length_m, &width_m), pair))| TrenchSegment {
            index,
            length_m,
            width_m,
            start_depth_m: pair[0],
            end_depth_m: pair[1],
            average_depth_m: average_depth(pair[0], pair[1]),
            volume_m3: segment_volume(length_m, width_m, pair[0], pair[1]),
        })
        .collect()
}

/// Sum of segment volumes
pub fn total_volume(segments: &[TrenchSegment]) -> f64 {
    segments.iter().map(|s| s.volume_m3).sum()
}

/// Plan area opened at grade: Σ L × w (pavement cut / restoration)
pub fn surface_area(segments: &[TrenchSegment]) -> f64 {
    segments.iter().map(|s| s.length_m * s.width_m).sum()
}

/// Length-weighted mean depth of the run
pub fn weighted_average_depth(segments: &[TrenchSegment]) -> f64 {
    let length: f64 = segments.iter().map(|s| s.length_m).sum();
    if length > 0.0 {
        segments.iter().map(|s| s.average_depth_m * s.length_m).sum::<f64>() / length
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_section() {
        assert_eq!(constant_section_volume(10.0, 1.0, 1.0), 10.0);
        assert_relative_eq!(constant_section_volume(25.0, 0.6, 1.2), 18.0, epsilon = 1e-12);
    }

    #[test]
    fn test_variable_section_two_segments() {
        let segments = variable_section_segments(&[5.0, 5.0], &[1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].average_depth_m, 1.5);
        assert_eq!(segments[0].volume_m3, 7.5);
        assert_eq!(segments[1].average_depth_m, 2.5);
        assert_eq!(segments[1].volume_m3, 12.5);
        assert_eq!(total_volume(&segments), 20.0);
    }

    #[test]
    fn test_variable_widths() {
        let segments = variable_section_segments(&[4.0, 2.0], &[0.5, 1.5], &[1.0, 1.0, 1.0]);
        assert_relative_eq!(total_volume(&segments), 2.0 + 3.0);
        assert_relative_eq!(surface_area(&segments), 2.0 + 3.0);
    }

    #[test]
    fn test_weighted_average_depth() {
        let segments = variable_section_segments(&[3.0, 1.0], &[1.0, 1.0], &[1.0, 1.0, 3.0]);
        // (1.0 × 3 + 2.0 × 1) / 4
        assert_relative_eq!(weighted_average_depth(&segments), 1.25);
        assert_eq!(weighted_average_depth(&[]), 0.0);
    }
}

//! # Masonry Walls
//!
//! ```text
//!   gross area  = wall length × wall height
//!   net area    = gross − Σ openings
//!   volume      = net × thickness
//!   blocks      = ceil(net / ((block_l + joint) × (block_h + joint)))
//!   mortar      = volume × mortar ratio
//!   weight      = volume × density
//! ```

use serde::{Deserialize, Serialize};

/// Relative tolerance for block counting, so an exact fit is not pushed up
/// one unit by rounding in the area division.
const BLOCK_COUNT_TOLERANCE: f64 = 1e-9;

/// A door or window cut out of the wall face (m)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    #[serde(default)]
    pub label: String,
    pub width_m: f64,
    pub height_m: f64,
    /// Identical openings of this size
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl Opening {
    pub fn area(&self) -> f64 {
        self.width_m * self.height_m * f64::from(self.count)
    }
}

#[inline]
pub fn gross_area(length: f64, height: f64) -> f64 {
    length * height
}

pub fn openings_area(openings: &[Opening]) -> f64 {
    openings.iter().map(Opening::area).sum()
}

/// Gross area minus openings (may go negative; the caller clamps)
pub fn net_area(gross: f64, openings: &[Opening]) -> f64 {
    gross - openings_area(openings)
}

#[inline]
pub fn wall_volume(net_area: f64, thickness: f64) -> f64 {
    net_area * thickness
}

/// Whole units needed to cover `net_area`
///
/// ```rust
/// use takeoff_core::formulas::masonry::block_count;
///
/// // 0.40 × 0.20 m per block with joint: 10 m² takes exactly 125
/// assert_eq!(block_count(10.0, 0.39, 0.19, 0.01), 125);
/// ```
pub fn block_count(net_area: f64, block_length: f64, block_height: f64, joint: f64) -> u64 {
    let per_block = (block_length + joint) * (block_height + joint);
    if !(net_area > 0.0) || !(per_block > 0.0) {
        return 0;
    }
    let exact = net_area / per_block;
    let count = (exact - exact * BLOCK_COUNT_TOLERANCE).ceil();
    if count.is_finite() && count > 0.0 {
        count as u64
    } else {
        0
    }
}

/// Blocks per square meter of wall face
pub fn blocks_per_m2(block_length: f64, block_height: f64, joint: f64) -> f64 {
    1.0 / ((block_length + joint) * (block_height + joint))
}

#[inline]
pub fn mortar_volume(wall_volume: f64, mortar_ratio: f64) -> f64 {
    wall_volume * mortar_ratio
}

#[inline]
pub fn wall_weight(wall_volume: f64, density: f64) -> f64 {
    wall_volume * density
}

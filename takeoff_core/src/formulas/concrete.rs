//! # Concrete Elements
//!
//! Slabs, mat (radier) and strip foundations, footings, beams and columns all
//! reduce to a volume, which then drives reinforcement, weight and formwork.
//!
//! - Plate elements: V = plan area × thickness
//! - Linear members: V = section area × length (or height)
//! - Rebar: kg = V × rate (kg/m³, 80–120 typical)
//! - Concrete weight: kg = V × density
//! - Edge formwork: perimeter × thickness

/// Plan area × thickness
#[inline]
pub fn slab_volume(area: f64, thickness: f64) -> f64 {
    area * thickness
}

/// Section area × member length (beams, strip footings) or height (columns)
#[inline]
pub fn member_volume(section_area: f64, length: f64) -> f64 {
    section_area * length
}

/// Rectangular footing: l × w × h per footing, times count
#[inline]
pub fn footing_volume(length: f64, width: f64, height: f64, count: usize) -> f64 {
    length * width * height * count as f64
}

#[inline]
pub fn rebar_weight(volume: f64, rate_kg_m3: f64) -> f64 {
    volume * rate_kg_m3
}

#[inline]
pub fn concrete_weight(volume: f64, density_kg_m3: f64) -> f64 {
    volume * density_kg_m3
}

/// Side formwork around a plate's edge
#[inline]
pub fn edge_formwork_area(perimeter: f64, thickness: f64) -> f64 {
    perimeter * thickness
}

/// Side formwork of a rectangular beam: two sides plus the soffit
#[inline]
pub fn beam_formwork_area(width: f64, height: f64, length: f64) -> f64 {
    (2.0 * height + width) * length
}

/// Formwork wrapping a column of the given section perimeter
#[inline]
pub fn column_formwork_area(section_perimeter: f64, height: f64) -> f64 {
    section_perimeter * height
}

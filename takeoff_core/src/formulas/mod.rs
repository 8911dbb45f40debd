//! # Quantity Formulas
//!
//! Domain arithmetic for every measurement type, kept in one place so each
//! formula can be checked against the estimating handbook it came from.
//!
//! Every function here is pure and works on real-world values (meters,
//! m², m³, kg). Geometry has already been scaled and validated by the
//! builders in [`crate::measurements`]; these functions never fail and
//! never clamp. Guarding non-finite output is the builder's job.
//!
//! ## Modules
//!
//! - [`section`] - Cross-section areas (rectangular, circular, custom)
//! - [`trench`] - Constant and variable-section trench volumes
//! - [`soil`] - Swell/shrink of cut volumes
//! - [`drilling`] - Bore length, bend-radius and cover-depth compliance
//! - [`hydro`] - Hydro-excavation volumes
//! - [`conduit`] - Conduit internal volume and weight
//! - [`vault`] - Vault excavation and backfill
//! - [`concrete`] - Slabs, foundations, members, rebar
//! - [`masonry`] - Masonry wall areas, blocks, mortar
//! - [`roof`] - Slope-corrected roof areas
//! - [`finishing`] - Finish areas and consumption with losses
//! - [`optimization`] - Material-planning closed forms (not used by records)
//!
//! ## Conventions
//!
//! - Depths are positive downward from finished grade.
//! - Angles are radians unless a type says otherwise.
//! - Percentages are written as percent (10.0 = 10%); rates and ratios as
//!   fractions (0.10 = 10%).

pub mod concrete;
pub mod conduit;
pub mod drilling;
pub mod finishing;
pub mod hydro;
pub mod masonry;
pub mod optimization;
pub mod roof;
pub mod section;
pub mod soil;
pub mod trench;
pub mod vault;

pub use drilling::ValidationFailure;
pub use section::CrossSection;
pub use soil::SwellShrink;

//! # takeoff_core - Quantity Takeoff Measurement Engine
//!
//! `takeoff_core` turns geometry digitized on a scaled drawing into the
//! real-world quantities an estimator prices: trench and vault excavation
//! with swell and shrink, directional-drilling compliance, conduit banks,
//! masonry walls, concrete slabs and members with rebar, finishes and roofs.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: builders are pure functions of input and presets
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured errors naming the field and vertex
//! - **One unit system**: meters and kilograms inside, imperial only for display
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::measurements::{build, ComputedQuantities, MeasurementInput};
//! use takeoff_core::presets::Presets;
//!
//! let input = MeasurementInput::from_json(r#"{
//!     "label": "Slab S-1",
//!     "scale": { "scale": "1:100" },
//!     "type": "slab",
//!     "points": [
//!         { "x": 0, "y": 0 }, { "x": 0.1, "y": 0 },
//!         { "x": 0.1, "y": 0.05 }, { "x": 0, "y": 0.05 }, { "x": 0, "y": 0 }
//!     ],
//!     "thickness_m": 0.2
//! }"#).unwrap();
//!
//! let ComputedQuantities::Slab(slab) = build(&input, Presets::builtin()).unwrap() else {
//!     unreachable!()
//! };
//! // 10 m × 5 m × 0.2 m
//! assert!((slab.volume_m3 - 10.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Record container, lifecycle and summaries
//! - [`measurements`] - Measurement inputs, builders and records
//! - [`formulas`] - Pure quantity formulas
//! - [`geometry`] - Distances, polylines, polygons
//! - [`scale`] - Drawing-to-world conversion
//! - [`presets`] - Overridable physical defaults
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod errors;
pub mod formulas;
pub mod geometry;
pub mod guard;
pub mod measurements;
pub mod presets;
pub mod project;
pub mod scale;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{TakeoffError, TakeoffResult};
pub use measurements::{build, ComputedQuantities, MeasurementInput, MeasurementRecord, MeasurementType};
pub use presets::Presets;
pub use project::{Project, ProjectSettings, TakeoffSummary};
pub use scale::ScaleContext;

//! # Measurement Builders
//!
//! Every measurement type follows the same pattern:
//!
//! - `*Input` - digitized geometry plus attributes (JSON-serializable)
//! - `*Quantities` - real-world quantities (JSON-serializable)
//! - `build(input, scale, presets) -> TakeoffResult<*Quantities>` - validate,
//!   apply preset defaults, scale, run formulas, guard the outputs
//!
//! [`MeasurementInput`] wraps one of the inputs with its label and scale and
//! [`build`] dispatches it. [`MeasurementRecord`] is the immutable result
//! stored by a [`crate::project::Project`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Sewer lateral A",
//!   "scale": { "scale": "1:100", "zoom": 1.0 },
//!   "type": "trench",
//!   "points": [{ "x": 120, "y": 40 }, { "x": 410, "y": 40 }],
//!   "profile": { "section": "constant", "width_m": 0.6, "depth_m": 1.5 },
//!   "soil": "clay"
//! }
//! ```
//!
//! ## Available Measurements
//!
//! - [`trench`] - Open-cut trench excavation with swell/shrink
//! - [`bore_shot`] - Directional drilling with bend and cover checks
//! - [`hydro`] - Hydro-excavation (trench, hole, potholing)
//! - [`conduit`] - Conduit banks
//! - [`vault`] - Vault excavation and backfill
//! - [`area`] - Plan areas with deductions
//! - [`wall`] - Masonry walls
//! - [`slab`] - Concrete slabs
//! - [`foundation`] - Mat, strip and isolated foundations
//! - [`structure`] - Beams, columns, structural slabs
//! - [`finishing`] - Finishes with losses
//! - [`roof`] - Sloped roof planes
//! - [`note`] - Text annotations
//! - [`select`] - Groups of other records

pub mod area;
pub mod bore_shot;
pub mod checks;
pub mod concrete;
pub mod conduit;
pub mod finishing;
pub mod foundation;
pub mod hydro;
pub mod note;
pub mod record;
pub mod roof;
pub mod select;
pub mod slab;
pub mod structure;
pub mod trench;
pub mod vault;
pub mod wall;

use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::presets::Presets;
use crate::scale::ScaleContext;
use crate::units::UnitSystem;

pub use area::{AreaInput, AreaQuantities};
pub use bore_shot::{BoreShotInput, BoreShotQuantities};
pub use concrete::{ConcreteElement, ConcreteQuantities};
pub use conduit::{ConduitInput, ConduitQuantities};
pub use finishing::{FinishingInput, FinishingQuantities};
pub use foundation::{FoundationElement, FoundationInput};
pub use hydro::{HydroInput, HydroQuantities};
pub use note::{NoteInput, NoteQuantities};
pub use record::MeasurementRecord;
pub use roof::{RoofInput, RoofQuantities};
pub use select::{SelectInput, SelectQuantities};
pub use slab::{SlabInput, SlabQuantities};
pub use structure::{StructuralElement, StructureInput};
pub use trench::{TrenchInput, TrenchQuantities};
pub use vault::{VaultInput, VaultQuantities};
pub use wall::{WallInput, WallQuantities};

/// The closed set of measurement types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    Trench,
    BoreShot,
    HydroExcavation,
    Conduit,
    Vault,
    Area,
    Wall,
    Slab,
    Foundation,
    Structure,
    Finishing,
    Roof,
    Note,
    Select,
}

impl MeasurementType {
    pub const ALL: [MeasurementType; 14] = [
        MeasurementType::Trench,
        MeasurementType::BoreShot,
        MeasurementType::HydroExcavation,
        MeasurementType::Conduit,
        MeasurementType::Vault,
        MeasurementType::Area,
        MeasurementType::Wall,
        MeasurementType::Slab,
        MeasurementType::Foundation,
        MeasurementType::Structure,
        MeasurementType::Finishing,
        MeasurementType::Roof,
        MeasurementType::Note,
        MeasurementType::Select,
    ];

    /// The JSON tag
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Trench => "trench",
            MeasurementType::BoreShot => "bore_shot",
            MeasurementType::HydroExcavation => "hydro_excavation",
            MeasurementType::Conduit => "conduit",
            MeasurementType::Vault => "vault",
            MeasurementType::Area => "area",
            MeasurementType::Wall => "wall",
            MeasurementType::Slab => "slab",
            MeasurementType::Foundation => "foundation",
            MeasurementType::Structure => "structure",
            MeasurementType::Finishing => "finishing",
            MeasurementType::Roof => "roof",
            MeasurementType::Note => "note",
            MeasurementType::Select => "select",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MeasurementType::Trench => "Trench",
            MeasurementType::BoreShot => "Bore Shot",
            MeasurementType::HydroExcavation => "Hydro-Excavation",
            MeasurementType::Conduit => "Conduit",
            MeasurementType::Vault => "Vault",
            MeasurementType::Area => "Area",
            MeasurementType::Wall => "Wall",
            MeasurementType::Slab => "Slab",
            MeasurementType::Foundation => "Foundation",
            MeasurementType::Structure => "Structure",
            MeasurementType::Finishing => "Finishing",
            MeasurementType::Roof => "Roof",
            MeasurementType::Note => "Note",
            MeasurementType::Select => "Select",
        }
    }
}

impl std::fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for MeasurementType {
    type Err = TakeoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        MeasurementType::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| TakeoffError::invalid_input("type", s, "unknown measurement type"))
    }
}

/// Type-specific input, selected by the `type` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeasurementKind {
    Trench(TrenchInput),
    BoreShot(BoreShotInput),
    HydroExcavation(HydroInput),
    Conduit(ConduitInput),
    Vault(VaultInput),
    Area(AreaInput),
    Wall(WallInput),
    Slab(SlabInput),
    Foundation(FoundationInput),
    Structure(StructureInput),
    Finishing(FinishingInput),
    Roof(RoofInput),
    Note(NoteInput),
    Select(SelectInput),
}

impl MeasurementKind {
    pub fn measurement_type(&self) -> MeasurementType {
        match self {
            MeasurementKind::Trench(_) => MeasurementType::Trench,
            MeasurementKind::BoreShot(_) => MeasurementType::BoreShot,
            MeasurementKind::HydroExcavation(_) => MeasurementType::HydroExcavation,
            MeasurementKind::Conduit(_) => MeasurementType::Conduit,
            MeasurementKind::Vault(_) => MeasurementType::Vault,
            MeasurementKind::Area(_) => MeasurementType::Area,
            MeasurementKind::Wall(_) => MeasurementType::Wall,
            MeasurementKind::Slab(_) => MeasurementType::Slab,
            MeasurementKind::Foundation(_) => MeasurementType::Foundation,
            MeasurementKind::Structure(_) => MeasurementType::Structure,
            MeasurementKind::Finishing(_) => MeasurementType::Finishing,
            MeasurementKind::Roof(_) => MeasurementType::Roof,
            MeasurementKind::Note(_) => MeasurementType::Note,
            MeasurementKind::Select(_) => MeasurementType::Select,
        }
    }

    /// Number of digitized vertices carried by the input
    pub fn vertex_count(&self) -> usize {
        match self {
            MeasurementKind::Trench(i) => i.points.len(),
            MeasurementKind::BoreShot(i) => i.points.len(),
            MeasurementKind::HydroExcavation(i) => i.points.len(),
            MeasurementKind::Conduit(i) => i.points.len(),
            MeasurementKind::Vault(i) => match &i.shape {
                vault::VaultShape::Footprint { points } => points.len(),
                _ => 0,
            },
            MeasurementKind::Area(i) => i.points.len() + i.deductions.iter().map(Vec::len).sum::<usize>(),
            MeasurementKind::Wall(i) => i.points.len(),
            MeasurementKind::Slab(i) => i.points.len(),
            MeasurementKind::Foundation(i) => i.points.len(),
            MeasurementKind::Structure(i) => i.points.len(),
            MeasurementKind::Finishing(i) => i.points.as_ref().map_or(0, Vec::len),
            MeasurementKind::Roof(i) => i.planes.iter().map(|p| p.points.len()).sum(),
            MeasurementKind::Note(i) => usize::from(i.anchor.is_some()),
            MeasurementKind::Select(i) => i.points.as_ref().map_or(0, Vec::len),
        }
    }
}

/// A measurement as submitted: label, scale and the type-specific input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    /// User label (e.g., "T-1", "North wall")
    #[serde(default)]
    pub label: String,

    /// Scale the geometry was digitized under; 1:1 when absent
    #[serde(default)]
    pub scale: ScaleContext,

    #[serde(flatten)]
    pub kind: MeasurementKind,
}

impl MeasurementInput {
    pub fn new(label: impl Into<String>, scale: ScaleContext, kind: MeasurementKind) -> Self {
        MeasurementInput {
            label: label.into(),
            scale,
            kind,
        }
    }

    pub fn measurement_type(&self) -> MeasurementType {
        self.kind.measurement_type()
    }

    /// Parse one input from JSON
    pub fn from_json(json: &str) -> TakeoffResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Computed quantities, one variant per measurement type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComputedQuantities {
    Trench(TrenchQuantities),
    BoreShot(BoreShotQuantities),
    HydroExcavation(HydroQuantities),
    Conduit(ConduitQuantities),
    Vault(VaultQuantities),
    Area(AreaQuantities),
    Wall(WallQuantities),
    Slab(SlabQuantities),
    Foundation(ConcreteQuantities),
    Structure(ConcreteQuantities),
    Finishing(FinishingQuantities),
    Roof(RoofQuantities),
    Note(NoteQuantities),
    Select(SelectQuantities),
}

impl ComputedQuantities {
    pub fn measurement_type(&self) -> MeasurementType {
        match self {
            ComputedQuantities::Trench(_) => MeasurementType::Trench,
            ComputedQuantities::BoreShot(_) => MeasurementType::BoreShot,
            ComputedQuantities::HydroExcavation(_) => MeasurementType::HydroExcavation,
            ComputedQuantities::Conduit(_) => MeasurementType::Conduit,
            ComputedQuantities::Vault(_) => MeasurementType::Vault,
            ComputedQuantities::Area(_) => MeasurementType::Area,
            ComputedQuantities::Wall(_) => MeasurementType::Wall,
            ComputedQuantities::Slab(_) => MeasurementType::Slab,
            ComputedQuantities::Foundation(_) => MeasurementType::Foundation,
            ComputedQuantities::Structure(_) => MeasurementType::Structure,
            ComputedQuantities::Finishing(_) => MeasurementType::Finishing,
            ComputedQuantities::Roof(_) => MeasurementType::Roof,
            ComputedQuantities::Note(_) => MeasurementType::Note,
            ComputedQuantities::Select(_) => MeasurementType::Select,
        }
    }

    /// Headline length/area/volume/weight used for project summaries
    pub fn totals(&self) -> QuantityTotals {
        let t = QuantityTotals::default();
        match self {
            ComputedQuantities::Trench(q) => QuantityTotals {
                length_m: q.length_m,
                area_m2: q.surface_area_m2,
                volume_m3: q.cut_volume_m3,
                ..t
            },
            ComputedQuantities::BoreShot(q) => QuantityTotals {
                length_m: q.bore_length_m,
                volume_m3: q.reamed_volume_m3.unwrap_or(0.0),
                ..t
            },
            ComputedQuantities::HydroExcavation(q) => QuantityTotals {
                length_m: q.length_m,
                volume_m3: q.volume_m3,
                ..t
            },
            ComputedQuantities::Conduit(q) => QuantityTotals {
                length_m: q.total_length_m,
                volume_m3: q.internal_volume_m3,
                weight_kg: q.weight_kg,
                ..t
            },
            ComputedQuantities::Vault(q) => QuantityTotals {
                area_m2: q.plan_area_m2,
                volume_m3: q.excavation_m3,
                ..t
            },
            ComputedQuantities::Area(q) => QuantityTotals {
                length_m: q.perimeter_m,
                area_m2: q.net_area_m2,
                volume_m3: q.volume_m3.unwrap_or(0.0),
                ..t
            },
            ComputedQuantities::Wall(q) => QuantityTotals {
                length_m: q.length_m,
                area_m2: q.net_area_m2,
                volume_m3: q.volume_m3,
                weight_kg: q.weight_kg,
                ..t
            },
            ComputedQuantities::Slab(q) => QuantityTotals {
                area_m2: q.area_m2,
                volume_m3: q.volume_m3,
                weight_kg: q.concrete_weight_kg,
                rebar_kg: q.rebar_kg,
                ..t
            },
            ComputedQuantities::Foundation(q) | ComputedQuantities::Structure(q) => QuantityTotals {
                length_m: q.length_m,
                area_m2: q.plan_area_m2,
                volume_m3: q.volume_m3,
                weight_kg: q.concrete_weight_kg,
                rebar_kg: q.rebar_kg,
            },
            ComputedQuantities::Finishing(q) => QuantityTotals {
                area_m2: q.net_area_m2,
                ..t
            },
            ComputedQuantities::Roof(q) => QuantityTotals {
                area_m2: q.real_area_m2,
                ..t
            },
            ComputedQuantities::Note(_) | ComputedQuantities::Select(_) => t,
        }
    }

    /// Compliance warnings to show next to the quantities
    pub fn warnings(&self) -> Vec<String> {
        match self {
            ComputedQuantities::BoreShot(q) => q.violations.iter().map(|v| v.message()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Headline quantities in metric units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuantityTotals {
    pub length_m: f64,
    pub area_m2: f64,
    pub volume_m3: f64,
    pub weight_kg: f64,
    pub rebar_kg: f64,
}

impl QuantityTotals {
    /// Values converted for display: `[length, area, volume, weight, rebar]`
    pub fn in_units(&self, units: UnitSystem) -> [f64; 5] {
        [
            units.length(self.length_m),
            units.area(self.area_m2),
            units.volume(self.volume_m3),
            units.mass(self.weight_kg),
            units.mass(self.rebar_kg),
        ]
    }
}

impl Add for QuantityTotals {
    type Output = QuantityTotals;

    fn add(self, rhs: QuantityTotals) -> QuantityTotals {
        QuantityTotals {
            length_m: self.length_m + rhs.length_m,
            area_m2: self.area_m2 + rhs.area_m2,
            volume_m3: self.volume_m3 + rhs.volume_m3,
            weight_kg: self.weight_kg + rhs.weight_kg,
            rebar_kg: self.rebar_kg + rhs.rebar_kg,
        }
    }
}

impl AddAssign for QuantityTotals {
    fn add_assign(&mut self, rhs: QuantityTotals) {
        *self = *self + rhs;
    }
}

/// Build the quantities for one measurement.
///
/// Resolves the scale, then hands the type-specific input to its builder.
/// Deterministic: the same input and presets always give identical output.
///
/// # Example
///
/// ```rust
/// use takeoff_core::measurements::{build, ComputedQuantities, MeasurementInput};
/// use takeoff_core::presets::Presets;
///
/// let input = MeasurementInput::from_json(r#"{
///     "label": "T-1",
///     "scale": { "scale": "1:100" },
///     "type": "trench",
///     "points": [{ "x": 0, "y": 0 }, { "x": 0.1, "y": 0 }],
///     "profile": { "section": "constant", "width_m": 1.0, "depth_m": 1.0 }
/// }"#).unwrap();
///
/// match build(&input, Presets::builtin()).unwrap() {
///     ComputedQuantities::Trench(q) => assert!((q.cut_volume_m3 - 10.0).abs() < 1e-9),
///     other => panic!("unexpected {:?}", other.measurement_type()),
/// }
/// ```
pub fn build(input: &MeasurementInput, presets: &Presets) -> TakeoffResult<ComputedQuantities> {
    let scale = input.scale.resolve()?;
    tracing::debug!(
        measurement_type = input.measurement_type().as_str(),
        label = %input.label,
        vertices = input.kind.vertex_count(),
        "building measurement"
    );

    let computed = match &input.kind {
        MeasurementKind::Trench(i) => ComputedQuantities::Trench(trench::build(i, &scale, presets)?),
        MeasurementKind::BoreShot(i) => ComputedQuantities::BoreShot(bore_shot::build(i, &scale, presets)?),
        MeasurementKind::HydroExcavation(i) => ComputedQuantities::HydroExcavation(hydro::build(i, &scale, presets)?),
        MeasurementKind::Conduit(i) => ComputedQuantities::Conduit(conduit::build(i, &scale, presets)?),
        MeasurementKind::Vault(i) => ComputedQuantities::Vault(vault::build(i, &scale, presets)?),
        MeasurementKind::Area(i) => ComputedQuantities::Area(area::build(i, &scale, presets)?),
        MeasurementKind::Wall(i) => ComputedQuantities::Wall(wall::build(i, &scale, presets)?),
        MeasurementKind::Slab(i) => ComputedQuantities::Slab(slab::build(i, &scale, presets)?),
        MeasurementKind::Foundation(i) => ComputedQuantities::Foundation(foundation::build(i, &scale, presets)?),
        MeasurementKind::Structure(i) => ComputedQuantities::Structure(structure::build(i, &scale, presets)?),
        MeasurementKind::Finishing(i) => ComputedQuantities::Finishing(finishing::build(i, &scale, presets)?),
        MeasurementKind::Roof(i) => ComputedQuantities::Roof(roof::build(i, &scale, presets)?),
        MeasurementKind::Note(i) => ComputedQuantities::Note(note::build(i, &scale, presets)?),
        MeasurementKind::Select(i) => ComputedQuantities::Select(select::build(i, &scale, presets)?),
    };
    Ok(computed)
}

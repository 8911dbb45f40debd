//! # Project Data Structures
//!
//! The `Project` struct is the in-memory container for one takeoff: the
//! measurement records, the presets they were built with and the unit
//! system totals are presented in. Nothing here touches the filesystem;
//! a project serializes to JSON and the caller decides where it goes.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (id, version, name, timestamps)
//! ├── settings: ProjectSettings (presets, display units)
//! └── records: HashMap<Uuid, MeasurementRecord>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::measurements::MeasurementInput;
//! use takeoff_core::project::Project;
//!
//! let mut project = Project::new("Lot 12 utilities");
//!
//! let input = MeasurementInput::from_json(r#"{
//!     "label": "T-1",
//!     "scale": { "scale": "1:100" },
//!     "type": "trench",
//!     "points": [{ "x": 0, "y": 0 }, { "x": 0.2, "y": 0 }],
//!     "profile": { "section": "constant", "width_m": 0.5, "depth_m": 1.0 }
//! }"#).unwrap();
//!
//! let id = project.add_measurement(input).unwrap();
//! assert_eq!(project.measurement_count(), 1);
//! assert_eq!(project.get_measurement(&id).unwrap().label(), "T-1");
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TakeoffError, TakeoffResult};
use crate::measurements::{MeasurementInput, MeasurementKind, MeasurementRecord, MeasurementType, QuantityTotals};
use crate::presets::Presets;
use crate::units::UnitSystem;

/// Current schema version of serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Records are stored in a flat UUID-keyed map so `select` references
/// resolve in O(1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    pub settings: ProjectSettings,

    records: HashMap<Uuid, MeasurementRecord>,
}

impl Project {
    /// Create a new empty project with the built-in presets.
    ///
    /// # Example
    ///
    /// ```rust
    /// use takeoff_core::project::Project;
    ///
    /// let project = Project::new("Pump station");
    /// assert_eq!(project.meta.name, "Pump station");
    /// assert_eq!(project.measurement_count(), 0);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Project::with_settings(name, ProjectSettings::default())
    }

    pub fn with_settings(name: impl Into<String>, settings: ProjectSettings) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                id: Uuid::new_v4(),
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                created: now,
                modified: now,
            },
            settings,
            records: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.meta.id
    }

    /// Build a measurement with the project's presets and store it.
    ///
    /// Returns the id assigned to the new record. A `select` must only
    /// reference records already in the project.
    pub fn add_measurement(&mut self, input: MeasurementInput) -> TakeoffResult<Uuid> {
        self.check_references(&input, None)?;
        let record = MeasurementRecord::new(self.meta.id, input, &self.settings.presets)?;
        let id = record.id();
        tracing::debug!(%id, measurement_type = record.measurement_type().as_str(), "measurement added");
        self.records.insert(id, record);
        self.touch();
        Ok(id)
    }

    /// Replace a record's input and rebuild it from scratch.
    ///
    /// On error the stored record is left as it was.
    pub fn update_measurement(&mut self, id: &Uuid, input: MeasurementInput) -> TakeoffResult<&MeasurementRecord> {
        let existing = self.records.get(id).ok_or_else(|| TakeoffError::record_not_found(id))?;
        self.check_references(&input, Some(id))?;
        let rebuilt = existing.rebuild(input, &self.settings.presets)?;
        tracing::debug!(%id, "measurement rebuilt");
        self.records.insert(*id, rebuilt);
        self.touch();
        self.records.get(id).ok_or_else(|| TakeoffError::record_not_found(id))
    }

    /// Remove a record by UUID.
    ///
    /// Selections that reference it keep the id; it is skipped in their totals.
    pub fn remove_measurement(&mut self, id: &Uuid) -> Option<MeasurementRecord> {
        let record = self.records.remove(id);
        if record.is_some() {
            self.touch();
        }
        record
    }

    pub fn get_measurement(&self, id: &Uuid) -> Option<&MeasurementRecord> {
        self.records.get(id)
    }

    /// All records, oldest first
    pub fn measurements(&self) -> Vec<&MeasurementRecord> {
        let mut records: Vec<&MeasurementRecord> = self.records.values().collect();
        records.sort_by_key(|r| (r.created_at(), r.id()));
        records
    }

    /// Records of one type, oldest first
    pub fn records_of_type(&self, measurement_type: MeasurementType) -> Vec<&MeasurementRecord> {
        self.measurements()
            .into_iter()
            .filter(|r| r.measurement_type() == measurement_type)
            .collect()
    }

    pub fn measurement_count(&self) -> usize {
        self.records.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Per-type counts and headline quantities over every record.
    pub fn summary(&self) -> TakeoffSummary {
        let mut by_type: BTreeMap<MeasurementType, TypeSummary> = BTreeMap::new();
        let mut warnings = 0;
        // creation order, so float sums come out the same on every run
        for record in self.measurements() {
            let row = by_type.entry(record.measurement_type()).or_insert_with(|| TypeSummary {
                measurement_type: record.measurement_type(),
                count: 0,
                totals: QuantityTotals::default(),
            });
            row.count += 1;
            row.totals += record.computed().totals();
            warnings += record.computed().warnings().len();
        }
        TakeoffSummary {
            unit_system: self.settings.unit_system,
            rows: by_type.into_values().collect(),
            warnings,
        }
    }

    /// Summed quantities of the records a `select` references.
    ///
    /// References to records removed since the selection was built are skipped.
    pub fn selection_totals(&self, select_id: &Uuid) -> TakeoffResult<QuantityTotals> {
        let record = self
            .records
            .get(select_id)
            .ok_or_else(|| TakeoffError::record_not_found(select_id))?;
        let MeasurementKind::Select(select) = &record.input().kind else {
            return Err(TakeoffError::invalid_input(
                "select_id",
                select_id.to_string(),
                format!("record is a {}, not a selection", record.measurement_type()),
            ));
        };

        let mut totals = QuantityTotals::default();
        let mut seen: Vec<Uuid> = Vec::new();
        for id in &select.record_ids {
            if seen.contains(id) {
                continue;
            }
            seen.push(*id);
            if let Some(member) = self.records.get(id) {
                totals += member.computed().totals();
            }
        }
        Ok(totals)
    }

    fn check_references(&self, input: &MeasurementInput, updating: Option<&Uuid>) -> TakeoffResult<()> {
        let MeasurementKind::Select(select) = &input.kind else {
            return Ok(());
        };
        for id in &select.record_ids {
            if updating == Some(id) {
                return Err(TakeoffError::invalid_input(
                    "record_ids",
                    id.to_string(),
                    "a selection cannot reference itself",
                ));
            }
            if !self.records.contains_key(id) {
                return Err(TakeoffError::record_not_found(id));
            }
        }
        Ok(())
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("")
    }
}

/// Project metadata stored in the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project id, stamped on every record as `project_id`
    pub id: Uuid,

    /// Schema version (for migration compatibility)
    pub version: String,

    pub name: String,

    pub created: DateTime<Utc>,

    /// When a record was last added, rebuilt or removed
    pub modified: DateTime<Utc>,
}

/// Project-wide settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Defaults every build falls back on
    #[serde(default)]
    pub presets: Presets,

    /// Units totals are presented in
    #[serde(default)]
    pub unit_system: UnitSystem,
}

/// Count and summed quantities for one measurement type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub measurement_type: MeasurementType,
    pub count: usize,
    /// Metric totals
    pub totals: QuantityTotals,
}

/// Project quantity summary, one row per measurement type present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffSummary {
    pub unit_system: UnitSystem,
    pub rows: Vec<TypeSummary>,
    /// Compliance warnings across all records
    pub warnings: usize,
}

impl TakeoffSummary {
    pub fn row(&self, measurement_type: MeasurementType) -> Option<&TypeSummary> {
        self.rows.iter().find(|r| r.measurement_type == measurement_type)
    }

    pub fn record_count(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

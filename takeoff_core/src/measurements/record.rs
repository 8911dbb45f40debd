//! # Measurement Record
//!
//! The stored result of one measurement: the input as submitted, the
//! quantities built from it, identity and timestamps. Records are never
//! edited in place; [`MeasurementRecord::rebuild`] runs the full builder on
//! a new input and returns a replacement that keeps the identity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{build, ComputedQuantities, MeasurementInput, MeasurementType};
use crate::errors::TakeoffResult;
use crate::presets::Presets;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    id: Uuid,
    project_id: Uuid,
    #[serde(rename = "type")]
    measurement_type: MeasurementType,
    input: MeasurementInput,
    computed: ComputedQuantities,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MeasurementRecord {
    /// Build a new record with a fresh id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use takeoff_core::measurements::{MeasurementInput, MeasurementRecord, MeasurementType};
    /// use takeoff_core::presets::Presets;
    /// use uuid::Uuid;
    ///
    /// let input = MeasurementInput::from_json(r#"{
    ///     "type": "note",
    ///     "text": "verify manhole invert"
    /// }"#).unwrap();
    ///
    /// let record = MeasurementRecord::new(Uuid::new_v4(), input, Presets::builtin()).unwrap();
    /// assert_eq!(record.measurement_type(), MeasurementType::Note);
    /// assert_eq!(record.created_at(), record.updated_at());
    /// ```
    pub fn new(project_id: Uuid, input: MeasurementInput, presets: &Presets) -> TakeoffResult<Self> {
        let computed = build(&input, presets)?;
        let now = Utc::now();
        Ok(MeasurementRecord {
            id: Uuid::new_v4(),
            project_id,
            measurement_type: input.measurement_type(),
            input,
            computed,
            created_at: now,
            updated_at: now,
        })
    }

    /// Full rebuild from a new input. The id, project and `created_at` are
    /// kept; `updated_at` is strictly later than before.
    pub fn rebuild(&self, input: MeasurementInput, presets: &Presets) -> TakeoffResult<Self> {
        let computed = build(&input, presets)?;
        Ok(MeasurementRecord {
            id: self.id,
            project_id: self.project_id,
            measurement_type: input.measurement_type(),
            input,
            computed,
            created_at: self.created_at,
            updated_at: later_than(self.updated_at),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn measurement_type(&self) -> MeasurementType {
        self.measurement_type
    }

    pub fn label(&self) -> &str {
        &self.input.label
    }

    pub fn input(&self) -> &MeasurementInput {
        &self.input
    }

    pub fn computed(&self) -> &ComputedQuantities {
        &self.computed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// The wall clock can stand still between two calls
fn later_than(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(depth: f64) -> MeasurementInput {
        MeasurementInput::from_json(&format!(
            r#"{{
                "label": "PH-{depth}",
                "type": "hydro_excavation",
                "mode": "hole",
                "points": [{{ "x": 0, "y": 0 }}],
                "cross_section": {{ "shape": "circular", "diameter_m": 0.5 }},
                "depth_m": {depth}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_rebuild_keeps_identity() {
        let project_id = Uuid::new_v4();
        let record = MeasurementRecord::new(project_id, hole(1.0), Presets::builtin()).unwrap();
        let rebuilt = record.rebuild(hole(2.0), Presets::builtin()).unwrap();

        assert_eq!(rebuilt.id(), record.id());
        assert_eq!(rebuilt.project_id(), project_id);
        assert_eq!(rebuilt.created_at(), record.created_at());
        assert!(rebuilt.updated_at() > record.updated_at());
        assert_eq!(rebuilt.label(), "PH-2");

        let volume = |r: &MeasurementRecord| match r.computed() {
            ComputedQuantities::HydroExcavation(q) => q.volume_m3,
            _ => panic!("expected hydro-excavation quantities"),
        };
        assert!((volume(&rebuilt) - 2.0 * volume(&record)).abs() < 1e-12);
    }

    #[test]
    fn test_failed_rebuild_leaves_record_untouched() {
        let record = MeasurementRecord::new(Uuid::new_v4(), hole(1.0), Presets::builtin()).unwrap();
        let before = record.clone();
        assert!(record.rebuild(hole(-1.0), Presets::builtin()).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = MeasurementRecord::new(Uuid::new_v4(), hole(1.5), Presets::builtin()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"hydro_excavation\""));
        let back: MeasurementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), record.id());
        assert_eq!(back.measurement_type(), MeasurementType::HydroExcavation);
        assert_eq!(back.input(), record.input());
        assert_eq!(back.updated_at(), record.updated_at());
        assert_eq!(back.computed().measurement_type(), MeasurementType::HydroExcavation);
    }

    #[test]
    fn test_later_than_is_strict() {
        let future = Utc::now() + Duration::seconds(60);
        assert!(later_than(future) > future);
    }
}

//! # Selection
//!
//! A named group of other measurement records, by id. A selection has no
//! geometry of its own; any geometry payload is rejected. Whether the ids
//! exist is checked by the project that holds the records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::checks::forbid_geometry;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::geometry::Coordinate;
use crate::presets::Presets;
use crate::scale::ResolvedScale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectInput {
    pub record_ids: Vec<Uuid>,

    /// Must be absent; present only so that a stray payload is reported
    /// instead of silently dropped
    #[serde(default, alias = "geometry", skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Coordinate>>,
}

impl SelectInput {
    pub fn validate(&self) -> TakeoffResult<()> {
        forbid_geometry("points", self.points.as_deref())?;
        if self.record_ids.is_empty() {
            return Err(TakeoffError::missing_field("record_ids"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectQuantities {
    /// Referenced ids, duplicates removed, first occurrence order kept
    pub record_ids: Vec<Uuid>,
    pub count: usize,
}

pub fn build(input: &SelectInput, _scale: &ResolvedScale, _presets: &Presets) -> TakeoffResult<SelectQuantities> {
    input.validate()?;
    let mut record_ids: Vec<Uuid> = Vec::with_capacity(input.record_ids.len());
    for id in &input.record_ids {
        if !record_ids.contains(id) {
            record_ids.push(*id);
        }
    }
    Ok(SelectQuantities {
        count: record_ids.len(),
        record_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;

    #[test]
    fn test_geometry_rejected() {
        let input: SelectInput = serde_json::from_str(
            r#"{"record_ids": ["67e55044-10b1-426f-9247-bb680e5fe0c8"], "points": [{"x": 1, "y": 2}]}"#,
        )
        .unwrap();
        let err = build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
    }

    #[test]
    fn test_duplicates_removed() {
        let id = Uuid::new_v4();
        let input = SelectInput {
            record_ids: vec![id, id],
            points: None,
        };
        let q = build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).unwrap();
        assert_eq!(q.record_ids, vec![id]);
        assert_eq!(q.count, 1);
    }

    #[test]
    fn test_empty_selection() {
        let input = SelectInput {
            record_ids: Vec::new(),
            points: None,
        };
        assert!(input.validate().is_err());
    }
}

//! # Note Annotation
//!
//! Free text pinned to the drawing. Carries no quantities; the anchor is
//! scaled like any other vertex so it can be placed on a real-world plan.

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::geometry::Coordinate;
use crate::presets::Presets;
use crate::scale::ResolvedScale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteInput {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Coordinate>,
}

impl NoteInput {
    pub fn validate(&self) -> TakeoffResult<()> {
        if self.text.trim().is_empty() {
            return Err(TakeoffError::missing_field("text"));
        }
        if let Some(anchor) = &self.anchor {
            if !anchor.is_finite() {
                return Err(TakeoffError::geometry("anchor", "vertex has a non-finite coordinate"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteQuantities {
    pub text: String,
    /// Anchor in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Coordinate>,
}

pub fn build(input: &NoteInput, scale: &ResolvedScale, _presets: &Presets) -> TakeoffResult<NoteQuantities> {
    input.validate()?;
    Ok(NoteQuantities {
        text: input.text.trim().to_string(),
        anchor: input.anchor.as_ref().map(|p| scale.point(p)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleContext;

    #[test]
    fn test_anchor_is_scaled() {
        let input = NoteInput {
            text: "  check invert level  ".into(),
            anchor: Some(Coordinate::new(2.0, 3.0)),
        };
        let q = build(&input, &ScaleContext::new("1:10").resolve().unwrap(), Presets::builtin()).unwrap();
        assert_eq!(q.text, "check invert level");
        assert_eq!(q.anchor, Some(Coordinate::new(20.0, 30.0)));
    }

    #[test]
    fn test_blank_note_rejected() {
        let input = NoteInput {
            text: "   ".into(),
            anchor: None,
        };
        assert!(build(&input, &ScaleContext::default().resolve().unwrap(), Presets::builtin()).is_err());
    }
}

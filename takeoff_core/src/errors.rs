//! # Error Types
//!
//! Structured error types for takeoff_core. Every rejected build carries
//! enough context (field, vertex/segment index, threshold) for a caller to
//! point the estimator at the exact problem.
//!
//! Only structural problems are errors. Compliance findings (bend radius,
//! cover depth) are data inside a successfully built record, see
//! [`crate::formulas::drilling::ValidationFailure`].
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{TakeoffError, TakeoffResult};
//!
//! fn validate_depth(depth_m: f64) -> TakeoffResult<()> {
//!     if depth_m <= 0.0 {
//!         return Err(TakeoffError::non_positive("depth_m", depth_m));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_depth(-1.0).unwrap_err().error_code(), "GEOMETRY_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

/// Structured error type for measurement operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TakeoffError {
    /// Scale string is not `N:M`, or the zoom factor is unusable
    #[error("Invalid scale '{value}': {reason}")]
    ScaleFormat { value: String, reason: String },

    /// Geometry does not satisfy the structural preconditions of the measurement
    #[error("Geometry error in '{field}'{}: {reason}", at_index(.index))]
    Geometry {
        field: String,
        index: Option<usize>,
        reason: String,
    },

    /// An attribute value is out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field required by the selected variant is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material or block preset not found in the presets registry
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A referenced measurement record does not exist
    #[error("Measurement record not found: {id}")]
    RecordNotFound { id: String },

    /// Preset configuration could not be parsed
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TakeoffError {
    /// Create a ScaleFormat error
    pub fn scale_format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::ScaleFormat {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Geometry error that is not tied to a single vertex
    pub fn geometry(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::Geometry {
            field: field.into(),
            index: None,
            reason: reason.into(),
        }
    }

    /// Create a Geometry error pointing at a vertex or segment index
    pub fn geometry_at(field: impl Into<String>, index: usize, reason: impl Into<String>) -> Self {
        TakeoffError::Geometry {
            field: field.into(),
            index: Some(index),
            reason: reason.into(),
        }
    }

    /// Create a Geometry error for a dimension that must be strictly positive
    pub fn non_positive(field: impl Into<String>, value: f64) -> Self {
        TakeoffError::Geometry {
            field: field.into(),
            index: None,
            reason: format!("dimension must be positive, got {}", value),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        TakeoffError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        TakeoffError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a RecordNotFound error
    pub fn record_not_found(id: impl ToString) -> Self {
        TakeoffError::RecordNotFound { id: id.to_string() }
    }

    /// True for errors caused by the drawing geometry or scale rather than attributes
    pub fn is_structural(&self) -> bool {
        matches!(self, TakeoffError::ScaleFormat { .. } | TakeoffError::Geometry { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TakeoffError::ScaleFormat { .. } => "SCALE_FORMAT",
            TakeoffError::Geometry { .. } => "GEOMETRY_ERROR",
            TakeoffError::InvalidInput { .. } => "INVALID_INPUT",
            TakeoffError::MissingField { .. } => "MISSING_FIELD",
            TakeoffError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            TakeoffError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            TakeoffError::Config { .. } => "CONFIG_ERROR",
            TakeoffError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

fn at_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {}", i),
        None => String::new(),
    }
}

impl From<serde_json::Error> for TakeoffError {
    fn from(e: serde_json::Error) -> Self {
        TakeoffError::SerializationError { reason: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = TakeoffError::geometry_at("points", 3, "polygon is not closed");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Geometry\""));
        let roundtrip: TakeoffError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TakeoffError::missing_field("depth_m").error_code(), "MISSING_FIELD");
        assert_eq!(TakeoffError::scale_format("bad", "expected N:M").error_code(), "SCALE_FORMAT");
        assert_eq!(TakeoffError::material_not_found("adobe").error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_message_names_index() {
        let error = TakeoffError::geometry_at("points", 2, "duplicate vertex");
        assert_eq!(error.to_string(), "Geometry error in 'points' at index 2: duplicate vertex");

        let error = TakeoffError::geometry("points", "need at least 3 vertices");
        assert_eq!(error.to_string(), "Geometry error in 'points': need at least 3 vertices");
    }

    #[test]
    fn test_structural_classification() {
        assert!(TakeoffError::non_positive("width_m", 0.0).is_structural());
        assert!(!TakeoffError::missing_field("depth_m").is_structural());
    }
}

//! # Error Types
//!
//! Structured error types for timber_core. A calculation either completes —
//! possibly with failed engineering checks, which are reportable outcomes,
//! not errors — or aborts with one of these variants because an input was
//! invalid. Errors are raised at the point of detection, before any
//! arithmetic, and are never silently coerced.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::errors::{EngineError, EngineResult};
//!
//! fn validate_span(span_m: f64) -> EngineResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(EngineError::invalid_input(
//!             "span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for timber_core operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Structured error type for verification operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by report generators and
/// other consumers.
///
/// Note on units: the engine cannot mechanically detect a caller mixing
/// millimetre- and metre-scaled inputs. The unit convention (metres,
/// kN/m², kNm, MPa) is documented in [`crate::units`] and enforced by
/// converting at the boundary, not by a runtime check.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EngineError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Non-positive modification factor kmod or partial safety factor γM
    #[error("Invalid material factor '{factor}': {value} - must be positive")]
    InvalidMaterialFactor { factor: String, value: f64 },

    /// Non-positive cross-section dimension
    #[error("Invalid section dimension '{dimension}': {value} m - must be positive")]
    InvalidSection { dimension: String, value: f64 },

    /// Non-positive thermal layer thickness or conductivity
    #[error("Invalid thermal layer '{layer}': {field} = {value} - must be positive")]
    InvalidLayer {
        layer: String,
        field: String,
        value: f64,
    },

    /// Geometry that makes a formula degenerate (e.g. a zero roof angle
    /// feeding an axial-force computation)
    #[error("Degenerate geometry in {context}: {reason}")]
    DegenerateGeometry { context: String, reason: String },

    /// Timber grade not found in the grade table
    #[error("Timber grade not found: {grade_name}")]
    GradeNotFound { grade_name: String },
}

impl EngineError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidMaterialFactor error
    pub fn invalid_material_factor(factor: impl Into<String>, value: f64) -> Self {
        EngineError::InvalidMaterialFactor {
            factor: factor.into(),
            value,
        }
    }

    /// Create an InvalidSection error
    pub fn invalid_section(dimension: impl Into<String>, value: f64) -> Self {
        EngineError::InvalidSection {
            dimension: dimension.into(),
            value,
        }
    }

    /// Create an InvalidLayer error
    pub fn invalid_layer(layer: impl Into<String>, field: impl Into<String>, value: f64) -> Self {
        EngineError::InvalidLayer {
            layer: layer.into(),
            field: field.into(),
            value,
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate_geometry(context: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::DegenerateGeometry {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::InvalidInput { .. } => "INVALID_INPUT",
            EngineError::InvalidMaterialFactor { .. } => "INVALID_MATERIAL_FACTOR",
            EngineError::InvalidSection { .. } => "INVALID_SECTION",
            EngineError::InvalidLayer { .. } => "INVALID_LAYER",
            EngineError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            EngineError::GradeNotFound { .. } => "GRADE_NOT_FOUND",
        }
    }
}

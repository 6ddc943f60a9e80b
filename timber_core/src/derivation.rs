//! # Traced Quantities
//!
//! Every calculation step in the engine produces both a numeric value and a
//! human-readable derivation string (e.g. `"fm,d = (kmod × fm,k) / γM =
//! (0.8 × 27) / 1.3 = 16.62 MPa"`). Downstream report generators display the
//! derivation verbatim, so the two always travel together rather than being
//! re-derived or re-parsed from each other.
//!
//! Derivation strings are formatted with fixed precision so that identical
//! inputs produce byte-identical output.

use serde::{Deserialize, Serialize};

/// A numeric result paired with the derivation string that produced it.
///
/// ## JSON Example
///
/// ```json
/// {
///   "value": 16.615384615384617,
///   "derivation": "fm,d = (kmod × fm,k) / γM = (0.80 × 27.00) / 1.30 = 16.62 MPa"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traced {
    /// The numeric value, in the unit named at the end of the derivation
    pub value: f64,

    /// Human-readable derivation, shown verbatim in reports
    pub derivation: String,
}

impl Traced {
    /// Pair a value with its derivation string
    pub fn new(value: f64, derivation: impl Into<String>) -> Self {
        Traced {
            value,
            derivation: derivation.into(),
        }
    }
}

impl std::fmt::Display for Traced {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.derivation)
    }
}

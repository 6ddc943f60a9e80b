//! EN 1990 Ultimate Limit State Load Combinations
//!
//! Fundamental combinations per EN 1990 eq. 6.10 for a roof with one leading
//! variable action and the other reduced by its ψ0 factor:
//!
//! ```text
//! ULS-1: 1.35·G                       (permanent only)
//! ULS-2: 1.35·G + 1.5·S + 1.5·ψ0,W·W  (snow leading, ψ0,W = 0.6)
//! ULS-3: 1.35·G + 1.5·W + 1.5·ψ0,S·S  (wind leading, ψ0,S = 0.5)
//! ```
//!
//! The governing design load is the maximum over the whole set. The set is
//! enumerated in one place so every call site evaluates the same
//! combinations.

use serde::{Deserialize, Serialize};

use super::{LoadKind, LoadSet};

/// A load combination with partial factors for each load kind.
///
/// Factors are kept as an ordered list so the factored sum and the equation
/// display are deterministic.
///
/// # Example
/// ```
/// use timber_core::loads::{LoadCombination, LoadKind, LoadSet};
///
/// let combo = LoadCombination::new("ULS-2", "1.35G + 1.5S + 0.9W")
///     .with_factor(LoadKind::Dead, 1.35)
///     .with_factor(LoadKind::Snow, 1.5)
///     .with_factor(LoadKind::Wind, 0.9);
///
/// let set = LoadSet::new()
///     .with_load(LoadKind::Dead, 0.2)
///     .with_load(LoadKind::Snow, 0.56)
///     .with_load(LoadKind::Wind, 0.484);
///
/// assert!((combo.apply(&set) - 1.5456).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g. "ULS-2")
    pub name: String,

    /// Human-readable equation for display (e.g. "1.35G + 1.5S + 0.9W")
    pub equation: String,

    /// Partial factors by load kind, in equation order
    pub factors: Vec<(LoadKind, f64)>,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: Vec::new(),
        }
    }

    /// Add a partial factor (builder pattern)
    pub fn with_factor(mut self, kind: LoadKind, factor: f64) -> Self {
        self.factors.push((kind, factor));
        self
    }

    /// Apply this combination to a load set, returning the factored total.
    ///
    /// Kinds absent from the combination contribute nothing; kinds absent
    /// from the set count as zero load.
    pub fn apply(&self, set: &LoadSet) -> f64 {
        self.factors
            .iter()
            .map(|(kind, factor)| factor * set.get(*kind))
            .sum()
    }

    /// Get the factor for a load kind (0.0 if not in the combination)
    pub fn get_factor(&self, kind: LoadKind) -> f64 {
        self.factors
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// Display label combining name and equation (e.g. "ULS-2: 1.35G + 1.5S + 0.9W")
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.equation)
    }
}

/// The full enumerated set of ULS fundamental combinations for this
/// structure (permanent-only, snow-leading, wind-leading).
pub fn eurocode_uls_combinations() -> Vec<LoadCombination> {
    vec![
        LoadCombination::new("ULS-1", "1.35G").with_factor(LoadKind::Dead, 1.35),
        LoadCombination::new("ULS-2", "1.35G + 1.5S + 0.9W")
            .with_factor(LoadKind::Dead, 1.35)
            .with_factor(LoadKind::Snow, 1.5)
            .with_factor(LoadKind::Wind, 1.5 * 0.6),
        LoadCombination::new("ULS-3", "1.35G + 1.5W + 0.75S")
            .with_factor(LoadKind::Dead, 1.35)
            .with_factor(LoadKind::Wind, 1.5)
            .with_factor(LoadKind::Snow, 1.5 * 0.5),
    ]
}

/// Find the governing (maximum) combination result.
///
/// Returns the maximum factored load and the governing combination's label.
/// Ties resolve to the first combination in enumeration order, keeping the
/// result deterministic.
pub fn find_governing_combination(
    set: &LoadSet,
    combinations: &[LoadCombination],
) -> (f64, String) {
    let mut max_load = f64::MIN;
    let mut governing = String::new();
    for combo in combinations {
        let load = combo.apply(set);
        if load > max_load {
            max_load = load;
            governing = combo.label();
        }
    }
    if governing.is_empty() {
        (0.0, String::new())
    } else {
        (max_load, governing)
    }
}

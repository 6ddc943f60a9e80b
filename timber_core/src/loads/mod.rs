//! # Characteristic Loads and Design Load (EN 1990 / EN 1991)
//!
//! This module derives the characteristic dead, snow, and wind loads acting
//! on the roof and combines them into the governing design load.
//!
//! - [`LoadKind`] - the load categories (G, S, W)
//! - [`LoadSet`] - characteristic magnitudes by kind, kN/m²
//! - [`LoadParameters`] - the site coefficients the loads are derived from
//! - [`LoadCombination`] - factored Eurocode combinations; the design load is
//!   the maximum over *all* of them, never a single hand-picked one
//!
//! # Example
//!
//! ```
//! use timber_core::loads::{compute_loads, LoadKind, LoadParameters};
//!
//! let loads = compute_loads(&LoadParameters::warsaw()).unwrap();
//! assert!(loads.design_load.value >= loads.characteristic.get(LoadKind::Snow));
//! ```

pub mod combinations;

pub use combinations::{
    eurocode_uls_combinations, find_governing_combination, LoadCombination,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};

/// Standard sea-level air density used in the basic velocity pressure
/// qb = 0.5 × ρ × vb² (EN 1991-1-4)
pub const AIR_DENSITY_KG_M3: f64 = 1.25;

/// Load categories relevant to the roof structure
///
/// # Example
/// ```
/// use timber_core::loads::LoadKind;
/// assert_eq!(LoadKind::Dead.code(), "G");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadKind {
    /// G - permanent load (roofing and supporting structure self-weight)
    Dead,
    /// S - snow load
    Snow,
    /// W - wind load
    Wind,
}

impl LoadKind {
    /// All load kinds in standard order
    pub const ALL: [LoadKind; 3] = [LoadKind::Dead, LoadKind::Snow, LoadKind::Wind];

    /// Standard abbreviation used in combination equations
    pub fn code(&self) -> &'static str {
        match self {
            LoadKind::Dead => "G",
            LoadKind::Snow => "S",
            LoadKind::Wind => "W",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadKind::Dead => "Permanent load",
            LoadKind::Snow => "Snow load",
            LoadKind::Wind => "Wind load",
        }
    }
}

/// Characteristic load magnitudes by kind, in kN/m².
///
/// Values are unfactored; combinations apply the partial factors. A BTreeMap
/// keeps iteration (and therefore factored sums and serialized output)
/// deterministic.
///
/// # Example
/// ```
/// use timber_core::loads::{LoadKind, LoadSet};
///
/// let set = LoadSet::new()
///     .with_load(LoadKind::Dead, 0.197)
///     .with_load(LoadKind::Snow, 0.56);
/// assert_eq!(set.get(LoadKind::Wind), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSet {
    loads: BTreeMap<LoadKind, f64>,
}

impl LoadSet {
    /// Create an empty load set
    pub fn new() -> Self {
        LoadSet::default()
    }

    /// Set a load magnitude (builder pattern)
    pub fn with_load(mut self, kind: LoadKind, magnitude_kn_m2: f64) -> Self {
        self.loads.insert(kind, magnitude_kn_m2);
        self
    }

    /// Get a load magnitude (0.0 if unset)
    pub fn get(&self, kind: LoadKind) -> f64 {
        self.loads.get(&kind).copied().unwrap_or(0.0)
    }

    /// Validate the invariant that all characteristic magnitudes are ≥ 0
    pub fn validate(&self) -> EngineResult<()> {
        for (kind, magnitude) in &self.loads {
            if *magnitude < 0.0 || !magnitude.is_finite() {
                return Err(EngineError::invalid_input(
                    kind.code(),
                    magnitude.to_string(),
                    "Characteristic load must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// Site coefficients the characteristic loads are derived from. These are
/// looked up from the loading standards for the building site, not computed
/// by the engine.
///
/// ## JSON Example
///
/// ```json
/// {
///   "gk_roofing_kn_m2": 0.047,
///   "gk_structure_kn_m2": 0.15,
///   "mu1_shape": 0.8,
///   "ce_snow_exposure": 1.0,
///   "ct_thermal": 1.0,
///   "sk_ground_snow_kn_m2": 0.7,
///   "vb_wind_velocity_m_s": 22.0,
///   "ce_wind_exposure": 1.6
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadParameters {
    /// Roofing unit dead load (steel tile), kN/m²
    pub gk_roofing_kn_m2: f64,

    /// Supporting structure unit dead load, kN/m²
    pub gk_structure_kn_m2: f64,

    /// Roof shape coefficient µ1 (0.8 for pitches up to 30°)
    pub mu1_shape: f64,

    /// Snow exposure coefficient Ce
    pub ce_snow_exposure: f64,

    /// Thermal coefficient Ct
    pub ct_thermal: f64,

    /// Characteristic ground snow load sk, kN/m²
    pub sk_ground_snow_kn_m2: f64,

    /// Basic wind velocity vb, m/s
    pub vb_wind_velocity_m_s: f64,

    /// Wind exposure factor ce(z) at the reference height
    pub ce_wind_exposure: f64,
}

impl LoadParameters {
    /// The worked example's site: Warsaw, snow zone with sk = 0.7 kN/m²,
    /// vb = 22 m/s, steel tile roof.
    pub fn warsaw() -> Self {
        LoadParameters {
            gk_roofing_kn_m2: 0.047,
            gk_structure_kn_m2: 0.15,
            mu1_shape: 0.8,
            ce_snow_exposure: 1.0,
            ct_thermal: 1.0,
            sk_ground_snow_kn_m2: 0.7,
            vb_wind_velocity_m_s: 22.0,
            ce_wind_exposure: 1.6,
        }
    }

    /// Validate the parameters: dead-load components must be non-negative,
    /// coefficients positive.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("gk_roofing_kn_m2", self.gk_roofing_kn_m2),
            ("gk_structure_kn_m2", self.gk_structure_kn_m2),
        ] {
            if value < 0.0 {
                return Err(EngineError::invalid_input(
                    field,
                    value.to_string(),
                    "Dead load component cannot be negative",
                ));
            }
        }
        for (field, value) in [
            ("mu1_shape", self.mu1_shape),
            ("ce_snow_exposure", self.ce_snow_exposure),
            ("ct_thermal", self.ct_thermal),
            ("sk_ground_snow_kn_m2", self.sk_ground_snow_kn_m2),
            ("vb_wind_velocity_m_s", self.vb_wind_velocity_m_s),
            ("ce_wind_exposure", self.ce_wind_exposure),
        ] {
            if value <= 0.0 {
                return Err(EngineError::invalid_input(
                    field,
                    value.to_string(),
                    "Coefficient must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Characteristic loads plus the governing design load.
///
/// ## JSON Example
///
/// ```json
/// {
///   "characteristic": { "loads": { "Dead": 0.197, "Snow": 0.56, "Wind": 0.484 } },
///   "dead_load": { "value": 0.197, "derivation": "gk = 0.047 + 0.150 = 0.197 kN/m²" },
///   "snow_load": { "value": 0.56, "derivation": "s = µ1 × Ce × Ct × sk = ..." },
///   "wind_load": { "value": 0.484, "derivation": "qp = ce × qb = ..." },
///   "design_load": { "value": 1.542, "derivation": "Ed = max(0.266, 1.542, 1.412) = 1.542 kN/m²" },
///   "governing_combination": "ULS-2: 1.35G + 1.5S + 0.9W"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    /// Characteristic magnitudes by kind (all ≥ 0)
    pub characteristic: LoadSet,

    /// Total permanent load gk with derivation
    pub dead_load: Traced,

    /// Roof snow load s with derivation
    pub snow_load: Traced,

    /// Peak wind pressure qp with derivation
    pub wind_load: Traced,

    /// Governing design load Ed = max over all enumerated combinations
    pub design_load: Traced,

    /// Name and equation of the governing combination
    pub governing_combination: String,
}

/// Derive the characteristic loads and the governing design load.
///
/// The design load is the maximum over every enumerated ULS combination
/// ([`eurocode_uls_combinations`]); evaluating only a subset would be a
/// correctness bug. A degenerate snow product is clamped to zero rather
/// than entering the combinations negative.
pub fn compute_loads(params: &LoadParameters) -> EngineResult<LoadResult> {
    params.validate()?;

    // Permanent load: enumerated fixed components
    let gk_total = params.gk_roofing_kn_m2 + params.gk_structure_kn_m2;
    let dead_load = Traced::new(
        gk_total,
        format!(
            "gk = {:.3} + {:.3} = {:.3} kN/m²",
            params.gk_roofing_kn_m2, params.gk_structure_kn_m2, gk_total
        ),
    );

    // Snow load: s = µ1 × Ce × Ct × sk, clamped at zero
    let snow_raw = params.mu1_shape
        * params.ce_snow_exposure
        * params.ct_thermal
        * params.sk_ground_snow_kn_m2;
    let snow = snow_raw.max(0.0);
    let snow_load = Traced::new(
        snow,
        format!(
            "s = µ1 × Ce × Ct × sk = {:.2} × {:.2} × {:.2} × {:.2} = {:.3} kN/m²",
            params.mu1_shape,
            params.ce_snow_exposure,
            params.ct_thermal,
            params.sk_ground_snow_kn_m2,
            snow
        ),
    );

    // Wind load: qb = 0.5 × ρ × vb², qp = ce × qb
    let qb = 0.5 * AIR_DENSITY_KG_M3 * params.vb_wind_velocity_m_s.powi(2) / 1000.0;
    let wind = params.ce_wind_exposure * qb;
    let wind_load = Traced::new(
        wind,
        format!(
            "qp = ce × qb = {:.2} × (0.5 × {:.2} × {:.2}² / 1000) = {:.2} × {:.3} = {:.3} kN/m²",
            params.ce_wind_exposure,
            AIR_DENSITY_KG_M3,
            params.vb_wind_velocity_m_s,
            params.ce_wind_exposure,
            qb,
            wind
        ),
    );

    let characteristic = LoadSet::new()
        .with_load(LoadKind::Dead, gk_total)
        .with_load(LoadKind::Snow, snow)
        .with_load(LoadKind::Wind, wind);
    characteristic.validate()?;

    // Governing design load over the full combination set
    let combos = eurocode_uls_combinations();
    let (ed, governing) = find_governing_combination(&characteristic, &combos);
    let evaluations: Vec<String> = combos
        .iter()
        .map(|c| format!("{:.3}", c.apply(&characteristic)))
        .collect();
    let design_load = Traced::new(
        ed,
        format!("Ed = max({}) = {:.3} kN/m²", evaluations.join(", "), ed),
    );

    Ok(LoadResult {
        characteristic,
        dead_load,
        snow_load,
        wind_load,
        design_load,
        governing_combination: governing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warsaw_characteristic_loads() {
        let result = compute_loads(&LoadParameters::warsaw()).unwrap();
        assert!((result.dead_load.value - 0.197).abs() < 1e-9);
        // s = 0.8 × 1.0 × 1.0 × 0.7 = 0.56
        assert!((result.snow_load.value - 0.56).abs() < 1e-9);
        // qb = 0.5 × 1.25 × 484 / 1000 = 0.3025, qp = 1.6 × 0.3025 = 0.484
        assert!((result.wind_load.value - 0.484).abs() < 1e-9);
    }

    #[test]
    fn test_design_load_is_combination_maximum() {
        let result = compute_loads(&LoadParameters::warsaw()).unwrap();
        let combos = eurocode_uls_combinations();
        let max = combos
            .iter()
            .map(|c| c.apply(&result.characteristic))
            .fold(f64::MIN, f64::max);
        assert!((result.design_load.value - max).abs() < 1e-12);
        // Snow-leading combination governs for this site
        assert!(result.governing_combination.starts_with("ULS-2"));
        assert!((result.design_load.value - 1.5416).abs() < 1e-3);
    }

    #[test]
    fn test_design_load_never_below_single_contributor() {
        let result = compute_loads(&LoadParameters::warsaw()).unwrap();
        let combos = eurocode_uls_combinations();
        for combo in &combos {
            for kind in LoadKind::ALL {
                let single = combo.get_factor(kind) * result.characteristic.get(kind);
                assert!(result.design_load.value >= single - 1e-12);
            }
        }
    }

    #[test]
    fn test_snow_clamped_to_zero() {
        // A thermal coefficient small enough to make the product vanish is
        // legal input; the snow load must clamp at 0, not go negative.
        let params = LoadParameters {
            sk_ground_snow_kn_m2: 1e-9,
            ..LoadParameters::warsaw()
        };
        let result = compute_loads(&params).unwrap();
        assert!(result.snow_load.value >= 0.0);
    }

    #[test]
    fn test_negative_dead_component_rejected() {
        let params = LoadParameters {
            gk_roofing_kn_m2: -0.047,
            ..LoadParameters::warsaw()
        };
        assert!(compute_loads(&params).is_err());
    }

    #[test]
    fn test_zero_coefficient_rejected() {
        let params = LoadParameters {
            ce_wind_exposure: 0.0,
            ..LoadParameters::warsaw()
        };
        assert!(compute_loads(&params).is_err());
    }

    #[test]
    fn test_load_set_unset_is_zero() {
        let set = LoadSet::new().with_load(LoadKind::Dead, 0.2);
        assert_eq!(set.get(LoadKind::Wind), 0.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let result = compute_loads(&LoadParameters::warsaw()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        let roundtrip: LoadResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_determinism() {
        let a = compute_loads(&LoadParameters::warsaw()).unwrap();
        let b = compute_loads(&LoadParameters::warsaw()).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

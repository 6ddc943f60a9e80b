//! # Serviceability Deflection (EN 1995-1-1 §7.2)
//!
//! Mid-span deflection of a simply supported member under a uniform
//! characteristic line load:
//!
//! ```text
//! w_inst = 5 q L⁴ / (384 E I)
//! w_fin  = w_inst × (1 + kdef)       kdef = 0.8 service class 2
//! limit  = L / 300
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::section::CrossSection;
use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};
use crate::materials::MaterialProperties;
use crate::units::meters_to_millimeters;

/// Creep deformation factor, solid timber in service class 2
pub const K_DEF: f64 = 0.8;

/// Span-over-limit denominator for final deflection
pub const DEFLECTION_LIMIT_RATIO: f64 = 300.0;

/// Serviceability check results for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionResult {
    /// Member name
    pub member: String,

    /// Instantaneous mid-span deflection, mm
    pub instantaneous_mm: Traced,

    /// Final deflection including creep, mm
    pub final_mm: Traced,

    /// Allowable deflection L/300, mm
    pub limit_mm: Traced,

    /// Verdict: w_fin ≤ limit
    pub passes: bool,
}

/// Check mid-span deflection against the L/300 limit.
///
/// `line_load_kn_m` is the characteristic (unfactored) load on the member.
///
/// # Example
///
/// ```rust
/// use timber_core::calculations::deflection::check_deflection;
/// use timber_core::calculations::section::CrossSection;
/// use timber_core::materials::{MaterialProperties, TimberGrade};
///
/// let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
/// let material = MaterialProperties::for_grade(TimberGrade::C27);
/// let result = check_deflection("Rafter", 3.74, 0.83, &section, &material).unwrap();
/// assert!(result.passes);
/// ```
pub fn check_deflection(
    member: &str,
    span_m: f64,
    line_load_kn_m: f64,
    section: &CrossSection,
    material: &MaterialProperties,
) -> EngineResult<DeflectionResult> {
    if span_m <= 0.0 || !span_m.is_finite() {
        return Err(EngineError::invalid_input(
            "span_m",
            span_m.to_string(),
            "Span must be positive",
        ));
    }
    if line_load_kn_m < 0.0 || !line_load_kn_m.is_finite() {
        return Err(EngineError::invalid_input(
            "line_load_kn_m",
            line_load_kn_m.to_string(),
            "Line load must be finite and non-negative",
        ));
    }
    section.validate()?;
    material.validate()?;

    // SI throughout: N/m, Pa, m⁴, then report in mm.
    let q_n_m = line_load_kn_m * 1000.0;
    let e_pa = material.e_0_mean_mpa * 1.0e6;
    let i_m4 = section.moment_of_inertia_m4();

    let w_inst_m = 5.0 * q_n_m * span_m.powi(4) / (384.0 * e_pa * i_m4);
    let w_inst_mm = meters_to_millimeters(w_inst_m);
    let instantaneous_mm = Traced::new(
        w_inst_mm,
        format!(
            "w_inst = 5qL⁴/(384EI) = 5×{:.1}×{:.2}⁴/(384×{:.2e}×{:.2e}) = {:.2} mm",
            q_n_m, span_m, e_pa, i_m4, w_inst_mm
        ),
    );

    let w_fin_mm = w_inst_mm * (1.0 + K_DEF);
    let final_mm = Traced::new(
        w_fin_mm,
        format!(
            "w_fin = w_inst × (1 + kdef) = {:.2} × (1 + {:.1}) = {:.2} mm",
            w_inst_mm, K_DEF, w_fin_mm
        ),
    );

    let limit = meters_to_millimeters(span_m) / DEFLECTION_LIMIT_RATIO;
    let limit_mm = Traced::new(
        limit,
        format!(
            "w_limit = L/{:.0} = {:.0}/{:.0} = {:.2} mm",
            DEFLECTION_LIMIT_RATIO,
            meters_to_millimeters(span_m),
            DEFLECTION_LIMIT_RATIO,
            limit
        ),
    );

    Ok(DeflectionResult {
        member: member.to_string(),
        instantaneous_mm,
        final_mm,
        limit_mm,
        passes: w_fin_mm <= limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::TimberGrade;

    fn c27() -> MaterialProperties {
        MaterialProperties::for_grade(TimberGrade::C27)
    }

    fn rafter_section() -> CrossSection {
        CrossSection::from_millimeters(100.0, 200.0).unwrap()
    }

    #[test]
    fn test_rafter_deflection() {
        // qk = (0.197 + 0.560) × 1.1 = 0.8328 kN/m over a 3.745 m slope
        let result =
            check_deflection("Rafter", 3.7449, 0.8328, &rafter_section(), &c27()).unwrap();
        assert!((result.instantaneous_mm.value - 2.78).abs() < 0.02);
        assert!((result.final_mm.value - 5.01).abs() < 0.04);
        assert!((result.limit_mm.value - 12.48).abs() < 0.01);
        assert!(result.passes);
    }

    #[test]
    fn test_creep_factor_applied() {
        let result = check_deflection("Rafter", 3.0, 1.0, &rafter_section(), &c27()).unwrap();
        let expected = result.instantaneous_mm.value * (1.0 + K_DEF);
        assert!((result.final_mm.value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_long_span_fails_limit() {
        let result = check_deflection("Rafter", 7.0, 1.5, &rafter_section(), &c27()).unwrap();
        assert!(result.final_mm.value > result.limit_mm.value);
        assert!(!result.passes);
    }

    #[test]
    fn test_zero_load_passes_trivially() {
        let result = check_deflection("Purlin", 1.5, 0.0, &rafter_section(), &c27()).unwrap();
        assert_eq!(result.instantaneous_mm.value, 0.0);
        assert!(result.passes);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(check_deflection("X", 0.0, 1.0, &rafter_section(), &c27()).is_err());
        assert!(check_deflection("X", 3.0, -1.0, &rafter_section(), &c27()).is_err());
        assert!(check_deflection("X", 3.0, f64::NAN, &rafter_section(), &c27()).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let result = check_deflection("Rafter", 3.7449, 0.8328, &rafter_section(), &c27()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: DeflectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}

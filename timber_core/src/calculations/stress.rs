//! # Stress and Stability Verification (EN 1995-1-1 §6.2/§6.3)
//!
//! Combines member forces, section properties, and design strengths into
//! stresses and utilization ratios:
//!
//! ```text
//! σm,d = MEd / W          σc,0,d = NEd / A
//!
//! combined:  σm,d/fm,d + σc,0,d/fc,0,d           ≤ 1.0
//! stability: σm,d/(kcrit·fm,d) + σc,0,d/fc,0,d   ≤ 1.0
//! ```
//!
//! The moment arrives in kNm and the section modulus in m³; the division
//! goes through the named seam conversion in [`crate::units`] so the result
//! is in MPa, the unit strengths are expressed in. A ratio above 1.0 is a
//! failed check, which is a reportable outcome, not an error.

use serde::{Deserialize, Serialize};

use crate::calculations::member::MemberForceResult;
use crate::calculations::section::CrossSection;
use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};
use crate::materials::DesignStrengths;
use crate::units::{
    axial_stress_mpa, bending_stress_mpa, cubic_meters_to_cubic_millimeters,
    moment_newton_millimeters, square_meters_to_square_millimeters,
};

/// Stresses and utilization ratios for one member.
///
/// ## JSON Example
///
/// ```json
/// {
///   "member": "Rafter",
///   "bending_stress": { "value": 4.29, "derivation": "σm,d = MEd/W = 2858000/666667 = 4.29 MPa" },
///   "compressive_stress": { "value": 0.53, "derivation": "σc,d = NEd/A = 10640/20000 = 0.53 MPa" },
///   "combined_ratio": { "value": 0.30, "derivation": "σm,d/fm,d + σc,d/fc,0,d = ... = 0.30 ≤ 1.0" },
///   "stability_ratio": { "value": 0.30, "derivation": "σm,d/(kcrit×fm,d) + σc,d/fc,0,d = ... = 0.30 ≤ 1.0" },
///   "kcrit": 1.0,
///   "passes_combined": true,
///   "passes_stability": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Member display name
    pub member: String,

    /// Bending stress σm,d (MPa)
    pub bending_stress: Traced,

    /// Compressive stress σc,0,d (MPa)
    pub compressive_stress: Traced,

    /// Combined-stress utilization, compliant iff ≤ 1.0
    pub combined_ratio: Traced,

    /// Stability utilization with the lateral-torsional buckling factor
    /// applied to the bending term, compliant iff ≤ 1.0
    pub stability_ratio: Traced,

    /// Lateral-torsional buckling factor kcrit used (1.0 = no reduction)
    pub kcrit: f64,

    /// Combined check verdict
    pub passes_combined: bool,

    /// Stability check verdict
    pub passes_stability: bool,
}

impl StressResult {
    /// True when both the combined and the stability checks pass
    pub fn passes(&self) -> bool {
        self.passes_combined && self.passes_stability
    }

    /// The governing (larger) utilization ratio
    pub fn governing_ratio(&self) -> f64 {
        self.combined_ratio.value.max(self.stability_ratio.value)
    }
}

/// Compute stresses and utilization ratios for a member.
///
/// `kcrit` is the lateral-torsional buckling reduction on the bending
/// strength; 1.0 when the compression edge is held in place by purlins or
/// sheathing. Must lie in (0, 1].
///
/// # Example
///
/// ```rust
/// use timber_core::calculations::member::{compute_member_forces, MemberKind};
/// use timber_core::calculations::section::CrossSection;
/// use timber_core::calculations::stress::compute_stresses;
/// use timber_core::config::BuildingConfig;
/// use timber_core::materials::{compute_design_strengths, MaterialProperties, TimberGrade};
///
/// let config = BuildingConfig::sample();
/// let strengths =
///     compute_design_strengths(&MaterialProperties::for_grade(TimberGrade::C27)).unwrap();
/// let forces = compute_member_forces(MemberKind::Rafter, &config, 1.54).unwrap();
/// let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
///
/// let stresses = compute_stresses(&forces, &section, &strengths, 1.0).unwrap();
/// assert!(stresses.passes());
/// ```
pub fn compute_stresses(
    forces: &MemberForceResult,
    section: &CrossSection,
    strengths: &DesignStrengths,
    kcrit: f64,
) -> EngineResult<StressResult> {
    section.validate()?;
    if kcrit <= 0.0 || kcrit > 1.0 {
        return Err(EngineError::invalid_input(
            "kcrit",
            kcrit.to_string(),
            "Lateral-torsional buckling factor must lie in (0, 1]",
        ));
    }

    let w_m3 = section.section_modulus_m3();
    let a_m2 = section.area_m2();
    let fm_d = strengths.fm_d.value;
    let fc_0_d = strengths.fc_0_d.value;

    // σm,d = MEd / W, through the kNm/m³ -> MPa seam
    let sigma_m = bending_stress_mpa(forces.max_moment.value, w_m3);
    let bending_stress = Traced::new(
        sigma_m,
        format!(
            "σm,d = MEd/W = {:.0}/{:.0} = {:.2} MPa",
            moment_newton_millimeters(forces.max_moment.value),
            cubic_meters_to_cubic_millimeters(w_m3),
            sigma_m
        ),
    );

    // σc,0,d = NEd / A
    let sigma_c = axial_stress_mpa(forces.axial_force.value, a_m2);
    let compressive_stress = Traced::new(
        sigma_c,
        format!(
            "σc,d = NEd/A = {:.0}/{:.0} = {:.2} MPa",
            forces.axial_force.value * 1000.0,
            square_meters_to_square_millimeters(a_m2),
            sigma_c
        ),
    );

    let combined = sigma_m / fm_d + sigma_c / fc_0_d;
    let combined_ratio = Traced::new(
        combined,
        format!(
            "σm,d/fm,d + σc,d/fc,0,d = {:.2}/{:.2} + {:.2}/{:.2} = {:.2} ≤ 1.0",
            sigma_m, fm_d, sigma_c, fc_0_d, combined
        ),
    );

    let stability = sigma_m / (kcrit * fm_d) + sigma_c / fc_0_d;
    let stability_ratio = Traced::new(
        stability,
        format!(
            "σm,d/(kcrit×fm,d) + σc,d/fc,0,d = {:.2}/({:.1}×{:.2}) + {:.2}/{:.2} = {:.2} ≤ 1.0",
            sigma_m, kcrit, fm_d, sigma_c, fc_0_d, stability
        ),
    );

    Ok(StressResult {
        member: forces.member.clone(),
        bending_stress,
        compressive_stress,
        passes_combined: combined <= 1.0,
        passes_stability: stability <= 1.0,
        combined_ratio,
        stability_ratio,
        kcrit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::member::{compute_member_forces, MemberKind};
    use crate::config::BuildingConfig;
    use crate::materials::{compute_design_strengths, MaterialProperties, TimberGrade};

    fn strengths() -> DesignStrengths {
        compute_design_strengths(&MaterialProperties::for_grade(TimberGrade::C27)).unwrap()
    }

    fn rafter_forces() -> MemberForceResult {
        compute_member_forces(MemberKind::Rafter, &BuildingConfig::sample(), 1.5416).unwrap()
    }

    #[test]
    fn test_rafter_stresses() {
        let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
        let result = compute_stresses(&rafter_forces(), &section, &strengths(), 1.0).unwrap();

        // σm = 2.858 kNm / 6.667e-4 m³ = 4.29 MPa
        assert!((result.bending_stress.value - 4.287).abs() < 0.02);
        // σc = 10.64 kN / 0.02 m² = 0.53 MPa
        assert!((result.compressive_stress.value - 0.532).abs() < 0.01);
        // combined = 4.29/16.62 + 0.53/13.54 = 0.297
        assert!((result.combined_ratio.value - 0.297).abs() < 0.005);
        assert!(result.passes());
    }

    #[test]
    fn test_stability_equals_combined_at_kcrit_one() {
        let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
        let result = compute_stresses(&rafter_forces(), &section, &strengths(), 1.0).unwrap();
        assert!(
            (result.stability_ratio.value - result.combined_ratio.value).abs() < 1e-12
        );
    }

    #[test]
    fn test_stability_worse_with_kcrit_below_one() {
        let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
        let full = compute_stresses(&rafter_forces(), &section, &strengths(), 1.0).unwrap();
        let reduced = compute_stresses(&rafter_forces(), &section, &strengths(), 0.7).unwrap();
        assert!(reduced.stability_ratio.value > full.stability_ratio.value);
    }

    #[test]
    fn test_combined_ratio_monotone_in_moment() {
        let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
        let base = rafter_forces();
        let mut previous = 0.0;
        for scale in [1.0, 1.5, 2.0, 3.0] {
            let mut forces = base.clone();
            forces.max_moment.value = base.max_moment.value * scale;
            let result = compute_stresses(&forces, &section, &strengths(), 1.0).unwrap();
            assert!(result.combined_ratio.value > previous);
            previous = result.combined_ratio.value;
        }
    }

    #[test]
    fn test_overstressed_member_is_reported_not_error() {
        // Tiny section: ratios blow past 1.0 but the call still succeeds
        let section = CrossSection::from_millimeters(30.0, 50.0).unwrap();
        let result = compute_stresses(&rafter_forces(), &section, &strengths(), 1.0).unwrap();
        assert!(result.combined_ratio.value > 1.0);
        assert!(!result.passes());
    }

    #[test]
    fn test_invalid_kcrit_rejected() {
        let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
        assert!(compute_stresses(&rafter_forces(), &section, &strengths(), 0.0).is_err());
        assert!(compute_stresses(&rafter_forces(), &section, &strengths(), 1.1).is_err());
    }

    #[test]
    fn test_derivation_strings() {
        let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
        let result = compute_stresses(&rafter_forces(), &section, &strengths(), 1.0).unwrap();
        assert!(result.bending_stress.derivation.starts_with("σm,d = MEd/W"));
        assert!(result.bending_stress.derivation.contains("666667"));
        assert!(result.combined_ratio.derivation.contains("≤ 1.0"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let section = CrossSection::from_millimeters(100.0, 200.0).unwrap();
        let result = compute_stresses(&rafter_forces(), &section, &strengths(), 1.0).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: StressResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}

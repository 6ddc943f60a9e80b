//! # Column Buckling (EN 1995-1-1 §6.3.2)
//!
//! Flexural buckling check for axially compressed columns:
//!
//! ```text
//! λ    = Lc / i
//! λrel = λ / (π × √(E0,mean / fc,0,k))
//! k    = 0.5 × (1 + βc × (λrel − 0.3) + λrel²)     βc = 0.2 solid timber
//! kc   = 1 / (k + √(k² − λrel²))
//! η    = σc,0,d / (kc × fc,0,d)                    compliant iff ≤ 1.0
//! ```
//!
//! With βc = 0.2 the radicand `k² − λrel²` is positive for every real
//! slenderness, but the guard still exists: a non-positive radicand fails
//! closed (kc = 0, utilization unbounded, verdict false) instead of raising
//! a numeric-domain error.

use serde::{Deserialize, Serialize};

use crate::calculations::section::CrossSection;
use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};
use crate::materials::{design_strength, MaterialProperties};
use crate::units::{axial_stress_mpa, square_meters_to_square_millimeters};

/// Straightness factor βc for solid timber
pub const BETA_C_SOLID_TIMBER: f64 = 0.2;

/// Input parameters for a column buckling check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "height_m": 2.5,
///   "section": { "width_m": 0.2, "height_m": 0.2 },
///   "axial_force_kn": 12.2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    /// Buckling length (storey height, pin-pin), m
    pub height_m: f64,

    /// Column cross-section
    pub section: CrossSection,

    /// Design axial compression NEd, kN
    pub axial_force_kn: f64,
}

impl ColumnInput {
    /// Validate input parameters
    pub fn validate(&self) -> EngineResult<()> {
        if self.height_m <= 0.0 {
            return Err(EngineError::invalid_input(
                "height_m",
                self.height_m.to_string(),
                "Column height must be positive",
            ));
        }
        if self.axial_force_kn < 0.0 || !self.axial_force_kn.is_finite() {
            return Err(EngineError::invalid_input(
                "axial_force_kn",
                self.axial_force_kn.to_string(),
                "Axial force must be finite and non-negative",
            ));
        }
        self.section.validate()
    }
}

/// Results of the buckling check.
///
/// When the radicand guard trips, `buckling_factor` is 0, `utilization`
/// is `f64::INFINITY`, and `passes` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucklingResult {
    /// Slenderness ratio λ
    pub slenderness: Traced,

    /// Relative slenderness λrel
    pub relative_slenderness: Traced,

    /// Instability factor k
    pub instability_factor: Traced,

    /// Buckling reduction factor kc (0 when the check fails closed)
    pub buckling_factor: Traced,

    /// Buckling-modified design compressive strength kc × fc,0,d (MPa)
    pub design_strength: Traced,

    /// Actual compressive stress σc,0,d (MPa)
    pub actual_stress: Traced,

    /// Utilization η = σc,0,d / (kc × fc,0,d), compliant iff ≤ 1.0
    pub utilization: Traced,

    /// Verdict
    pub passes: bool,
}

/// Buckling reduction factor kc from the instability factor and relative
/// slenderness. Fails closed: a non-positive radicand returns 0 instead of
/// a NaN from the square root.
pub fn buckling_reduction_factor(k: f64, lambda_rel: f64) -> f64 {
    let radicand = k * k - lambda_rel * lambda_rel;
    if radicand < 0.0 {
        return 0.0;
    }
    1.0 / (k + radicand.sqrt())
}

/// Perform the buckling check for a compression member.
///
/// # Example
///
/// ```rust
/// use timber_core::calculations::buckling::{analyze_column_buckling, ColumnInput};
/// use timber_core::calculations::section::CrossSection;
/// use timber_core::materials::{MaterialProperties, TimberGrade};
///
/// let input = ColumnInput {
///     height_m: 2.5,
///     section: CrossSection::from_millimeters(200.0, 200.0).unwrap(),
///     axial_force_kn: 12.2,
/// };
/// let material = MaterialProperties::for_grade(TimberGrade::C27);
/// let result = analyze_column_buckling(&input, &material).unwrap();
/// assert!(result.passes);
/// ```
pub fn analyze_column_buckling(
    input: &ColumnInput,
    material: &MaterialProperties,
) -> EngineResult<BucklingResult> {
    input.validate()?;
    material.validate()?;

    let i = input.section.radius_of_gyration_m();
    let lambda = input.height_m / i;
    let slenderness = Traced::new(
        lambda,
        format!("λ = Lc/i = {:.2}/{:.4} = {:.1}", input.height_m, i, lambda),
    );

    let euler_root = (material.e_0_mean_mpa / material.fc_0_k_mpa).sqrt();
    let lambda_rel = lambda / (std::f64::consts::PI * euler_root);
    let relative_slenderness = Traced::new(
        lambda_rel,
        format!(
            "λrel = λ/(π×√(E0,mean/fc,0,k)) = {:.1}/(π×√({:.0}/{:.0})) = {:.2}",
            lambda, material.e_0_mean_mpa, material.fc_0_k_mpa, lambda_rel
        ),
    );

    let k = 0.5 * (1.0 + BETA_C_SOLID_TIMBER * (lambda_rel - 0.3) + lambda_rel.powi(2));
    let instability_factor = Traced::new(
        k,
        format!(
            "k = 0.5×(1 + βc×(λrel − 0.3) + λrel²) = 0.5×(1 + {:.1}×({:.2} − 0.3) + {:.2}²) = {:.2}",
            BETA_C_SOLID_TIMBER, lambda_rel, lambda_rel, k
        ),
    );

    let kc = buckling_reduction_factor(k, lambda_rel);
    let buckling_factor = if kc > 0.0 {
        Traced::new(
            kc,
            format!(
                "kc = 1/(k + √(k² − λrel²)) = 1/({:.2} + √({:.2} − {:.2})) = {:.3}",
                k,
                k * k,
                lambda_rel * lambda_rel,
                kc
            ),
        )
    } else {
        Traced::new(
            0.0,
            format!(
                "kc = 0 (k² = {:.2} < λrel² = {:.2}: member unstable, check fails closed)",
                k * k,
                lambda_rel * lambda_rel
            ),
        )
    };

    let fc_0_d = design_strength(material.fc_0_k_mpa, material.kmod, material.gamma_m)?;
    let fc_mod = kc * fc_0_d;
    let design_strength_traced = Traced::new(
        fc_mod,
        format!(
            "fc,0,d,mod = kc × fc,0,d = {:.3} × {:.2} = {:.2} MPa",
            kc, fc_0_d, fc_mod
        ),
    );

    let sigma_c = axial_stress_mpa(input.axial_force_kn, input.section.area_m2());
    let actual_stress = Traced::new(
        sigma_c,
        format!(
            "σc,d = NEd/A = {:.0}/{:.0} = {:.2} MPa",
            input.axial_force_kn * 1000.0,
            square_meters_to_square_millimeters(input.section.area_m2()),
            sigma_c
        ),
    );

    let eta = if fc_mod > 0.0 {
        sigma_c / fc_mod
    } else {
        f64::INFINITY
    };
    let utilization = Traced::new(
        eta,
        format!(
            "η = σc,d/fc,0,d,mod = {:.2}/{:.2} = {:.2} ≤ 1.0",
            sigma_c, fc_mod, eta
        ),
    );

    Ok(BucklingResult {
        slenderness,
        relative_slenderness,
        instability_factor,
        buckling_factor,
        design_strength: design_strength_traced,
        actual_stress,
        utilization,
        passes: eta <= 1.0,
    })
}

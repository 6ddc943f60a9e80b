//! # Member Force Analysis
//!
//! Internal forces for the roof members under the governing design load.
//! One abstraction covers all three member kinds; the kind selects the
//! load-decomposition and span policies instead of repeating the formulas
//! per member:
//!
//! - **Rafter** - pitched, simply supported between eaves and ridge:
//!   `L = b/(2·cos α)`, load decomposed along/across the member,
//!   `M = q∥·L²/8`, `N = q∥·L/(2·tan α)`, `V = q∥·L/2`.
//! - **Purlin** - horizontal, spanning between rafters: loaded by the
//!   vertical design load over its tributary width, no decomposition,
//!   no axial force.
//! - **Brace** - diagonal at a fixed angle, carrying the rafter axial
//!   force: `N = N_rafter / cos(brace angle)`.
//!
//! The line load on rafters and purlins is the area design load times the
//! member's tributary width (the rafter spacing).

use serde::{Deserialize, Serialize};

use crate::config::BuildingConfig;
use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};

/// Default purlin span between supports, m
pub const PURLIN_SPAN_M: f64 = 1.5;
/// Default brace inclination from the rafter axis, degrees
pub const BRACE_ANGLE_DEG: f64 = 45.0;
/// Default brace length between connections, m
pub const BRACE_LENGTH_M: f64 = 2.0;

/// Member kind, tagging the span and load-decomposition policy.
///
/// ## JSON Examples
///
/// ```json
/// { "kind": "Rafter" }
/// { "kind": "Purlin", "span_m": 1.5 }
/// { "kind": "Brace", "angle_deg": 45.0, "length_m": 2.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MemberKind {
    /// Pitched principal member from eaves to ridge
    Rafter,
    /// Secondary member spanning between rafters
    Purlin {
        /// Purlin span between supports, m
        span_m: f64,
    },
    /// Diagonal compression/tension brace
    Brace {
        /// Brace inclination from the rafter axis, degrees
        angle_deg: f64,
        /// Brace length, m
        length_m: f64,
    },
}

impl MemberKind {
    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            MemberKind::Rafter => "Rafter",
            MemberKind::Purlin { .. } => "Purlin",
            MemberKind::Brace { .. } => "Brace",
        }
    }

    fn validate(&self) -> EngineResult<()> {
        match *self {
            MemberKind::Rafter => Ok(()),
            MemberKind::Purlin { span_m } => {
                if span_m <= 0.0 {
                    return Err(EngineError::invalid_input(
                        "span_m",
                        span_m.to_string(),
                        "Purlin span must be positive",
                    ));
                }
                Ok(())
            }
            MemberKind::Brace { angle_deg, length_m } => {
                if !(0.0..90.0).contains(&angle_deg) {
                    return Err(EngineError::degenerate_geometry(
                        "brace angle",
                        "angle must lie in [0°, 90°) so cos(angle) stays positive",
                    ));
                }
                if length_m <= 0.0 {
                    return Err(EngineError::invalid_input(
                        "length_m",
                        length_m.to_string(),
                        "Brace length must be positive",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Internal forces for one member under the governing design load.
///
/// All magnitudes are finite and non-negative; the engine reports the
/// governing magnitude, not the sign convention of a frame solver.
///
/// ## JSON Example
///
/// ```json
/// {
///   "member": "Rafter",
///   "effective_length": { "value": 3.74, "derivation": "L = b/(2×cos(α)) = 7.2/(2×cos(16.0°)) = 3.74 m" },
///   "line_load": { "value": 1.63, "derivation": "q∥ = Ed × s × cos(α) = ..." },
///   "max_moment": { "value": 2.86, "derivation": "MEd = (q∥×L²)/8 = ..." },
///   "axial_force": { "value": 10.65, "derivation": "NEd = q∥×L/(2×tan(α)) = ..." },
///   "shear_force": { "value": 3.05, "derivation": "VEd = (q∥×L)/2 = ..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberForceResult {
    /// Member display name
    pub member: String,

    /// Effective member length (m)
    pub effective_length: Traced,

    /// Governing line load on the member (kN/m); for the brace this is the
    /// rafter axial force it collects (kN)
    pub line_load: Traced,

    /// Maximum bending moment MEd (kNm)
    pub max_moment: Traced,

    /// Axial force NEd (kN)
    pub axial_force: Traced,

    /// Shear force VEd (kN), where the member carries one
    pub shear_force: Option<Traced>,
}

/// Compute internal forces for a member under the design load (kN/m²).
///
/// The design load comes from [`crate::loads::compute_loads`]; the member's
/// tributary width is the rafter spacing from the config.
///
/// # Example
///
/// ```rust
/// use timber_core::calculations::member::{compute_member_forces, MemberKind};
/// use timber_core::config::BuildingConfig;
///
/// let config = BuildingConfig::sample();
/// let rafter = compute_member_forces(MemberKind::Rafter, &config, 1.54).unwrap();
/// assert!(rafter.max_moment.value > 0.0);
/// ```
pub fn compute_member_forces(
    kind: MemberKind,
    config: &BuildingConfig,
    design_load_kn_m2: f64,
) -> EngineResult<MemberForceResult> {
    config.validate()?;
    kind.validate()?;
    if design_load_kn_m2 < 0.0 || !design_load_kn_m2.is_finite() {
        return Err(EngineError::invalid_input(
            "design_load_kn_m2",
            design_load_kn_m2.to_string(),
            "Design load must be finite and non-negative",
        ));
    }

    match kind {
        MemberKind::Rafter => rafter_forces(config, design_load_kn_m2),
        MemberKind::Purlin { span_m } => purlin_forces(config, design_load_kn_m2, span_m),
        MemberKind::Brace { angle_deg, length_m } => {
            brace_forces(config, design_load_kn_m2, angle_deg, length_m)
        }
    }
}

fn rafter_forces(
    config: &BuildingConfig,
    ed: f64,
) -> EngineResult<MemberForceResult> {
    let alpha = config.roof_angle_rad();
    // Config validation forbids angle = 0, which would zero this denominator
    let tan_alpha = alpha.tan();
    if tan_alpha <= 0.0 {
        return Err(EngineError::degenerate_geometry(
            "rafter axial force",
            "tan(roof angle) must be positive",
        ));
    }

    // Symmetric ridge: each rafter spans half the building width on plan
    let length = config.width_m / (2.0 * alpha.cos());
    let effective_length = Traced::new(
        length,
        format!(
            "L = b/(2×cos(α)) = {:.1}/(2×cos({:.1}°)) = {:.2} m",
            config.width_m, config.roof_angle_deg, length
        ),
    );

    // Line load over the tributary width, decomposed along the member
    let q_line = ed * config.spacing_m;
    let q_parallel = q_line * alpha.cos();
    let q_perpendicular = q_line * alpha.sin();
    let line_load = Traced::new(
        q_parallel,
        format!(
            "q∥ = Ed × s × cos(α) = {:.3} × {:.2} × cos({:.1}°) = {:.3} kN/m; \
             q⊥ = Ed × s × sin(α) = {:.3} kN/m",
            ed, config.spacing_m, config.roof_angle_deg, q_parallel, q_perpendicular
        ),
    );

    // Simply supported under uniform load
    let moment = q_parallel * length.powi(2) / 8.0;
    let max_moment = Traced::new(
        moment,
        format!(
            "MEd = (q∥×L²)/8 = ({:.3}×{:.2}²)/8 = {:.2} kNm",
            q_parallel, length, moment
        ),
    );

    let axial = q_parallel * length / (2.0 * tan_alpha);
    let axial_force = Traced::new(
        axial,
        format!(
            "NEd = q∥×L/(2×tan(α)) = {:.3}×{:.2}/(2×tan({:.1}°)) = {:.2} kN",
            q_parallel, length, config.roof_angle_deg, axial
        ),
    );

    let shear = q_parallel * length / 2.0;
    let shear_force = Traced::new(
        shear,
        format!(
            "VEd = (q∥×L)/2 = ({:.3}×{:.2})/2 = {:.2} kN",
            q_parallel, length, shear
        ),
    );

    Ok(MemberForceResult {
        member: "Rafter".to_string(),
        effective_length,
        line_load,
        max_moment,
        axial_force,
        shear_force: Some(shear_force),
    })
}

fn purlin_forces(
    config: &BuildingConfig,
    ed: f64,
    span_m: f64,
) -> EngineResult<MemberForceResult> {
    let effective_length = Traced::new(span_m, format!("L = {:.2} m (purlin span)", span_m));

    // Vertical design load over the tributary width, no decomposition
    let q = ed * config.spacing_m;
    let line_load = Traced::new(
        q,
        format!(
            "qEd = Ed × b = {:.3} × {:.3} = {:.3} kN/m",
            ed, config.spacing_m, q
        ),
    );

    let moment = q * span_m.powi(2) / 8.0;
    let max_moment = Traced::new(
        moment,
        format!(
            "MEd = (qEd × L²)/8 = ({:.3} × {:.3}²)/8 = {:.3} kNm",
            q, span_m, moment
        ),
    );

    let axial_force = Traced::new(0.0, "NEd = 0 kN (purlin carries no axial force)".to_string());

    let shear = q * span_m / 2.0;
    let shear_force = Traced::new(
        shear,
        format!(
            "VEd = (qEd × L)/2 = ({:.3} × {:.3})/2 = {:.3} kN",
            q, span_m, shear
        ),
    );

    Ok(MemberForceResult {
        member: "Purlin".to_string(),
        effective_length,
        line_load,
        max_moment,
        axial_force,
        shear_force: Some(shear_force),
    })
}

fn brace_forces(
    config: &BuildingConfig,
    ed: f64,
    angle_deg: f64,
    length_m: f64,
) -> EngineResult<MemberForceResult> {
    // The brace collects the governing rafter axial force
    let rafter = rafter_forces(config, ed)?;
    let n_rafter = rafter.axial_force.value;

    let cos_beta = angle_deg.to_radians().cos();
    let axial = n_rafter / cos_beta;

    let effective_length = Traced::new(length_m, format!("L = {:.2} m (brace length)", length_m));
    let line_load = Traced::new(
        n_rafter,
        format!("F = NEd,rafter = {:.2} kN (collected rafter axial force)", n_rafter),
    );
    let axial_force = Traced::new(
        axial,
        format!(
            "NEd = F/cos(β) = {:.2}/cos({:.0}°) = {:.2} kN",
            n_rafter, angle_deg, axial
        ),
    );
    let max_moment = Traced::new(0.0, "MEd = 0 kNm (axially loaded brace)".to_string());

    Ok(MemberForceResult {
        member: "Brace".to_string(),
        effective_length,
        line_load,
        max_moment,
        axial_force,
        shear_force: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BuildingConfig {
        BuildingConfig::sample()
    }

    #[test]
    fn test_rafter_length() {
        let result = compute_member_forces(MemberKind::Rafter, &config(), 1.5416).unwrap();
        // L = 7.2/(2×cos(16°)) = 3.745 m
        assert!((result.effective_length.value - 3.7449).abs() < 1e-3);
    }

    #[test]
    fn test_rafter_forces() {
        let result = compute_member_forces(MemberKind::Rafter, &config(), 1.5416).unwrap();
        // q∥ = 1.5416 × 1.1 × cos(16°) = 1.630 kN/m
        assert!((result.line_load.value - 1.630).abs() < 1e-2);
        // M = 1.630 × 3.745² / 8 = 2.858 kNm
        assert!((result.max_moment.value - 2.858).abs() < 1e-2);
        // N = 1.630 × 3.745 / (2 × tan(16°)) = 10.64 kN
        assert!((result.axial_force.value - 10.64).abs() < 0.05);
        // V = 1.630 × 3.745 / 2 = 3.05 kN
        let shear = result.shear_force.unwrap();
        assert!((shear.value - 3.052).abs() < 1e-2);
    }

    #[test]
    fn test_rafter_forces_finite_and_nonnegative() {
        let result = compute_member_forces(MemberKind::Rafter, &config(), 1.343).unwrap();
        for value in [
            result.effective_length.value,
            result.max_moment.value,
            result.axial_force.value,
        ] {
            assert!(value.is_finite() && value >= 0.0);
        }
    }

    #[test]
    fn test_purlin_forces() {
        let result =
            compute_member_forces(MemberKind::Purlin { span_m: 1.5 }, &config(), 1.5416).unwrap();
        // q = 1.5416 × 1.1 = 1.696 kN/m
        assert!((result.line_load.value - 1.6958).abs() < 1e-3);
        // M = 1.696 × 1.5² / 8 = 0.477 kNm
        assert!((result.max_moment.value - 0.4769).abs() < 1e-3);
        // V = 1.696 × 1.5 / 2 = 1.272 kN
        assert!((result.shear_force.unwrap().value - 1.2718).abs() < 1e-3);
        assert_eq!(result.axial_force.value, 0.0);
    }

    #[test]
    fn test_brace_axial_from_rafter() {
        let rafter = compute_member_forces(MemberKind::Rafter, &config(), 1.5416).unwrap();
        let brace = compute_member_forces(
            MemberKind::Brace {
                angle_deg: 45.0,
                length_m: 2.0,
            },
            &config(),
            1.5416,
        )
        .unwrap();
        let expected = rafter.axial_force.value / 45.0_f64.to_radians().cos();
        assert!((brace.axial_force.value - expected).abs() < 1e-9);
        assert_eq!(brace.max_moment.value, 0.0);
        assert!(brace.shear_force.is_none());
    }

    #[test]
    fn test_zero_angle_rejected_via_config() {
        let config = BuildingConfig {
            roof_angle_deg: 0.0,
            ..BuildingConfig::sample()
        };
        let err = compute_member_forces(MemberKind::Rafter, &config, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
    }

    #[test]
    fn test_invalid_purlin_span() {
        let err =
            compute_member_forces(MemberKind::Purlin { span_m: 0.0 }, &config(), 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_steep_brace_angle_rejected() {
        let err = compute_member_forces(
            MemberKind::Brace {
                angle_deg: 90.0,
                length_m: 2.0,
            },
            &config(),
            1.0,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
    }

    #[test]
    fn test_negative_design_load_rejected() {
        assert!(compute_member_forces(MemberKind::Rafter, &config(), -1.0).is_err());
    }

    #[test]
    fn test_derivation_strings() {
        let result = compute_member_forces(MemberKind::Rafter, &config(), 1.5416).unwrap();
        assert!(result.effective_length.derivation.starts_with("L = b/(2×cos(α))"));
        assert!(result.max_moment.derivation.contains("kNm"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let result =
            compute_member_forces(MemberKind::Purlin { span_m: 1.5 }, &config(), 1.5416).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: MemberForceResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}

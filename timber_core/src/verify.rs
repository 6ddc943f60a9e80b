//! # Building Verification Pipeline
//!
//! Runs the full structural and thermal verification for a [`Project`]:
//! design strengths, site loads, member forces, stress and stability
//! checks, serviceability deflection, and envelope U-values, collected in
//! a single serializable [`VerificationReport`].
//!
//! The overall verdict is the conjunction of every structural, stability,
//! and serviceability check. Thermal results are reported alongside but do
//! not gate the verdict; envelope performance is a separate compliance
//! track from load-bearing capacity.
//!
//! The pipeline is pure: verifying the same project twice yields
//! byte-identical reports.

use serde::{Deserialize, Serialize};

use crate::calculations::buckling::{analyze_column_buckling, BucklingResult, ColumnInput};
use crate::calculations::deflection::{check_deflection, DeflectionResult};
use crate::calculations::member::{compute_member_forces, MemberForceResult, MemberKind};
use crate::calculations::stress::{compute_stresses, StressResult};
use crate::calculations::thermal::{compute_thermal_resistance, ThermalAssembly, ThermalResult};
use crate::derivation::Traced;
use crate::errors::EngineResult;
use crate::loads::{compute_loads, LoadKind, LoadResult};
use crate::materials::{compute_design_strengths, DesignStrengths, MaterialProperties};
use crate::project::Project;
use crate::units::axial_stress_mpa;

/// Lateral-torsional reduction for members whose compression edge is held
/// in place (rafters by purlins, purlins by decking)
const K_CRIT_RESTRAINED: f64 = 1.0;

/// Tension and Euler buckling check for the diagonal brace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BraceResult {
    /// Axial force NEd, kN
    pub axial_force: Traced,

    /// Axial stress σt,0,d (MPa)
    pub axial_stress: Traced,

    /// Tension utilization σt,0,d / ft,0,d
    pub tension_utilization: Traced,

    /// Euler critical load about the weak axis, kN
    pub euler_critical_load: Traced,

    /// Compression utilization NEd / Ncr
    pub euler_utilization: Traced,

    /// Verdict: both utilizations ≤ 1.0
    pub passes: bool,
}

/// Full verification output for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Job name
    pub label: String,

    /// Design strengths for the selected grade
    pub design_strengths: DesignStrengths,

    /// Characteristic and design loads
    pub loads: LoadResult,

    /// Rafter internal forces
    pub rafter_forces: MemberForceResult,

    /// Rafter stress and stability checks
    pub rafter_stresses: StressResult,

    /// Purlin internal forces
    pub purlin_forces: MemberForceResult,

    /// Purlin stress checks
    pub purlin_stresses: StressResult,

    /// Brace tension and Euler buckling checks
    pub brace: BraceResult,

    /// Ground-floor column buckling check
    pub column: BucklingResult,

    /// Rafter serviceability deflection
    pub deflection: DeflectionResult,

    /// External wall U-value (informative)
    pub wall_thermal: ThermalResult,

    /// Roof U-value (informative)
    pub roof_thermal: ThermalResult,

    /// Conjunction of every structural, stability, and serviceability
    /// verdict; thermal results do not gate it
    pub overall_result: bool,
}

impl VerificationReport {
    /// Every individual verdict that feeds `overall_result`, with a name
    pub fn check_verdicts(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("rafter stresses", self.rafter_stresses.passes()),
            ("purlin stresses", self.purlin_stresses.passes()),
            ("brace", self.brace.passes),
            ("column buckling", self.column.passes),
            ("rafter deflection", self.deflection.passes),
        ]
    }
}

/// Run the full verification for a project.
///
/// # Example
///
/// ```rust
/// use timber_core::project::Project;
/// use timber_core::verify::verify;
///
/// let report = verify(&Project::sample("Barn")).unwrap();
/// assert!(report.overall_result);
/// ```
pub fn verify(project: &Project) -> EngineResult<VerificationReport> {
    project.validate()?;

    let material = MaterialProperties::for_grade(project.grade);
    let design_strengths = compute_design_strengths(&material)?;
    let loads = compute_loads(&project.load_parameters)?;
    let ed = loads.design_load.value;

    let rafter_forces = compute_member_forces(MemberKind::Rafter, &project.config, ed)?;
    let rafter_stresses = compute_stresses(
        &rafter_forces,
        &project.sections.rafter,
        &design_strengths,
        K_CRIT_RESTRAINED,
    )?;

    let purlin_forces = compute_member_forces(
        MemberKind::Purlin {
            span_m: project.sections.purlin_span_m,
        },
        &project.config,
        ed,
    )?;
    let purlin_stresses = compute_stresses(
        &purlin_forces,
        &project.sections.purlin,
        &design_strengths,
        K_CRIT_RESTRAINED,
    )?;

    let brace = verify_brace(project, &material, &design_strengths, ed)?;

    // Column tributary area spans the full building width per rafter bay
    let column_axial = ed * project.config.width_m * project.config.spacing_m;
    let column = analyze_column_buckling(
        &ColumnInput {
            height_m: project.config.height1_m,
            section: project.sections.column,
            axial_force_kn: column_axial,
        },
        &material,
    )?;

    // Serviceability under the characteristic (unfactored) permanent + snow
    let qk_line = (loads.characteristic.get(LoadKind::Dead)
        + loads.characteristic.get(LoadKind::Snow))
        * project.config.spacing_m;
    let deflection = check_deflection(
        "Rafter",
        rafter_forces.effective_length.value,
        qk_line,
        &project.sections.rafter,
        &material,
    )?;

    let wall_thermal = compute_thermal_resistance(&ThermalAssembly::wall(
        project.config.wall_thickness_m,
        project.config.insulation_thickness_m,
    ))?;
    let roof_thermal = compute_thermal_resistance(&ThermalAssembly::roof())?;

    let overall_result = rafter_stresses.passes()
        && purlin_stresses.passes()
        && brace.passes
        && column.passes
        && deflection.passes;

    Ok(VerificationReport {
        label: project.label.clone(),
        design_strengths,
        loads,
        rafter_forces,
        rafter_stresses,
        purlin_forces,
        purlin_stresses,
        brace,
        column,
        deflection,
        wall_thermal,
        roof_thermal,
        overall_result,
    })
}

fn verify_brace(
    project: &Project,
    material: &MaterialProperties,
    strengths: &DesignStrengths,
    ed: f64,
) -> EngineResult<BraceResult> {
    let forces = compute_member_forces(
        MemberKind::Brace {
            angle_deg: project.sections.brace_angle_deg,
            length_m: project.sections.brace_length_m,
        },
        &project.config,
        ed,
    )?;
    let n_ed = forces.axial_force.value;
    let section = &project.sections.brace;

    let sigma = axial_stress_mpa(n_ed, section.area_m2());
    let axial_stress = Traced::new(
        sigma,
        format!(
            "σt,0,d = NEd/A = {:.2} kN / {:.4} m² = {:.2} MPa",
            n_ed,
            section.area_m2(),
            sigma
        ),
    );

    let ft_0_d = strengths.ft_0_d.value;
    let tension_eta = sigma / ft_0_d;
    let tension_utilization = Traced::new(
        tension_eta,
        format!(
            "η = σt,0,d/ft,0,d = {:.2}/{:.2} = {:.2} ≤ 1.0",
            sigma, ft_0_d, tension_eta
        ),
    );

    // Wind reversal loads the brace in compression; Euler about the weak axis
    let i_weak_m4 = section.height_m * section.width_m.powi(3) / 12.0;
    let e_pa = material.e_0_mean_mpa * 1.0e6;
    let ncr_kn =
        std::f64::consts::PI.powi(2) * e_pa * i_weak_m4 / project.sections.brace_length_m.powi(2)
            / 1000.0;
    let euler_critical_load = Traced::new(
        ncr_kn,
        format!(
            "Ncr = π²EI/L² = π² × {:.2e} × {:.2e} / {:.2}² = {:.1} kN",
            e_pa, i_weak_m4, project.sections.brace_length_m, ncr_kn
        ),
    );

    let euler_eta = n_ed / ncr_kn;
    let euler_utilization = Traced::new(
        euler_eta,
        format!(
            "η = NEd/Ncr = {:.2}/{:.1} = {:.2} ≤ 1.0",
            n_ed, ncr_kn, euler_eta
        ),
    );

    Ok(BraceResult {
        axial_force: forces.axial_force,
        axial_stress,
        tension_utilization,
        euler_critical_load,
        euler_utilization,
        passes: tension_eta <= 1.0 && euler_eta <= 1.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildingConfig;
    use crate::materials::TimberGrade;

    #[test]
    fn test_sample_project_verifies() {
        let report = verify(&Project::sample("Sample barn")).unwrap();
        // fm,d = 0.8 × 27 / 1.3 = 16.62 MPa
        assert!((report.design_strengths.fm_d.value - 16.615).abs() < 0.01);
        assert!(report.rafter_stresses.governing_ratio() < 1.0);
        assert!(report.purlin_stresses.governing_ratio() < 1.0);
        assert!(report.brace.passes);
        assert!(report.column.passes);
        assert!(report.deflection.passes);
        assert!(report.overall_result);
    }

    #[test]
    fn test_every_verdict_feeds_overall() {
        let report = verify(&Project::sample("Sample barn")).unwrap();
        let all = report.check_verdicts().iter().all(|(_, pass)| *pass);
        assert_eq!(report.overall_result, all);
        assert_eq!(report.check_verdicts().len(), 5);
    }

    #[test]
    fn test_thermal_does_not_gate_verdict() {
        let mut project = Project::sample("Thin walls");
        // Strip the insulation; the wall U-value degrades badly
        project.config.insulation_thickness_m = 0.001;
        let report = verify(&project).unwrap();
        assert!(report.wall_thermal.u_value.value > 1.0);
        assert!(report.overall_result);
    }

    #[test]
    fn test_undersized_rafter_fails_overall() {
        let mut project = Project::sample("Undersized");
        project.sections.rafter = crate::calculations::section::CrossSection {
            width_m: 0.04,
            height_m: 0.06,
        };
        let report = verify(&project).unwrap();
        assert!(!report.rafter_stresses.passes());
        assert!(!report.overall_result);
    }

    #[test]
    fn test_brace_euler_critical_load() {
        let report = verify(&Project::sample("Sample barn")).unwrap();
        // 60 × 100 brace, weak axis: I = 0.1 × 0.06³/12 = 1.8e-6 m⁴
        // Ncr = π² × 11.5e9 × 1.8e-6 / 2² ≈ 51.1 kN
        assert!((report.brace.euler_critical_load.value - 51.08).abs() < 0.2);
        assert!(report.brace.euler_utilization.value < 1.0);
    }

    #[test]
    fn test_report_is_deterministic() {
        let project = Project::sample("Deterministic");
        let a = serde_json::to_string(&verify(&project).unwrap()).unwrap();
        let b = serde_json::to_string(&verify(&project).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_geometry_propagates() {
        let mut project = Project::sample("Flat roof");
        project.config = BuildingConfig {
            roof_angle_deg: 0.0,
            ..BuildingConfig::sample()
        };
        let err = verify(&project).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
    }

    #[test]
    fn test_grade_choice_shifts_utilizations() {
        let c27 = verify(&Project::sample("C27")).unwrap();
        let mut weaker = Project::sample("C24");
        weaker.grade = TimberGrade::C24;
        let c24 = verify(&weaker).unwrap();
        assert!(c24.rafter_stresses.governing_ratio() > c27.rafter_stresses.governing_ratio());
    }

    #[test]
    fn test_report_serialization_roundtrip() {
        let report = verify(&Project::sample("Roundtrip")).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: VerificationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}

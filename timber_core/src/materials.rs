//! # Timber Materials (EN 338)
//!
//! Characteristic strength properties for structural timber grades and the
//! conversion to design values per EN 1995-1-1 (Eurocode 5):
//!
//! ```text
//! Xd = kmod × Xk / γM
//! ```
//!
//! applied identically to bending, tension-parallel, and compression-parallel
//! strengths. Grade presets (C24, C27, C30) are loaded from a lazy static
//! table; custom materials can be constructed directly.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};

/// Strength classes for softwood structural timber per EN 338
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimberGrade {
    /// C24 - common construction grade
    C24,
    /// C27 - the worked example's grade
    C27,
    /// C30 - higher grade for slender members
    C30,
}

impl TimberGrade {
    /// All grades, for UI selection
    pub const ALL: [TimberGrade; 3] = [TimberGrade::C24, TimberGrade::C27, TimberGrade::C30];

    /// Grade designation string (e.g. "C27")
    pub fn code(&self) -> &'static str {
        match self {
            TimberGrade::C24 => "C24",
            TimberGrade::C27 => "C27",
            TimberGrade::C30 => "C30",
        }
    }

    /// Parse from a designation string
    pub fn from_code(s: &str) -> EngineResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "C24" => Ok(TimberGrade::C24),
            "C27" => Ok(TimberGrade::C27),
            "C30" => Ok(TimberGrade::C30),
            other => Err(EngineError::GradeNotFound {
                grade_name: other.to_string(),
            }),
        }
    }
}

/// Characteristic material properties for one timber grade, immutable.
///
/// Strengths and moduli in MPa, density in kg/m³. The partial safety factor
/// γM and the load-duration/moisture modification factor kmod travel with
/// the material because they are properties of the material standard and the
/// service class, not of any particular member.
///
/// ## JSON Example
///
/// ```json
/// {
///   "grade": "C27",
///   "fm_k_mpa": 27.0,
///   "ft_0_k_mpa": 16.0,
///   "fc_0_k_mpa": 22.0,
///   "e_0_mean_mpa": 11500.0,
///   "density_kg_m3": 370.0,
///   "gamma_m": 1.3,
///   "kmod": 0.8
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Grade designation
    pub grade: TimberGrade,

    /// Characteristic bending strength fm,k (MPa)
    pub fm_k_mpa: f64,

    /// Characteristic tensile strength parallel to grain ft,0,k (MPa)
    pub ft_0_k_mpa: f64,

    /// Characteristic compressive strength parallel to grain fc,0,k (MPa)
    pub fc_0_k_mpa: f64,

    /// Mean modulus of elasticity parallel to grain E0,mean (MPa)
    pub e_0_mean_mpa: f64,

    /// Characteristic density ρk (kg/m³)
    pub density_kg_m3: f64,

    /// Partial material safety factor γM (1.3 for solid timber)
    pub gamma_m: f64,

    /// Modification factor kmod for load duration and moisture (service class 2,
    /// medium-term: 0.8)
    pub kmod: f64,
}

/// EN 338 grade table. γM = 1.3 and kmod = 0.8 are the solid-timber,
/// service-class-2 defaults; override per instance if the service class
/// differs.
static GRADE_TABLE: Lazy<Vec<MaterialProperties>> = Lazy::new(|| {
    let entry = |grade, fm, ft, fc, e, rho| MaterialProperties {
        grade,
        fm_k_mpa: fm,
        ft_0_k_mpa: ft,
        fc_0_k_mpa: fc,
        e_0_mean_mpa: e,
        density_kg_m3: rho,
        gamma_m: 1.3,
        kmod: 0.8,
    };
    vec![
        entry(TimberGrade::C24, 24.0, 14.0, 21.0, 11000.0, 350.0),
        entry(TimberGrade::C27, 27.0, 16.0, 22.0, 11500.0, 370.0),
        entry(TimberGrade::C30, 30.0, 18.0, 23.0, 12000.0, 380.0),
    ]
});

impl MaterialProperties {
    /// Look up the preset properties for a grade
    pub fn for_grade(grade: TimberGrade) -> Self {
        GRADE_TABLE
            .iter()
            .find(|m| m.grade == grade)
            .expect("grade table covers all variants")
            .clone()
    }

    /// Validate factors and characteristic values.
    ///
    /// kmod must lie in (0, 1] and γM must be positive; anything else is a
    /// configuration error, not a calculable state.
    pub fn validate(&self) -> EngineResult<()> {
        if self.kmod <= 0.0 || self.kmod > 1.0 {
            return Err(EngineError::invalid_material_factor("kmod", self.kmod));
        }
        if self.gamma_m <= 0.0 {
            return Err(EngineError::invalid_material_factor("gamma_m", self.gamma_m));
        }
        let strengths = [
            ("fm_k_mpa", self.fm_k_mpa),
            ("ft_0_k_mpa", self.ft_0_k_mpa),
            ("fc_0_k_mpa", self.fc_0_k_mpa),
            ("e_0_mean_mpa", self.e_0_mean_mpa),
            ("density_kg_m3", self.density_kg_m3),
        ];
        for (field, value) in strengths {
            if value <= 0.0 {
                return Err(EngineError::invalid_input(
                    field,
                    value.to_string(),
                    "Characteristic value must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Design strength values derived from characteristic strengths.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fm_d": { "value": 16.615, "derivation": "fm,d = (kmod × fm,k) / γM = (0.80 × 27.00) / 1.30 = 16.62 MPa" },
///   "ft_0_d": { "value": 9.846, "derivation": "ft,0,d = (kmod × ft,0,k) / γM = (0.80 × 16.00) / 1.30 = 9.85 MPa" },
///   "fc_0_d": { "value": 13.538, "derivation": "fc,0,d = (kmod × fc,0,k) / γM = (0.80 × 22.00) / 1.30 = 13.54 MPa" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignStrengths {
    /// Design bending strength fm,d (MPa)
    pub fm_d: Traced,

    /// Design tensile strength parallel to grain ft,0,d (MPa)
    pub ft_0_d: Traced,

    /// Design compressive strength parallel to grain fc,0,d (MPa)
    pub fc_0_d: Traced,
}

/// Convert one characteristic strength to a design strength:
/// `Xd = kmod × Xk / γM`.
pub fn design_strength(x_k_mpa: f64, kmod: f64, gamma_m: f64) -> EngineResult<f64> {
    if kmod <= 0.0 {
        return Err(EngineError::invalid_material_factor("kmod", kmod));
    }
    if gamma_m <= 0.0 {
        return Err(EngineError::invalid_material_factor("gamma_m", gamma_m));
    }
    Ok(kmod * x_k_mpa / gamma_m)
}

/// Compute all three design strengths for a material, with derivations.
///
/// # Example
///
/// ```rust
/// use timber_core::materials::{compute_design_strengths, MaterialProperties, TimberGrade};
///
/// let material = MaterialProperties::for_grade(TimberGrade::C27);
/// let strengths = compute_design_strengths(&material).unwrap();
/// assert!((strengths.fm_d.value - 16.615).abs() < 0.001);
/// ```
pub fn compute_design_strengths(material: &MaterialProperties) -> EngineResult<DesignStrengths> {
    material.validate()?;

    let trace = |symbol: &str, char_symbol: &str, x_k: f64, x_d: f64| {
        Traced::new(
            x_d,
            format!(
                "{symbol} = (kmod × {char_symbol}) / γM = ({:.2} × {:.2}) / {:.2} = {:.2} MPa",
                material.kmod, x_k, material.gamma_m, x_d
            ),
        )
    };

    let fm_d = design_strength(material.fm_k_mpa, material.kmod, material.gamma_m)?;
    let ft_0_d = design_strength(material.ft_0_k_mpa, material.kmod, material.gamma_m)?;
    let fc_0_d = design_strength(material.fc_0_k_mpa, material.kmod, material.gamma_m)?;

    Ok(DesignStrengths {
        fm_d: trace("fm,d", "fm,k", material.fm_k_mpa, fm_d),
        ft_0_d: trace("ft,0,d", "ft,0,k", material.ft_0_k_mpa, ft_0_d),
        fc_0_d: trace("fc,0,d", "fc,0,k", material.fc_0_k_mpa, fc_0_d),
    })
}

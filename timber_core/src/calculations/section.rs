//! # Cross-Section Properties
//!
//! Geometric properties of solid rectangular timber sections:
//!
//! ```text
//!     ┌─────────┐
//!     │         │
//!   h │ ════════│ ← neutral axis at h/2
//!     │         │
//!     └─────────┘
//!          b
//! ```
//!
//! - Area `A = b × h`
//! - Second moment of area `I = b × h³ / 12`
//! - Section modulus `W = I / (h/2) = b × h² / 6`
//! - Radius of gyration `i = √(I/A)`
//!
//! These are pure functions of the dimensions; nothing is cached, so each
//! call is independent of every other.

use serde::{Deserialize, Serialize};

use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};
use crate::units::{Meters, Millimeters};

/// A rectangular cross-section, dimensions in metres.
///
/// ## JSON Example
///
/// ```json
/// { "width_m": 0.1, "height_m": 0.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    /// Section width b, m
    pub width_m: f64,

    /// Section height (depth) h, m
    pub height_m: f64,
}

impl CrossSection {
    /// Create a section, rejecting non-positive dimensions.
    pub fn new(width_m: f64, height_m: f64) -> EngineResult<Self> {
        let section = CrossSection { width_m, height_m };
        section.validate()?;
        Ok(section)
    }

    /// Create from millimetre dimensions (caller boundary conversion).
    ///
    /// # Example
    /// ```
    /// use timber_core::calculations::section::CrossSection;
    ///
    /// let rafter = CrossSection::from_millimeters(100.0, 200.0).unwrap();
    /// assert_eq!(rafter.width_m, 0.1);
    /// ```
    pub fn from_millimeters(width_mm: f64, height_mm: f64) -> EngineResult<Self> {
        CrossSection::new(
            Meters::from(Millimeters(width_mm)).0,
            Meters::from(Millimeters(height_mm)).0,
        )
    }

    /// Validate dimensions
    pub fn validate(&self) -> EngineResult<()> {
        if self.width_m <= 0.0 || !self.width_m.is_finite() {
            return Err(EngineError::invalid_section("width_m", self.width_m));
        }
        if self.height_m <= 0.0 || !self.height_m.is_finite() {
            return Err(EngineError::invalid_section("height_m", self.height_m));
        }
        Ok(())
    }

    /// Cross-sectional area A = b × h (m²)
    pub fn area_m2(&self) -> f64 {
        self.width_m * self.height_m
    }

    /// Second moment of area I = b × h³ / 12 (m⁴)
    pub fn moment_of_inertia_m4(&self) -> f64 {
        self.width_m * self.height_m.powi(3) / 12.0
    }

    /// Section modulus W = b × h² / 6 (m³)
    pub fn section_modulus_m3(&self) -> f64 {
        self.width_m * self.height_m.powi(2) / 6.0
    }

    /// Radius of gyration i = √(I/A) (m)
    pub fn radius_of_gyration_m(&self) -> f64 {
        (self.moment_of_inertia_m4() / self.area_m2()).sqrt()
    }

    /// Display label in millimetres (e.g. "100×200 mm")
    pub fn label_mm(&self) -> String {
        format!(
            "{:.0}×{:.0} mm",
            Millimeters::from(Meters(self.width_m)).0,
            Millimeters::from(Meters(self.height_m)).0
        )
    }
}

/// Section properties with derivation strings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "area": { "value": 0.02, "derivation": "A = b × h = 100 × 200 = 20000 mm²" },
///   "moment_of_inertia": { "value": 6.667e-5, "derivation": "I = (b × h³)/12 = (100 × 200³)/12 = 66666667 mm⁴" },
///   "section_modulus": { "value": 6.667e-4, "derivation": "W = (b × h²)/6 = (100 × 200²)/6 = 666667 mm³" },
///   "radius_of_gyration": { "value": 0.0577, "derivation": "i = √(I/A) = √(66666667/20000) = 57.7 mm" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Area (m²)
    pub area: Traced,

    /// Second moment of area (m⁴)
    pub moment_of_inertia: Traced,

    /// Section modulus (m³)
    pub section_modulus: Traced,

    /// Radius of gyration (m)
    pub radius_of_gyration: Traced,
}

/// Compute section properties with derivations.
///
/// Values are in metre-based units; derivation strings display in
/// millimetres, the convention used in section tables.
pub fn compute_section_properties(section: &CrossSection) -> EngineResult<SectionProperties> {
    section.validate()?;

    let b_mm = Millimeters::from(Meters(section.width_m)).0;
    let h_mm = Millimeters::from(Meters(section.height_m)).0;

    let area = section.area_m2();
    let inertia = section.moment_of_inertia_m4();
    let modulus = section.section_modulus_m3();
    let gyration = section.radius_of_gyration_m();

    Ok(SectionProperties {
        area: Traced::new(
            area,
            format!(
                "A = b × h = {:.0} × {:.0} = {:.0} mm²",
                b_mm,
                h_mm,
                b_mm * h_mm
            ),
        ),
        moment_of_inertia: Traced::new(
            inertia,
            format!(
                "I = (b × h³)/12 = ({:.0} × {:.0}³)/12 = {:.0} mm⁴",
                b_mm,
                h_mm,
                b_mm * h_mm.powi(3) / 12.0
            ),
        ),
        section_modulus: Traced::new(
            modulus,
            format!(
                "W = (b × h²)/6 = ({:.0} × {:.0}²)/6 = {:.0} mm³",
                b_mm,
                h_mm,
                b_mm * h_mm.powi(2) / 6.0
            ),
        ),
        radius_of_gyration: Traced::new(
            gyration,
            format!(
                "i = √(I/A) = √({:.0}/{:.0}) = {:.1} mm",
                b_mm * h_mm.powi(3) / 12.0,
                b_mm * h_mm,
                Millimeters::from(Meters(gyration)).0
            ),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rafter_section_round_trip() {
        // width = 0.1 m, height = 0.2 m
        let section = CrossSection::new(0.1, 0.2).unwrap();
        assert!((section.area_m2() - 0.02).abs() < 1e-6);
        assert!((section.moment_of_inertia_m4() - 6.667e-5).abs() < 1e-6);
        assert!((section.section_modulus_m3() - 6.667e-4).abs() < 1e-6);
    }

    #[test]
    fn test_radius_of_gyration() {
        let section = CrossSection::new(0.2, 0.2).unwrap();
        // i = h / √12 for a square section = 0.05774 m
        assert!((section.radius_of_gyration_m() - 0.2 / 12.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_modulus_equals_inertia_over_half_height() {
        let section = CrossSection::new(0.08, 0.16).unwrap();
        let w = section.moment_of_inertia_m4() / (section.height_m / 2.0);
        assert!((section.section_modulus_m3() - w).abs() < 1e-15);
    }

    #[test]
    fn test_from_millimeters() {
        let section = CrossSection::from_millimeters(80.0, 160.0).unwrap();
        assert!((section.width_m - 0.08).abs() < 1e-12);
        assert!((section.height_m - 0.16).abs() < 1e-12);
        assert_eq!(section.label_mm(), "80×160 mm");
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        assert_eq!(
            CrossSection::new(0.0, 0.2).unwrap_err().error_code(),
            "INVALID_SECTION"
        );
        assert_eq!(
            CrossSection::new(0.1, -0.2).unwrap_err().error_code(),
            "INVALID_SECTION"
        );
    }

    #[test]
    fn test_properties_derivations() {
        let section = CrossSection::new(0.1, 0.2).unwrap();
        let props = compute_section_properties(&section).unwrap();
        assert_eq!(props.area.derivation, "A = b × h = 100 × 200 = 20000 mm²");
        assert!(props.section_modulus.derivation.contains("666667 mm³"));
        assert!((props.area.value - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_independent_calls_no_shared_state() {
        // Two different sections back to back must not contaminate each other
        let a = compute_section_properties(&CrossSection::new(0.1, 0.2).unwrap()).unwrap();
        let _b = compute_section_properties(&CrossSection::new(0.06, 0.1).unwrap()).unwrap();
        let a_again = compute_section_properties(&CrossSection::new(0.1, 0.2).unwrap()).unwrap();
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let props =
            compute_section_properties(&CrossSection::new(0.1, 0.2).unwrap()).unwrap();
        let json = serde_json::to_string(&props).unwrap();
        let back: SectionProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(props, back);
    }
}

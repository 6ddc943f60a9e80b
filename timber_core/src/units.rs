//! # Unit Types
//!
//! Type-safe wrappers for engineering units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64
//! wrappers).
//!
//! ## Unit Convention (the engine's contract)
//!
//! The engine works in SI-derived metric units throughout:
//! - Length: metres (m); millimetres (mm) only at the caller boundary
//! - Area load: kilonewtons per square metre (kN/m²)
//! - Line load: kilonewtons per metre (kN/m)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-metres (kNm)
//! - Stress and strength: megapascals (MPa = N/mm²)
//!
//! Callers holding millimetre-scaled geometry (e.g. a 200 mm column size)
//! must convert before calling, via `Millimeters(200.0).into()`. Every
//! cross-unit seam inside the engine goes through a named conversion in
//! this module; there are no bare scale-factor literals in the formulas.
//! The most error-prone seam, moment over section modulus, is
//! [`bending_stress_mpa`].
//!
//! ## Example
//!
//! ```rust
//! use timber_core::units::{Meters, Millimeters};
//!
//! let column: Meters = Millimeters(200.0).into();
//! assert_eq!(column.0, 0.2);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloPascals(pub f64);

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

impl From<KiloPascals> for MegaPascals {
    fn from(kpa: KiloPascals) -> Self {
        MegaPascals(kpa.0 / 1000.0)
    }
}

impl From<MegaPascals> for KiloPascals {
    fn from(mpa: MegaPascals) -> Self {
        KiloPascals(mpa.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

/// Moment in newton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

impl From<KiloNewtonMeters> for NewtonMeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMeters(knm.0 * 1000.0)
    }
}

impl From<NewtonMeters> for KiloNewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        KiloNewtonMeters(nm.0 / 1000.0)
    }
}

// ============================================================================
// Named seam conversions
// ============================================================================

/// Bending stress from a moment in kNm and a section modulus in m³.
///
/// σ = M / W yields kN/m² = kPa; the result is returned in MPa, the unit
/// all strengths are expressed in. This is the unit seam where the
/// original mixed-unit formulation went wrong, so it lives here under a
/// name rather than as an inline factor.
pub fn bending_stress_mpa(moment_knm: f64, section_modulus_m3: f64) -> f64 {
    MegaPascals::from(KiloPascals(moment_knm / section_modulus_m3)).0
}

/// Axial stress from a force in kN and an area in m².
///
/// σ = N / A yields kPa; returned in MPa.
pub fn axial_stress_mpa(force_kn: f64, area_m2: f64) -> f64 {
    MegaPascals::from(KiloPascals(force_kn / area_m2)).0
}

/// Moment in N·mm from kNm (display convention for stress derivations)
pub fn moment_newton_millimeters(moment_knm: f64) -> f64 {
    let nm = NewtonMeters::from(KiloNewtonMeters(moment_knm)).0;
    nm * Millimeters::from(Meters(1.0)).0
}

/// Length in mm from m (display convention for deflections)
pub fn meters_to_millimeters(value_m: f64) -> f64 {
    Millimeters::from(Meters(value_m)).0
}

/// Section modulus in mm³ from m³ (display convention for section tables)
pub fn cubic_meters_to_cubic_millimeters(value_m3: f64) -> f64 {
    value_m3 * Millimeters::from(Meters(1.0)).0.powi(3)
}

/// Area in mm² from m²
pub fn square_meters_to_square_millimeters(value_m2: f64) -> f64 {
    value_m2 * Millimeters::from(Meters(1.0)).0.powi(2)
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(KiloPascals);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(KiloNewtonMeters);
impl_arithmetic!(NewtonMeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let m = Meters(0.2);
        let mm: Millimeters = m.into();
        assert_eq!(mm.0, 200.0);
    }

    #[test]
    fn test_millimeters_to_meters() {
        let mm = Millimeters(265.0);
        let m: Meters = mm.into();
        assert!((m.0 - 0.265).abs() < 1e-12);
    }

    #[test]
    fn test_kilonewtons_to_newtons() {
        let kn = KiloNewtons(9.27);
        let n: Newtons = kn.into();
        assert!((n.0 - 9270.0).abs() < 1e-9);
    }

    #[test]
    fn test_kilopascals_to_megapascals() {
        let kpa = KiloPascals(3880.0);
        let mpa: MegaPascals = kpa.into();
        assert!((mpa.0 - 3.88).abs() < 1e-12);
    }

    #[test]
    fn test_bending_stress_seam() {
        // M = 2.0 kNm over W = 6.667e-4 m³ -> 3000 kPa = 3.0 MPa
        let sigma = bending_stress_mpa(2.0, 2.0 / 3000.0);
        assert!((sigma - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_axial_stress_seam() {
        // N = 10 kN over A = 0.02 m² -> 500 kPa = 0.5 MPa
        let sigma = axial_stress_mpa(10.0, 0.02);
        assert!((sigma - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(1.5) + Meters(0.5);
        assert_eq!(a.value(), 2.0);
        let b = KiloNewtons::new(4.0) * 1.5;
        assert_eq!(b.0, 6.0);
    }
}

//! # Thermal Transmittance (EN ISO 6946)
//!
//! Layer-by-layer thermal resistance of a building assembly:
//!
//! ```text
//! R_layer = d / λ               d thickness (m), λ conductivity (W/mK)
//! R_total = Rsi + ΣR_layer + Rse
//! U       = 1 / R_total         W/m²K
//! ```
//!
//! Surface resistances follow the standard horizontal-flow value for walls
//! (Rsi = 0.13) and upward flow for roofs (Rsi = 0.10); Rse = 0.04 for both.

use serde::{Deserialize, Serialize};

use crate::derivation::Traced;
use crate::errors::{EngineError, EngineResult};

/// Internal surface resistance, horizontal heat flow (walls), m²K/W
pub const R_SI_WALL: f64 = 0.13;
/// Internal surface resistance, upward heat flow (roofs), m²K/W
pub const R_SI_ROOF: f64 = 0.10;
/// External surface resistance, m²K/W
pub const R_SE: f64 = 0.04;

/// One homogeneous material layer in a building assembly.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "Mineral wool",
///   "thickness_m": 0.15,
///   "conductivity_w_mk": 0.035
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalLayer {
    /// Material name, used in derivation strings
    pub material: String,

    /// Layer thickness, m
    pub thickness_m: f64,

    /// Thermal conductivity λ, W/mK
    pub conductivity_w_mk: f64,
}

impl ThermalLayer {
    pub fn new(material: impl Into<String>, thickness_m: f64, conductivity_w_mk: f64) -> Self {
        Self {
            material: material.into(),
            thickness_m,
            conductivity_w_mk,
        }
    }

    /// Validate the layer parameters
    pub fn validate(&self) -> EngineResult<()> {
        if self.thickness_m <= 0.0 || !self.thickness_m.is_finite() {
            return Err(EngineError::invalid_layer(
                &self.material,
                "thickness_m",
                self.thickness_m,
            ));
        }
        if self.conductivity_w_mk <= 0.0 || !self.conductivity_w_mk.is_finite() {
            return Err(EngineError::invalid_layer(
                &self.material,
                "conductivity_w_mk",
                self.conductivity_w_mk,
            ));
        }
        Ok(())
    }

    /// Layer resistance R = d/λ, m²K/W
    pub fn resistance(&self) -> f64 {
        self.thickness_m / self.conductivity_w_mk
    }
}

/// A layered assembly with its boundary surface resistances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalAssembly {
    /// Assembly name, e.g. "External wall"
    pub name: String,

    /// Layers ordered inside to outside
    pub layers: Vec<ThermalLayer>,

    /// Internal surface resistance Rsi, m²K/W
    pub r_si: f64,

    /// External surface resistance Rse, m²K/W
    pub r_se: f64,
}

impl ThermalAssembly {
    pub fn new(name: impl Into<String>, layers: Vec<ThermalLayer>, r_si: f64, r_se: f64) -> Self {
        Self {
            name: name.into(),
            layers,
            r_si,
            r_se,
        }
    }

    /// External wall: masonry plus mineral wool
    pub fn wall(wall_thickness_m: f64, insulation_thickness_m: f64) -> Self {
        Self::new(
            "External wall",
            vec![
                ThermalLayer::new("Masonry", wall_thickness_m, 0.33),
                ThermalLayer::new("Mineral wool", insulation_thickness_m, 0.035),
            ],
            R_SI_WALL,
            R_SE,
        )
    }

    /// Roof build-up: steel tile over insulated timber deck
    pub fn roof() -> Self {
        Self::new(
            "Roof",
            vec![
                ThermalLayer::new("Steel tile", 0.0006, 50.0),
                ThermalLayer::new("Mineral wool", 0.20, 0.04),
                ThermalLayer::new("Timber deck", 0.10, 0.13),
            ],
            R_SI_ROOF,
            R_SE,
        )
    }

    /// Validate surface resistances and every layer
    pub fn validate(&self) -> EngineResult<()> {
        if self.r_si <= 0.0 || !self.r_si.is_finite() {
            return Err(EngineError::invalid_layer(&self.name, "r_si", self.r_si));
        }
        if self.r_se <= 0.0 || !self.r_se.is_finite() {
            return Err(EngineError::invalid_layer(&self.name, "r_se", self.r_se));
        }
        if self.layers.is_empty() {
            return Err(EngineError::invalid_input(
                "layers",
                "[]",
                "Assembly must contain at least one layer",
            ));
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }
}

/// Thermal transmittance result for one assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalResult {
    /// Assembly name
    pub assembly: String,

    /// Per-layer resistances, in layer order
    pub layer_resistances: Vec<Traced>,

    /// Total resistance Rsi + ΣR + Rse, m²K/W
    pub total_resistance: Traced,

    /// Thermal transmittance U = 1/R_total, W/m²K
    pub u_value: Traced,
}

/// Compute layer resistances, total resistance, and U-value.
pub fn compute_thermal_resistance(assembly: &ThermalAssembly) -> EngineResult<ThermalResult> {
    assembly.validate()?;

    let mut layer_resistances = Vec::with_capacity(assembly.layers.len());
    let mut sum = 0.0;
    for layer in &assembly.layers {
        let r = layer.resistance();
        sum += r;
        layer_resistances.push(Traced::new(
            r,
            format!(
                "R({}) = d/λ = {:.4}/{:.3} = {:.3} m²K/W",
                layer.material, layer.thickness_m, layer.conductivity_w_mk, r
            ),
        ));
    }

    let r_total = assembly.r_si + sum + assembly.r_se;
    let total_resistance = Traced::new(
        r_total,
        format!(
            "R_total = Rsi + ΣR + Rse = {:.2} + {:.3} + {:.2} = {:.3} m²K/W",
            assembly.r_si, sum, assembly.r_se, r_total
        ),
    );

    let u = 1.0 / r_total;
    let u_value = Traced::new(
        u,
        format!("U = 1/R_total = 1/{:.3} = {:.3} W/m²K", r_total, u),
    );

    Ok(ThermalResult {
        assembly: assembly.name.clone(),
        layer_resistances,
        total_resistance,
        u_value,
    })
}

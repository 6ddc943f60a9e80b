//! # Building Configuration
//!
//! Fixed geometric inputs for a single pitched-roof, column-and-rafter
//! building with insulated masonry walls. The configuration is created once,
//! validated, and never mutated; every calculation reads from it.
//!
//! All lengths are in metres (see [`crate::units`]). Callers with
//! millimetre-scaled geometry convert at the boundary:
//!
//! ```rust
//! use timber_core::config::BuildingConfig;
//! use timber_core::units::{Meters, Millimeters};
//!
//! let wall: Meters = Millimeters(220.0).into();
//! let config = BuildingConfig {
//!     wall_thickness_m: wall.0,
//!     ..BuildingConfig::sample()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Geometric configuration of the building, immutable after construction.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_m": 7.2,
///   "length1_m": 6.6,
///   "length2_m": 10.8,
///   "height1_m": 2.5,
///   "height2_m": 2.65,
///   "roof_angle_deg": 16.0,
///   "spacing_m": 1.1,
///   "ground_level_m": -1.4,
///   "wall_thickness_m": 0.22,
///   "insulation_thickness_m": 0.15,
///   "column_size_m": 0.2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    /// Building width (the rafter pair's horizontal span), m
    pub width_m: f64,

    /// Length of the lower building section, m
    pub length1_m: f64,

    /// Length of the taller building section, m
    pub length2_m: f64,

    /// Eaves wall height, m
    pub height1_m: f64,

    /// Ridge-side wall height, m
    pub height2_m: f64,

    /// Roof pitch angle, degrees; strictly between 0° and 80°
    pub roof_angle_deg: f64,

    /// Rafter spacing (tributary width), m
    pub spacing_m: f64,

    /// Ground level relative to the finished floor, m (may be negative)
    pub ground_level_m: f64,

    /// Masonry wall thickness, m
    pub wall_thickness_m: f64,

    /// Wall insulation thickness, m
    pub insulation_thickness_m: f64,

    /// Square column side length, m
    pub column_size_m: f64,
}

impl BuildingConfig {
    /// The worked example building: 7.2 m wide, 16° roof, 1.1 m rafter
    /// spacing, MAX-220 masonry walls with 150 mm mineral wool.
    pub fn sample() -> Self {
        BuildingConfig {
            width_m: 7.2,
            length1_m: 6.6,
            length2_m: 10.8,
            height1_m: 2.5,
            height2_m: 2.65,
            roof_angle_deg: 16.0,
            spacing_m: 1.1,
            ground_level_m: -1.4,
            wall_thickness_m: 0.22,
            insulation_thickness_m: 0.15,
            column_size_m: 0.2,
        }
    }

    /// Validate the configuration.
    ///
    /// A zero roof angle would make the rafter axial-force formula divide
    /// by `tan(0)`, so it is rejected here as [`EngineError::DegenerateGeometry`]
    /// rather than letting infinity propagate downstream.
    pub fn validate(&self) -> EngineResult<()> {
        let positive = [
            ("width_m", self.width_m),
            ("length1_m", self.length1_m),
            ("length2_m", self.length2_m),
            ("height1_m", self.height1_m),
            ("height2_m", self.height2_m),
            ("spacing_m", self.spacing_m),
            ("wall_thickness_m", self.wall_thickness_m),
            ("insulation_thickness_m", self.insulation_thickness_m),
            ("column_size_m", self.column_size_m),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(EngineError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        if self.roof_angle_deg <= 0.0 {
            return Err(EngineError::degenerate_geometry(
                "roof angle",
                "angle must be greater than 0° (tan(0) would zero the axial-force denominator)",
            ));
        }
        if self.roof_angle_deg >= 80.0 {
            return Err(EngineError::invalid_input(
                "roof_angle_deg",
                self.roof_angle_deg.to_string(),
                "Roof angle must be below 80°",
            ));
        }
        Ok(())
    }

    /// Roof angle in radians
    pub fn roof_angle_rad(&self) -> f64 {
        self.roof_angle_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        assert!(BuildingConfig::sample().validate().is_ok());
    }

    #[test]
    fn test_zero_angle_is_degenerate() {
        let config = BuildingConfig {
            roof_angle_deg: 0.0,
            ..BuildingConfig::sample()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
    }

    #[test]
    fn test_negative_width_rejected() {
        let config = BuildingConfig {
            width_m: -7.2,
            ..BuildingConfig::sample()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_ground_level_allowed() {
        let config = BuildingConfig {
            ground_level_m: -1.4,
            ..BuildingConfig::sample()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = BuildingConfig::sample();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let roundtrip: BuildingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, roundtrip);
    }

    #[test]
    fn test_roof_angle_rad() {
        let config = BuildingConfig::sample();
        assert!((config.roof_angle_rad() - 16.0_f64.to_radians()).abs() < 1e-12);
    }
}

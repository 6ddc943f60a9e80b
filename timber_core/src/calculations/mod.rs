//! # Structural and Thermal Calculations
//!
//! Each analysis step follows the same pattern:
//!
//! - Input types (JSON-serializable) validated up front
//! - `*Result` types pairing every number with its [`Traced`] derivation
//! - Pure `compute_*`/`analyze_*`/`check_*` functions returning
//!   `EngineResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`section`] - Rectangular cross-section properties
//! - [`member`] - Member force resolution (rafter, purlin, brace)
//! - [`stress`] - Combined bending and compression checks
//! - [`buckling`] - Column flexural buckling (EN 1995-1-1 §6.3.2)
//! - [`deflection`] - Serviceability deflection against L/300
//! - [`thermal`] - Assembly U-values (EN ISO 6946)
//!
//! [`Traced`]: crate::derivation::Traced

pub mod buckling;
pub mod deflection;
pub mod member;
pub mod section;
pub mod stress;
pub mod thermal;

// Re-export commonly used types
pub use buckling::{analyze_column_buckling, BucklingResult, ColumnInput};
pub use deflection::{check_deflection, DeflectionResult};
pub use member::{compute_member_forces, MemberForceResult, MemberKind};
pub use section::{compute_section_properties, CrossSection, SectionProperties};
pub use stress::{compute_stresses, StressResult};
pub use thermal::{compute_thermal_resistance, ThermalAssembly, ThermalLayer, ThermalResult};

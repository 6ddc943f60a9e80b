//! # timber_core - Timber-Frame Verification Engine
//!
//! `timber_core` verifies a pitched-roof timber-framed building against
//! Eurocode 5 (EN 1995-1-1) and EN ISO 6946: site loads and ULS
//! combinations, member forces, stress and stability checks, buckling,
//! serviceability deflection, and envelope U-values. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Traceable**: Every computed number carries its derivation string,
//!   so a report reads like a hand calculation
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic**: The same project always serializes to the same
//!   report, byte for byte
//!
//! ## Quick Start
//!
//! ```rust
//! use timber_core::project::Project;
//! use timber_core::verify::verify;
//!
//! let project = Project::sample("Barn retrofit");
//! let report = verify(&project).unwrap();
//!
//! assert!(report.overall_result);
//! println!("{}", report.loads.design_load.derivation);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project container: geometry, grade, trial sections
//! - [`verify`] - The full verification pipeline and report
//! - [`loads`] - Characteristic loads and ULS combinations
//! - [`calculations`] - Section, member, stress, buckling, deflection,
//!   and thermal analyses
//! - [`materials`] - Strength classes and design strengths
//! - [`config`] - Building geometry
//! - [`derivation`] - Value-with-derivation pairing
//! - [`units`] - Type-safe unit wrappers and named conversions
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod derivation;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;
pub mod verify;

// Re-export commonly used types at crate root for convenience
pub use config::BuildingConfig;
pub use derivation::Traced;
pub use errors::{EngineError, EngineResult};
pub use materials::{MaterialProperties, TimberGrade};
pub use project::{MemberSections, Project};
pub use verify::{verify, VerificationReport};

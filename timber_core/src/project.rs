//! # Project Data Structures
//!
//! The `Project` struct is the root container for one building verification:
//! geometry, climate parameters, timber grade, and the trial sections for
//! each member. Projects serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── label: String (job name)
//! ├── config: BuildingConfig (geometry)
//! ├── grade: TimberGrade (strength class)
//! ├── load_parameters: LoadParameters (climate and surface loads)
//! └── sections: MemberSections (trial cross-sections per member)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use timber_core::project::Project;
//!
//! let project = Project::sample("Barn retrofit");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! let back: Project = serde_json::from_str(&json).unwrap();
//! assert_eq!(back.label, "Barn retrofit");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::member::{BRACE_ANGLE_DEG, BRACE_LENGTH_M, PURLIN_SPAN_M};
use crate::calculations::section::CrossSection;
use crate::config::BuildingConfig;
use crate::errors::EngineResult;
use crate::loads::LoadParameters;
use crate::materials::TimberGrade;

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Trial cross-sections for each verified member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSections {
    /// Rafter section
    pub rafter: CrossSection,

    /// Purlin section
    pub purlin: CrossSection,

    /// Diagonal brace section
    pub brace: CrossSection,

    /// Ground-floor column section
    pub column: CrossSection,

    /// Purlin span between supports, m
    pub purlin_span_m: f64,

    /// Brace inclination from the rafter axis, degrees
    pub brace_angle_deg: f64,

    /// Brace length between connections, m
    pub brace_length_m: f64,
}

impl Default for MemberSections {
    fn default() -> Self {
        MemberSections {
            rafter: CrossSection {
                width_m: 0.10,
                height_m: 0.20,
            },
            purlin: CrossSection {
                width_m: 0.08,
                height_m: 0.16,
            },
            brace: CrossSection {
                width_m: 0.06,
                height_m: 0.10,
            },
            column: CrossSection {
                width_m: 0.20,
                height_m: 0.20,
            },
            purlin_span_m: PURLIN_SPAN_M,
            brace_angle_deg: BRACE_ANGLE_DEG,
            brace_length_m: BRACE_LENGTH_M,
        }
    }
}

impl MemberSections {
    /// Validate every trial section
    pub fn validate(&self) -> EngineResult<()> {
        self.rafter.validate()?;
        self.purlin.validate()?;
        self.brace.validate()?;
        self.column.validate()
    }
}

/// Root project container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Schema version of the serialized form
    pub version: String,

    /// Job name
    pub label: String,

    /// Building geometry
    pub config: BuildingConfig,

    /// Timber strength class for all members
    pub grade: TimberGrade,

    /// Climate and surface load parameters
    pub load_parameters: LoadParameters,

    /// Trial member sections
    pub sections: MemberSections,
}

impl Project {
    /// Create a project with explicit geometry and grade.
    pub fn new(
        label: impl Into<String>,
        config: BuildingConfig,
        grade: TimberGrade,
        load_parameters: LoadParameters,
        sections: MemberSections,
    ) -> Self {
        Project {
            version: SCHEMA_VERSION.to_string(),
            label: label.into(),
            config,
            grade,
            load_parameters,
            sections,
        }
    }

    /// Reference project: the sample barn geometry, C27 timber, Warsaw
    /// climate, default trial sections.
    pub fn sample(label: impl Into<String>) -> Self {
        Project::new(
            label,
            BuildingConfig::sample(),
            TimberGrade::C27,
            LoadParameters::warsaw(),
            MemberSections::default(),
        )
    }

    /// Validate geometry, load parameters, and sections together.
    pub fn validate(&self) -> EngineResult<()> {
        self.config.validate()?;
        self.load_parameters.validate()?;
        self.sections.validate()
    }
}

//! Build errors for hierarchy declarations.

use thiserror::Error;

/// One problem found while validating a hierarchy declaration.
///
/// Validation collects every violation instead of stopping at the first one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HierarchyViolation {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' is not a top-level state")]
    InitialNotTopLevel { state: String },

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("Region '{region}' is bound more than once")]
    DuplicateRegion { region: String },

    #[error("State '{state}' names unknown parent '{parent}'")]
    UnknownParent { state: String, parent: String },

    #[error("State '{state}' cannot nest inside leaf state '{parent}'")]
    LeafParent { state: String, parent: String },

    #[error("State '{state}' must be placed in a region of orthogonal state '{parent}'")]
    OrthogonalParent { state: String, parent: String },

    #[error("'{state}' declares initial state '{initial}' which is not one of its children")]
    InitialNotChild { state: String, initial: String },

    #[error("Orthogonal state '{state}' declares {count} region(s), at least 2 are required")]
    TooFewRegions { state: String, count: usize },

    #[error("Parent chain of '{state}' is cyclic")]
    Cycle { state: String },

    #[error("State '{state}' is never declared")]
    Undeclared { state: String },
}

/// Errors that can occur when building a hierarchy.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid hierarchy: {}", summarize(.0))]
    Invalid(Vec<HierarchyViolation>),

    #[error("Hierarchy declaration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BuildError {
    /// Violations behind an `Invalid` error; empty for parse errors.
    pub fn violations(&self) -> &[HierarchyViolation] {
        match self {
            BuildError::Invalid(violations) => violations,
            BuildError::Parse(_) => &[],
        }
    }
}

fn summarize(violations: &[HierarchyViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Builder API for hierarchy declarations.
//!
//! This module turns a static declaration of the state tree into the
//! validated table the engine consumes, and provides macros for declaring
//! tag and event enums with minimal boilerplate.

pub mod error;
pub mod hierarchy;
pub mod macros;

pub use error::{BuildError, HierarchyViolation};
pub use hierarchy::{Declaration, HierarchyBuilder, RegionDeclaration, Shape};

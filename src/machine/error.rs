//! Runtime errors.

use crate::machine::lifecycle::{Lifecycle, Operation};
use thiserror::Error;

/// Errors that can occur while running a machine.
///
/// All of them are programming errors; an event nobody handles is not an
/// error but [`DispatchOutcome::Ignored`](crate::machine::DispatchOutcome).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Cannot {operation} a machine that is {lifecycle}")]
    InvalidLifecycle {
        operation: Operation,
        lifecycle: Lifecycle,
    },

    /// Only a table that did not come from `HierarchyBuilder::build` can
    /// name a state it does not describe.
    #[error("State '{state}' is not part of the hierarchy")]
    UnknownState { state: String },

    #[error("More than {limit} deferred events in one call; the remaining queue was dropped")]
    DeferredOverflow { limit: usize },
}

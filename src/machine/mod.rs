//! Running machines.
//!
//! A [`Machine`] owns a validated hierarchy, a user context and the
//! top-level [`Region`]. The engine behind it enters, exits and dispatches
//! with UML statechart semantics:
//!
//! - Events are handled by the deepest active state first and bubble up
//! - Orthogonal regions all receive an event; it bubbles past their owner
//!   only when every region ignored it
//! - Transitions exit up to the common ancestor, run their action, then
//!   enter down to the target and cascade initial children

mod config;
mod engine;
mod error;
mod lifecycle;
mod region;
mod runtime;

pub use config::MachineConfig;
pub use error::MachineError;
pub use lifecycle::{Lifecycle, Operation};
pub use region::Region;
pub use runtime::{DispatchOutcome, Machine};

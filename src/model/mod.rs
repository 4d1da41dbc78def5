//! Static hierarchy model.
//!
//! The engine consumes an immutable table describing, for every state, its
//! parent, its shape and its ancestor chain. Tables are produced by the
//! `builder` module and never change once a machine exists.

mod descriptor;
mod hierarchy;

pub use descriptor::{StateDescriptor, StateKind};
pub use hierarchy::Hierarchy;

//! Core types of the engine.
//!
//! This module contains the vocabulary every other layer speaks:
//! - State tags via the `State` trait
//! - Event envelopes via the `Event` trait
//! - State behaviour via the `Node` trait and its `Response`
//! - Bounded transition history

mod event;
mod history;
mod node;
mod state;

pub use event::Event;
pub use history::{TransitionHistory, TransitionRecord};
pub use node::{Action, Node, Response, Scope, Transition};
pub use state::State;

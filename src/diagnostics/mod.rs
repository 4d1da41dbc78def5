//! Diagnostics surface.
//!
//! The machine reports what it does through the [`Diagnostics`] trait. None
//! of it is needed for correctness; it exists for logging and for tests that
//! assert on exact traces.
//!
//! - [`TracingDiagnostics`] forwards everything to `tracing` (the default)
//! - [`Recorder`] keeps every notification in memory
//! - [`Silent`] drops everything

mod recorder;

pub use recorder::{Notification, Recorder};

use crate::core::State;
use tracing::{debug, trace};

/// Observer of machine activity.
///
/// Every method defaults to doing nothing.
pub trait Diagnostics<S: State>: Send {
    /// `state` was constructed and its entry hook ran.
    fn state_entered(&mut self, _state: S) {}

    /// `state`'s exit hook ran and its value was dropped.
    fn state_exited(&mut self, _state: S) {}

    /// An orthogonal region is about to enter its first state.
    fn region_started(&mut self, _region: S) {}

    /// An orthogonal region has exited all of its states.
    fn region_stopped(&mut self, _region: S) {}

    /// `state`'s handler consumed `event`.
    fn event_accepted(&mut self, _event: &str, _state: S) {}

    /// Nothing in `region` consumed `event`; `None` is the machine's top-level
    /// region, meaning the event went unhandled.
    fn event_ignored(&mut self, _event: &str, _region: Option<S>) {}

    /// A transition finished its leave phase and is about to run its action.
    fn transition_started(&mut self, _source: S, _target: S) {}
}

/// Diagnostics sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl<S: State> Diagnostics<S> for Silent {}

/// Diagnostics sink logging through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl<S: State> Diagnostics<S> for TracingDiagnostics {
    fn state_entered(&mut self, state: S) {
        debug!(state = state.name(), "enter");
    }

    fn state_exited(&mut self, state: S) {
        debug!(state = state.name(), "exit");
    }

    fn region_started(&mut self, region: S) {
        trace!(region = region.name(), "start region");
    }

    fn region_stopped(&mut self, region: S) {
        trace!(region = region.name(), "stop region");
    }

    fn event_accepted(&mut self, event: &str, state: S) {
        trace!(event, state = state.name(), "event accepted");
    }

    fn event_ignored(&mut self, event: &str, region: Option<S>) {
        match region {
            Some(region) => trace!(event, region = region.name(), "event ignored by region"),
            None => debug!(event, "event ignored"),
        }
    }

    fn transition_started(&mut self, source: S, target: S) {
        trace!(source = source.name(), target = target.name(), "transition");
    }
}

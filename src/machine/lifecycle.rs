//! Lifecycle of a machine: `Unstarted → Running → Stopped`.

use crate::machine::error::MachineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a machine is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Built, no state entered yet.
    Unstarted,
    /// Started; events may be dispatched.
    Running,
    /// Stopped for good.
    Stopped,
}

/// Operation requested on a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Start,
    Stop,
    Dispatch,
}

impl Lifecycle {
    /// Lifecycle after `operation`, or the misuse it represents.
    pub(crate) fn advance(self, operation: Operation) -> Result<Lifecycle, MachineError> {
        match (self, operation) {
            (Lifecycle::Unstarted, Operation::Start) => Ok(Lifecycle::Running),
            (Lifecycle::Running, Operation::Dispatch) => Ok(Lifecycle::Running),
            (Lifecycle::Running, Operation::Stop) => Ok(Lifecycle::Stopped),
            (lifecycle, operation) => Err(MachineError::InvalidLifecycle {
                operation,
                lifecycle,
            }),
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lifecycle::Unstarted => "unstarted",
            Lifecycle::Running => "running",
            Lifecycle::Stopped => "stopped",
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Dispatch => "dispatch to",
        })
    }
}

//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Tunables of a [`Machine`](crate::machine::Machine).
///
/// Missing fields fall back to their defaults when read from JSON.
///
/// # Example
///
/// ```rust
/// use stratum::machine::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_capacity": 8 }"#).unwrap();
/// assert_eq!(config.history_capacity, 8);
/// assert_eq!(config.max_deferred_events, MachineConfig::default().max_deferred_events);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Deferred events processed per `start`/`dispatch` call before giving up
    pub max_deferred_events: usize,
    /// Transition records retained; zero disables the history
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_deferred_events: 256,
            history_capacity: 64,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn max_deferred_events(mut self, limit: usize) -> Self {
        self.max_deferred_events = limit;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

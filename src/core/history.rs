//! Transition history.
//!
//! The machine keeps a bounded, in-memory log of the transitions it has
//! taken. It is an observation aid only; nothing is persisted.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single transition.
///
/// # Example
///
/// ```rust
/// use stratum::core::TransitionRecord;
/// use stratum::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase {
///         Warmup,
///         Run,
///     }
/// }
///
/// let record = TransitionRecord {
///     event: "Start".to_string(),
///     source: Phase::Warmup,
///     target: Phase::Run,
///     lca: None,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.target, Phase::Run);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// Name of the event whose handler requested the transition
    pub event: String,
    /// Deepest active state of the handling region when the transition began
    pub source: S,
    /// Destination state
    pub target: S,
    /// Lowest common ancestor; `None` when it is the machine root
    pub lca: Option<S>,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of transitions.
///
/// Once `capacity` records are held, recording drops the oldest one. A
/// capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use stratum::core::{TransitionHistory, TransitionRecord};
/// use stratum::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Step {
///         One,
///         Two,
///         Three,
///     }
/// }
///
/// let mut history = TransitionHistory::with_capacity(8);
/// history.record(TransitionRecord {
///     event: "Next".to_string(),
///     source: Step::One,
///     target: Step::Two,
///     lca: None,
///     timestamp: Utc::now(),
/// });
/// history.record(TransitionRecord {
///     event: "Next".to_string(),
///     source: Step::Two,
///     target: Step::Three,
///     lca: None,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&Step::One, &Step::Two, &Step::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<S: State> {
    capacity: usize,
    records: VecDeque<TransitionRecord<S>>,
}

impl<S: State> Default for TransitionHistory<S> {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

impl<S: State> TransitionHistory<S> {
    /// Create an empty history keeping at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// States traversed: the first source, then each target.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.records.front() {
            path.push(&first.source);
        }
        for record in &self.records {
            path.push(&record.target);
        }
        path
    }

    /// Time between the oldest and the newest retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

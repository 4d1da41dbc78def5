//! In-memory diagnostics sink.

use super::Diagnostics;
use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One diagnostics notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Notification<S: State> {
    Entered(S),
    Exited(S),
    RegionStarted(S),
    RegionStopped(S),
    Accepted { event: String, state: S },
    Ignored { event: String, region: Option<S> },
    Transition { source: S, target: S },
}

impl<S: State> fmt::Display for Notification<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Entered(state) => write!(f, "enter {}", state.name()),
            Notification::Exited(state) => write!(f, "exit {}", state.name()),
            Notification::RegionStarted(region) => write!(f, "start {}", region.name()),
            Notification::RegionStopped(region) => write!(f, "stop {}", region.name()),
            Notification::Accepted { event, state } => {
                write!(f, "{} accepted by {}", event, state.name())
            }
            Notification::Ignored {
                event,
                region: Some(region),
            } => write!(f, "{} ignored by {}", event, region.name()),
            Notification::Ignored {
                event,
                region: None,
            } => write!(f, "{event} ignored"),
            Notification::Transition { source, target } => {
                write!(f, "{} -> {}", source.name(), target.name())
            }
        }
    }
}

/// Diagnostics sink that records every notification.
///
/// Clones share the same log, so a test keeps one handle and gives another
/// to the machine.
///
/// # Example
///
/// ```rust
/// use stratum::diagnostics::{Diagnostics, Notification, Recorder};
/// use stratum::state_enum;
///
/// state_enum! {
///     enum Tag {
///         Idle,
///     }
/// }
///
/// let recorder = Recorder::new();
/// let mut sink = recorder.clone();
/// sink.state_entered(Tag::Idle);
///
/// assert_eq!(recorder.notifications(), vec![Notification::Entered(Tag::Idle)]);
/// assert_eq!(recorder.lines(), vec!["enter Idle".to_string()]);
/// ```
pub struct Recorder<S: State> {
    log: Arc<Mutex<Vec<Notification<S>>>>,
}

impl<S: State> Recorder<S> {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn log(&self) -> MutexGuard<'_, Vec<Notification<S>>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, notification: Notification<S>) {
        self.log().push(notification);
    }

    /// Snapshot of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification<S>> {
        self.log().clone()
    }

    /// Notifications rendered with `Display`, one per entry.
    pub fn lines(&self) -> Vec<String> {
        self.log().iter().map(ToString::to_string).collect()
    }

    /// Only the entered/exited notifications, rendered.
    pub fn hooks(&self) -> Vec<String> {
        self.log()
            .iter()
            .filter(|n| matches!(n, Notification::Entered(_) | Notification::Exited(_)))
            .map(ToString::to_string)
            .collect()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.log().clear();
    }
}

impl<S: State> Clone for Recorder<S> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<S: State> Default for Recorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> fmt::Debug for Recorder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("len", &self.log().len())
            .finish()
    }
}

impl<S: State> Diagnostics<S> for Recorder<S> {
    fn state_entered(&mut self, state: S) {
        self.push(Notification::Entered(state));
    }

    fn state_exited(&mut self, state: S) {
        self.push(Notification::Exited(state));
    }

    fn region_started(&mut self, region: S) {
        self.push(Notification::RegionStarted(region));
    }

    fn region_stopped(&mut self, region: S) {
        self.push(Notification::RegionStopped(region));
    }

    fn event_accepted(&mut self, event: &str, state: S) {
        self.push(Notification::Accepted {
            event: event.to_string(),
            state,
        });
    }

    fn event_ignored(&mut self, event: &str, region: Option<S>) {
        self.push(Notification::Ignored {
            event: event.to_string(),
            region,
        });
    }

    fn transition_started(&mut self, source: S, target: S) {
        self.push(Notification::Transition { source, target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Tag {
            Outer,
            Lane,
            Inner,
        }
    }

    #[test]
    fn clones_share_one_log() {
        let recorder = Recorder::new();
        let mut sink = recorder.clone();

        sink.state_entered(Tag::Outer);
        sink.region_started(Tag::Lane);
        sink.state_entered(Tag::Inner);
        sink.event_accepted("Tick", Tag::Inner);
        sink.state_exited(Tag::Inner);

        assert_eq!(recorder.notifications().len(), 5);
        assert_eq!(
            recorder.hooks(),
            vec!["enter Outer", "enter Inner", "exit Inner"]
        );
    }

    #[test]
    fn display_renders_readable_lines() {
        let recorder = Recorder::new();
        let mut sink = recorder.clone();

        sink.event_ignored("Tick", Some(Tag::Lane));
        sink.event_ignored("Tick", None);
        sink.transition_started(Tag::Inner, Tag::Outer);
        sink.region_stopped(Tag::Lane);

        assert_eq!(
            recorder.lines(),
            vec![
                "Tick ignored by Lane",
                "Tick ignored",
                "Inner -> Outer",
                "stop Lane"
            ]
        );

        recorder.clear();
        assert!(recorder.notifications().is_empty());
    }

    #[test]
    fn notifications_serialize() {
        let notification = Notification::Accepted {
            event: "Tick".to_string(),
            state: Tag::Inner,
        };
        let json = serde_json::to_string(&notification).unwrap();
        let back: Notification<Tag> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notification);
    }
}

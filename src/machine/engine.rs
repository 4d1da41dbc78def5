//! Transition engine.
//!
//! The engine borrows everything a machine owns except its top-level region,
//! and walks regions recursively: entering and exiting levels, delivering
//! events bottom-up and resolving transitions.
//!
//! A transition runs in three phases once the handler has returned:
//!
//! 1. Leave: exit levels from the deepest active state upward until one is
//!    an ancestor-or-self of the target. A nested region emptied this way
//!    hands the transition to the region owning it ([`Outcome::Escalate`]).
//! 2. Action: run the optional transition action.
//! 3. Enter: enter levels from below the common ancestor down to the target,
//!    then cascade initial children and start every region reached.

use crate::core::{
    Action, Event, Node, Response, Scope, State, Transition, TransitionHistory, TransitionRecord,
};
use crate::diagnostics::Diagnostics;
use crate::machine::error::MachineError;
use crate::machine::region::{Level, Region};
use crate::model::{Hierarchy, StateKind};
use chrono::Utc;
use std::collections::VecDeque;

/// A transition whose leave phase has not finished yet.
pub(crate) struct Pending<N: Node> {
    event: String,
    source: N::State,
    target: N::State,
    action: Option<Action<N::Context>>,
}

/// Result of delivering an event to one region.
pub(crate) enum Outcome<N: Node> {
    /// No level of the region consumed the event.
    Ignored,
    /// The event was consumed and any transition it caused has completed.
    Consumed,
    /// The region was stopped by a transition leaving it; the owner of the
    /// region must finish it.
    Escalate(Pending<N>),
}

/// Everything a machine owns apart from its top-level region.
pub(crate) struct Engine<'a, N: Node> {
    pub(crate) hierarchy: &'a Hierarchy<N::State>,
    pub(crate) context: &'a mut N::Context,
    pub(crate) deferred: &'a mut VecDeque<N::Event>,
    pub(crate) diagnostics: &'a mut dyn Diagnostics<N::State>,
    pub(crate) history: &'a mut TransitionHistory<N::State>,
}

impl<'a, N: Node> Engine<'a, N> {
    fn kind(&self, state: N::State) -> Result<&'a StateKind<N::State>, MachineError> {
        self.hierarchy
            .kind(state)
            .ok_or_else(|| unknown(state))
    }

    fn ancestors(&self, state: N::State) -> Result<&'a [N::State], MachineError> {
        self.hierarchy
            .ancestors(state)
            .ok_or_else(|| unknown(state))
    }

    fn scope(&mut self, state: N::State) -> Scope<'_, N> {
        Scope::new(state, &mut *self.context, &mut *self.deferred)
    }

    /// Start an idle region, entering `path` (states below the region,
    /// outermost first) and then cascading initial children.
    pub(crate) fn start(
        &mut self,
        region: &mut Region<N>,
        path: &[N::State],
    ) -> Result<(), MachineError> {
        if let Some(tag) = region.tag {
            self.diagnostics.region_started(tag);
        }
        self.enter(region, path)
    }

    /// Exit every level of `region`, deepest first.
    pub(crate) fn stop(&mut self, region: &mut Region<N>) {
        if !region.is_running() {
            return;
        }
        while let Some(level) = region.path.pop() {
            self.exit_level(level);
        }
        if let Some(tag) = region.tag {
            self.diagnostics.region_stopped(tag);
        }
    }

    fn enter(&mut self, region: &mut Region<N>, path: &[N::State]) -> Result<(), MachineError> {
        let mut rest = path;
        loop {
            let state = match rest.split_first() {
                Some((&first, below)) => {
                    rest = below;
                    first
                }
                None => match self.initial_below(region)? {
                    Some(initial) => initial,
                    None => return Ok(()),
                },
            };

            let kind = self.kind(state)?;
            let node = self.construct(state);

            let StateKind::Orthogonal { regions } = kind else {
                region.path.push(Level {
                    state,
                    node,
                    regions: Vec::new(),
                });
                continue;
            };

            let mut started = Vec::with_capacity(regions.len());
            for &tag in regions {
                let mut nested = Region::new(Some(tag));
                let nested_path = match rest.split_first() {
                    Some((&first, below)) if first == tag => below,
                    _ => &[],
                };
                self.start(&mut nested, nested_path)?;
                started.push(nested);
            }
            region.path.push(Level {
                state,
                node,
                regions: started,
            });
            return Ok(());
        }
    }

    /// Next state the cascade enters in `region`, if the axis is not complete.
    fn initial_below(&self, region: &Region<N>) -> Result<Option<N::State>, MachineError> {
        match (region.current_tag(), region.tag) {
            (Some(deepest), _) => match self.kind(deepest)? {
                StateKind::Composite { initial } => Ok(Some(*initial)),
                _ => Ok(None),
            },
            (None, Some(tag)) => Ok(self.kind(tag)?.initial()),
            (None, None) => Ok(Some(self.hierarchy.initial())),
        }
    }

    fn construct(&mut self, state: N::State) -> N {
        let mut node = N::construct(state);
        node.entry(&mut self.scope(state));
        self.diagnostics.state_entered(state);
        node
    }

    fn exit_level(&mut self, level: Level<N>) {
        let Level {
            state,
            mut node,
            mut regions,
        } = level;
        for region in &mut regions {
            self.stop(region);
        }
        node.exit(&mut self.scope(state));
        drop(node);
        self.diagnostics.state_exited(state);
    }

    /// Deliver `event` to `region`: nested regions of the deepest level
    /// first, then every level from the deepest to the outermost.
    pub(crate) fn dispatch(
        &mut self,
        region: &mut Region<N>,
        event: &N::Event,
    ) -> Result<Outcome<N>, MachineError> {
        let Some(deepest) = region.path.last_mut() else {
            return Ok(Outcome::Ignored);
        };

        // Every sibling sees the event before an escalation is resolved. Only
        // the first escalation is taken; a later one has already stopped its
        // region, which the taken transition either restarts or exits.
        let mut consumed = false;
        let mut escalated = None;
        for nested in &mut deepest.regions {
            match self.dispatch(nested, event)? {
                Outcome::Ignored => {}
                Outcome::Consumed => consumed = true,
                Outcome::Escalate(pending) => {
                    escalated.get_or_insert(pending);
                }
            }
        }
        if let Some(pending) = escalated {
            return self.transition(region, pending, true);
        }
        if consumed {
            return Ok(Outcome::Consumed);
        }

        let source = region.current_tag();
        for index in (0..region.path.len()).rev() {
            let level = &mut region.path[index];
            let state = level.state;
            let response = level.node.handle(event, &mut self.scope(state));
            match response {
                Response::Ignored => continue,
                Response::Handled => {
                    self.diagnostics.event_accepted(event.name(), state);
                    return Ok(Outcome::Consumed);
                }
                Response::Transition(Transition { target, action }) => {
                    self.diagnostics.event_accepted(event.name(), state);
                    let pending = Pending {
                        event: event.name().to_string(),
                        source: source.unwrap_or(state),
                        target,
                        action,
                    };
                    return self.transition(region, pending, false);
                }
            }
        }

        self.diagnostics.event_ignored(event.name(), region.tag);
        Ok(Outcome::Ignored)
    }

    /// Carry out `pending` from the deepest level of `region`.
    ///
    /// `escalated` is set when a nested region already left its states for
    /// this transition.
    fn transition(
        &mut self,
        region: &mut Region<N>,
        pending: Pending<N>,
        escalated: bool,
    ) -> Result<Outcome<N>, MachineError> {
        let chain = self.ancestors(pending.target)?;

        // Leave
        let mut reenter = !escalated && region.current_tag() == Some(pending.target);
        let lca = loop {
            match region.current_tag() {
                Some(deepest) if !reenter && chain.contains(&deepest) => break Some(deepest),
                Some(_) => {
                    reenter = false;
                    if let Some(level) = region.path.pop() {
                        self.exit_level(level);
                    }
                }
                None => match region.tag {
                    Some(tag) if chain.contains(&tag) => break Some(tag),
                    Some(tag) => {
                        self.diagnostics.region_stopped(tag);
                        return Ok(Outcome::Escalate(pending));
                    }
                    None => break None,
                },
            }
        };
        let rest = match lca.and_then(|lca| chain.iter().position(|s| *s == lca)) {
            Some(index) => &chain[index + 1..],
            None => chain,
        };

        // The common ancestor may be an orthogonal level with the target in
        // one of its regions.
        let split = !region.regions().is_empty();
        if let (true, Some(&destination)) = (split, rest.first()) {
            if let Some(level) = region.path.last_mut() {
                if let Some(nested) = level.regions.iter_mut().find(|r| r.tag == Some(destination)) {
                    self.stop(nested);
                }
            }
        }

        // Action
        self.diagnostics
            .transition_started(pending.source, pending.target);
        if let Some(action) = pending.action {
            action(&mut *self.context);
        }

        // Enter
        if split {
            if let Some(level) = region.path.last_mut() {
                for nested in level.regions.iter_mut().filter(|r| !r.is_running()) {
                    let path = match rest.split_first() {
                        Some((&first, below)) if nested.tag == Some(first) => below,
                        _ => &[],
                    };
                    self.start(nested, path)?;
                }
            }
        } else {
            self.enter(region, rest)?;
        }

        self.history.record(TransitionRecord {
            event: pending.event,
            source: pending.source,
            target: pending.target,
            lca,
            timestamp: Utc::now(),
        });
        Ok(Outcome::Consumed)
    }
}

fn unknown<S: State>(state: S) -> MachineError {
    MachineError::UnknownState {
        state: state.name().to_string(),
    }
}

//! The machine: lifecycle, event queue and observers around the engine.

use crate::core::{Event, Node, TransitionHistory};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::machine::config::MachineConfig;
use crate::machine::engine::{Engine, Outcome};
use crate::machine::error::MachineError;
use crate::machine::lifecycle::{Lifecycle, Operation};
use crate::machine::region::Region;
use crate::model::Hierarchy;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

/// What happened to a dispatched event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Some handler consumed the event.
    Consumed,
    /// Every handler ignored the event.
    Ignored,
}

impl DispatchOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, DispatchOutcome::Consumed)
    }
}

/// A hierarchical state machine.
///
/// Owns the hierarchy, the context shared by every state and the top-level
/// region. Calls are synchronous and run to completion: hooks, handlers and
/// actions all run on the caller's thread before `start`, `stop` or
/// `dispatch` returns.
///
/// # Example
///
/// ```rust
/// use stratum::builder::HierarchyBuilder;
/// use stratum::core::{Node, Response, Scope};
/// use stratum::machine::{DispatchOutcome, Machine};
/// use stratum::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Open,
///     }
/// }
///
/// event_enum! {
///     enum Push {
///         Push,
///     }
/// }
///
/// struct Panel(Door);
///
/// impl Node for Panel {
///     type State = Door;
///     type Event = Push;
///     type Context = u32;
///
///     fn construct(state: Door) -> Self {
///         Panel(state)
///     }
///
///     fn handle(&mut self, _event: &Push, scope: &mut Scope<'_, Self>) -> Response<Self> {
///         *scope.context() += 1;
///         match self.0 {
///             Door::Closed => Response::transition(Door::Open),
///             Door::Open => Response::transition(Door::Closed),
///         }
///     }
/// }
///
/// let hierarchy = HierarchyBuilder::new()
///     .initial(Door::Closed)
///     .leaf(Door::Closed, None)
///     .leaf(Door::Open, None)
///     .build()
///     .unwrap();
///
/// let mut machine = Machine::<Panel>::new(hierarchy, 0);
/// machine.start().unwrap();
/// assert_eq!(machine.dispatch(Push::Push).unwrap(), DispatchOutcome::Consumed);
/// assert_eq!(machine.current_tag(), Some(Door::Open));
/// assert_eq!(*machine.context(), 1);
/// ```
pub struct Machine<N: Node> {
    id: Uuid,
    hierarchy: Hierarchy<N::State>,
    config: MachineConfig,
    lifecycle: Lifecycle,
    top: Region<N>,
    context: N::Context,
    deferred: VecDeque<N::Event>,
    history: TransitionHistory<N::State>,
    diagnostics: Box<dyn Diagnostics<N::State>>,
}

impl<N: Node> Machine<N> {
    /// Create an unstarted machine reporting through `tracing`.
    pub fn new(hierarchy: Hierarchy<N::State>, context: N::Context) -> Self {
        let config = MachineConfig::default();
        Self {
            id: Uuid::new_v4(),
            hierarchy,
            history: TransitionHistory::with_capacity(config.history_capacity),
            config,
            lifecycle: Lifecycle::Unstarted,
            top: Region::new(None),
            context,
            deferred: VecDeque::new(),
            diagnostics: Box::new(TracingDiagnostics),
        }
    }

    /// Replace the configuration. Clears the transition history.
    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.history = TransitionHistory::with_capacity(config.history_capacity);
        self.config = config;
        self
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics<N::State> + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    fn split(&mut self) -> (Engine<'_, N>, &mut Region<N>) {
        let Self {
            hierarchy,
            context,
            deferred,
            history,
            diagnostics,
            top,
            ..
        } = self;
        let engine = Engine {
            hierarchy,
            context,
            deferred,
            diagnostics: &mut **diagnostics,
            history,
        };
        (engine, top)
    }

    /// Enter the initial configuration, then process deferred events.
    #[instrument(level = "debug", skip_all, fields(machine = %self.id))]
    pub fn start(&mut self) -> Result<(), MachineError> {
        self.lifecycle = self.lifecycle.advance(Operation::Start)?;
        info!("starting");

        let (mut engine, top) = self.split();
        engine.start(top, &[])?;
        self.drain()
    }

    /// Exit every active state, deepest first. Events deferred while
    /// stopping are dropped.
    #[instrument(level = "debug", skip_all, fields(machine = %self.id))]
    pub fn stop(&mut self) -> Result<(), MachineError> {
        self.lifecycle = self.lifecycle.advance(Operation::Stop)?;

        let (mut engine, top) = self.split();
        engine.stop(top);

        if !self.deferred.is_empty() {
            debug!(discarded = self.deferred.len(), "dropping events deferred while stopping");
            self.deferred.clear();
        }
        info!("stopped");
        Ok(())
    }

    /// Deliver `event` to the active configuration, then process deferred
    /// events.
    ///
    /// The returned outcome is the one of `event` itself.
    #[instrument(level = "debug", skip_all, fields(machine = %self.id, event = event.name()))]
    pub fn dispatch(&mut self, event: N::Event) -> Result<DispatchOutcome, MachineError> {
        self.lifecycle = self.lifecycle.advance(Operation::Dispatch)?;

        let outcome = self.deliver(&event)?;
        self.drain()?;
        Ok(outcome)
    }

    fn deliver(&mut self, event: &N::Event) -> Result<DispatchOutcome, MachineError> {
        let (mut engine, top) = self.split();
        let outcome = match engine.dispatch(top, event)? {
            Outcome::Ignored => DispatchOutcome::Ignored,
            // The top-level region never escalates.
            Outcome::Consumed | Outcome::Escalate(_) => DispatchOutcome::Consumed,
        };
        trace!(event = event.name(), ?outcome, "delivered");
        Ok(outcome)
    }

    fn drain(&mut self) -> Result<(), MachineError> {
        let limit = self.config.max_deferred_events;
        let mut processed = 0;
        while let Some(event) = self.deferred.pop_front() {
            if processed == limit {
                warn!(limit, dropped = self.deferred.len() + 1, "deferred event limit reached");
                self.deferred.clear();
                return Err(MachineError::DeferredOverflow { limit });
            }
            processed += 1;
            self.deliver(&event)?;
        }
        Ok(())
    }

    /// Deepest active state of the top-level region.
    pub fn current_tag(&self) -> Option<N::State> {
        self.top.current_tag()
    }

    /// Every active state, outermost first.
    pub fn active_states(&self) -> Vec<N::State> {
        self.top.active_states()
    }

    /// Deepest active state of every running region.
    pub fn active_leaves(&self) -> Vec<N::State> {
        self.top.leaves()
    }

    pub fn is_active(&self, state: N::State) -> bool {
        self.top.active_states().contains(&state)
    }

    /// Top-level region followed by every nested region, depth first.
    pub fn regions(&self) -> Vec<&Region<N>> {
        self.top.walk()
    }

    /// Value of an active state.
    pub fn node(&self, state: N::State) -> Option<&N> {
        self.top.node(state)
    }

    pub fn context(&self) -> &N::Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut N::Context {
        &mut self.context
    }

    /// Consume the machine and return its context. Active states are
    /// dropped without running their exit hooks.
    pub fn into_context(self) -> N::Context {
        self.context
    }

    pub fn history(&self) -> &TransitionHistory<N::State> {
        &self.history
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn hierarchy(&self) -> &Hierarchy<N::State> {
        &self.hierarchy
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl<N: Node> fmt::Debug for Machine<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("lifecycle", &self.lifecycle)
            .field("active", &self.top.active_states())
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

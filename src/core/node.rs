//! State behaviour.
//!
//! A [`Node`] is the value that exists while a state is active. Regions hold
//! one node per active level: it is constructed when the state is entered and
//! dropped right after its `exit` hook. Behaviour is a `match` over the user's
//! sum type rather than a virtual call on a class hierarchy.

use crate::core::event::Event;
use crate::core::state::State;
use std::collections::VecDeque;
use std::fmt;

/// Side effect run between the exits and the entries of a transition.
pub type Action<C> = Box<dyn FnOnce(&mut C)>;

/// Behaviour of the states of one hierarchy.
///
/// Implemented by a sum type with one variant (or one tag) per state. Entry,
/// exit and handling all default to "do nothing", so a state only overrides
/// what it reacts to.
///
/// Region pseudo-states are never constructed.
///
/// # Example
///
/// ```rust
/// use stratum::core::{Node, Response, Scope};
/// use stratum::{event_enum, state_enum};
///
/// state_enum! {
///     enum Light {
///         Off,
///         On,
///     }
/// }
///
/// event_enum! {
///     enum Switch {
///         Toggle,
///     }
/// }
///
/// struct Lamp(Light);
///
/// impl Node for Lamp {
///     type State = Light;
///     type Event = Switch;
///     type Context = u32;
///
///     fn construct(state: Light) -> Self {
///         Lamp(state)
///     }
///
///     fn entry(&mut self, scope: &mut Scope<'_, Self>) {
///         if self.0 == Light::On {
///             *scope.context() += 1;
///         }
///     }
///
///     fn handle(&mut self, _event: &Switch, _scope: &mut Scope<'_, Self>) -> Response<Self> {
///         match self.0 {
///             Light::Off => Response::transition(Light::On),
///             Light::On => Response::transition(Light::Off),
///         }
///     }
/// }
/// ```
pub trait Node: Sized {
    /// Tags of the hierarchy this node type implements.
    type State: State;
    /// Events the hierarchy reacts to.
    type Event: Event;
    /// Extended state shared by every node of one machine.
    type Context;

    /// Build the value of a state that is about to be entered.
    fn construct(state: Self::State) -> Self;

    /// Entry hook, run once right after construction.
    fn entry(&mut self, _scope: &mut Scope<'_, Self>) {}

    /// Exit hook, run once right before the value is dropped.
    fn exit(&mut self, _scope: &mut Scope<'_, Self>) {}

    /// React to an event. `Ignored` lets the event bubble to the parent level.
    fn handle(&mut self, _event: &Self::Event, _scope: &mut Scope<'_, Self>) -> Response<Self> {
        Response::Ignored
    }
}

/// What a handler did with an event.
pub enum Response<N: Node> {
    /// Not consumed; bubble to the parent.
    Ignored,
    /// Consumed without changing state.
    Handled,
    /// Consumed; move to another state.
    Transition(Transition<N>),
}

impl<N: Node> Response<N> {
    /// Consume the event by transitioning to `target`.
    pub fn transition(target: N::State) -> Self {
        Response::Transition(Transition {
            target,
            action: None,
        })
    }

    /// Consume the event by transitioning to `target`, running `action` after
    /// every exit and before any entry.
    pub fn transition_with<F>(target: N::State, action: F) -> Self
    where
        F: FnOnce(&mut N::Context) + 'static,
    {
        Response::Transition(Transition {
            target,
            action: Some(Box::new(action)),
        })
    }

    /// Whether the response consumes the event.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Response::Ignored)
    }
}

impl<N: Node> fmt::Debug for Response<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ignored => f.write_str("Ignored"),
            Response::Handled => f.write_str("Handled"),
            Response::Transition(transition) => f
                .debug_tuple("Transition")
                .field(&transition.target)
                .finish(),
        }
    }
}

/// A requested move to `target`.
pub struct Transition<N: Node> {
    pub target: N::State,
    pub action: Option<Action<N::Context>>,
}

/// Handle given to hooks and handlers.
///
/// It exposes the machine's context and lets a hook queue follow-up events.
/// The machine itself is out of reach, so a handler can never dispatch
/// re-entrantly: deferred events run after the current call completes.
pub struct Scope<'a, N: Node> {
    state: N::State,
    context: &'a mut N::Context,
    deferred: &'a mut VecDeque<N::Event>,
}

impl<'a, N: Node> Scope<'a, N> {
    pub(crate) fn new(
        state: N::State,
        context: &'a mut N::Context,
        deferred: &'a mut VecDeque<N::Event>,
    ) -> Self {
        Self {
            state,
            context,
            deferred,
        }
    }

    /// Tag of the state whose hook or handler is running.
    pub fn state(&self) -> N::State {
        self.state
    }

    /// Mutable access to the machine's context.
    pub fn context(&mut self) -> &mut N::Context {
        self.context
    }

    /// Queue `event` for dispatch once the current call has completed.
    pub fn defer(&mut self, event: N::Event) {
        self.deferred.push_back(event);
    }
}

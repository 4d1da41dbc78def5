//! Stratum: hierarchical state machines with orthogonal regions
//!
//! Stratum runs UML-style statecharts: states nest inside composite states,
//! orthogonal composites run several regions side by side, events bubble
//! from the deepest active state to its ancestors, and transitions exit up to
//! the lowest common ancestor before entering down to their target.
//!
//! # Core Concepts
//!
//! - **State**: Tag enum naming every state, region included, via `State`
//! - **Hierarchy**: Validated, immutable table of parents and shapes
//! - **Node**: Per-state value with entry/exit hooks and an event handler
//! - **Machine**: Owns the hierarchy, the context and the active regions
//! - **Diagnostics**: Observer of everything the machine does
//!
//! # Example
//!
//! ```rust
//! use stratum::builder::HierarchyBuilder;
//! use stratum::core::{Node, Response, Scope};
//! use stratum::machine::Machine;
//! use stratum::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Player {
//!         Stopped,
//!         Active,
//!         Playing,
//!         Paused,
//!     }
//! }
//!
//! event_enum! {
//!     enum Button {
//!         Play,
//!         Pause,
//!         Stop,
//!     }
//! }
//!
//! struct Screen(Player);
//!
//! impl Node for Screen {
//!     type State = Player;
//!     type Event = Button;
//!     type Context = Vec<String>;
//!
//!     fn construct(state: Player) -> Self {
//!         Screen(state)
//!     }
//!
//!     fn entry(&mut self, scope: &mut Scope<'_, Self>) {
//!         scope.context().push(format!("enter {:?}", self.0));
//!     }
//!
//!     fn handle(&mut self, event: &Button, _scope: &mut Scope<'_, Self>) -> Response<Self> {
//!         match (self.0, event) {
//!             (Player::Stopped, Button::Play) => Response::transition(Player::Active),
//!             (Player::Playing, Button::Pause) => Response::transition(Player::Paused),
//!             (Player::Paused, Button::Play) => Response::transition(Player::Playing),
//!             // Handled by the composite for both of its children
//!             (Player::Active, Button::Stop) => Response::transition(Player::Stopped),
//!             _ => Response::Ignored,
//!         }
//!     }
//! }
//!
//! let hierarchy = HierarchyBuilder::new()
//!     .initial(Player::Stopped)
//!     .leaf(Player::Stopped, None)
//!     .composite(Player::Active, None, Player::Playing)
//!     .leaf(Player::Playing, Player::Active)
//!     .leaf(Player::Paused, Player::Active)
//!     .build()
//!     .unwrap();
//!
//! let mut machine = Machine::<Screen>::new(hierarchy, Vec::new());
//! machine.start().unwrap();
//! machine.dispatch(Button::Play).unwrap();
//! machine.dispatch(Button::Pause).unwrap();
//! assert_eq!(machine.active_states(), vec![Player::Active, Player::Paused]);
//!
//! machine.dispatch(Button::Stop).unwrap();
//! assert_eq!(machine.current_tag(), Some(Player::Stopped));
//! ```

pub mod builder;
pub mod core;
pub mod diagnostics;
pub mod machine;
pub mod model;

// Re-export commonly used types
pub use builder::{BuildError, HierarchyBuilder};
pub use crate::core::{Event, Node, Response, Scope, State};
pub use machine::{DispatchOutcome, Machine, MachineConfig, MachineError};
pub use model::Hierarchy;

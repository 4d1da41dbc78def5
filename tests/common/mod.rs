//! Shared fixture: a toy statechart with one orthogonal composite.
//!
//! ```text
//! A ─┬─ B
//!    └─ C ── D ═╦═ R1: G, G2
//!               ╚═ R2: H, H2
//! Z
//! ```
//!
//! Every entry and exit hook appends `enter X` / `exit X` to the context, and
//! transition actions append their own line, so the context is the trace.

#![allow(dead_code)]

use stratum::builder::HierarchyBuilder;
use stratum::core::{Node, Response, Scope};
use stratum::diagnostics::Recorder;
use stratum::machine::Machine;
use stratum::model::Hierarchy;
use stratum::{event_enum, state_enum};

state_enum! {
    pub enum Tag {
        A,
        B,
        C,
        D,
        R1,
        R2,
        G,
        G2,
        H,
        H2,
        Z,
    }
}

event_enum! {
    pub enum Toy {
        Go,
        Ping(u32),
        Leave,
        Next,
        Out,
        Cross,
        Reset,
        SelfLoop,
        Noise,
        Chain,
        Regroup,
    }
}

pub struct ToyNode(pub Tag);

impl Node for ToyNode {
    type State = Tag;
    type Event = Toy;
    type Context = Vec<String>;

    fn construct(state: Tag) -> Self {
        ToyNode(state)
    }

    fn entry(&mut self, scope: &mut Scope<'_, Self>) {
        scope.context().push(format!("enter {:?}", self.0));
    }

    fn exit(&mut self, scope: &mut Scope<'_, Self>) {
        scope.context().push(format!("exit {:?}", self.0));
    }

    fn handle(&mut self, event: &Toy, scope: &mut Scope<'_, Self>) -> Response<Self> {
        use Tag::*;

        match (self.0, event) {
            (B, Toy::Go) => Response::transition(C),
            (B, Toy::Ping(n)) => {
                scope.context().push(format!("ping {n}"));
                Response::Handled
            }
            (B, Toy::SelfLoop) | (G, Toy::SelfLoop) => Response::transition(self.0),
            (D, Toy::Leave) => Response::transition_with(B, |log: &mut Vec<String>| {
                log.push("action".to_string())
            }),
            (C, Toy::Reset) => Response::transition(C),
            (G, Toy::Next) => Response::transition(G2),
            (G2, Toy::Next) => Response::transition(G),
            (H, Toy::Next) => Response::transition(H2),
            (H2, Toy::Next) => Response::transition(H),
            (G, Toy::Cross) => Response::transition(H2),
            (G, Toy::Regroup) => Response::transition(D),
            (H, Toy::Regroup) => {
                scope.context().push("H regroup".to_string());
                Response::transition(H2)
            }
            (A, Toy::Out) => Response::transition(Z),
            (Z, Toy::Out) => Response::transition(A),
            (Z, Toy::Chain) => {
                scope.defer(Toy::Out);
                scope.defer(Toy::Ping(1));
                Response::Handled
            }
            _ => Response::Ignored,
        }
    }
}

pub fn hierarchy() -> Hierarchy<Tag> {
    HierarchyBuilder::new()
        .initial(Tag::A)
        .composite(Tag::A, None, Tag::B)
        .leaf(Tag::B, Tag::A)
        .composite(Tag::C, Tag::A, Tag::D)
        .orthogonal(Tag::D, Tag::C, [(Tag::R1, Tag::G), (Tag::R2, Tag::H)])
        .leaf(Tag::G, Tag::R1)
        .leaf(Tag::G2, Tag::R1)
        .leaf(Tag::H, Tag::R2)
        .leaf(Tag::H2, Tag::R2)
        .leaf(Tag::Z, None)
        .build()
        .expect("toy hierarchy is valid")
}

/// Unstarted machine reporting into the returned recorder.
pub fn machine() -> (Machine<ToyNode>, Recorder<Tag>) {
    let recorder = Recorder::new();
    let machine = Machine::new(hierarchy(), Vec::new()).with_diagnostics(recorder.clone());
    (machine, recorder)
}

/// Started machine with an empty trace.
pub fn started() -> (Machine<ToyNode>, Recorder<Tag>) {
    let (mut machine, recorder) = machine();
    machine.start().expect("start");
    take(&mut machine);
    recorder.clear();
    (machine, recorder)
}

/// Hook trace recorded since the last call.
pub fn take(machine: &mut Machine<ToyNode>) -> Vec<String> {
    std::mem::take(machine.context_mut())
}

/// Every region's deepest state is a leaf, and every orthogonal composite
/// ending a region has all of its regions running.
pub fn leaf_invariant_holds(machine: &Machine<ToyNode>) -> bool {
    let hierarchy = machine.hierarchy();
    machine.regions().into_iter().all(|region| {
        let Some(deepest) = region.current_tag() else {
            return false;
        };
        if region.regions().is_empty() {
            hierarchy.is_leaf(deepest)
        } else {
            region.regions().iter().all(|nested| nested.is_running())
        }
    })
}

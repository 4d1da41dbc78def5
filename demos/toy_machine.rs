//! Toy Statechart
//!
//! This demo drives a small hierarchy with one orthogonal composite and
//! prints every hook and diagnostics line.
//!
//! Key concepts:
//! - Composite states with cascading initial children
//! - Orthogonal regions entered and stopped together
//! - Events bubbling from leaves to ancestors
//! - Two independent event groups behind one event type
//!
//! Run with: RUST_LOG=stratum=trace cargo run --example toy_machine

use stratum::builder::HierarchyBuilder;
use stratum::core::{Event, Node, Response, Scope};
use stratum::machine::Machine;
use stratum::{event_enum, state_enum};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Toy {
        A,
        B,
        C,
        D,
        Split,
        R1,
        R2,
        G,
        H,
    }
}

event_enum! {
    enum Letters {
        F,
        G,
    }
}

event_enum! {
    enum Numbers {
        H(i32),
        J(i32),
    }
}

/// Both event groups, each consumed by its own part of the hierarchy.
#[derive(Clone, Debug)]
enum Input {
    Letters(Letters),
    Numbers(Numbers),
}

impl Event for Input {
    fn name(&self) -> &str {
        match self {
            Input::Letters(event) => event.name(),
            Input::Numbers(event) => event.name(),
        }
    }
}

struct Step(Toy);

impl Node for Step {
    type State = Toy;
    type Event = Input;
    type Context = ();

    fn construct(state: Toy) -> Self {
        Step(state)
    }

    fn entry(&mut self, _scope: &mut Scope<'_, Self>) {
        if self.0 == Toy::D {
            println!("D::in()");
        }
    }

    fn exit(&mut self, _scope: &mut Scope<'_, Self>) {
        if self.0 == Toy::D {
            println!("D::out()");
        }
    }

    fn handle(&mut self, event: &Input, _scope: &mut Scope<'_, Self>) -> Response<Self> {
        match (self.0, event) {
            (Toy::A, Input::Letters(Letters::F)) => {
                println!("A::f()");
                Response::transition(Toy::D)
            }
            (Toy::B, Input::Letters(Letters::G)) => {
                println!("B::g()");
                Response::Handled
            }
            (Toy::D, Input::Letters(Letters::F)) => {
                println!("D::f()");
                Response::transition(Toy::A)
            }
            (Toy::D, Input::Numbers(Numbers::H(x))) => {
                println!("Got h({x})");
                Response::transition_with(Toy::G, |_| println!("(action)"))
            }
            (Toy::G, Input::Letters(Letters::F)) => {
                println!("G::f()");
                Response::Handled
            }
            (Toy::G, Input::Letters(Letters::G)) => Response::transition(Toy::D),
            _ => Response::Ignored,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("=== Toy Statechart ===\n");

    let hierarchy = HierarchyBuilder::new()
        .initial(Toy::A)
        .composite(Toy::A, None, Toy::B)
        .leaf(Toy::B, Toy::A)
        .composite(Toy::C, Toy::A, Toy::D)
        .leaf(Toy::D, Toy::C)
        .orthogonal(Toy::Split, Toy::C, [(Toy::R1, Toy::G), (Toy::R2, Toy::H)])
        .leaf(Toy::G, Toy::R1)
        .leaf(Toy::H, Toy::R2)
        .build()
        .expect("hierarchy is valid");

    let mut machine = Machine::<Step>::new(hierarchy, ());

    let script = [
        Input::Letters(Letters::F),
        Input::Letters(Letters::G),
        Input::Numbers(Numbers::H(2)),
        Input::Letters(Letters::F),
        Input::Numbers(Numbers::H(3)),
        Input::Letters(Letters::G),
        Input::Numbers(Numbers::H(4)),
        // No state handles j
        Input::Numbers(Numbers::J(5)),
    ];

    machine.start().expect("start");
    println!("Active: {:?}\n", machine.active_states());

    for event in script {
        println!("-> {}", event.name());
        let outcome = machine.dispatch(event).expect("dispatch");
        println!("   {:?}, active: {:?}", outcome, machine.active_leaves());
    }

    println!("\nStop");
    machine.stop().expect("stop");

    println!("\nTransitions taken: {}", machine.history().len());
    println!("\n=== Demo Complete ===");
}

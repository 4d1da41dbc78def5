//! Trace tests for the toy statechart.

mod common;

use common::{leaf_invariant_holds, machine, started, take, Tag, Toy};
use stratum::diagnostics::Notification;
use stratum::machine::{DispatchOutcome, Lifecycle, MachineError, Operation};

#[test]
fn start_enters_initial_chain() {
    let (mut machine, recorder) = machine();
    machine.start().unwrap();

    assert_eq!(take(&mut machine), vec!["enter A", "enter B"]);
    assert_eq!(recorder.hooks(), vec!["enter A", "enter B"]);
    assert_eq!(machine.current_tag(), Some(Tag::B));
    assert!(leaf_invariant_holds(&machine));
}

#[test]
fn entering_orthogonal_composite_cascades_into_every_region() {
    let (mut machine, recorder) = started();

    machine.dispatch(Toy::Go).unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit B", "enter C", "enter D", "enter G", "enter H"]
    );
    assert_eq!(
        recorder.lines(),
        vec![
            "Go accepted by B",
            "exit B",
            "B -> C",
            "enter C",
            "enter D",
            "start R1",
            "enter G",
            "start R2",
            "enter H",
        ]
    );
    assert_eq!(machine.active_states(), vec![Tag::A, Tag::C, Tag::D, Tag::G, Tag::H]);
    assert_eq!(machine.active_leaves(), vec![Tag::G, Tag::H]);
    assert!(leaf_invariant_holds(&machine));
}

#[test]
fn leaving_orthogonal_composite_stops_regions_then_runs_action() {
    let (mut machine, _recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);

    machine.dispatch(Toy::Leave).unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit G", "exit H", "exit D", "exit C", "action", "enter B"]
    );
    assert_eq!(machine.active_states(), vec![Tag::A, Tag::B]);

    let record = machine.history().last().unwrap();
    assert_eq!(record.event, "Leave");
    assert_eq!((record.source, record.target, record.lca), (Tag::D, Tag::B, Some(Tag::A)));
}

#[test]
fn every_region_receives_the_event() {
    let (mut machine, recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);
    recorder.clear();

    machine.dispatch(Toy::Next).unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit G", "enter G2", "exit H", "enter H2"]
    );
    assert_eq!(machine.active_leaves(), vec![Tag::G2, Tag::H2]);
    assert!(recorder.notifications().contains(&Notification::Accepted {
        event: "Next".to_string(),
        state: Tag::H,
    }));
    // Consumed inside the regions: D and its ancestors never see it.
    assert!(!recorder
        .lines()
        .iter()
        .any(|line| line.starts_with("Next accepted by D") || line == "Next ignored"));
}

#[test]
fn event_ignored_by_all_regions_bubbles_to_ancestors() {
    let (mut machine, recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);
    recorder.clear();

    machine.dispatch(Toy::Out).unwrap();

    assert_eq!(
        recorder.lines()[..3],
        ["Out ignored by R1", "Out ignored by R2", "Out accepted by A"]
    );
    assert_eq!(
        take(&mut machine),
        vec!["exit G", "exit H", "exit D", "exit C", "exit A", "enter Z"]
    );
    assert_eq!(machine.history().last().unwrap().lca, None);
}

#[test]
fn transition_across_regions_restarts_the_left_region() {
    let (mut machine, recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);
    recorder.clear();

    machine.dispatch(Toy::Cross).unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit G", "exit H", "enter G", "enter H2"]
    );
    assert_eq!(
        recorder.lines(),
        vec![
            "Cross accepted by G",
            "exit G",
            "stop R1",
            "Cross ignored by R2",
            "exit H",
            "stop R2",
            "G -> H2",
            "start R1",
            "enter G",
            "start R2",
            "enter H2",
        ]
    );
    assert_eq!(machine.active_leaves(), vec![Tag::G, Tag::H2]);
    assert_eq!(machine.history().last().unwrap().lca, Some(Tag::D));
    assert!(leaf_invariant_holds(&machine));
}

#[test]
fn sibling_region_still_receives_an_event_escalated_to_the_owner() {
    let (mut machine, recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);
    recorder.clear();

    machine.dispatch(Toy::Regroup).unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit G", "H regroup", "exit H", "enter H2", "enter G"]
    );
    assert_eq!(machine.active_leaves(), vec![Tag::G, Tag::H2]);
    assert!(recorder.notifications().contains(&Notification::Accepted {
        event: "Regroup".to_string(),
        state: Tag::H,
    }));

    let record = machine.history().last().unwrap();
    assert_eq!((record.source, record.target, record.lca), (Tag::G, Tag::D, Some(Tag::D)));
    assert!(leaf_invariant_holds(&machine));
}

#[test]
fn transition_to_ancestor_keeps_it_active() {
    let (mut machine, _recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    machine.dispatch(Toy::Next).unwrap();
    take(&mut machine);

    machine.dispatch(Toy::Reset).unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit G2", "exit H2", "exit D", "enter D", "enter G", "enter H"]
    );
    assert_eq!(machine.active_leaves(), vec![Tag::G, Tag::H]);
}

#[test]
fn self_transition_exits_and_reenters() {
    let (mut machine, _recorder) = started();

    machine.dispatch(Toy::SelfLoop).unwrap();
    assert_eq!(take(&mut machine), vec!["exit B", "enter B"]);

    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);

    machine.dispatch(Toy::SelfLoop).unwrap();
    assert_eq!(take(&mut machine), vec!["exit G", "enter G"]);
    assert_eq!(machine.active_leaves(), vec![Tag::G, Tag::H]);
}

#[test]
fn top_level_transitions_share_no_ancestor() {
    let (mut machine, _recorder) = started();

    machine.dispatch(Toy::Out).unwrap();
    assert_eq!(take(&mut machine), vec!["exit B", "exit A", "enter Z"]);

    machine.dispatch(Toy::Out).unwrap();
    assert_eq!(take(&mut machine), vec!["exit Z", "enter A", "enter B"]);
}

#[test]
fn unhandled_event_is_reported_not_raised() {
    let (mut machine, recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);
    recorder.clear();

    let outcome = machine.dispatch(Toy::Noise).unwrap();

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert!(take(&mut machine).is_empty());
    assert_eq!(
        recorder.lines(),
        vec!["Noise ignored by R1", "Noise ignored by R2", "Noise ignored"]
    );
}

#[test]
fn payload_reaches_the_handler() {
    let (mut machine, _recorder) = started();

    assert_eq!(machine.dispatch(Toy::Ping(7)), Ok(DispatchOutcome::Consumed));
    assert_eq!(take(&mut machine), vec!["ping 7"]);
}

#[test]
fn deferred_events_follow_the_call_in_order() {
    let (mut machine, _recorder) = started();
    machine.dispatch(Toy::Out).unwrap();
    take(&mut machine);

    machine.dispatch(Toy::Chain).unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit Z", "enter A", "enter B", "ping 1"]
    );
}

#[test]
fn stop_unwinds_every_region() {
    let (mut machine, recorder) = started();
    machine.dispatch(Toy::Go).unwrap();
    take(&mut machine);
    recorder.clear();

    machine.stop().unwrap();

    assert_eq!(
        take(&mut machine),
        vec!["exit G", "exit H", "exit D", "exit C", "exit A"]
    );
    assert!(recorder.lines().contains(&"stop R2".to_string()));
    assert!(machine.active_states().is_empty());
    assert_eq!(machine.lifecycle(), Lifecycle::Stopped);
}

#[test]
fn lifecycle_misuse_is_an_error() {
    let (mut machine, _recorder) = machine();

    assert_eq!(
        machine.dispatch(Toy::Go),
        Err(MachineError::InvalidLifecycle {
            operation: Operation::Dispatch,
            lifecycle: Lifecycle::Unstarted,
        })
    );
    assert!(machine.stop().is_err());

    machine.start().unwrap();
    assert!(machine.start().is_err());
    machine.stop().unwrap();
    assert!(machine.stop().is_err());
    assert!(machine.dispatch(Toy::Go).is_err());
}

#[test]
fn history_tracks_the_path_taken() {
    let (mut machine, _recorder) = started();

    machine.dispatch(Toy::Go).unwrap();
    machine.dispatch(Toy::Leave).unwrap();
    machine.dispatch(Toy::Out).unwrap();

    assert_eq!(
        machine.history().get_path(),
        vec![&Tag::B, &Tag::C, &Tag::B, &Tag::Z]
    );
}

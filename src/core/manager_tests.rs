// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::{Action, Cue};
use crate::core::config::{Config, ConfigPatch};
use crate::core::error::{ConfigError, Error, StateError};
use crate::core::events::Event;
use crate::core::manager::Manager;
use crate::core::state::{Phase, State, Status};

fn setup(move_s: u64, rest_s: u64, reps: u32) -> (Manager, State) {
    let mgr = Manager::new(Config::new(move_s, rest_s, reps));
    let state = mgr.initial_state();
    (mgr, state)
}

fn ticks(mgr: &mut Manager, state: &mut State, n: usize) -> Vec<Action> {
    let mut out = Vec::new();
    for _ in 0..n {
        out.extend(mgr.handle_event(state, Event::Tick).unwrap());
    }
    out
}

fn patch(move_s: Option<u64>, rest_s: Option<u64>, reps: Option<u32>) -> Event {
    Event::Configure(ConfigPatch {
        move_seconds: move_s,
        rest_seconds: rest_s,
        repetitions: reps,
    })
}

#[test]
fn starts_from_ready_with_move_cue() {
    let (mut mgr, mut state) = setup(30, 10, 3);

    let actions = mgr.handle_event(&mut state, Event::Start).unwrap();

    assert_eq!(actions, vec![Action::ArmClock, Action::PlayCue(Cue::MoveStart)]);
    assert_eq!(state.status(), Status::Running);
    assert_eq!(state.phase(), Phase::Move);
    assert_eq!(state.current_rep(), 1);
    assert_eq!(state.time_left(), 30);
    assert_eq!(state.time_elapsed(), 0);
}

#[test]
fn start_while_running_is_a_noop() {
    let (mut mgr, mut state) = setup(30, 10, 3);
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 4);

    let before = state.clone();
    let res = mgr.handle_event(&mut state, Event::Start);

    assert_eq!(res, Err(Error::InvalidState(StateError::AlreadyRunning)));
    assert_eq!(state, before);
}

#[test]
fn pause_twice_only_pauses_once() {
    let (mut mgr, mut state) = setup(30, 10, 3);
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 2);

    let first = mgr.handle_event(&mut state, Event::Pause).unwrap();
    assert_eq!(first, vec![Action::DisarmClock]);
    let after_first = state.clone();

    let second = mgr.handle_event(&mut state, Event::Pause);
    assert_eq!(second, Err(Error::InvalidState(StateError::NotRunning)));
    assert_eq!(state, after_first);
}

#[test]
fn pause_outside_running_is_rejected() {
    let (mut mgr, mut state) = setup(3, 1, 1);

    let before = state.clone();
    assert!(mgr.handle_event(&mut state, Event::Pause).is_err());
    assert_eq!(state, before);

    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 3);
    assert_eq!(state.status(), Status::Done);

    let done = state.clone();
    assert!(mgr.handle_event(&mut state, Event::Pause).is_err());
    assert_eq!(state, done);
}

#[test]
fn resume_keeps_position_and_is_silent() {
    let (mut mgr, mut state) = setup(10, 5, 2);
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 5);
    assert_eq!(state.time_left(), 5);

    mgr.handle_event(&mut state, Event::Pause).unwrap();
    let resumed = mgr.handle_event(&mut state, Event::Start).unwrap();

    assert_eq!(resumed, vec![Action::ArmClock]);
    assert_eq!(state.status(), Status::Running);
    assert_eq!(state.time_left(), 5);
    assert_eq!(state.time_elapsed(), 5);
}

#[test]
fn ticks_are_rejected_unless_running() {
    let (mut mgr, mut state) = setup(10, 5, 2);

    let ready = state.clone();
    assert_eq!(
        mgr.handle_event(&mut state, Event::Tick),
        Err(Error::InvalidState(StateError::NotRunning))
    );
    assert_eq!(state, ready);

    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 3);
    mgr.handle_event(&mut state, Event::Pause).unwrap();

    let paused = state.clone();
    assert!(mgr.handle_event(&mut state, Event::Tick).is_err());
    assert_eq!(state, paused);
}

#[test]
fn finishing_disarms_before_cue() {
    let (mut mgr, mut state) = setup(3, 2, 2);
    mgr.handle_event(&mut state, Event::Start).unwrap();

    let actions = ticks(&mut mgr, &mut state, 8);

    assert_eq!(state.status(), Status::Done);
    assert_eq!(
        &actions[actions.len() - 2..],
        &[Action::DisarmClock, Action::PlayCue(Cue::Finished)]
    );

    let disarms = actions.iter().filter(|a| **a == Action::DisarmClock).count();
    assert_eq!(disarms, 1);
}

#[test]
fn full_run_consumes_total_ticks() {
    let (mut mgr, mut state) = setup(4, 2, 3);
    mgr.handle_event(&mut state, Event::Start).unwrap();

    let mut n = 0u64;
    while state.status() == Status::Running {
        mgr.handle_event(&mut state, Event::Tick).unwrap();
        n += 1;
    }

    assert_eq!(n, mgr.total_workout_seconds());
    assert_eq!(mgr.remaining_workout_seconds(&state), mgr.total_workout_seconds());
}

#[test]
fn restart_from_done_resets_first() {
    let (mut mgr, mut state) = setup(2, 1, 1);
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 2);
    assert_eq!(state.status(), Status::Done);

    let actions = mgr.handle_event(&mut state, Event::Start).unwrap();

    assert_eq!(actions, vec![Action::ArmClock, Action::PlayCue(Cue::MoveStart)]);
    assert_eq!(state.status(), Status::Running);
    assert_eq!(state.time_left(), 2);
    assert_eq!(state.time_elapsed(), 0);
    assert_eq!(state.current_rep(), 1);
}

#[test]
fn reset_from_every_status_is_canonical() {
    let (mut mgr, mut state) = setup(6, 3, 2);
    let canonical = mgr.initial_state();

    // ready
    assert_eq!(mgr.handle_event(&mut state, Event::Reset).unwrap(), vec![Action::DisarmClock]);
    assert_eq!(state, canonical);

    // running, mid-rest
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 7);
    assert_eq!(state.phase(), Phase::Rest);
    mgr.handle_event(&mut state, Event::Reset).unwrap();
    assert_eq!(state, canonical);

    // paused
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 2);
    mgr.handle_event(&mut state, Event::Pause).unwrap();
    mgr.handle_event(&mut state, Event::Reset).unwrap();
    assert_eq!(state, canonical);

    // done
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 15);
    assert_eq!(state.status(), Status::Done);
    mgr.handle_event(&mut state, Event::Reset).unwrap();
    assert_eq!(state, canonical);
    assert_eq!(state.time_left(), 6);
}

#[test]
fn toggle_flips_between_running_and_paused() {
    let (mut mgr, mut state) = setup(10, 5, 2);

    let a = mgr.handle_event(&mut state, Event::Toggle).unwrap();
    assert_eq!(a, vec![Action::ArmClock, Action::PlayCue(Cue::MoveStart)]);
    assert_eq!(state.status(), Status::Running);

    let b = mgr.handle_event(&mut state, Event::Toggle).unwrap();
    assert_eq!(b, vec![Action::DisarmClock]);
    assert_eq!(state.status(), Status::Paused);

    let c = mgr.handle_event(&mut state, Event::Toggle).unwrap();
    assert_eq!(c, vec![Action::ArmClock]);
    assert_eq!(state.status(), Status::Running);
}

#[test]
fn configure_while_ready_resyncs_time_left() {
    let (mut mgr, mut state) = setup(30, 10, 3);

    mgr.handle_event(&mut state, patch(Some(45), None, None)).unwrap();
    assert_eq!(mgr.cfg().move_seconds(), 45);
    assert_eq!(state.time_left(), 45);

    mgr.handle_event(&mut state, patch(None, Some(20), Some(5))).unwrap();
    assert_eq!(mgr.cfg().rest_seconds(), 20);
    assert_eq!(mgr.cfg().repetitions(), 5);
    assert_eq!(state.time_left(), 45);
}

#[test]
fn configure_clamps_to_one() {
    let (mut mgr, mut state) = setup(30, 10, 3);

    mgr.handle_event(&mut state, patch(Some(0), Some(0), Some(0))).unwrap();

    assert_eq!(mgr.cfg().move_seconds(), 1);
    assert_eq!(mgr.cfg().rest_seconds(), 1);
    assert_eq!(mgr.cfg().repetitions(), 1);
    assert_eq!(state.time_left(), 1);
}

#[test]
fn configure_rejected_while_in_progress() {
    let (mut mgr, mut state) = setup(30, 10, 3);
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 3);

    let before_state = state.clone();
    let before_cfg = *mgr.cfg();

    let res = mgr.handle_event(&mut state, patch(Some(5), None, None));
    assert_eq!(res, Err(Error::InvalidConfig(ConfigError::WorkoutActive)));
    assert_eq!(state, before_state);
    assert_eq!(*mgr.cfg(), before_cfg);

    mgr.handle_event(&mut state, Event::Pause).unwrap();
    assert!(mgr.handle_event(&mut state, patch(None, None, Some(9))).is_err());
    assert_eq!(mgr.cfg().repetitions(), 3);
}

#[test]
fn configure_while_done_applies_on_next_start() {
    let (mut mgr, mut state) = setup(2, 1, 1);
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 2);
    assert_eq!(state.status(), Status::Done);

    mgr.handle_event(&mut state, patch(Some(7), None, Some(2))).unwrap();
    assert_eq!(state.status(), Status::Done);
    assert_eq!(state.time_left(), 0);

    mgr.handle_event(&mut state, Event::Start).unwrap();
    assert_eq!(state.time_left(), 7);
    assert_eq!(mgr.total_workout_seconds(), 7 * 2 + 1);
}

#[test]
fn fewer_reps_while_done_keeps_rep_in_range() {
    let (mut mgr, mut state) = setup(1, 1, 3);
    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 5);
    assert_eq!(state.status(), Status::Done);
    assert_eq!(state.current_rep(), 3);

    mgr.handle_event(&mut state, patch(None, None, Some(1))).unwrap();
    assert_eq!(state.status(), Status::Done);
    assert_eq!(state.current_rep(), 1);
    assert_eq!(mgr.snapshot(&state).waybar.rep, 1);
    assert_eq!(mgr.snapshot(&state).waybar.repetitions, 1);

    // raising the count again leaves the finished rep where it is
    mgr.handle_event(&mut state, patch(None, None, Some(4))).unwrap();
    assert_eq!(state.current_rep(), 1);
    assert_eq!(state.status(), Status::Done);
}

#[test]
fn remaining_time_tracks_elapsed() {
    let (mut mgr, mut state) = setup(3, 2, 2);
    assert_eq!(mgr.remaining_workout_seconds(&state), 8);

    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 5);
    assert_eq!(mgr.remaining_workout_seconds(&state), 3);

    mgr.handle_event(&mut state, Event::Pause).unwrap();
    assert_eq!(mgr.remaining_workout_seconds(&state), 3);
}

#[test]
fn no_countdown_replayed_after_resume() {
    let (mut mgr, mut state) = setup(5, 2, 1);
    mgr.handle_event(&mut state, Event::Start).unwrap();

    // 5 -> 4 -> 3 (beep)
    let before_pause = ticks(&mut mgr, &mut state, 2);
    assert_eq!(before_pause, vec![Action::PlayCue(Cue::Countdown)]);

    mgr.handle_event(&mut state, Event::Pause).unwrap();
    let resumed = mgr.handle_event(&mut state, Event::Start).unwrap();
    assert!(!resumed.contains(&Action::PlayCue(Cue::Countdown)));

    // 3 -> 2 (beep), 2 -> 1 (beep), 1 -> 0 (finished)
    let rest = ticks(&mut mgr, &mut state, 3);
    assert_eq!(
        rest,
        vec![
            Action::PlayCue(Cue::Countdown),
            Action::PlayCue(Cue::Countdown),
            Action::DisarmClock,
            Action::PlayCue(Cue::Finished),
        ]
    );
}

#[test]
fn snapshot_reflects_state() {
    let (mut mgr, mut state) = setup(3, 2, 2);

    let snap = mgr.snapshot(&state);
    assert_eq!(snap.waybar.alt, "ready");
    assert_eq!(snap.waybar.total, 8);
    assert_eq!(snap.waybar.remaining, 8);
    assert_eq!(snap.waybar.text, "Ready 0:08");

    mgr.handle_event(&mut state, Event::Start).unwrap();
    ticks(&mut mgr, &mut state, 3);

    let snap = mgr.snapshot(&state);
    assert_eq!(snap.waybar.alt, "rest");
    assert_eq!(snap.waybar.class, "rest");
    assert_eq!(snap.waybar.rep, 1);
    assert_eq!(snap.waybar.time_left, 2);
    assert_eq!(snap.waybar.elapsed, 3);
    assert_eq!(snap.waybar.remaining, 5);
    assert_eq!(snap.waybar.text, "Rest 1/2 0:02");
    assert!(snap.pretty_text.contains("Phase: rest"));

    let json: serde_json::Value = serde_json::from_str(&snap.to_json()).unwrap();
    assert_eq!(json["status"], "running");
    assert_eq!(json["time_left"], 2);
    assert!(json.get("pretty_text").is_none());
}

// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Cue,
    config::Config,
    state::{Phase, State, Status},
};

/// Seconds before a boundary that get a countdown beep.
pub const COUNTDOWN_SECONDS: u64 = 3;

/// Advances a running workout by one second.
///
/// Pure: the input state is not touched and no I/O happens. At most one cue
/// comes back per tick; a phase boundary cue always wins over the countdown.
///
/// If `state` is not Running it is returned unchanged with no cue.
pub fn tick(state: &State, cfg: &Config) -> (State, Option<Cue>) {
    let mut next = state.clone();

    if state.status() != Status::Running {
        return (next, None);
    }

    next.set_time_elapsed(state.time_elapsed().saturating_add(1));

    let new_left = state.time_left().saturating_sub(1);

    if new_left > 0 {
        next.set_time_left(new_left);
        let cue = (new_left <= COUNTDOWN_SECONDS).then_some(Cue::Countdown);
        return (next, cue);
    }

    let cue = match state.phase() {
        Phase::Move if state.current_rep() >= cfg.repetitions() => {
            next.set_status(Status::Done);
            next.set_time_left(0);
            Cue::Finished
        }
        Phase::Move => {
            next.set_phase(Phase::Rest);
            next.set_time_left(cfg.rest_seconds());
            Cue::RestStart
        }
        Phase::Rest => {
            next.set_phase(Phase::Move);
            next.set_time_left(cfg.move_seconds());
            next.set_current_rep(state.current_rep() + 1);
            Cue::MoveStart
        }
    };

    (next, Some(cue))
}

// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use crate::core::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Running,
    Paused,
    Done,
}

impl Status {
    /// Configuration may only change while no workout is in flight.
    pub fn allows_configure(self) -> bool {
        matches!(self, Status::Ready | Status::Done)
    }

    /// Running or Paused: a workout has started and not finished.
    pub fn in_progress(self) -> bool {
        matches!(self, Status::Running | Status::Paused)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Move,
    Rest,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Move => "move",
            Phase::Rest => "rest",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    status: Status,

    // Only meaningful while Running/Paused.
    phase: Phase,

    // 1-based, never above cfg.repetitions()
    current_rep: u32,

    // Seconds left in the current phase.
    time_left: u64,

    // Seconds since the workout started; zeroed on each fresh start.
    time_elapsed: u64,
}

impl State {
    /// Canonical Ready state for `cfg`.
    pub fn new(cfg: &Config) -> Self {
        Self {
            status: Status::Ready,
            phase: Phase::Move,
            current_rep: 1,
            time_left: cfg.move_seconds(),
            time_elapsed: 0,
        }
    }

    pub fn reset(&mut self, cfg: &Config) {
        *self = Self::new(cfg);
    }

    // ---------------- getters ----------------

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_rep(&self) -> u32 {
        self.current_rep
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn time_elapsed(&self) -> u64 {
        self.time_elapsed
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    // ---------------- derived ----------------

    pub fn remaining_workout_seconds(&self, cfg: &Config) -> u64 {
        let total = cfg.total_workout_seconds();
        if self.status.in_progress() {
            total.saturating_sub(self.time_elapsed)
        } else {
            total
        }
    }

    // ---------------- setters (manager/timer only) ----------------

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_current_rep(&mut self, rep: u32) {
        self.current_rep = rep;
    }

    pub(crate) fn set_time_left(&mut self, secs: u64) {
        self.time_left = secs;
    }

    pub(crate) fn set_time_elapsed(&mut self, secs: u64) {
        self.time_elapsed = secs;
    }
}

// Author: Dustin Pilgrim
// License: MIT

mod engine;
mod info;
mod snapshot;

pub use self::info::{format_clock, render_info};

use crate::core::{config::Config, state::State};

/// Owns the workout configuration and turns events into state changes plus
/// actions. Holds no clock and performs no I/O; the daemon does that.
#[derive(Debug, Clone)]
pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    /// Fresh Ready state matching the current configuration.
    pub fn initial_state(&self) -> State {
        State::new(&self.cfg)
    }

    pub fn total_workout_seconds(&self) -> u64 {
        self.cfg.total_workout_seconds()
    }

    pub fn remaining_workout_seconds(&self, state: &State) -> u64 {
        state.remaining_workout_seconds(&self.cfg)
    }
}

// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    info::{InfoSnapshot, WaybarInfo},
    state::State,
};

use super::{render_info, Manager};

impl Manager {
    pub fn snapshot(&self, state: &State) -> InfoSnapshot {
        let cfg = self.cfg();
        let rendered = render_info(cfg, state);

        let waybar = WaybarInfo {
            text: rendered.text,
            alt: rendered.alt.to_string(),
            class: rendered.alt.to_string(),
            tooltip: rendered.tooltip,

            status: state.status().as_str().to_string(),
            phase: state.phase().as_str().to_string(),
            rep: state.current_rep(),
            repetitions: cfg.repetitions(),
            time_left: state.time_left(),
            elapsed: state.time_elapsed(),
            remaining: state.remaining_workout_seconds(cfg),
            total: cfg.total_workout_seconds(),
        };

        InfoSnapshot::new(waybar, rendered.pretty)
    }
}

// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// A moment that needs audio feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    MoveStart,
    RestStart,
    /// One of the last three seconds before a phase boundary.
    Countdown,
    Finished,
}

impl Cue {
    pub fn as_str(self) -> &'static str {
        match self {
            Cue::MoveStart => "move-start",
            Cue::RestStart => "rest-start",
            Cue::Countdown => "countdown",
            Cue::Finished => "finished",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effects requested by the manager. The daemon applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start delivering one tick per second.
    ArmClock,

    /// Stop the clock. Must take effect before the next event is handled.
    DisarmClock,

    /// Hand a cue to the sink (best effort).
    PlayCue(Cue),
}

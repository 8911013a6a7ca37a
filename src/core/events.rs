// Author: Dustin Pilgrim
// License: MIT

use crate::core::config::ConfigPatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One second of running time has passed.
    Tick,

    Start,
    Pause,
    Reset,

    /// Start when idle/paused/done, pause when running.
    Toggle,

    /// Change workout settings. Only honoured while Ready or Done.
    Configure(ConfigPatch),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Tick => "tick",
            Event::Start => "start",
            Event::Pause => "pause",
            Event::Reset => "reset",
            Event::Toggle => "toggle",
            Event::Configure(_) => "configure",
        }
    }
}

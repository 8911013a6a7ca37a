// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::Action;

use super::Daemon;

impl Daemon {
    /// Applies actions in order. Clock changes are synchronous, so a disarm
    /// here is in force before the loop polls the clock again.
    pub(super) fn apply_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::ArmClock => self.clock.arm(),
                Action::DisarmClock => self.clock.disarm(),
                Action::PlayCue(cue) => self.sink.notify(cue),
            }
        }
    }
}

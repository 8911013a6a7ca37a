// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::{Action, Cue},
    config::ConfigPatch,
    error::{ConfigError, Error, StateError},
    events::Event,
    state::{State, Status},
    timer,
};

use super::Manager;

impl Manager {
    /// Applies one event to `state`.
    ///
    /// On `Err` the state is left untouched; callers treat it as a no-op.
    pub fn handle_event(&mut self, state: &mut State, event: Event) -> Result<Vec<Action>, Error> {
        match event {
            Event::Tick => self.on_tick(state),
            Event::Start => self.start(state),
            Event::Pause => self.pause(state),
            Event::Reset => Ok(self.reset(state)),
            Event::Toggle => {
                if state.is_running() {
                    self.pause(state)
                } else {
                    self.start(state)
                }
            }
            Event::Configure(patch) => self.configure(state, &patch),
        }
    }

    fn on_tick(&mut self, state: &mut State) -> Result<Vec<Action>, Error> {
        if !state.is_running() {
            return Err(Error::InvalidState(StateError::NotRunning));
        }

        let (next, cue) = timer::tick(state, &self.cfg);
        let finished = next.status() == Status::Done;
        *state = next;

        let mut out = Vec::with_capacity(2);

        // autostop: nothing else will ever disarm a finished workout
        if finished {
            out.push(Action::DisarmClock);
        }
        if let Some(cue) = cue {
            out.push(Action::PlayCue(cue));
        }

        Ok(out)
    }

    fn start(&mut self, state: &mut State) -> Result<Vec<Action>, Error> {
        match state.status() {
            Status::Running => Err(Error::InvalidState(StateError::AlreadyRunning)),

            Status::Paused => {
                state.set_status(Status::Running);
                Ok(vec![Action::ArmClock])
            }

            Status::Ready | Status::Done => {
                if state.status() == Status::Done {
                    state.reset(&self.cfg);
                }

                state.set_status(Status::Running);
                state.set_time_elapsed(0);

                Ok(vec![Action::ArmClock, Action::PlayCue(Cue::MoveStart)])
            }
        }
    }

    fn pause(&mut self, state: &mut State) -> Result<Vec<Action>, Error> {
        if !state.is_running() {
            return Err(Error::InvalidState(StateError::NotRunning));
        }

        state.set_status(Status::Paused);
        Ok(vec![Action::DisarmClock])
    }

    fn reset(&mut self, state: &mut State) -> Vec<Action> {
        state.reset(&self.cfg);
        vec![Action::DisarmClock]
    }

    fn configure(&mut self, state: &mut State, patch: &ConfigPatch) -> Result<Vec<Action>, Error> {
        if !state.status().allows_configure() {
            return Err(Error::InvalidConfig(ConfigError::WorkoutActive));
        }

        let old_move = self.cfg.move_seconds();
        self.cfg.apply(patch);

        match state.status() {
            Status::Ready if self.cfg.move_seconds() != old_move => {
                state.set_time_left(self.cfg.move_seconds());
            }
            // a finished workout stays on its last rep, which must still exist
            Status::Done if state.current_rep() > self.cfg.repetitions() => {
                state.set_current_rep(self.cfg.repetitions());
            }
            _ => {}
        }

        Ok(Vec::new())
    }
}

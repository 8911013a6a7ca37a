// Author: Dustin Pilgrim
// License: MIT

mod actions;
mod run;


use crate::core::{
    action::Action,
    config::ConfigFile,
    error::Error,
    events::Event,
    manager::Manager,
    manager_msg::Reply,
    state::{State, Status},
};

use crate::services::{
    clock::Clock,
    sink::{CommandSink, CueSink, SinkError},
};

use futures::future::BoxFuture;
use std::path::PathBuf;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// A start waiting on the cue sink. The loop polls `warmup` next to the clock
/// and IPC, so the daemon keeps answering while it runs.
struct PendingStart {
    warmup: BoxFuture<'static, Result<(), SinkError>>,
    reply: Option<Reply>,
}

/// The workout controller runtime: the only owner of the state, the clock
/// and the cue sink. Everything it does happens on the task running `run`.
pub struct Daemon {
    manager: Manager,
    state: State,
    clock: Clock,
    sink: Box<dyn CueSink>,
    pending: Option<PendingStart>,

    config_path: PathBuf,
}

impl Daemon {
    pub fn new(cfg_file: ConfigFile, config_path: PathBuf) -> Self {
        let sink = Box::new(CommandSink::new(cfg_file.cues.clone()));
        Self::with_sink(cfg_file, config_path, sink, Clock::default())
    }

    pub fn with_sink(
        cfg_file: ConfigFile,
        config_path: PathBuf,
        sink: Box<dyn CueSink>,
        clock: Clock,
    ) -> Self {
        let manager = Manager::new(cfg_file.workout);
        let state = manager.initial_state();

        crate::sdebug!(
            "Daemon",
            "workout: move={}s rest={}s reps={} total={}s, config_path={}",
            manager.cfg().move_seconds(),
            manager.cfg().rest_seconds(),
            manager.cfg().repetitions(),
            manager.total_workout_seconds(),
            config_path.display(),
        );

        Self {
            manager,
            state,
            clock,
            sink,
            pending: None,
            config_path,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[cfg(test)]
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    #[cfg(test)]
    pub fn clock_armed(&self) -> bool {
        self.clock.is_armed()
    }

    /// Entry point for client commands. Starts are deferred until the sink
    /// is ready; everything else is answered immediately.
    pub fn command(&mut self, event: Event, reply: Reply) {
        if self.pending.is_some() {
            match event {
                Event::Start => {
                    let _ = reply.send(Ok("Workout already starting".to_string()));
                    return;
                }
                Event::Pause | Event::Toggle => {
                    self.cancel_start("start cancelled");
                    let _ = reply.send(Ok("Start cancelled".to_string()));
                    return;
                }
                Event::Reset => self.cancel_start("start cancelled by reset"),
                Event::Tick | Event::Configure(_) => {}
            }
        }

        if self.starts_workout(&event) {
            crate::sdebug!("Daemon", "{}: waiting for cue sink", event.name());
            self.pending = Some(PendingStart {
                warmup: self.sink.ensure_ready(),
                reply: Some(reply),
            });
            return;
        }

        let name = event.name();
        let out = match self.dispatch(event) {
            Ok(()) => Ok(self.command_summary(name)),
            Err(e) => Err(e.to_string()),
        };
        let _ = reply.send(out);
    }

    /// Resolves when a pending warm-up finishes. Never resolves without one.
    ///
    /// Cancel-safe: the warm-up future stays in `pending` if this is dropped.
    async fn warmup_done(pending: &mut Option<PendingStart>) -> Result<(), SinkError> {
        match pending.as_mut() {
            Some(p) => (&mut p.warmup).await,
            None => std::future::pending().await,
        }
    }

    /// Applies the deferred start once the sink answered, however it answered.
    fn finish_start(&mut self, warmup: Result<(), SinkError>) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        if let Err(e) = warmup {
            crate::swarn!("Daemon", "{e}; continuing without confirmed audio");
        }

        let out = match self.dispatch(Event::Start) {
            Ok(()) => Ok(self.command_summary("start")),
            Err(e) => Err(e.to_string()),
        };

        if let Some(reply) = pending.reply {
            let _ = reply.send(out);
        }
    }

    /// Drops a pending warm-up; the workout stays where it was.
    fn cancel_start(&mut self, why: &str) {
        if let Some(pending) = self.pending.take() {
            crate::sinfo!("Daemon", "{why}");
            if let Some(reply) = pending.reply {
                let _ = reply.send(Err(why.to_string()));
            }
        }
    }

    /// Runs one event through the manager and applies the resulting actions.
    pub fn dispatch(&mut self, event: Event) -> Result<(), Error> {
        let name = event.name();
        let actions = self.handle_event_logged(event)?;

        if name != "tick" {
            crate::sinfo!(
                "Daemon",
                "{} -> {} ({} {}/{}, {}s left)",
                name,
                self.state.status(),
                self.state.phase(),
                self.state.current_rep(),
                self.manager.cfg().repetitions(),
                self.state.time_left(),
            );
        }

        self.apply_actions(actions);
        Ok(())
    }

    fn starts_workout(&self, event: &Event) -> bool {
        match event {
            Event::Start | Event::Toggle => self.state.status() != Status::Running,
            _ => false,
        }
    }

    fn handle_event_logged(&mut self, event: Event) -> Result<Vec<Action>, Error> {
        let label = event.name();

        match self.manager.handle_event(&mut self.state, event) {
            Ok(actions) => {
                if !actions.is_empty() && label != "tick" {
                    crate::sdebug!("Daemon", "actions: {:?}", actions);
                }
                Ok(actions)
            }
            Err(e) => {
                crate::sdebug!("Daemon", "{} ignored: {}", label, e);
                Err(e)
            }
        }
    }
}

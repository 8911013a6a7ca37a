// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    config::ConfigPatch,
    events::Event,
    manager_msg::ManagerMsg,
};

use tokio::sync::{mpsc, watch};

use super::{AnyError, Daemon};

impl Daemon {
    pub async fn run(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError> {
        crate::sinfo!("Daemon", "daemon starting");

        let (tx, mut rx) = mpsc::channel::<ManagerMsg>(64);

        crate::ipc::server::spawn_ipc_server(tx.clone()).await?;

        self.serve(&mut rx, &mut shutdown, &shutdown_tx).await;

        self.clock.disarm();
        Ok(())
    }

    /// The event loop. Split from `run` so it can be driven without a socket.
    pub async fn serve(
        &mut self,
        rx: &mut mpsc::Receiver<ManagerMsg>,
        shutdown: &mut watch::Receiver<bool>,
        shutdown_tx: &watch::Sender<bool>,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        crate::sinfo!("Daemon", "daemon stopping (shutdown requested)");
                        break;
                    }
                }

                _ = self.clock.tick() => {
                    // A tick can only be observed while armed, i.e. while Running.
                    let _ = self.dispatch(Event::Tick);
                }

                warmup = Self::warmup_done(&mut self.pending) => {
                    self.finish_start(warmup);
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        crate::sinfo!("Daemon", "daemon stopping (command channel closed)");
                        break;
                    };

                    if !self.handle_msg(msg, shutdown_tx) {
                        break;
                    }
                }
            }
        }

        self.cancel_start("daemon stopping");
    }

    /// Returns false when the loop should stop.
    fn handle_msg(&mut self, msg: ManagerMsg, shutdown_tx: &watch::Sender<bool>) -> bool {
        match msg {
            ManagerMsg::Command { event, reply } => self.command(event, reply),

            ManagerMsg::GetInfo { reply } => {
                let _ = reply.send(self.manager.snapshot(&self.state));
            }

            ManagerMsg::ReloadConfig { reply } => {
                let _ = reply.send(self.reload_config());
            }

            ManagerMsg::StopDaemon { reply } => {
                crate::sinfo!("Daemon", "daemon stopping (stop requested via IPC)");
                let _ = reply.send(Ok("Stopping intervals daemon".to_string()));
                let _ = shutdown_tx.send(true);
                return false;
            }
        }

        true
    }

    pub(super) fn command_summary(&self, name: &str) -> String {
        let cfg = self.manager.cfg();
        let s = &self.state;

        match name {
            "configure" => format!(
                "Workout set: {}s move / {}s rest × {} ({} total)",
                cfg.move_seconds(),
                cfg.rest_seconds(),
                cfg.repetitions(),
                crate::core::manager::format_clock(cfg.total_workout_seconds()),
            ),
            "reset" => "Workout reset".to_string(),
            _ => format!(
                "{}: {} {}/{} ({} left)",
                s.status(),
                s.phase(),
                s.current_rep(),
                cfg.repetitions(),
                crate::core::manager::format_clock(s.time_left()),
            ),
        }
    }

    fn reload_config(&mut self) -> Result<String, String> {
        let loaded = crate::config::load_from_path(&self.config_path).map_err(|e| {
            crate::serror!("Config", "reload failed: {e:#}");
            format!("reload failed: {e}")
        })?;

        if loaded.path != self.config_path {
            crate::swarn!(
                "Config",
                "reload: primary config failed; fell back to {}",
                loaded.path.display()
            );
            self.config_path = loaded.path.clone();
        }

        self.sink.update_commands(loaded.cfg.cues.clone());

        let patch = ConfigPatch::from_config(&loaded.cfg.workout);
        match self.dispatch(Event::Configure(patch)) {
            Ok(()) => Ok("Configuration reloaded".to_string()),
            Err(e) => {
                crate::sinfo!("Config", "reload: cue commands updated, workout kept ({e})");
                Ok(format!("Cue commands reloaded; workout settings kept ({e})"))
            }
        }
    }
}

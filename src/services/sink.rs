// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use crate::core::{action::Cue, config::CueCommands};

/// Upper bound on the `ready` command; a stuck command counts as a failure.
pub const READY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The `ready` command could not be spawned, exited non-zero or timed out.
    NotReady(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::NotReady(msg) => write!(f, "cue sink not ready: {msg}"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Where cues go. The timer never depends on delivery succeeding.
pub trait CueSink: Send {
    /// Prepares the output (e.g. wakes an audio server). The returned future
    /// owns everything it needs, so the daemon can keep serving while it runs
    /// and drop it to cancel. Should resolve at once when already ready.
    fn ensure_ready(&mut self) -> BoxFuture<'static, Result<(), SinkError>>;

    /// Fire-and-forget. Must not block and must not fail loudly.
    fn notify(&self, cue: Cue);

    /// Swap in new commands after a config reload.
    fn update_commands(&mut self, _commands: CueCommands) {}
}

/// Runs a user-configured shell command per cue.
#[derive(Debug)]
pub struct CommandSink {
    commands: CueCommands,
    /// Shared with in-flight warm-ups; replaced when the `ready` command changes.
    ready: Arc<AtomicBool>,
    ready_timeout: Duration,
}

impl CommandSink {
    pub fn new(commands: CueCommands) -> Self {
        Self {
            commands,
            ready: Arc::new(AtomicBool::new(false)),
            ready_timeout: READY_TIMEOUT,
        }
    }

    pub fn command_for(&self, cue: Cue) -> Option<&str> {
        let cmd = match cue {
            Cue::MoveStart => &self.commands.move_start,
            Cue::RestStart => &self.commands.rest_start,
            Cue::Countdown => &self.commands.countdown,
            Cue::Finished => &self.commands.finished,
        };

        cmd.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    #[cfg(test)]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

impl CueSink for CommandSink {
    fn ensure_ready(&mut self) -> BoxFuture<'static, Result<(), SinkError>> {
        let ready = Arc::clone(&self.ready);
        let cmd = self.commands.ready.clone().filter(|c| !c.trim().is_empty());
        let limit = self.ready_timeout;

        Box::pin(async move {
            if ready.load(Ordering::SeqCst) {
                return Ok(());
            }

            let Some(cmd) = cmd else {
                ready.store(true, Ordering::SeqCst);
                return Ok(());
            };

            crate::sdebug!("Sink", "ready: {}", cmd);

            // dropping the future (cancel or timeout) kills the child
            let run = Command::new("sh")
                .arg("-c")
                .arg(&cmd)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .status();

            let status = timeout(limit, run)
                .await
                .map_err(|_| SinkError::NotReady(format!("'{cmd}' timed out after {}s", limit.as_secs())))?
                .map_err(|e| SinkError::NotReady(format!("failed to run '{cmd}': {e}")))?;

            if !status.success() {
                return Err(SinkError::NotReady(format!("'{cmd}' exited with {status}")));
            }

            ready.store(true, Ordering::SeqCst);
            Ok(())
        })
    }

    fn notify(&self, cue: Cue) {
        let Some(cmd) = self.command_for(cue) else {
            crate::sdebug!("Sink", "cue {} (no command)", cue);
            return;
        };

        crate::sdebug!("Sink", "cue {}: {}", cue, cmd);

        // tokio reaps the child in the background once the handle is dropped
        if let Err(e) = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            crate::swarn!("Sink", "failed to play cue {}: {}", cue, e);
        }
    }

    fn update_commands(&mut self, commands: CueCommands) {
        if commands.ready != self.commands.ready {
            self.ready = Arc::new(AtomicBool::new(false));
        }
        self.commands = commands;
    }
}

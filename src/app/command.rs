// Author: Dustin Pilgrim
// License: MIT

use crate::cli::Command;
use crate::core::info::NOT_RUNNING_JSON;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(cmd: Command) -> Result<(), AnyError> {
    let msg = cmd.to_request();

    match crate::ipc::client::send_raw(&msg).await {
        Ok(resp) => {
            let out = resp.trim_end();
            if out.is_empty() {
                if let Some(fallback) = fallback_message(&cmd) {
                    println!("{fallback}");
                }
            } else if let Some(err) = out.strip_prefix("ERROR: ") {
                eprintln!("intervals: {err}");
            } else {
                println!("{out}");
            }
            Ok(())
        }

        Err(e) => {
            if matches!(cmd, Command::Info { json: true }) {
                // status bars need valid JSON on stdout even when the daemon isn't running
                println!("{NOT_RUNNING_JSON}");
            } else {
                eprintln!("intervals: {e}");
            }
            Ok(())
        }
    }
}

fn fallback_message(cmd: &Command) -> Option<&'static str> {
    match cmd {
        Command::Start => Some("Workout started"),
        Command::Pause => Some("Workout paused"),
        Command::Toggle => Some("Workout toggled"),
        Command::Reset => Some("Workout reset"),
        Command::Set { .. } => Some("Workout updated"),
        Command::Reload => Some("Configuration reloaded"),
        Command::Stop => Some("Stopping intervals daemon"),
        Command::Info { .. } => None,
    }
}

// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "intervals",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interval workout timer"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Start the workout, or resume it when paused")]
    Start,

    #[command(about = "Pause a running workout")]
    Pause,

    #[command(about = "Pause if running, start otherwise")]
    Toggle,

    #[command(about = "Stop the workout and return to the first repetition")]
    Reset,

    #[command(about = "Change move/rest durations or repetitions while not running")]
    Set {
        #[arg(long = "move", value_name = "SECONDS", allow_hyphen_values = true)]
        move_seconds: Option<i64>,

        #[arg(long = "rest", value_name = "SECONDS", allow_hyphen_values = true)]
        rest_seconds: Option<i64>,

        #[arg(long, value_name = "COUNT", allow_hyphen_values = true)]
        reps: Option<i64>,
    },

    #[command(about = "Display current workout information")]
    Info {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Reload the configuration file")]
    Reload,

    #[command(about = "Stop the running daemon")]
    Stop,
}

impl Command {
    /// The request line understood by the daemon's control socket.
    pub fn to_request(&self) -> String {
        match self {
            Command::Start => "start".to_string(),
            Command::Pause => "pause".to_string(),
            Command::Toggle => "toggle".to_string(),
            Command::Reset => "reset".to_string(),
            Command::Set { move_seconds, rest_seconds, reps } => {
                let mut msg = String::from("set");
                if let Some(v) = move_seconds {
                    msg.push_str(&format!(" move={v}"));
                }
                if let Some(v) = rest_seconds {
                    msg.push_str(&format!(" rest={v}"));
                }
                if let Some(v) = reps {
                    msg.push_str(&format!(" reps={v}"));
                }
                msg
            }
            Command::Info { json: true } => "info --json".to_string(),
            Command::Info { json: false } => "info".to_string(),
            Command::Reload => "reload".to_string(),
            Command::Stop => "stop".to_string(),
        }
    }
}

// Author: Dustin Pilgrim
// License: MIT

mod log;

mod app;
mod cli;
mod config;
mod core;
mod daemon;
mod ipc;
mod services;

use clap::Parser;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    let args = cli::Args::parse();

    match args.command.clone() {
        Some(cmd) => app::command::run(cmd).await,
        None => app::daemon_mode::run(args).await,
    }
}

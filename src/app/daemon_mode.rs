// Author: Dustin Pilgrim
// License: MIT

use crate::daemon::Daemon;
use crate::log::{self, LogPolicy};
use std::io;
use std::path::PathBuf;

use crate::cli::Args;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("intervals: {e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    log::set_verbose(args.verbose);
    if args.verbose {
        crate::sdebug!("Intervals", "debug logging enabled");
    }

    // file logging
    let log_path = log::log_path();
    match log::enable_file_output(&log_path, LogPolicy::default()) {
        Ok(()) => crate::sinfo!("Intervals", "file logging enabled: {}", log_path.display()),
        Err(e) => crate::serror!("Intervals", "failed to enable file logging: {}", e),
    }

    crate::sinfo!("Intervals", "intervals starting");

    // bootstrap only if no --config (and bootstrap itself does "only if missing")
    let config_path: PathBuf = match args.config.as_deref() {
        Some(p) => p.to_path_buf(),
        None => {
            match crate::config::bootstrap::ensure_user_config_exists() {
                Ok(Some(p)) => crate::sinfo!("Config", "wrote default config to {}", p.display()),
                Ok(None) => {}
                Err(e) => crate::swarn!("Config", "failed to bootstrap default config: {e}"),
            }
            crate::config::resolve_default_config_path()
        }
    };

    // load (with fallbacks)
    let loaded = crate::config::load_from_path(&config_path).map_err(|e| {
        crate::serror!("Config", "{e:#}");
        io::Error::new(io::ErrorKind::InvalidData, format!("{e:#}"))
    })?;

    // shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut daemon = Daemon::new(loaded.cfg, loaded.path);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(shutdown_rx, shutdown_tx).await }
    });

    let result = tokio::select! {
        res = &mut daemon_task => res,

        _ = tokio::signal::ctrl_c() => {
            crate::sinfo!("Intervals", "received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);
            daemon_task.await
        }
    };

    cleanup_socket();

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            crate::serror!("Intervals", "daemon exited with error: {e}");
            Err(e)
        }
        Err(join_err) => Err(Box::new(join_err)),
    }
}

fn cleanup_socket() {
    if let Ok(path) = crate::ipc::socket_path() {
        let _ = std::fs::remove_file(path);
    }
}

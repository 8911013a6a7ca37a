// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Arguments;
use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use once_cell::sync::Lazy;

const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024; // 5 MiB
const DEFAULT_KEEP_BACKUPS: u32 = 5;

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum LogLevel {
    Error = 1,
    Warn  = 2,
    Info  = 3,
    Debug = 4,
}

impl LogLevel {
    /// Get ANSI color code for terminal output
    fn color(&self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[31m", // Red
            LogLevel::Warn  => "\x1b[33m", // Yellow
            LogLevel::Info  => "\x1b[36m", // Cyan
            LogLevel::Debug => "\x1b[90m", // Gray
        }
    }

    fn short(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERR",
            LogLevel::Warn  => "WRN",
            LogLevel::Info  => "INF",
            LogLevel::Debug => "DBG",
        }
    }
}

const RESET_COLOR: &str = "\x1b[0m";

pub struct Config {
    pub level: LogLevel,
    pub use_colors: bool,
    pub console: bool,
    /// `None` until the daemon enables file output.
    pub file: Option<PathBuf>,
}

pub static GLOBAL_CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| {
    Mutex::new(Config {
        level: LogLevel::Info,
        use_colors: io::stdout().is_terminal(),
        console: false,
        file: None,
    })
});

/// Set verbose/debug mode; verbose also echoes to the console.
pub fn set_verbose(enabled: bool) {
    if let Ok(mut config) = GLOBAL_CONFIG.lock() {
        config.level = if enabled { LogLevel::Debug } else { LogLevel::Info };
        config.console = enabled;
    }
}

/// Starts appending to `path`, rotating it first if it grew too large.
pub fn enable_file_output(path: &Path, policy: LogPolicy) -> io::Result<()> {
    let needs_blank = prepare_log_file(path, policy)?;

    if needs_blank {
        write_raw_line(path, "")?;
    }
    write_raw_line(path, &run_header())?;

    if let Ok(mut config) = GLOBAL_CONFIG.lock() {
        config.file = Some(path.to_path_buf());
    }
    Ok(())
}

/// Core logging function
pub fn log_message(level: LogLevel, prefix: &str, args: Arguments) {
    let Ok(config) = GLOBAL_CONFIG.lock() else {
        return;
    };

    // Skip message if level is lower than configured
    if level > config.level {
        return;
    }

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    // File format (with short level indicator)
    let file_line = format!("[{}][{}][{}] {}", timestamp, level.short(), prefix, args);

    if let Some(path) = &config.file {
        if let Err(e) = write_raw_line(path, &file_line) {
            eprintln!("Failed to write log: {}", e);
        }
    }

    // Console format (with colored bullet if enabled)
    if config.console || level == LogLevel::Error {
        let console_line = if config.use_colors {
            format!("{}●{} [{}][{}] {}", level.color(), RESET_COLOR, timestamp, prefix, args)
        } else {
            file_line
        };

        match level {
            LogLevel::Error => eprintln!("{}", console_line),
            _ => println!("{}", console_line),
        }
    }
}

/// Flexible macro to allow formatted logging
#[macro_export]
macro_rules! slog {
    ($level:expr, $prefix:expr, $($arg:tt)*) => {
        $crate::log::log_message($level, $prefix, format_args!($($arg)*))
    };
}

/// Convenience macros
#[macro_export]
macro_rules! sinfo {
    ($prefix:expr, $($arg:tt)*) => { $crate::slog!($crate::log::LogLevel::Info, $prefix, $($arg)*) };
}

#[macro_export]
macro_rules! swarn {
    ($prefix:expr, $($arg:tt)*) => { $crate::slog!($crate::log::LogLevel::Warn, $prefix, $($arg)*) };
}

#[macro_export]
macro_rules! serror {
    ($prefix:expr, $($arg:tt)*) => { $crate::slog!($crate::log::LogLevel::Error, $prefix, $($arg)*) };
}

#[macro_export]
macro_rules! sdebug {
    ($prefix:expr, $($arg:tt)*) => { $crate::slog!($crate::log::LogLevel::Debug, $prefix, $($arg)*) };
}

/// Default log file: `<cache>/intervals/intervals.log`.
pub fn log_path() -> PathBuf {
    let mut path = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    path.push("intervals");
    path.push("intervals.log");
    path
}

// ---------------- rotation ----------------

pub struct LogPolicy {
    pub max_bytes: u64,
    pub keep_backups: u32,
}

impl Default for LogPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            keep_backups: DEFAULT_KEEP_BACKUPS,
        }
    }
}

/// Ensures the log file's directory exists and rotates the file if needed.
/// Returns whether a blank separator line should precede the next run header.
pub fn prepare_log_file(path: &Path, policy: LogPolicy) -> io::Result<bool> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if meta.len() == 0 {
        return Ok(false);
    }

    if meta.len() >= policy.max_bytes {
        rotate(path, policy.keep_backups)?;
        return Ok(false);
    }

    Ok(true)
}

pub fn run_header() -> String {
    let pid = std::process::id();
    format!("==================== intervals daemon run start (pid={pid}) ====================")
}

fn write_raw_line(path: &Path, line: &str) -> io::Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    f.write_all(line.as_bytes())?;
    f.write_all(b"\n")?;
    Ok(())
}

fn rotate(path: &Path, keep_backups: u32) -> io::Result<()> {
    if keep_backups == 0 {
        let _ = fs::remove_file(path);
        return Ok(());
    }

    for i in (1..keep_backups).rev() {
        let from = rotated_name(path, i);
        let to = rotated_name(path, i + 1);
        if from.exists() {
            let _ = fs::rename(from, to);
        }
    }

    fs::rename(path, rotated_name(path, 1))
}

fn rotated_name(base: &Path, n: u32) -> PathBuf {
    PathBuf::from(format!("{}.{}", base.display(), n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("intervals-log-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_needs_no_separator() {
        let dir = scratch_dir("missing");
        let path = dir.join("a.log");

        assert!(!prepare_log_file(&path, LogPolicy::default()).unwrap());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn small_file_gets_separator() {
        let dir = scratch_dir("small");
        let path = dir.join("a.log");
        fs::write(&path, "hello\n").unwrap();

        assert!(prepare_log_file(&path, LogPolicy::default()).unwrap());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn oversized_file_is_rotated() {
        let dir = scratch_dir("rotate");
        let path = dir.join("a.log");
        fs::write(&path, "0123456789").unwrap();
        fs::write(rotated_name(&path, 1), "older").unwrap();

        let policy = LogPolicy { max_bytes: 5, keep_backups: 3 };
        assert!(!prepare_log_file(&path, policy).unwrap());

        assert!(!path.exists());
        assert_eq!(fs::read_to_string(rotated_name(&path, 1)).unwrap(), "0123456789");
        assert_eq!(fs::read_to_string(rotated_name(&path, 2)).unwrap(), "older");
        let _ = fs::remove_dir_all(dir);
    }
}

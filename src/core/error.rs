// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Rejections from the manager. None of these are fatal: whenever one is
/// returned the workout state is exactly what it was before the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration could not be changed.
    ///
    /// Examples:
    /// - `set move=20` while a workout is running or paused
    InvalidConfig(ConfigError),

    /// A command has no defined effect in the current status.
    ///
    /// Examples:
    /// - start while already running
    /// - pause while ready, paused or done
    /// - a clock tick arriving while not running
    InvalidState(StateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A workout is Running or Paused; settings are frozen until reset/done.
    WorkoutActive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    AlreadyRunning,
    NotRunning,
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(e) => write!(f, "{e}"),
            Error::InvalidState(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WorkoutActive =>
                write!(f, "workout in progress; reset before changing settings"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadyRunning =>
                write!(f, "already running"),
            StateError::NotRunning =>
                write!(f, "not running"),
        }
    }
}

impl std::error::Error for Error {}

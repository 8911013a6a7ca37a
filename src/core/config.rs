// Author: Dustin Pilgrim
// License: MIT

pub const DEFAULT_MOVE_SECONDS: u64 = 30;
pub const DEFAULT_REST_SECONDS: u64 = 10;
pub const DEFAULT_REPETITIONS: u32 = 8;

/// Workout shape: how long each phase lasts and how many repetitions to run.
///
/// All three values are >= 1. Construct through [`Config::new`] (which clamps)
/// so the invariant holds everywhere the manager looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    move_seconds: u64,
    rest_seconds: u64,
    repetitions: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_SECONDS, DEFAULT_REST_SECONDS, DEFAULT_REPETITIONS)
    }
}

impl Config {
    pub fn new(move_seconds: u64, rest_seconds: u64, repetitions: u32) -> Self {
        Self {
            move_seconds: move_seconds.max(1),
            rest_seconds: rest_seconds.max(1),
            repetitions: repetitions.max(1),
        }
    }

    pub fn move_seconds(&self) -> u64 {
        self.move_seconds
    }

    pub fn rest_seconds(&self) -> u64 {
        self.rest_seconds
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Applies a partial update, clamping each provided value to >= 1.
    /// Returns true if anything actually changed.
    pub fn apply(&mut self, patch: &ConfigPatch) -> bool {
        let before = *self;

        if let Some(m) = patch.move_seconds {
            self.move_seconds = m.max(1);
        }
        if let Some(r) = patch.rest_seconds {
            self.rest_seconds = r.max(1);
        }
        if let Some(n) = patch.repetitions {
            self.repetitions = n.max(1);
        }

        *self != before
    }

    pub fn total_workout_seconds(&self) -> u64 {
        total_workout_seconds(self.move_seconds, self.rest_seconds, self.repetitions)
    }
}

/// `move*reps + rest*(reps-1)`; there is no rest after the final repetition.
pub fn total_workout_seconds(move_seconds: u64, rest_seconds: u64, repetitions: u32) -> u64 {
    if repetitions == 0 {
        return 0;
    }

    let reps = u64::from(repetitions);
    move_seconds
        .saturating_mul(reps)
        .saturating_add(rest_seconds.saturating_mul(reps - 1))
}

/// Partial configuration update; `None` leaves a field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub move_seconds: Option<u64>,
    pub rest_seconds: Option<u64>,
    pub repetitions: Option<u32>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.move_seconds.is_none() && self.rest_seconds.is_none() && self.repetitions.is_none()
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            move_seconds: Some(cfg.move_seconds()),
            rest_seconds: Some(cfg.rest_seconds()),
            repetitions: Some(cfg.repetitions()),
        }
    }
}

/// Shell commands run by the cue sink. Every entry is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueCommands {
    /// Run (and awaited) once before the first cue of a session.
    pub ready: Option<String>,
    pub move_start: Option<String>,
    pub rest_start: Option<String>,
    pub countdown: Option<String>,
    pub finished: Option<String>,
}

/// Everything loaded from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub workout: Config,
    pub cues: CueCommands,
}

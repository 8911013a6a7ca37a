// Author: Dustin Pilgrim
// License: MIT

use serde::Deserialize;

use crate::core::config::{
    Config, ConfigFile, CueCommands, DEFAULT_MOVE_SECONDS, DEFAULT_REPETITIONS,
    DEFAULT_REST_SECONDS,
};

/// On-disk shape of `intervals.toml`. Numbers are signed so that zero or
/// negative values can be reported and coerced instead of failing the parse.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub workout: RawWorkout,

    #[serde(default)]
    pub cues: RawCues,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWorkout {
    pub move_seconds: Option<i64>,
    pub rest_seconds: Option<i64>,
    pub repetitions: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCues {
    pub ready: Option<String>,
    pub move_start: Option<String>,
    pub rest_start: Option<String>,
    pub countdown: Option<String>,
    pub finished: Option<String>,
}

impl RawConfig {
    /// Fills defaults and raises non-positive numbers to 1.
    /// Returns the config plus one warning per coerced value.
    pub fn into_config(self) -> (ConfigFile, Vec<String>) {
        let mut warnings = Vec::new();

        let mut coerce = |key: &str, value: Option<i64>, default: u64| -> u64 {
            match value {
                None => default,
                Some(v) if v < 1 => {
                    warnings.push(format!("workout.{key} = {v} is not positive; using 1"));
                    1
                }
                Some(v) => v as u64,
            }
        };

        let move_seconds = coerce("move_seconds", self.workout.move_seconds, DEFAULT_MOVE_SECONDS);
        let rest_seconds = coerce("rest_seconds", self.workout.rest_seconds, DEFAULT_REST_SECONDS);
        let repetitions = coerce(
            "repetitions",
            self.workout.repetitions,
            u64::from(DEFAULT_REPETITIONS),
        );

        let cfg = ConfigFile {
            workout: Config::new(
                move_seconds,
                rest_seconds,
                u32::try_from(repetitions).unwrap_or(u32::MAX),
            ),
            cues: CueCommands {
                ready: non_empty(self.cues.ready),
                move_start: non_empty(self.cues.move_start),
                rest_start: non_empty(self.cues.rest_start),
                countdown: non_empty(self.cues.countdown),
                finished: non_empty(self.cues.finished),
            },
        };

        (cfg, warnings)
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# intervals configuration

[workout]
# Seconds of work per repetition.
move_seconds = 30
# Seconds of rest between repetitions (none after the last one).
rest_seconds = 10
repetitions = 8

[cues]
# Shell commands run for each cue. Leave a cue out to keep it silent.
# `ready` runs once and is awaited before the first cue of a workout.
#
# ready = "pactl info"
# move_start = "paplay /usr/share/sounds/freedesktop/stereo/bell.oga"
# rest_start = "paplay /usr/share/sounds/freedesktop/stereo/complete.oga"
# countdown = "paplay /usr/share/sounds/freedesktop/stereo/message.oga"
# finished = "paplay /usr/share/sounds/freedesktop/stereo/complete.oga"
"#;

/// Writes the default config to the user path if nothing is there yet.
/// Returns the path written, or `None` if a file already existed.
pub fn ensure_user_config_exists() -> io::Result<Option<PathBuf>> {
    let Some(path) = super::user_config_path() else {
        return Ok(None);
    };

    write_default_if_missing(&path).map(|written| written.then_some(path))
}

pub fn write_default_if_missing(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

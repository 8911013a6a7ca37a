// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

/// Snapshot returned from the daemon/manager for `intervals info`.
///
/// - `waybar` is the stable JSON contract.
/// - `pretty_text` is CLI-facing output for `intervals info`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSnapshot {
    pub waybar: WaybarInfo,

    #[serde(skip_serializing)]
    pub pretty_text: String,
}

/// Waybar JSON contract, plus raw numbers for other consumers.
#[derive(Debug, Clone, Serialize)]
pub struct WaybarInfo {
    pub text: String,
    pub alt: String,
    pub class: String,
    pub tooltip: String,

    pub status: String,
    pub phase: String,
    pub rep: u32,
    pub repetitions: u32,
    pub time_left: u64,
    pub elapsed: u64,
    pub remaining: u64,
    pub total: u64,
}

impl InfoSnapshot {
    pub fn new(waybar: WaybarInfo, pretty_text: impl Into<String>) -> Self {
        Self {
            waybar,
            pretty_text: pretty_text.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.waybar).unwrap_or_else(|_| NOT_RUNNING_JSON.to_string())
    }
}

/// Printed by the client when no daemon answers, so bars still get valid JSON.
pub const NOT_RUNNING_JSON: &str =
    r#"{"text":"","alt":"not_running","class":"not_running","tooltip":"intervals not running"}"#;

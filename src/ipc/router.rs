// Author: Dustin Pilgrim
// License: MIT

use crate::core::{config::ConfigPatch, events::Event};

pub const SET_HELP_MESSAGE: &str = "\
Usage: set [move=SECONDS] [rest=SECONDS] [reps=COUNT]

Only allowed while the workout is ready or done.
Values below 1 are raised to 1.

Examples:
  set move=40 rest=20
  set reps=10";

/// A parsed IPC request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Command(Event),
    Info { json: bool },
    Reload,
    Stop,
    Help(&'static str),
}

/// Parses one request line from a client.
pub fn parse_request(raw: &str) -> Result<Request, String> {
    let mut parts = raw.split_whitespace();
    let head = parts.next().unwrap_or("").to_ascii_lowercase();
    let rest: Vec<&str> = parts.collect();

    match head.as_str() {
        "start" => Ok(Request::Command(Event::Start)),
        "pause" => Ok(Request::Command(Event::Pause)),
        "toggle" => Ok(Request::Command(Event::Toggle)),
        "reset" => Ok(Request::Command(Event::Reset)),

        "set" => {
            if rest.iter().any(|a| matches!(*a, "help" | "-h" | "--help")) {
                return Ok(Request::Help(SET_HELP_MESSAGE));
            }
            parse_set_args(&rest).map(|p| Request::Command(Event::Configure(p)))
        }

        "info" => Ok(Request::Info {
            json: rest.contains(&"--json"),
        }),
        "reload" => Ok(Request::Reload),
        "stop" => Ok(Request::Stop),

        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command '{other}'")),
    }
}

/// `move=30 rest=10 reps=8`, any subset, any order.
pub fn parse_set_args(args: &[&str]) -> Result<ConfigPatch, String> {
    let mut patch = ConfigPatch::default();

    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;

        match key.trim().to_ascii_lowercase().as_str() {
            "move" | "move_seconds" => patch.move_seconds = Some(parse_positive(key, value)?),
            "rest" | "rest_seconds" => patch.rest_seconds = Some(parse_positive(key, value)?),
            "reps" | "repetitions" => {
                let n = parse_positive(key, value)?;
                patch.repetitions = Some(u32::try_from(n).unwrap_or(u32::MAX));
            }
            other => return Err(format!("unknown setting '{other}' (use move, rest or reps)")),
        }
    }

    if patch.is_empty() {
        return Err("nothing to set".to_string());
    }

    Ok(patch)
}

/// Integers only; anything below 1 becomes 1.
fn parse_positive(key: &str, value: &str) -> Result<u64, String> {
    let n: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value for {key}: '{value}'"))?;

    Ok(n.max(1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_commands() {
        assert_eq!(parse_request("start").unwrap(), Request::Command(Event::Start));
        assert_eq!(parse_request(" PAUSE \n").unwrap(), Request::Command(Event::Pause));
        assert_eq!(parse_request("toggle").unwrap(), Request::Command(Event::Toggle));
        assert_eq!(parse_request("reset").unwrap(), Request::Command(Event::Reset));
        assert_eq!(parse_request("reload").unwrap(), Request::Reload);
        assert_eq!(parse_request("stop").unwrap(), Request::Stop);
        assert_eq!(parse_request("info").unwrap(), Request::Info { json: false });
        assert_eq!(parse_request("info --json").unwrap(), Request::Info { json: true });
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(parse_request("").is_err());
        assert!(parse_request("jump").unwrap_err().contains("jump"));
    }

    #[test]
    fn parses_set_subsets() {
        let req = parse_request("set rest=15 move=40").unwrap();
        assert_eq!(
            req,
            Request::Command(Event::Configure(ConfigPatch {
                move_seconds: Some(40),
                rest_seconds: Some(15),
                repetitions: None,
            }))
        );

        let patch = parse_set_args(&["reps=12"]).unwrap();
        assert_eq!(patch.repetitions, Some(12));
        assert_eq!(patch.move_seconds, None);
    }

    #[test]
    fn coerces_non_positive_to_one() {
        let patch = parse_set_args(&["move=0", "rest=-5", "reps=-1"]).unwrap();
        assert_eq!(patch.move_seconds, Some(1));
        assert_eq!(patch.rest_seconds, Some(1));
        assert_eq!(patch.repetitions, Some(1));
    }

    #[test]
    fn rejects_garbage_values() {
        assert!(parse_set_args(&["move=abc"]).is_err());
        assert!(parse_set_args(&["move=1.5"]).is_err());
        assert!(parse_set_args(&["move"]).is_err());
        assert!(parse_set_args(&["speed=3"]).is_err());
        assert!(parse_set_args(&[]).is_err());
    }

    #[test]
    fn set_help() {
        assert_eq!(parse_request("set --help").unwrap(), Request::Help(SET_HELP_MESSAGE));
    }
}

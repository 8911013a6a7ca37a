// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use crate::core::config::ConfigFile;

pub mod bootstrap;
pub mod schema;

const SYSTEM_CONFIG_PATH: &str = "/etc/intervals/intervals.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub cfg: ConfigFile,
    /// The file that was actually read; differs from the request on fallback.
    pub path: PathBuf,
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("intervals").join("intervals.toml"))
}

/// User config if present, else the system one, else the user path (so the
/// caller can bootstrap it).
pub fn resolve_default_config_path() -> PathBuf {
    if let Some(user) = user_config_path() {
        if user.exists() {
            return user;
        }
    }

    let system = PathBuf::from(SYSTEM_CONFIG_PATH);
    if system.exists() {
        return system;
    }

    user_config_path().unwrap_or(system)
}

/// Loads `path`. If it is missing, falls back to the system config, and if
/// that is missing too, to built-in defaults. Parse errors are never masked.
pub fn load_from_path(path: &Path) -> Result<LoadedConfig> {
    if path.exists() {
        return load_file(path);
    }

    crate::swarn!("Config", "{} not found", path.display());

    let system = Path::new(SYSTEM_CONFIG_PATH);
    if system != path && system.exists() {
        return load_file(system);
    }

    crate::sinfo!("Config", "using built-in defaults");
    Ok(LoadedConfig {
        cfg: ConfigFile::default(),
        path: path.to_path_buf(),
    })
}

fn load_file(path: &Path) -> Result<LoadedConfig> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;

    let cfg = parse_str(&text)
        .wrap_err_with(|| format!("invalid config {}", path.display()))?;

    crate::sinfo!("Config", "loaded {}", path.display());

    Ok(LoadedConfig {
        cfg,
        path: path.to_path_buf(),
    })
}

pub fn parse_str(text: &str) -> Result<ConfigFile> {
    let raw: schema::RawConfig = toml::from_str(text)?;
    let (cfg, warnings) = raw.into_config();

    for w in warnings {
        crate::swarn!("Config", "{}", w);
    }

    Ok(cfg)
}

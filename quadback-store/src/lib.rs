//! Persistence for the configuration blob. Only the configuration
//! survives restarts; history and stats are never written anywhere.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quadback_engine::GameConfig;

pub const CONFIG_FILE: &str = "quad-n-back-config.json";

/// Default blob location: `$QUADBACK_CONFIG_DIR` if set, else the home
/// directory, else the working directory.
pub fn default_config_path() -> PathBuf {
    std::env::var_os("QUADBACK_CONFIG_DIR")
        .or_else(|| std::env::var_os("HOME"))
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(CONFIG_FILE)
}

/// Loads the persisted configuration. A missing or corrupt blob falls
/// back to the default configuration; session start must never be
/// blocked by stale on-disk state. Unknown fields are ignored and
/// missing fields take their defaults, so blobs from older builds load.
pub fn load_config(path: &Path) -> GameConfig {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring corrupt config at {}: {err}", path.display());
                GameConfig::default()
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => GameConfig::default(),
        Err(err) => {
            log::warn!("unable to read config at {}: {err}", path.display());
            GameConfig::default()
        }
    }
}

pub fn save_config(path: &Path, config: &GameConfig) -> Result<()> {
    let raw = serde_json::to_string_pretty(config)?;
    fs::write(path, raw).with_context(|| format!("writing config to {}", path.display()))
}

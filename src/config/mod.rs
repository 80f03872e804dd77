//! This module handles the application's persisted preferences, loading and
//! saving a `settings.toml` file in the platform configuration directory.
//!
//! The only preference the core owns is the interface language; the file is
//! deliberately tolerant on read so a hand-edited or truncated settings file
//! never prevents startup.
//!
//! # Examples
//!
//! ```no_run
//! use veracity_core::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.language = Some("en".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Veracity";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Persisted interface language code (e.g. `fr`, `en`). Validated
    /// against the supported language set on read, not here.
    pub language: Option<String>,
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

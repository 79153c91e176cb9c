// src/infrastructure/config.rs
use crate::constants::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// TOML configuration for an export directory.
///
/// Lives as `ankiorg.toml` inside the output directory, so the destination
/// carries its own settings and different directories can export different
/// decks. Every field is optional; CLI flags take precedence.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub anki: AnkiConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Defaults {
    #[serde(default = "default_deck")]
    pub deck: String,
    #[serde(default = "default_profile")]
    pub profile: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnkiConfig {
    #[serde(default = "default_path")]
    pub path: String,
}

// Default value functions
fn default_deck() -> String {
    "Default".to_string()
}
fn default_profile() -> String {
    String::new()
}
fn default_path() -> String {
    String::new()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            deck: default_deck(),
            profile: default_profile(),
        }
    }
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load `ankiorg.toml` from a directory, or defaults when there is none.
    ///
    /// A missing file is fine; a file that exists but does not parse is a
    /// hard error rather than silently ignored settings.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

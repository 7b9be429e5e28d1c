//! User configuration.
//!
//! Loaded from `~/.config/labnote/config.toml`, with environment overrides
//! `LABNOTE_BACKEND_URL` and `LABNOTE_EXPERIMENTER`. The default experimenter
//! is an explicit config value passed to the functions that need it, never
//! process-wide mutable state.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Base URL of the AI backend, e.g. `http://localhost:8000`.
    pub backend_url: Option<String>,
    /// Default experimenter name used when a README carries no author.
    pub experimenter: Option<String>,
    /// Request timeout in seconds, overriding the per-endpoint defaults.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Path of the config file, if a config directory exists on this system.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("labnote").join("config.toml"))
    }

    /// Load configuration from disk and apply environment overrides.
    ///
    /// A missing config file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let mut config = match Self::path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config: {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("LABNOTE_BACKEND_URL") {
            if !url.is_empty() {
                config.backend_url = Some(url);
            }
        }
        if let Ok(name) = std::env::var("LABNOTE_EXPERIMENTER") {
            if !name.is_empty() {
                config.experimenter = Some(name);
            }
        }

        Ok(config)
    }

    /// Default experimenter name, empty when unset.
    pub fn experimenter(&self) -> &str {
        self.experimenter.as_deref().unwrap_or("")
    }
}

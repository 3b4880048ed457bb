//! Application configuration management.
//!
//! Persisted user defaults for settings that are tedious to repeat on
//! every invocation: document extensions and the fuzzy bit distance.
//! CLI flags always take precedence over the loaded configuration.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File extensions treated as documents (lowercase, without dot).
    #[serde(default = "crate::corpus::default_extensions")]
    pub extensions: Vec<String>,

    /// Default bit distance used when `--fuzzy` is given without
    /// `--fuzzy-bits`.
    #[serde(default = "default_fuzzy_bits")]
    pub fuzzy_bits: u32,
}

fn default_fuzzy_bits() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: crate::corpus::default_extensions(),
            fuzzy_bits: default_fuzzy_bits(),
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::load_internal() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn load_internal() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration to the default platform-specific path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "sectdupe", "sectdupe")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

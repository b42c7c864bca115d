//! Configuration loading for rufix.
//!
//! `rufix.toml` in the working directory is picked up automatically; an
//! explicit `--config` path must exist and parse. Everything defaults to a
//! usable state, so running without a config file is fine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "rufix.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Complete configuration, as loaded from `rufix.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Rule names to disable.
    pub disable: Vec<String>,
    /// Glob patterns excluded from discovery.
    pub exclude: Vec<String>,
    /// Respect .gitignore files when scanning directories.
    pub respect_gitignore: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            disable: Vec::new(),
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Run external formatters when available.
    pub enabled: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Load configuration. An explicit path must exist; the default file is
/// optional and its absence yields defaults.
pub fn load_config(explicit: Option<&str>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_string(),
        None => {
            if !Path::new(DEFAULT_CONFIG_FILE).exists() {
                return Ok(Config::default());
            }
            DEFAULT_CONFIG_FILE.to_string()
        }
    };
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok(config)
}

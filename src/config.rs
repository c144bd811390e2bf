//! Runtime configuration: optional YAML file, then `RESCUEBAG_*` environment overrides.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::DEFAULT_STORE_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "config/rescuebag.yaml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {name}: '{value}'")]
    Env { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub store_path: String,
    /// Exposes the tier cycle affordance. Off for real users.
    pub debug_tools: bool,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            store_path: DEFAULT_STORE_PATH.to_string(),
            debug_tools: false,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads from `RESCUEBAG_CONFIG` (or the default path) and applies env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("RESCUEBAG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|name| env::var(name).ok())?;
        Ok(config)
    }

    /// Missing file yields defaults; a present but broken file is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(bind) = lookup("RESCUEBAG_BIND") {
            self.bind_addr = bind;
        }
        if let Some(store) = lookup("RESCUEBAG_STORE") {
            self.store_path = store;
        }
        if let Some(raw) = lookup("RESCUEBAG_DEBUG_TOOLS") {
            self.debug_tools = parse_flag(&raw).ok_or(ConfigError::Env {
                name: "RESCUEBAG_DEBUG_TOOLS",
                value: raw,
            })?;
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

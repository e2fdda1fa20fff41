//! Dashboard configuration (`revstock.toml`).
//!
//! Lookup order: an explicit path, `./revstock.toml`, then
//! `<config_dir>/revstock/config.toml`. Missing files fall back to defaults;
//! a file that exists but does not parse is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::{LoadOptions, MalformedRows, DEFAULT_DATE_FORMAT};

pub const LOCAL_CONFIG_FILE: &str = "revstock.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    pub date_format: String,
    pub delimiter: String,
    pub malformed_rows: MalformedRows,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("All.csv"),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            delimiter: ",".to_string(),
            malformed_rows: MalformedRows::Fail,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Symbol selected at startup; the first symbol otherwise.
    pub default_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub dashboard: DashboardConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `explicit` if given, else the first existing default location.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        for candidate in default_locations() {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading config");
                return Self::from_file(&candidate);
            }
        }
        debug!("no config file found; using defaults");
        Ok(Self::default())
    }

    /// Loader options described by the `[data]` table.
    pub fn load_options(&self) -> Result<LoadOptions, ConfigError> {
        let delimiter = match self.data.delimiter.as_bytes() {
            [b] if b.is_ascii() => *b,
            _ => return Err(ConfigError::InvalidDelimiter(self.data.delimiter.clone())),
        };
        Ok(LoadOptions {
            date_format: self.data.date_format.clone(),
            delimiter,
            malformed_rows: self.data.malformed_rows,
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("revstock").join("config.toml"));
    }
    paths
}

//! Server configuration.
//!
//! Read from an optional TOML file, then overridden by environment
//! variables:
//!
//! * `VILLAGE_TABLE_CONFIG`: path of the TOML file (default
//!   `village_table.toml`, skipped if it does not exist)
//! * `BIND_ADDR`, `PORT`: listen address
//! * `VILLAGE_DATA`: data file path or `http(s)://` URL

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use village_table_geometry::CenterOptions;
use village_table_village_models::{DataSourceConfig, VillageFieldMapping};

/// Config file read when `VILLAGE_TABLE_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "village_table.toml";

/// Default limit for a single data file request, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`ServerConfig`].
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment variable has an unusable value.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Where the village boundary file comes from.
    pub source: DataSourceConfig,
    /// Limit for a data file request made over HTTP.
    pub fetch_timeout_secs: u64,
    /// Feature properties for each column.
    pub fields: VillageFieldMapping,
    /// Center resolution tunables.
    pub center: CenterOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            source: DataSourceConfig::default(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            fields: VillageFieldMapping::default(),
            center: CenterOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Loads the config file (if any) and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// environment variable is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let (path, required) = std::env::var("VILLAGE_TABLE_CONFIG").map_or_else(
            |_| (PathBuf::from(DEFAULT_CONFIG_PATH), false),
            |path| (PathBuf::from(path), true),
        );

        let mut config = if required || path.exists() {
            log::info!("Reading config from {}", path.display());
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML config text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text does not parse.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Request timeout for the data file.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Applies `BIND_ADDR`, `PORT`, and `VILLAGE_DATA` as returned by
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `PORT` is not a port number.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(bind_addr) = lookup("BIND_ADDR") {
            self.bind_addr = bind_addr;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(location) = lookup("VILLAGE_DATA") {
            self.source = DataSourceConfig::from_location(&location);
        }
        Ok(())
    }
}

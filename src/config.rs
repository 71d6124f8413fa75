//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/reservas-ledger/config.toml` by
//! default). Every section falls back to its defaults when omitted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::database::DatabaseConfig;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "RESERVAS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub import: ImportSettings,
    pub pagination: PaginationSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data").join("reservas.db"),
        }
    }
}

impl DatabaseSettings {
    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig::sqlite(&self.path)
    }

    pub fn connection_url(&self) -> String {
        self.to_database_config().url()
    }
}

/// When the external import file is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Re-read and append the file before every ledger request.
    #[default]
    EveryRequest,
    /// Apply the file on the first successful ingest of the process only.
    Once,
    /// Never read the file.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub path: PathBuf,
    pub mode: ImportMode,
    /// Rename the file after a successful ingest so it is not applied again.
    pub archive_processed: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data").join("import_reservas.csv"),
            mode: ImportMode::EveryRequest,
            archive_processed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    pub default_per_page: u32,
    /// Upper bound for `per_page`. Unset means callers may ask for any size.
    pub max_per_page: Option<u32>,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            max_per_page: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.default_per_page == 0 {
            return Err(ConfigError::Invalid {
                key: "pagination.default_per_page",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(max) = self.pagination.max_per_page {
            if max < self.pagination.default_per_page {
                return Err(ConfigError::Invalid {
                    key: "pagination.max_per_page",
                    reason: format!(
                        "{} is below default_per_page ({})",
                        max, self.pagination.default_per_page
                    ),
                });
            }
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                key: "database.path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Config path from `RESERVAS_CONFIG`, else the per-user config directory.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .map(|dir| dir.join("reservas-ledger").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

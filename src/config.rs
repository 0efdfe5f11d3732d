//! Configuration module for fileshare.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, ShareError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (`sqlite://...` or `postgres://...`).
    #[serde(default = "default_db_url")]
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_url() -> String {
    "sqlite://data/fileshare.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Sandboxed file storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Sandbox root holding the `public` and `private` subtrees.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_base_dir() -> String {
    "data/files".to_string()
}

fn default_max_upload_size() -> u64 {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Short link configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    /// Length of generated short codes.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

fn default_code_length() -> usize {
    crate::shortlink::DEFAULT_CODE_LENGTH
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/fileshare.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Short link configuration.
    #[serde(default)]
    pub links: LinksConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ShareError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        for message in config.apply_env_overrides() {
            tracing::warn!("{}", message);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ShareError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FILESHARE_HOST`
    /// - `FILESHARE_PORT`
    /// - `FILESHARE_DATABASE_URL`
    /// - `FILESHARE_BASE_DIR`
    /// - `FILESHARE_LOG_LEVEL`
    ///
    /// Empty values are ignored, as is a port that does not parse. Ignored
    /// overrides are returned as messages; logging is usually not set up
    /// yet when configuration is loaded.
    pub fn apply_env_overrides(&mut self) -> Vec<String> {
        let mut ignored = Vec::new();

        if let Some(host) = env_value("FILESHARE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_value("FILESHARE_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => ignored.push(format!("Ignoring unparsable FILESHARE_PORT: {port}")),
            }
        }
        if let Some(url) = env_value("FILESHARE_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(base_dir) = env_value("FILESHARE_BASE_DIR") {
            self.storage.base_dir = base_dir;
        }
        if let Some(level) = env_value("FILESHARE_LOG_LEVEL") {
            self.logging.level = level;
        }

        ignored
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.storage.base_dir.trim().is_empty() {
            return Err(ShareError::Config("storage.base_dir must be set".to_string()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ShareError::Config("database.url must be set".to_string()));
        }
        if !(4..=64).contains(&self.links.code_length) {
            return Err(ShareError::Config(format!(
                "links.code_length must be between 4 and 64, got {}",
                self.links.code_length
            )));
        }
        if self.storage.max_upload_size_mb == 0 {
            return Err(ShareError::Config(
                "storage.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote customer/transaction feed
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_customers_path")]
    pub customers_path: String,

    #[serde(default = "default_transactions_path")]
    pub transactions_path: String,

    /// Per-request timeout, 0 waits indefinitely
    #[serde(default)]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3002".to_string()
}

fn default_customers_path() -> String {
    "/customers".to_string()
}

fn default_transactions_path() -> String {
    "/transactions".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            customers_path: default_customers_path(),
            transactions_path: default_transactions_path(),
            request_timeout_ms: 0,
        }
    }
}

impl SourceConfig {
    /// Config pointing at a different feed, other settings default
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Script URL of the line-chart renderer loaded by the page
    #[serde(default = "default_chart_script_url")]
    pub chart_script_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_chart_script_url() -> String {
    "https://cdn.jsdelivr.net/npm/chart.js@4".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            chart_script_url: default_chart_script_url(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Invalid(error) => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Logs which file was used, and every file that failed to load, so the
    /// caller must have a subscriber installed to see them.
    pub fn load_default() -> Self {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("txlens").join("config.toml")),
            Some(PathBuf::from("/etc/txlens/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// First of `paths` that exists and loads, with environment overrides
    fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply `TXLENS_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Source overrides
        if let Some(url) = lookup("TXLENS_SOURCE_URL") {
            self.source.base_url = url;
        }
        if let Some(timeout) = lookup("TXLENS_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.source.request_timeout_ms = ms;
            }
        }

        // Server overrides
        if let Some(host) = lookup("TXLENS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TXLENS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("TXLENS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TXLENS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# txlens Configuration
#
# Environment variables override these settings:
# - TXLENS_SOURCE_URL
# - TXLENS_REQUEST_TIMEOUT_MS
# - TXLENS_HOST
# - TXLENS_PORT
# - TXLENS_LOG_LEVEL
# - TXLENS_LOG_FORMAT

[source]
# Base URL of the customer/transaction feed
base_url = "http://localhost:3002"

# Collection paths, each returning a JSON array or {"<collection>": [...]}
customers_path = "/customers"
transactions_path = "/transactions"

# Per-request timeout in milliseconds (0 = wait indefinitely)
request_timeout_ms = 0

[server]
# Viewer host
host = "0.0.0.0"

# Viewer port
port = 3000

# Allowed CORS origins for the JSON API (empty = permissive)
cors_origins = []

# Line-chart renderer script loaded by the page
chart_script_url = "https://cdn.jsdelivr.net/npm/chart.js@4"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

//! Server configuration
//!
//! Settings are layered: built-in defaults, then an optional config file
//! (`.toml`, `.yaml`/`.yml` or `.json`), then command-line flags and
//! environment variables applied by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported config file extension: {0}")]
    UnsupportedFormat(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// GraphQL schema limits and caches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Maximum query depth (unlimited when unset)
    #[serde(default)]
    pub limit_depth: Option<usize>,
    /// Maximum query complexity (unlimited when unset)
    #[serde(default)]
    pub limit_complexity: Option<usize>,
    /// Entries kept in the persisted query cache; 0 disables persisted queries
    #[serde(default = "default_persisted_query_cache_size")]
    pub persisted_query_cache_size: usize,
}

fn default_persisted_query_cache_size() -> usize {
    256
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            limit_depth: None,
            limit_complexity: None,
            persisted_query_cache_size: default_persisted_query_cache_size(),
        }
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Serve the GraphiQL landing page on GET
    #[serde(default = "default_true")]
    pub graphiql: bool,
    /// Reject POST requests that could be sent cross-site without a preflight
    #[serde(default = "default_true")]
    pub csrf_prevention: bool,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Start with the built-in sample contacts when no seed file is given
    #[serde(default = "default_true")]
    pub sample_data: bool,
    /// JSON file with the initial contacts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub schema: SchemaConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            graphiql: true,
            csrf_prevention: true,
            max_body_size: default_max_body_size(),
            sample_data: true,
            seed_file: None,
            log_format: LogFormat::default(),
            schema: SchemaConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a file, choosing the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            "json" => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Address string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

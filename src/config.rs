//! Configuration System
//!
//! Settings for the resolver itself: where the document store lives, how the
//! connection fallback reads the environment, and logging. Loaded from layered
//! sources (defaults, global file, workspace files, environment) and validated.

use crate::connection::{DEFAULT_ENV_PREFIX, DEFAULT_HISTORY_LIMIT};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document store location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Connection configuration policy
    #[serde(default)]
    pub connection: ConnectionSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Sled database directory; relative paths resolve against the workspace root
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".siteconf/store")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl StorageConfig {
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            workspace_root.join(&self.store_path)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Prefix of the fallback environment variables
    #[serde(default = "default_env_prefix")]
    pub env_prefix: String,

    /// Default number of history entries returned
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Bound on the active-record fetch, in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_env_prefix() -> String {
    DEFAULT_ENV_PREFIX.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_fetch_timeout_ms() -> u64 {
    5_000
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            env_prefix: default_env_prefix(),
            history_limit: default_history_limit(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Storage(String),
    Connection(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Connection(msg) => write!(f, "Connection: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty".to_string(),
            ));
        }
        if self.connection.env_prefix.is_empty() {
            errors.push(ValidationError::Connection(
                "Environment prefix cannot be empty".to_string(),
            ));
        }
        if self.connection.history_limit == 0 {
            errors.push(ValidationError::Connection(
                "History limit must be at least 1".to_string(),
            ));
        }
        if self.connection.fetch_timeout_ms == 0 {
            errors.push(ValidationError::Connection(
                "Fetch timeout must be at least 1ms".to_string(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format '{}' (must be 'json' or 'text')",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into a single `ApiError`.
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

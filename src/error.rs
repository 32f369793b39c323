//! Error types for site and connection configuration resolution.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Document codec error: {0}")]
    Codec(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Whether the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::IoError(_))
    }
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(io) => StorageError::IoError(io),
            other => StorageError::Unavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Codec(err.to_string())
    }
}

/// Save-time rejection of a connection configuration.
///
/// Each variant names exactly one field and one reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid apiKey format")]
    InvalidApiKey,

    #[error("Invalid authDomain format")]
    InvalidAuthDomain,

    #[error("Invalid storageBucket format")]
    InvalidStorageBucket,

    #[error("Invalid measurementId format")]
    InvalidMeasurementId,
}

impl ValidationError {
    /// Wire name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::InvalidApiKey => "apiKey",
            ValidationError::InvalidAuthDomain => "authDomain",
            ValidationError::InvalidStorageBucket => "storageBucket",
            ValidationError::InvalidMeasurementId => "measurementId",
        }
    }
}

/// Errors surfaced to callers of the configuration API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("No connection credentials available: no usable persisted configuration and no apiKey in the environment defaults")]
    NoCredentials,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Write paths surface store outages as retryable; this core never retries itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::StorageError(err) => err.is_retryable(),
            _ => false,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

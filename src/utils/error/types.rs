//! Error type definitions

use crate::core::import::ImportError;
use thiserror::Error;

/// Result type alias for leadflow
pub type Result<T> = std::result::Result<T, LeadflowError>;

/// Main error type for leadflow
#[derive(Error, Debug)]
pub enum LeadflowError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport-level failures talking to a remote service
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// A remote service answered with a non-success status
    #[error("External service returned status {status}: {body}")]
    External { status: u16, body: String },

    /// Errors reported by the hosted database
    #[error("Storage error: {0}")]
    Storage(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Bulk import could not start
    #[error(transparent)]
    Import(#[from] ImportError),
}

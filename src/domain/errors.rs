//! Domain error types
//!
//! This module defines the error hierarchy for ordersync. Provider failures are kept
//! apart from persistence failures so callers can apply a different policy to each:
//! provider errors degrade to skips, persistence errors end the run.

use thiserror::Error;

/// Main ordersync error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Order provider errors (transient network/HTTP failures)
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Destination store errors (table creation, bulk load)
    #[error("Database error: {0}")]
    Database(String),

    /// Checkpoint persistence errors
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// A buffered row does not fit its destination schema
    #[error("Coercion error in {table}.{column}: {message}")]
    Coercion {
        table: String,
        column: String,
        message: String,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl SyncError {
    /// Whether this error means data may be duplicated or lost on the next run
    ///
    /// Persistence failures (checkpoint write, table load, coercion before load)
    /// are fatal for a run; provider failures are not.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            SyncError::Database(_) | SyncError::Checkpoint(_) | SyncError::Coercion { .. }
        )
    }
}

/// Order provider errors
///
/// Errors that occur when talking to the order-management API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to reach the provider
    #[error("Failed to connect to provider: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The provider answered with an error envelope
    #[error("Provider returned error {code:?}: {message}")]
    Api { code: Option<u32>, message: String },

    /// Response body could not be understood
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Configuration(format!("TOML parse error: {err}"))
    }
}

//! Core error types for duetick-core.
//!
//! This module defines the error hierarchy using thiserror. No error here is
//! fatal to the process: load failures degrade to an absent state, and
//! notification failures are surfaced as warnings by the callers that care.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for duetick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Notification-related errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors.
///
/// Reads never produce these -- a missing or unreadable value loads as
/// absent. Writes report what actually went wrong.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to write the backing file
    #[error("Failed to write store at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded for storage
    #[error("Failed to encode value: {0}")]
    Encode(String),

    /// Backend failure outside file IO
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Notification-specific errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Scheduling a one-shot notification failed
    #[error("Failed to schedule notification: {0}")]
    ScheduleFailed(String),

    /// Cancelling a pending notification failed
    #[error("Failed to cancel notification '{id}': {message}")]
    CancelFailed { id: String, message: String },

    /// Delivery backend failure
    #[error("Notification backend error: {0}")]
    Backend(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

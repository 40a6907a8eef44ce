//! Core error types for focusnotes-core.
//!
//! This module defines the error hierarchy using thiserror. Validation and
//! storage failures are fatal to the operation that raised them; notification
//! failures are not -- callers commit domain state first and report reminder
//! problems separately.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusnotes-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Blob-store related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification-scheduling errors
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Blob-store specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the storage blob
    #[error("Failed to load storage from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to persist the storage blob
    #[error("Failed to save storage to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// The persisted blob could not be parsed at all
    #[error("Storage blob is corrupt: {0}")]
    Corrupt(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised before any state mutation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Referenced entity does not exist
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },

    /// Operation conflicts with current state
    #[error("{0}")]
    InvalidState(String),

    /// A date or time string could not be parsed
    #[error("Invalid {what}: '{value}'")]
    InvalidDateTime { what: &'static str, value: String },
}

/// Notification-scheduling errors. Always non-fatal to domain writes.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The platform scheduler rejected the request
    #[error("Failed to schedule notification: {0}")]
    ScheduleFailed(String),

    /// Cancellation failed for an existing handle
    #[error("Failed to cancel notification '{id}': {message}")]
    CancelFailed { id: String, message: String },
}

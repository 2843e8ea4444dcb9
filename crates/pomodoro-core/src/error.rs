//! Core error types for pomodoro-core.
//!
//! This module defines the error hierarchy using thiserror. Duration
//! validation failures are the only errors the timer itself produces;
//! everything else comes from loading or saving configuration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomodoro-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A work/break duration entry failed validation
    #[error(transparent)]
    InvalidDuration(#[from] InvalidDurationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors outside configuration handling (runtime setup, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which of the two duration entries an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    Work,
    Break,
}

impl fmt::Display for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationField::Work => f.write_str("work"),
            DurationField::Break => f.write_str("break"),
        }
    }
}

/// Why a duration entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationProblem {
    NotANumber,
    NotPositive,
    TooLarge,
}

impl fmt::Display for DurationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationProblem::NotANumber => f.write_str("not a whole number"),
            DurationProblem::NotPositive => f.write_str("must be at least 1 minute"),
            DurationProblem::TooLarge => f.write_str("too large"),
        }
    }
}

/// A work/break minutes entry could not be turned into a duration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} minutes '{input}': {problem}")]
pub struct InvalidDurationError {
    pub field: DurationField,
    pub input: String,
    pub problem: DurationProblem,
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

    /// Key does not name a configuration value
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No directory to keep the configuration in
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

/// Result type alias for CoreError, used by every fallible shell command
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

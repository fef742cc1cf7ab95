//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("AI max_tokens must be between 1 and 8192")]
    InvalidMaxTokens,

    #[error("Default question count must be 5, 6 or 7 (got {0})")]
    InvalidQuestionCount(u8),

    #[error("Priority area count must be at least 1")]
    InvalidPriorityAreaCount,
}

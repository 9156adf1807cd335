//! Error types for the CLI

use deskcalc::core::CalcError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed or written
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// State could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Calculator error
    #[error("{0}")]
    Calc(#[from] CalcError),

    /// Terminal setup or drawing failed
    #[error("Terminal error: {message}")]
    Terminal {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a terminal error
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}

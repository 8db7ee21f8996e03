//! Error - CLI Error Types
//!
//! Defines error types for CLI operations.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use mifgen_encode::EncodeError;
use mifgen_npy::NpyError;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input artifact does not exist
    #[error("Input not found: {0}")]
    InputNotFound(String),

    /// Output file exists and overwriting was not requested
    #[error("Output file already exists: {0} (use --force to overwrite)")]
    OutputExists(String),

    /// Array loading error
    #[error("{0}")]
    Array(#[from] NpyError),

    /// Encoding or writing error
    #[error("{0}")]
    Encode(#[from] EncodeError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Error Conversion
// =============================================================================

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

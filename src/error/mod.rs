//! Error handling module for vtrim

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for vtrim operations
#[derive(Error, Debug)]
pub enum VtrimError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration file or override could not be used
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// External tool could not be started
    #[error("Failed to run {program}: {source}")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool exited unsuccessfully; stderr is kept verbatim
    #[error("FFmpeg error: {stderr}")]
    ToolFailed { code: Option<i32>, stderr: String },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for vtrim operations
pub type VtrimResult<T> = std::result::Result<T, VtrimError>;

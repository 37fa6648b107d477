// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Segment whose start is not strictly before its end
    InvalidSegment { start: u64, end: u64 },
    /// Time string that is not a whole number of seconds, M:SS or H:MM:SS
    InvalidTimeFormat(String),
    /// Time past the end of the loaded video
    OutOfRange { time: u64, duration: u64 },
    /// Media with no usable duration
    InvalidDuration(u64),
    /// File not found
    FileNotFound(String),
    /// File extension outside the accepted video formats
    UnsupportedFormat(String),
    /// Concatenation requested with no segments
    EmptySegmentList,
    /// Output path exists and overwriting is disabled
    OutputExists(String),
    /// Operation that requires loaded media
    NoMediaLoaded,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidSegment { start, end } => write!(
                f,
                "Invalid segment: start ({}s) must be less than end ({}s)",
                start, end
            ),
            DomainError::InvalidTimeFormat(time) => write!(
                f,
                "Invalid time format: {}. Expected seconds, M:SS or H:MM:SS",
                time
            ),
            DomainError::OutOfRange { time, duration } => write!(
                f,
                "Time {}s is past the end of the video ({}s)",
                time, duration
            ),
            DomainError::InvalidDuration(secs) => {
                write!(f, "Invalid media duration: {}s", secs)
            }
            DomainError::FileNotFound(path) => write!(f, "File not found: {}", path),
            DomainError::UnsupportedFormat(path) => write!(
                f,
                "Unsupported format: {} (expected .mp4, .avi, .mov or .mkv)",
                path
            ),
            DomainError::EmptySegmentList => write!(f, "No segments to export"),
            DomainError::OutputExists(path) => write!(
                f,
                "Output file already exists: {} (use --overwrite to replace it)",
                path
            ),
            DomainError::NoMediaLoaded => write!(f, "No video loaded"),
        }
    }
}

impl std::error::Error for DomainError {}

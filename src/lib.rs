//! vtrim Video Trimmer Library
//!
//! Cut single ranges out of a video, or keep several segments and join them
//! into one file, using ffmpeg's lossless stream copy.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{format_time, MediaSource, Segment, SegmentList, Timeline};
pub use error::{VtrimError, VtrimResult};

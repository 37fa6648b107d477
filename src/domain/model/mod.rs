// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;

/// Format whole seconds as `M:SS`.
///
/// Minutes are neither padded nor wrapped into hours, so `format_time(3725)`
/// is `"62:05"`.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// A confirmed `(start, end)` range in whole seconds.
///
/// The constructor is the only way to build one, so `start < end` always
/// holds and the derived duration is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: u64,
    end: u64,
}

impl Segment {
    /// Create a segment, rejecting `start >= end`
    pub fn new(start: u64, end: u64) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidSegment { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Length of the segment in seconds
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            format_time(self.start),
            format_time(self.end),
            format_time(self.duration())
        )
    }
}

/// Ordered list of segments chosen for export.
///
/// Insertion order is preserved. Overlapping, duplicate and out-of-order
/// segments are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment. On rejection the list is left untouched.
    pub fn add(&mut self, start: u64, end: u64) -> Result<Segment, DomainError> {
        let segment = Segment::new(start, end)?;
        self.segments.push(segment);
        Ok(segment)
    }

    /// Remove every segment, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let removed = self.segments.len();
        self.segments.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Sum of all segment durations in seconds
    pub fn total_duration(&self) -> u64 {
        self.segments.iter().map(Segment::duration).sum()
    }
}

/// Start and end markers over a loaded video.
///
/// Both markers stay within `[0, duration]` and `start < end` holds after
/// every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    duration: u64,
    start: u64,
    end: u64,
}

impl Timeline {
    /// Create a timeline spanning the whole video
    pub fn new(duration: u64) -> Result<Self, DomainError> {
        if duration == 0 {
            return Err(DomainError::InvalidDuration(duration));
        }
        Ok(Self {
            duration,
            start: 0,
            end: duration,
        })
    }

    /// Move the start marker, returning the value actually applied.
    ///
    /// A value at or past the end marker is pulled back to `end - 1`.
    pub fn set_start(&mut self, value: u64) -> u64 {
        let value = value.min(self.duration);
        self.start = if value >= self.end { self.end - 1 } else { value };
        self.start
    }

    /// Move the end marker, returning the value actually applied.
    ///
    /// A value at or before the start marker is pushed to `start + 1`.
    pub fn set_end(&mut self, value: u64) -> u64 {
        let value = value.min(self.duration);
        self.end = if value <= self.start { self.start + 1 } else { value };
        self.end
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Total length of the loaded video
    pub fn video_duration(&self) -> u64 {
        self.duration
    }

    /// Length of the current selection
    pub fn selection_duration(&self) -> u64 {
        self.end - self.start
    }

    pub fn start_label(&self) -> String {
        format!("Start Time: {}", format_time(self.start))
    }

    pub fn end_label(&self) -> String {
        format!("End Time: {}", format_time(self.end))
    }

    pub fn duration_label(&self) -> String {
        format!("Duration: {}", format_time(self.selection_duration()))
    }
}

/// A probed input video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub path: PathBuf,
    /// Whole seconds, rounded down
    pub duration: u64,
}

impl MediaSource {
    pub fn new(path: impl Into<PathBuf>, duration: u64) -> Self {
        Self {
            path: path.into(),
            duration,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One `(source, inpoint, outpoint)` triple of a concat list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatEntry {
    pub source: PathBuf,
    pub inpoint: u64,
    pub outpoint: u64,
}

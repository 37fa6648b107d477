// Domain rules - Export policies and ffmpeg request building

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Extensions accepted as input video files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

/// Kind of export, which decides the default output name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Single range cut from the current markers
    Trim,
    /// Stream-copy concatenation of the segment list
    Concat,
}

impl ExportKind {
    fn suffix(self) -> &'static str {
        match self {
            ExportKind::Trim => "_trimmed",
            ExportKind::Concat => "_combined",
        }
    }
}

/// Input file acceptance rules
pub struct MediaFormatRules;

impl MediaFormatRules {
    /// Check the extension against the accepted video formats (case-insensitive)
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Validate that an input path exists and looks like a supported video
    pub fn validate_input(path: &Path) -> Result<(), DomainError> {
        if !Self::is_supported(path) {
            return Err(DomainError::UnsupportedFormat(path.display().to_string()));
        }
        if !path.is_file() {
            return Err(DomainError::FileNotFound(path.display().to_string()));
        }
        Ok(())
    }
}

/// Validation of explicitly requested ranges
pub struct RangeRules;

impl RangeRules {
    /// Accept `start < end <= duration` as a segment; nothing is clamped
    pub fn validate(start: u64, end: u64, duration: u64) -> Result<Segment, DomainError> {
        let segment = Segment::new(start, end)?;
        if end > duration {
            return Err(DomainError::OutOfRange { time: end, duration });
        }
        Ok(segment)
    }
}

/// Default output file naming
pub struct OutputNaming;

impl OutputNaming {
    /// `<dir>/<stem>_trimmed<ext>` or `<dir>/<stem>_combined<ext>`
    pub fn default_output(input: &Path, kind: ExportKind) -> Result<PathBuf, DomainError> {
        let stem = input
            .file_stem()
            .ok_or_else(|| DomainError::BadArgs(format!("Invalid input path: {}", input.display())))?
            .to_string_lossy();
        let extension = input
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let file_name = format!("{}{}{}", stem, kind.suffix(), extension);
        Ok(input.with_file_name(file_name))
    }
}

/// Builds the concat demuxer's list file
pub struct ConcatListBuilder;

impl ConcatListBuilder {
    /// One entry per segment, in list order, all reading from `source`
    pub fn entries(source: &Path, segments: &SegmentList) -> Vec<ConcatEntry> {
        segments
            .iter()
            .map(|segment| ConcatEntry {
                source: source.to_path_buf(),
                inpoint: segment.start(),
                outpoint: segment.end(),
            })
            .collect()
    }

    /// Render entries as `file` / `inpoint` / `outpoint` lines
    pub fn render(entries: &[ConcatEntry]) -> Result<String, DomainError> {
        let mut list = String::new();
        for entry in entries {
            let source = path_str(&entry.source)?;
            list.push_str(&format!("file '{}'\n", Self::quote(source)));
            list.push_str(&format!("inpoint {}\n", entry.inpoint));
            list.push_str(&format!("outpoint {}\n", entry.outpoint));
        }
        Ok(list)
    }

    /// Escape a path for use inside single quotes
    fn quote(path: &str) -> String {
        path.replace('\'', r"'\''")
    }
}

/// Builds ffmpeg argument vectors. The program name is not included.
pub struct CommandBuilder;

impl CommandBuilder {
    /// Stream-copy a single range: `-ss <start> -t <duration> -c copy`
    pub fn trim_args(
        input: &Path,
        start: u64,
        end: u64,
        output: &Path,
    ) -> Result<Vec<String>, DomainError> {
        let segment = Segment::new(start, end)?;
        Ok(vec![
            "-y".to_string(),
            "-i".to_string(),
            path_str(input)?.to_string(),
            "-ss".to_string(),
            segment.start().to_string(),
            "-t".to_string(),
            segment.duration().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            path_str(output)?.to_string(),
        ])
    }

    /// Stream-copy concatenation driven by a list file
    pub fn concat_args(list_file: &Path, output: &Path) -> Result<Vec<String>, DomainError> {
        Ok(vec![
            "-y".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            path_str(list_file)?.to_string(),
            "-c".to_string(),
            "copy".to_string(),
            path_str(output)?.to_string(),
        ])
    }
}

fn path_str(path: &Path) -> Result<&str, DomainError> {
    path.to_str()
        .ok_or_else(|| DomainError::BadArgs(format!("Path is not valid UTF-8: {}", path.display())))
}

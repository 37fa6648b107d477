//! FFprobe adapter for media file probing
//!
//! Reads the container duration from `ffprobe`'s JSON output.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use crate::error::{VtrimError, VtrimResult};
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: String,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    // ffprobe reports numbers as strings in its JSON writer
    duration: Option<String>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter for the given executable name or path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Extract whole seconds from `-show_entries format=duration -of json` output
    fn parse_duration(stdout: &[u8]) -> VtrimResult<u64> {
        let parsed: ProbeOutput =
            serde_json::from_slice(stdout).map_err(|e| VtrimError::ProbeError {
                message: format!("Unreadable ffprobe output: {}", e),
            })?;

        let raw = parsed
            .format
            .and_then(|format| format.duration)
            .ok_or_else(|| VtrimError::ProbeError {
                message: "ffprobe reported no duration".to_string(),
            })?;

        let seconds: f64 = raw.trim().parse().map_err(|_| VtrimError::ProbeError {
            message: format!("Invalid duration value: {}", raw),
        })?;

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(VtrimError::ProbeError {
                message: format!("Invalid duration value: {}", raw),
            });
        }

        Ok(seconds.floor() as u64)
    }
}

impl ProbePort for FFprobeAdapter {
    fn probe_duration(&self, file_path: &Path) -> VtrimResult<u64> {
        debug!(program = %self.program, path = %file_path.display(), "Probing media duration");

        let output = Command::new(&self.program)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
            .arg(file_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| VtrimError::ToolUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VtrimError::ProbeError {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Self::parse_duration(&output.stdout)
    }
}

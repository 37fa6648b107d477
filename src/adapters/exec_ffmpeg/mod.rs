//! FFmpeg execution adapter
//!
//! Runs the external `ffmpeg` binary as a blocking subprocess.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{VtrimError, VtrimResult};
use crate::ports::*;

/// Subprocess-based execution adapter
pub struct FFmpegAdapter {
    program: String,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter for the given executable name or path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ExecutePort for FFmpegAdapter {
    fn run(&self, args: &[String]) -> VtrimResult<ToolOutput> {
        debug!(program = %self.program, ?args, "Running external tool");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| VtrimError::ToolUnavailable {
                program: self.program.clone(),
                source,
            })?;

        debug!(status = ?output.status, "External tool exited");

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn program(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        let adapter = FFmpegAdapter::new("vtrim-definitely-not-installed");
        let result = adapter.run(&["-version".to_string()]);
        assert!(matches!(result, Err(VtrimError::ToolUnavailable { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_keeps_stderr() {
        let adapter = FFmpegAdapter::new("sh");
        let args = vec!["-c".to_string(), "echo 'bad input' >&2; exit 3".to_string()];

        let output = adapter.run(&args).unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr, "bad input\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_success() {
        let adapter = FFmpegAdapter::new("true");
        let output = adapter.run(&[]).unwrap();
        assert!(output.success);
        assert_eq!(output.code, Some(0));
        assert_eq!(adapter.program(), "true");
    }
}

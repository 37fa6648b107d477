//! Interactive editing session
//!
//! Holds the loaded video, its start/end markers and the confirmed segment
//! list, and drives them from line-oriented commands:
//!
//! ```text
//! start 0:10
//! end 0:25
//! add
//! export highlights.mp4
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::app::export_interactor::{ConcatRequest, ExportInteractor, ExportReport, TrimRequest};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RangeRules;
use crate::error::{VtrimError, VtrimResult};
use crate::utils::TimeParser;

const HELP: &str = "\
Commands:
  start <time>      move the start marker (SS, M:SS or H:MM:SS)
  end <time>        move the end marker
  add               keep the range between the markers as a segment
  clear             remove all segments
  list              show segments and their total duration
  status            show markers and selection duration
  trim [output]     save the range between the markers
  export [output]   save all segments joined together
  help              show this text
  quit              leave the session";

/// State of one editing session
#[derive(Debug, Default)]
pub struct Session {
    media: Option<MediaSource>,
    timeline: Option<Timeline>,
    segments: SegmentList,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a video, resetting the markers to its full length.
    ///
    /// Segments belong to the previous video and are dropped.
    pub fn load(&mut self, media: MediaSource) -> Result<(), DomainError> {
        let timeline = Timeline::new(media.duration)?;
        self.timeline = Some(timeline);
        self.media = Some(media);
        self.segments.clear();
        Ok(())
    }

    pub fn media(&self) -> Option<&MediaSource> {
        self.media.as_ref()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn segments(&self) -> &SegmentList {
        &self.segments
    }

    pub fn set_start(&mut self, value: u64) -> Result<u64, DomainError> {
        Ok(self.timeline_mut()?.set_start(value))
    }

    pub fn set_end(&mut self, value: u64) -> Result<u64, DomainError> {
        Ok(self.timeline_mut()?.set_end(value))
    }

    /// Confirm the current markers as a new segment
    pub fn add_segment(&mut self) -> Result<Segment, DomainError> {
        let timeline = self.timeline.as_ref().ok_or(DomainError::NoMediaLoaded)?;
        self.segments.add(timeline.start(), timeline.end())
    }

    /// Add an explicit range without touching the markers
    pub fn add_range(&mut self, start: u64, end: u64) -> Result<Segment, DomainError> {
        let media = self.media.as_ref().ok_or(DomainError::NoMediaLoaded)?;
        let segment = RangeRules::validate(start, end, media.duration)?;
        self.segments.add(segment.start(), segment.end())
    }

    pub fn clear_segments(&mut self) -> usize {
        self.segments.clear()
    }

    /// Trim request for the range between the markers
    pub fn trim_request(&self, output: Option<PathBuf>) -> Result<TrimRequest, DomainError> {
        let media = self.media.as_ref().ok_or(DomainError::NoMediaLoaded)?;
        let timeline = self.timeline.as_ref().ok_or(DomainError::NoMediaLoaded)?;
        Ok(TrimRequest {
            input: media.path.clone(),
            start: timeline.start(),
            end: timeline.end(),
            output,
        })
    }

    /// Concatenation request for the segment list
    pub fn concat_request(&self, output: Option<PathBuf>) -> Result<ConcatRequest, DomainError> {
        let media = self.media.as_ref().ok_or(DomainError::NoMediaLoaded)?;
        Ok(ConcatRequest {
            input: media.path.clone(),
            segments: self.segments.clone(),
            output,
        })
    }

    fn timeline_mut(&mut self) -> Result<&mut Timeline, DomainError> {
        self.timeline.as_mut().ok_or(DomainError::NoMediaLoaded)
    }
}

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start(u64),
    End(u64),
    Add,
    Clear,
    List,
    Status,
    Trim(Option<PathBuf>),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, DomainError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let path = || (!rest.is_empty()).then(|| PathBuf::from(rest));
        let no_args = |command: SessionCommand| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(DomainError::BadArgs(format!("'{}' takes no arguments", word)))
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "start" => SessionCommand::Start(Self::time_arg(word, rest)?),
            "end" => SessionCommand::End(Self::time_arg(word, rest)?),
            "add" => no_args(SessionCommand::Add)?,
            "clear" => no_args(SessionCommand::Clear)?,
            "list" => no_args(SessionCommand::List)?,
            "status" => no_args(SessionCommand::Status)?,
            "trim" => SessionCommand::Trim(path()),
            "export" => SessionCommand::Export(path()),
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => {
                return Err(DomainError::BadArgs(format!(
                    "Unknown command '{}'. Type 'help' for a list of commands",
                    other
                )))
            }
        };
        Ok(Some(command))
    }

    fn time_arg(word: &str, rest: &str) -> Result<u64, DomainError> {
        if rest.is_empty() {
            return Err(DomainError::BadArgs(format!("'{}' needs a time", word)));
        }
        TimeParser::parse_seconds(rest)
    }
}

/// Drives a [`Session`] from a command stream
pub struct SessionRunner<'a> {
    session: Session,
    exporter: &'a ExportInteractor,
}

impl<'a> SessionRunner<'a> {
    pub fn new(session: Session, exporter: &'a ExportInteractor) -> Self {
        Self { session, exporter }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Execute commands until `quit` or end of input.
    ///
    /// Command errors are reported on `out` and the session carries on; only
    /// I/O errors on the streams themselves end the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> VtrimResult<()> {
        for line in input.lines() {
            let line = line?;
            let command = match SessionCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "Error: {}", e)?;
                    continue;
                }
            };

            debug!(?command, "Session command");
            if command == SessionCommand::Quit {
                break;
            }
            self.execute(command, out)?;
        }
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> VtrimResult<()> {
        match command {
            SessionCommand::Start(value) => match self.session.set_start(value) {
                Ok(_) => self.write_markers(out)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            SessionCommand::End(value) => match self.session.set_end(value) {
                Ok(_) => self.write_markers(out)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            SessionCommand::Add => match self.session.add_segment() {
                Ok(segment) => writeln!(
                    out,
                    "Added segment {}: {}",
                    self.session.segments().len(),
                    segment
                )?,
                Err(e @ DomainError::InvalidSegment { .. }) => {
                    warn!("Rejected segment: {}", e);
                    writeln!(out, "Warning: {}", e)?;
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            SessionCommand::Clear => {
                let removed = self.session.clear_segments();
                writeln!(out, "Cleared {} segment(s)", removed)?;
            }
            SessionCommand::List => write_segments(self.session.segments(), out)?,
            SessionCommand::Status => {
                self.write_markers(out)?;
                writeln!(out, "Segments: {}", self.session.segments().len())?;
            }
            SessionCommand::Trim(output) => {
                let result = self
                    .session
                    .trim_request(output)
                    .map_err(VtrimError::from)
                    .and_then(|request| self.exporter.trim(&request));
                write_export_result(result, out)?;
            }
            SessionCommand::Export(output) => {
                let result = self
                    .session
                    .concat_request(output)
                    .map_err(VtrimError::from)
                    .and_then(|request| self.exporter.concat(&request));
                write_export_result(result, out)?;
            }
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn write_markers<W: Write>(&self, out: &mut W) -> VtrimResult<()> {
        match self.session.timeline() {
            Some(timeline) => writeln!(
                out,
                "{} | {} | {}",
                timeline.start_label(),
                timeline.end_label(),
                timeline.duration_label()
            )?,
            None => writeln!(out, "Error: {}", DomainError::NoMediaLoaded)?,
        }
        Ok(())
    }
}

/// Print numbered segments followed by their total duration
pub fn write_segments<W: Write>(segments: &SegmentList, out: &mut W) -> std::io::Result<()> {
    if segments.is_empty() {
        return writeln!(out, "No segments");
    }
    for (i, segment) in segments.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, segment)?;
    }
    writeln!(out, "Total: {}", format_time(segments.total_duration()))
}

/// Print a finished export, or the dry-run command line
pub fn write_export_report<W: Write>(report: &ExportReport, out: &mut W) -> std::io::Result<()> {
    if report.executed {
        return writeln!(out, "Saved {}", report.output.display());
    }

    if let Some(list) = &report.concat_list {
        writeln!(out, "# concat list")?;
        write!(out, "{}", list)?;
    }
    writeln!(out, "{}", command_line(&report.program, &report.args))
}

fn write_export_result<W: Write>(result: VtrimResult<ExportReport>, out: &mut W) -> VtrimResult<()> {
    match result {
        Ok(report) => write_export_report(&report, out)?,
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    Ok(())
}

/// Render a command line, single-quoting arguments that need it
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|arg| {
            if !arg.is_empty()
                && arg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_./:=".contains(c))
            {
                arg.to_string()
            } else {
                format!("'{}'", arg.replace('\'', r"'\''"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

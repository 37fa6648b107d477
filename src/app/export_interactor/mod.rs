// Export interactor - Orchestrates trim and concatenation exports

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::error::{VtrimError, VtrimResult};
use crate::ports::*;

/// Placeholder shown for the list file in dry runs
pub const DRY_RUN_LIST_PLACEHOLDER: &str = "<concat-list>";

/// Export behaviour resolved from configuration
#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    pub overwrite: bool,
    pub temp_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Single-range trim request
#[derive(Debug, Clone)]
pub struct TrimRequest {
    pub input: PathBuf,
    pub start: u64,
    pub end: u64,
    pub output: Option<PathBuf>,
}

/// Multi-segment concatenation request
#[derive(Debug, Clone)]
pub struct ConcatRequest {
    pub input: PathBuf,
    pub segments: SegmentList,
    pub output: Option<PathBuf>,
}

/// What an export did, or would do in a dry run
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub kind: ExportKind,
    pub output: PathBuf,
    pub program: String,
    pub args: Vec<String>,
    /// Contents of the concat list, for concatenation exports
    pub concat_list: Option<String>,
    /// False for dry runs
    pub executed: bool,
}

/// Interactor for export use cases
pub struct ExportInteractor {
    execute_port: Arc<dyn ExecutePort>,
    settings: ExportSettings,
}

impl ExportInteractor {
    /// Create new export interactor with injected port
    pub fn new(execute_port: Arc<dyn ExecutePort>, settings: ExportSettings) -> Self {
        Self {
            execute_port,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Cut one range out of the input with stream copy
    pub fn trim(&self, request: &TrimRequest) -> VtrimResult<ExportReport> {
        let output = self.resolve_output(&request.input, request.output.as_deref(), ExportKind::Trim)?;
        let args = CommandBuilder::trim_args(&request.input, request.start, request.end, &output)?;

        let report = ExportReport {
            kind: ExportKind::Trim,
            output,
            program: self.execute_port.program().to_string(),
            args,
            concat_list: None,
            executed: !self.settings.dry_run,
        };

        if self.settings.dry_run {
            return Ok(report);
        }

        info!(
            input = %request.input.display(),
            output = %report.output.display(),
            start = request.start,
            end = request.end,
            "Trimming video"
        );
        self.run_tool(&report.args)?;
        info!(output = %report.output.display(), "Video trimmed successfully");

        Ok(report)
    }

    /// Join every segment of the list into one output with the concat demuxer
    pub fn concat(&self, request: &ConcatRequest) -> VtrimResult<ExportReport> {
        if request.segments.is_empty() {
            return Err(DomainError::EmptySegmentList.into());
        }

        let output =
            self.resolve_output(&request.input, request.output.as_deref(), ExportKind::Concat)?;
        // The demuxer resolves relative entries against the list file's directory
        let source = absolute_path(&request.input)?;
        let entries = ConcatListBuilder::entries(&source, &request.segments);
        let list = ConcatListBuilder::render(&entries)?;

        if self.settings.dry_run {
            let args = CommandBuilder::concat_args(Path::new(DRY_RUN_LIST_PLACEHOLDER), &output)?;
            return Ok(ExportReport {
                kind: ExportKind::Concat,
                output,
                program: self.execute_port.program().to_string(),
                args,
                concat_list: Some(list),
                executed: false,
            });
        }

        let mut list_file = self.create_list_file()?;
        list_file.write_all(list.as_bytes())?;
        list_file.flush()?;
        debug!(path = %list_file.path().display(), entries = entries.len(), "Wrote concat list");

        let args = CommandBuilder::concat_args(list_file.path(), &output)?;

        info!(
            input = %request.input.display(),
            output = %output.display(),
            segments = request.segments.len(),
            total = %format_time(request.segments.total_duration()),
            "Concatenating segments"
        );
        let outcome = self.run_tool(&args);

        // The list file is removed on both the success and the failure path
        if let Err(e) = list_file.close() {
            warn!("Failed to remove concat list file: {}", e);
        }
        outcome?;

        info!(output = %output.display(), "Segments combined successfully");

        Ok(ExportReport {
            kind: ExportKind::Concat,
            output,
            program: self.execute_port.program().to_string(),
            args,
            concat_list: Some(list),
            executed: true,
        })
    }

    /// Pick the output path and enforce the overwrite policy
    fn resolve_output(
        &self,
        input: &Path,
        requested: Option<&Path>,
        kind: ExportKind,
    ) -> VtrimResult<PathBuf> {
        let output = match requested {
            Some(path) => path.to_path_buf(),
            None => OutputNaming::default_output(input, kind)?,
        };

        if same_file(input, &output) {
            return Err(DomainError::BadArgs(format!(
                "Output would overwrite the input file: {}",
                output.display()
            ))
            .into());
        }

        if output.exists() && !self.settings.overwrite {
            return Err(DomainError::OutputExists(output.display().to_string()).into());
        }

        Ok(output)
    }

    fn create_list_file(&self) -> VtrimResult<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("vtrim-concat-").suffix(".txt");

        let file = match &self.settings.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }

    /// Run the tool, turning a non-zero exit into an error carrying stderr
    fn run_tool(&self, args: &[String]) -> VtrimResult<()> {
        let output = self.execute_port.run(args)?;
        if !output.success {
            error!(code = ?output.code, "{} failed", self.execute_port.program());
            return Err(VtrimError::ToolFailed {
                code: output.code,
                stderr: output.stderr,
            });
        }
        Ok(())
    }
}

fn absolute_path(path: &Path) -> VtrimResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every invocation together with the list file contents seen
    /// while the tool was running
    struct RecordingPort {
        calls: Mutex<Vec<Vec<String>>>,
        lists: Mutex<Vec<String>>,
        result: ToolOutput,
    }

    impl RecordingPort {
        fn new(success: bool, stderr: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                lists: Mutex::new(Vec::new()),
                result: ToolOutput {
                    success,
                    code: Some(if success { 0 } else { 1 }),
                    stderr: stderr.to_string(),
                },
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ExecutePort for RecordingPort {
        fn run(&self, args: &[String]) -> VtrimResult<ToolOutput> {
            if let Some(pos) = args.iter().position(|a| a == "concat") {
                let list_path = &args[pos + 4];
                let contents = std::fs::read_to_string(list_path).unwrap();
                self.lists.lock().unwrap().push(contents);
            }
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.result.clone())
        }

        fn program(&self) -> &str {
            "ffmpeg"
        }
    }

    fn segments(ranges: &[(u64, u64)]) -> SegmentList {
        let mut list = SegmentList::new();
        for &(start, end) in ranges {
            list.add(start, end).unwrap();
        }
        list
    }

    fn interactor(port: Arc<RecordingPort>, temp_dir: &Path) -> ExportInteractor {
        ExportInteractor::new(
            port,
            ExportSettings {
                temp_dir: Some(temp_dir.to_path_buf()),
                ..ExportSettings::default()
            },
        )
    }

    #[test]
    fn test_trim_runs_tool_with_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie.mp4");
        std::fs::write(&input, b"fake").unwrap();

        let port = Arc::new(RecordingPort::new(true, ""));
        let report = interactor(port.clone(), dir.path())
            .trim(&TrimRequest {
                input: input.clone(),
                start: 5,
                end: 65,
                output: None,
            })
            .unwrap();

        assert!(report.executed);
        assert_eq!(report.output, dir.path().join("movie_trimmed.mp4"));
        let calls = port.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][3..7], ["-ss", "5", "-t", "60"]);
    }

    #[test]
    fn test_concat_writes_list_and_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie.mkv");
        std::fs::write(&input, b"fake").unwrap();

        let port = Arc::new(RecordingPort::new(true, ""));
        let report = interactor(port.clone(), temp.path())
            .concat(&ConcatRequest {
                input: input.clone(),
                segments: segments(&[(0, 10), (20, 30)]),
                output: None,
            })
            .unwrap();

        assert_eq!(report.output, dir.path().join("movie_combined.mkv"));
        let lists = port.lists.lock().unwrap().clone();
        assert_eq!(lists.len(), 1);
        assert_eq!(
            lists[0],
            format!(
                "file '{0}'\ninpoint 0\noutpoint 10\nfile '{0}'\ninpoint 20\noutpoint 30\n",
                input.display()
            )
        );
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_concat_failure_surfaces_stderr_and_removes_list() {
        let dir = tempfile::tempdir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie.mp4");
        std::fs::write(&input, b"fake").unwrap();

        let port = Arc::new(RecordingPort::new(false, "Invalid data found when processing input"));
        let err = interactor(port, temp.path())
            .concat(&ConcatRequest {
                input,
                segments: segments(&[(0, 10)]),
                output: None,
            })
            .unwrap_err();

        match err {
            VtrimError::ToolFailed { stderr, .. } => {
                assert_eq!(stderr, "Invalid data found when processing input")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_concat_empty_list_rejected_without_running() {
        let dir = tempfile::tempdir().unwrap();
        let port = Arc::new(RecordingPort::new(true, ""));
        let err = interactor(port.clone(), dir.path())
            .concat(&ConcatRequest {
                input: dir.path().join("movie.mp4"),
                segments: SegmentList::new(),
                output: None,
            })
            .unwrap_err();

        assert!(matches!(err, VtrimError::Domain(DomainError::EmptySegmentList)));
        assert!(port.calls().is_empty());
    }

    #[test]
    fn test_existing_output_refused_unless_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie.mp4");
        let output = dir.path().join("out.mp4");
        std::fs::write(&input, b"fake").unwrap();
        std::fs::write(&output, b"old").unwrap();

        let request = TrimRequest {
            input,
            start: 0,
            end: 10,
            output: Some(output),
        };

        let port = Arc::new(RecordingPort::new(true, ""));
        let err = interactor(port.clone(), dir.path()).trim(&request).unwrap_err();
        assert!(matches!(err, VtrimError::Domain(DomainError::OutputExists(_))));
        assert!(port.calls().is_empty());

        let overwriting = ExportInteractor::new(
            port.clone(),
            ExportSettings {
                overwrite: true,
                ..ExportSettings::default()
            },
        );
        assert!(overwriting.trim(&request).is_ok());
        assert_eq!(port.calls().len(), 1);
    }

    #[test]
    fn test_output_equal_to_input_refused() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie.mp4");
        std::fs::write(&input, b"fake").unwrap();

        let port = Arc::new(RecordingPort::new(true, ""));
        let exporter = ExportInteractor::new(
            port.clone(),
            ExportSettings {
                overwrite: true,
                ..ExportSettings::default()
            },
        );
        let err = exporter
            .trim(&TrimRequest {
                input: input.clone(),
                start: 0,
                end: 10,
                output: Some(input),
            })
            .unwrap_err();

        assert!(matches!(err, VtrimError::Domain(DomainError::BadArgs(_))));
        assert!(port.calls().is_empty());
    }

    #[test]
    fn test_dry_run_does_not_execute() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie.mp4");

        let port = Arc::new(RecordingPort::new(true, ""));
        let exporter = ExportInteractor::new(
            port.clone(),
            ExportSettings {
                dry_run: true,
                temp_dir: Some(dir.path().to_path_buf()),
                ..ExportSettings::default()
            },
        );

        let report = exporter
            .concat(&ConcatRequest {
                input,
                segments: segments(&[(3, 9)]),
                output: None,
            })
            .unwrap();

        assert!(!report.executed);
        assert!(report.args.contains(&DRY_RUN_LIST_PLACEHOLDER.to_string()));
        assert!(report.concat_list.unwrap().contains("inpoint 3\noutpoint 9\n"));
        assert!(port.calls().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_concat_list_uses_absolute_source() {
        let port = Arc::new(RecordingPort::new(true, ""));
        let exporter = ExportInteractor::new(
            port,
            ExportSettings {
                dry_run: true,
                ..ExportSettings::default()
            },
        );

        let report = exporter
            .concat(&ConcatRequest {
                input: PathBuf::from("relative/movie.mp4"),
                segments: segments(&[(0, 4)]),
                output: Some(PathBuf::from("/nonexistent/out.mp4")),
            })
            .unwrap();

        let expected = std::env::current_dir().unwrap().join("relative/movie.mp4");
        assert!(report
            .concat_list
            .unwrap()
            .starts_with(&format!("file '{}'\n", expected.display())));
    }
}

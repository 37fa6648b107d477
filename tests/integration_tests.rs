use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use vtrim_cli::app::*;
use vtrim_cli::ports::*;
use vtrim_cli::*;

/// Test utilities for export flows
mod test_utils {
    use super::*;

    /// Probe returning a fixed duration
    pub struct FixedProbe(pub u64);

    impl ProbePort for FixedProbe {
        fn probe_duration(&self, _file_path: &Path) -> VtrimResult<u64> {
            Ok(self.0)
        }
    }

    /// Tool that records its arguments and the concat list it was given
    pub struct FakeTool {
        pub calls: Mutex<Vec<Vec<String>>>,
        pub lists: Mutex<Vec<String>>,
        pub fail_with: Option<String>,
    }

    impl FakeTool {
        pub fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                lists: Mutex::new(Vec::new()),
                fail_with: None,
            })
        }

        pub fn failing(stderr: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                lists: Mutex::new(Vec::new()),
                fail_with: Some(stderr.to_string()),
            })
        }
    }

    impl ExecutePort for FakeTool {
        fn run(&self, args: &[String]) -> VtrimResult<ToolOutput> {
            if let Some(i) = args.iter().position(|a| a == "-i") {
                if args.contains(&"concat".to_string()) {
                    let list = std::fs::read_to_string(&args[i + 1])?;
                    self.lists.lock().unwrap().push(list);
                }
            }
            self.calls.lock().unwrap().push(args.to_vec());

            Ok(match &self.fail_with {
                Some(stderr) => ToolOutput {
                    success: false,
                    code: Some(1),
                    stderr: stderr.clone(),
                },
                None => ToolOutput {
                    success: true,
                    code: Some(0),
                    stderr: String::new(),
                },
            })
        }

        fn program(&self) -> &str {
            "ffmpeg"
        }
    }

    /// Create a placeholder input file
    pub fn create_test_video(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"fake video data").unwrap();
        path
    }

    pub fn container(tool: Arc<FakeTool>, duration: u64, temp_dir: &Path) -> AppContainer {
        AppContainer::with_ports(
            Arc::new(FixedProbe(duration)),
            tool,
            ExportSettings {
                temp_dir: Some(temp_dir.to_path_buf()),
                ..ExportSettings::default()
            },
        )
    }
}

use test_utils::*;

#[test]
fn test_marker_workflow_to_concat_export() {
    let dir = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    let input = create_test_video(&dir, "lecture.mp4");
    let tool = FakeTool::succeeding();
    let container = container(tool.clone(), 600, temp.path());

    let media = container.inspect_interactor().load_media(&input, None).unwrap();
    let mut session = Session::new();
    session.load(media).unwrap();

    session.set_start(0).unwrap();
    session.set_end(10).unwrap();
    session.add_segment().unwrap();
    session.set_end(30).unwrap();
    session.set_start(20).unwrap();
    session.add_segment().unwrap();

    assert_eq!(session.segments().total_duration(), 20);
    assert_eq!(format_time(session.segments().total_duration()), "0:20");

    let report = container
        .export_interactor()
        .concat(&session.concat_request(None).unwrap())
        .unwrap();

    assert_eq!(report.output, dir.path().join("lecture_combined.mp4"));
    let lists = tool.lists.lock().unwrap();
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
fn test_rejected_segment_leaves_list_unchanged() {
    let mut segments = SegmentList::new();
    segments.add(0, 10).unwrap();

    let before = segments.clone();
    assert!(matches!(
        segments.add(10, 5),
        Err(DomainError::InvalidSegment { start: 10, end: 5 })
    ));
    assert_eq!(segments, before);

    segments.clear();
    assert!(segments.is_empty());
}

#[test]
fn test_trim_uses_current_markers() {
    let dir = TempDir::new().unwrap();
    let input = create_test_video(&dir, "match.mkv");
    let tool = FakeTool::succeeding();
    let container = container(tool.clone(), 5400, dir.path());

    let mut session = Session::new();
    session
        .load(container.inspect_interactor().load_media(&input, None).unwrap())
        .unwrap();
    session.set_start(125).unwrap();
    session.set_end(185).unwrap();

    let output = dir.path().join("goal.mkv");
    let report = container
        .export_interactor()
        .trim(&session.trim_request(Some(output.clone())).unwrap())
        .unwrap();

    assert_eq!(report.output, output);
    let calls = tool.calls.lock().unwrap();
    assert_eq!(
        calls[0],
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-ss".to_string(),
            "125".to_string(),
            "-t".to_string(),
            "60".to_string(),
            "-c".to_string(),
            "copy".to_string(),
            output.display().to_string(),
        ]
    );
}

#[test]
fn test_tool_failure_reported_verbatim() {
    let dir = TempDir::new().unwrap();
    let input = create_test_video(&dir, "broken.avi");
    let stderr = "[mov,mp4] moov atom not found\nbroken.avi: Invalid data found when processing input\n";
    let container = container(FakeTool::failing(stderr), 60, dir.path());

    let err = container
        .export_interactor()
        .trim(&TrimRequest {
            input,
            start: 0,
            end: 30,
            output: None,
        })
        .unwrap_err();

    assert_eq!(err.to_string(), format!("FFmpeg error: {}", stderr));
}

#[test]
fn test_each_export_gets_its_own_list_file() {
    let dir = TempDir::new().unwrap();
    let input = create_test_video(&dir, "a.mp4");
    let tool = FakeTool::succeeding();
    let container = container(tool.clone(), 60, dir.path());

    let mut segments = SegmentList::new();
    segments.add(1, 2).unwrap();

    for name in ["one.mp4", "two.mp4"] {
        container
            .export_interactor()
            .concat(&ConcatRequest {
                input: input.clone(),
                segments: segments.clone(),
                output: Some(dir.path().join(name)),
            })
            .unwrap();
    }

    let calls = tool.calls.lock().unwrap();
    let list_paths: Vec<&String> = calls.iter().map(|args| &args[6]).collect();
    assert_eq!(list_paths.len(), 2);
    assert_ne!(list_paths[0], list_paths[1]);
    assert!(list_paths.iter().all(|p| p.contains("vtrim-concat-")));
}

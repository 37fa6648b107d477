//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Input video shared by all commands
#[derive(Args, Debug)]
pub struct MediaArgs {
    /// Input video file (.mp4, .avi, .mov, .mkv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Use this duration in seconds instead of probing with ffprobe
    #[arg(long)]
    pub duration: Option<u64>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub media: MediaArgs,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    #[command(flatten)]
    pub media: MediaArgs,

    /// Start time (SS, M:SS or H:MM:SS)
    #[arg(short, long, default_value = "0")]
    pub start: String,

    /// End time (default: end of the video)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output file path (default: <name>_trimmed<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the ffmpeg command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the concat command
#[derive(Args, Debug)]
pub struct ConcatArgs {
    #[command(flatten)]
    pub media: MediaArgs,

    /// Segment as START-END, repeatable; kept in the order given
    #[arg(short, long = "segment", value_name = "START-END", required = true)]
    pub segments: Vec<String>,

    /// Output file path (default: <name>_combined<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the concat list and ffmpeg command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the session command
#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub media: MediaArgs,

    /// Read commands from a file instead of standard input
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Print ffmpeg commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

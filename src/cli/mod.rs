//! CLI module for vtrim
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod args;
pub mod commands;

/// vtrim - cut and join video segments without re-encoding
///
/// Cuts are stream copies made by ffmpeg; segment boundaries are whole
/// seconds.
#[derive(Parser, Debug)]
#[command(name = "vtrim")]
#[command(about = "vtrim - Cut and join video segments without re-encoding")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command; they override config file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: ./vtrim.toml when present)
    #[arg(long, env = "VTRIM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Replace existing output files
    #[arg(long, global = true)]
    pub overwrite: bool,

    /// ffmpeg executable
    #[arg(long, global = true)]
    pub ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long, global = true)]
    pub ffprobe: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the duration of a video file
    Inspect(args::InspectArgs),
    /// Save a single range of a video
    Trim(args::TrimArgs),
    /// Join several ranges of a video into one file
    Concat(args::ConcatArgs),
    /// Edit markers and segments interactively
    Session(args::SessionArgs),
}

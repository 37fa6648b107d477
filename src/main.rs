//! vtrim CLI Video Trimmer
//!
//! Cuts and joins video segments with ffmpeg stream copy.
//!
//! # Usage
//!
//! ```bash
//! vtrim inspect --input talk.mp4
//! vtrim trim --input talk.mp4 --start 1:00 --end 2:30
//! vtrim concat --input talk.mp4 --segment 0:00-0:10 --segment 0:20-0:30
//! vtrim session --input talk.mp4
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vtrim_cli::adapters::init_logging;
use vtrim_cli::cli::{commands, Cli};
use vtrim_cli::config_initialization::initialize_configuration;

/// Main entry point for the vtrim CLI application
fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let resolved = initialize_configuration(&cli.global).context("Failed to load configuration")?;
    init_logging(&resolved.config.logging.level, resolved.config.logging.json)?;

    info!("Starting vtrim");
    match &resolved.source {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("Using default configuration"),
    }

    commands::execute(cli.command, &resolved.config)?;

    info!("vtrim completed successfully");
    Ok(())
}

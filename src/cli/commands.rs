//! Command implementations

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::AppConfig;
use crate::app::container::AppContainer;
use crate::app::export_interactor::{ExportReport, TrimRequest};
use crate::app::session::{write_export_report, write_segments, Session, SessionRunner};
use crate::cli::args::{ConcatArgs, InspectArgs, MediaArgs, SessionArgs, TrimArgs};
use crate::cli::Commands;
use crate::domain::model::{format_time, MediaSource};
use crate::domain::rules::RangeRules;
use crate::utils::TimeParser;

/// Dispatch a parsed command
pub fn execute(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            inspect(args, &AppContainer::new(config, false))
        }
        Commands::Trim(args) => {
            info!("Executing trim command");
            let container = AppContainer::new(config, args.dry_run);
            trim(args, &container)
        }
        Commands::Concat(args) => {
            info!("Executing concat command");
            let container = AppContainer::new(config, args.dry_run);
            concat(args, &container)
        }
        Commands::Session(args) => {
            info!("Executing session command");
            let container = AppContainer::new(config, args.dry_run);
            session(args, &container)
        }
    }
}

/// Execute the inspect command
pub fn inspect(args: InspectArgs, container: &AppContainer) -> Result<()> {
    let media = load_media(&args.media, container)?;

    println!("File: {}", media.path.display());
    println!(
        "Duration: {} ({} seconds)",
        format_time(media.duration),
        media.duration
    );
    Ok(())
}

/// Execute the trim command
pub fn trim(args: TrimArgs, container: &AppContainer) -> Result<()> {
    let media = load_media(&args.media, container)?;

    let start = TimeParser::parse_seconds(&args.start)
        .map_err(|e| anyhow::anyhow!("Invalid start time '{}': {}", args.start, e))?;
    let end = match &args.end {
        Some(end) => TimeParser::parse_seconds(end)
            .map_err(|e| anyhow::anyhow!("Invalid end time '{}': {}", end, e))?,
        None => media.duration,
    };
    let range = RangeRules::validate(start, end, media.duration)?;

    let request = TrimRequest {
        input: media.path.clone(),
        start: range.start(),
        end: range.end(),
        output: args.output,
    };
    let report = container
        .export_interactor()
        .trim(&request)
        .context("Failed to trim video")?;

    print_report(&report)
}

/// Execute the concat command
pub fn concat(args: ConcatArgs, container: &AppContainer) -> Result<()> {
    let media = load_media(&args.media, container)?;
    let mut session = Session::new();
    session.load(media)?;

    for spec in &args.segments {
        let added = TimeParser::parse_range(spec)
            .and_then(|(start, end)| session.add_range(start, end));
        match added {
            Ok(segment) => debug!(%segment, "Added segment"),
            // Rejected segments leave the list unchanged
            Err(e) => eprintln!("Warning: skipping segment {}: {}", spec, e),
        }
    }

    let mut stdout = io::stdout().lock();
    write_segments(session.segments(), &mut stdout)?;
    drop(stdout);

    let request = session.concat_request(args.output)?;
    let report = container
        .export_interactor()
        .concat(&request)
        .context("Failed to combine segments")?;

    print_report(&report)
}

/// Execute the session command
pub fn session(args: SessionArgs, container: &AppContainer) -> Result<()> {
    let media = load_media(&args.media, container)?;
    let mut session = Session::new();
    session.load(media)?;

    let mut stdout = io::stdout().lock();
    if let (Some(media), Some(timeline)) = (session.media(), session.timeline()) {
        writeln!(
            stdout,
            "Loaded {} ({}). Type 'help' for commands.",
            media.path.display(),
            format_time(timeline.video_duration())
        )?;
    }

    let mut runner = SessionRunner::new(session, container.export_interactor());
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            runner.run(BufReader::new(file), &mut stdout)?;
        }
        None => runner.run(io::stdin().lock(), &mut stdout)?,
    }

    info!(
        segments = runner.session().segments().len(),
        "Session finished"
    );
    Ok(())
}

fn load_media(args: &MediaArgs, container: &AppContainer) -> Result<MediaSource> {
    container
        .inspect_interactor()
        .load_media(&args.input, args.duration)
        .with_context(|| format!("Failed to load {}", args.input.display()))
}

fn print_report(report: &ExportReport) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_export_report(report, &mut stdout)?;
    Ok(())
}

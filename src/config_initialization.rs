//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter, DEFAULT_CONFIG_FILE};
use crate::cli::GlobalArgs;
use crate::error::{VtrimError, VtrimResult};

/// Configuration after all layers were applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AppConfig,
    /// File the base layer came from, if any
    pub source: Option<PathBuf>,
}

/// Resolve configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(args: &GlobalArgs) -> VtrimResult<ResolvedConfig> {
    let (mut config, source) = load_config_file(args.config.as_deref())?;
    apply_environment_overrides(&mut config, |key| std::env::var(key).ok())?;
    apply_cli_overrides(&mut config, args);
    Ok(ResolvedConfig { config, source })
}

/// Load the explicit config file, or `vtrim.toml` from the working directory
/// when present, or fall back to defaults
fn load_config_file(explicit: Option<&Path>) -> VtrimResult<(AppConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((TomlConfigAdapter::load(path)?, Some(path.to_path_buf())));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        let config = TomlConfigAdapter::load(&local)?;
        return Ok((config, Some(local)));
    }

    Ok((AppConfig::default(), None))
}

/// Apply `VTRIM_*` environment variables
pub fn apply_environment_overrides<F>(config: &mut AppConfig, lookup: F) -> VtrimResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("VTRIM_FFMPEG") {
        config.tools.ffmpeg = value;
    }
    if let Some(value) = lookup("VTRIM_FFPROBE") {
        config.tools.ffprobe = value;
    }
    if let Some(value) = lookup("VTRIM_OVERWRITE") {
        config.export.overwrite = parse_bool("VTRIM_OVERWRITE", &value)?;
    }
    if let Some(value) = lookup("VTRIM_TEMP_DIR") {
        config.export.temp_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = lookup("VTRIM_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Some(value) = lookup("VTRIM_LOG_JSON") {
        config.logging.json = parse_bool("VTRIM_LOG_JSON", &value)?;
    }
    Ok(())
}

/// Apply command-line overrides. Flags can only switch behaviour on.
fn apply_cli_overrides(config: &mut AppConfig, args: &GlobalArgs) {
    if let Some(ffmpeg) = &args.ffmpeg {
        config.tools.ffmpeg = ffmpeg.clone();
    }
    if let Some(ffprobe) = &args.ffprobe {
        config.tools.ffprobe = ffprobe.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.log_json {
        config.logging.json = true;
    }
    if args.overwrite {
        config.export.overwrite = true;
    }
}

fn parse_bool(key: &str, value: &str) -> VtrimResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(VtrimError::ConfigError {
            message: format!("Invalid boolean for {}: {}", key, value),
        }),
    }
}

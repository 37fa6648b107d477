// TOML config adapter - Configuration loading from TOML files

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{VtrimError, VtrimResult};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "vtrim.toml";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// External executables
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Export behaviour
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Replace an existing output file
    pub overwrite: bool,
    /// Directory for concat list files; system temp dir when unset
    pub temp_dir: Option<PathBuf>,
}

/// Logging output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn parse(toml_content: &str) -> VtrimResult<AppConfig> {
        toml::from_str(toml_content).map_err(|e| VtrimError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Load configuration from a file
    pub fn load(file_path: &Path) -> VtrimResult<AppConfig> {
        let content = std::fs::read_to_string(file_path).map_err(|e| VtrimError::ConfigError {
            message: format!("Failed to read config file {}: {}", file_path.display(), e),
        })?;
        Self::parse(&content)
    }
}

// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::error::{VtrimError, VtrimResult};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so they never
/// mix with command output. A second call is a no-op.
pub fn init_logging(level: &str, json: bool) -> VtrimResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| VtrimError::ConfigError {
            message: format!("Invalid log level '{}': {}", level, e),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Ignore the error from an already installed subscriber
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    Ok(())
}

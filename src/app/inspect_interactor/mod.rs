// Inspect interactor - Validates and probes input videos

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::error::VtrimResult;
use crate::ports::*;

/// Interactor for loading media
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected port
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Validate the input and determine its duration.
    ///
    /// `duration_override` skips probing entirely.
    pub fn load_media(&self, path: &Path, duration_override: Option<u64>) -> VtrimResult<MediaSource> {
        MediaFormatRules::validate_input(path)?;

        let duration = match duration_override {
            Some(duration) => duration,
            None => self.probe_port.probe_duration(path)?,
        };

        if duration == 0 {
            return Err(DomainError::InvalidDuration(duration).into());
        }

        info!(path = %path.display(), duration = %format_time(duration), "Loaded video");
        Ok(MediaSource::new(path, duration))
    }
}

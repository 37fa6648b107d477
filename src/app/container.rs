use std::sync::Arc;

use crate::adapters::{AppConfig, FFmpegAdapter, FFprobeAdapter};
use crate::app::{
    export_interactor::{ExportInteractor, ExportSettings},
    inspect_interactor::InspectInteractor,
};
use crate::ports::{ExecutePort, ProbePort};

/// Wires adapters into interactors
pub struct AppContainer {
    inspect_interactor: InspectInteractor,
    export_interactor: ExportInteractor,
}

impl AppContainer {
    /// Build the production wiring from resolved configuration
    pub fn new(config: &AppConfig, dry_run: bool) -> Self {
        let probe_port: Arc<dyn ProbePort> = Arc::new(FFprobeAdapter::new(&config.tools.ffprobe));
        let execute_port: Arc<dyn ExecutePort> = Arc::new(FFmpegAdapter::new(&config.tools.ffmpeg));

        let settings = ExportSettings {
            overwrite: config.export.overwrite,
            temp_dir: config.export.temp_dir.clone(),
            dry_run,
        };

        Self::with_ports(probe_port, execute_port, settings)
    }

    /// Build with explicit ports
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            inspect_interactor: InspectInteractor::new(probe_port),
            export_interactor: ExportInteractor::new(execute_port, settings),
        }
    }

    pub fn inspect_interactor(&self) -> &InspectInteractor {
        &self.inspect_interactor
    }

    pub fn export_interactor(&self) -> &ExportInteractor {
        &self.export_interactor
    }
}

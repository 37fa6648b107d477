// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::error::VtrimResult;

/// Outcome of one external tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

/// Port for running the external media tool
pub trait ExecutePort: Send + Sync {
    /// Run the tool with `args` and wait for it to exit
    fn run(&self, args: &[String]) -> VtrimResult<ToolOutput>;

    /// Name of the program, for logs and dry runs
    fn program(&self) -> &str;
}

/// Port for media file probing
pub trait ProbePort: Send + Sync {
    /// Duration of the media in whole seconds, rounded down
    fn probe_duration(&self, file_path: &Path) -> VtrimResult<u64>;
}

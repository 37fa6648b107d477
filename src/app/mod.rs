// Application layer - Use case interactors

pub mod container;
pub mod export_interactor;
pub mod inspect_interactor;
pub mod session;

// Re-export interactors
pub use container::AppContainer;
pub use export_interactor::{ConcatRequest, ExportInteractor, ExportReport, ExportSettings, TrimRequest};
pub use inspect_interactor::InspectInteractor;
pub use session::{Session, SessionCommand, SessionRunner};

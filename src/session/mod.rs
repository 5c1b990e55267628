pub mod coordinator;
pub mod display;
pub mod store;

pub use coordinator::{CycleOutcome, CycleReport, FileVisual, Session, StatusCoordinator};
pub use display::ConsoleSummary;
pub use store::JsonSettingsStore;

use std::future::Future;
use std::path::Path;

use crate::core::color::ColorCustomization;
use crate::core::snapshot::StatusSnapshot;
use crate::error::Result;

pub trait StatusQuery {
    fn query(&self, root: &Path) -> impl Future<Output = Result<StatusSnapshot>>;
}

pub trait OverlayStore {
    fn read(&self) -> impl Future<Output = Result<ColorCustomization>>;

    /// `None` removes the customization instead of writing an empty object.
    fn write(&self, overlay: Option<ColorCustomization>) -> impl Future<Output = Result<()>>;
}

pub trait SummaryDisplay {
    fn show(&self, text: &str);
}

/// Host notifications that re-run a status cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    ConfigurationChanged,
    DocumentOpened,
    DocumentChanged,
    DocumentSaved,
    FilesCreated,
    FilesDeleted,
    FilesRenamed,
    ActiveEditorChanged,
}

impl Trigger {
    /// Unsaved edits cannot change what git reports for the file.
    pub fn updates_visuals(self) -> bool {
        match self {
            Trigger::DocumentChanged => false,
            Trigger::ConfigurationChanged
            | Trigger::DocumentOpened
            | Trigger::DocumentSaved
            | Trigger::FilesCreated
            | Trigger::FilesDeleted
            | Trigger::FilesRenamed
            | Trigger::ActiveEditorChanged => true,
        }
    }
}

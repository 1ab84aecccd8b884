use std::path::PathBuf;

mod handlers;
mod worker;

// Re-export types from library crates
pub use pdf_images::{FileId, ImagesOptions, Selection};
pub use worker::worker_task;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    /// Append files to the selection, in the given order
    ImagesAdd {
        paths: Vec<PathBuf>,
    },
    ImagesRemove {
        id: FileId,
    },
    ImagesClear,
    /// Build a PDF from the current selection
    ImagesBuild {
        options: ImagesOptions,
        output_path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    ImagesSelectionChanged {
        entries: Vec<SelectionEntry>,
    },
    ImagesComplete {
        path: PathBuf,
        page_count: usize,
    },
    Error {
        message: String,
    },
}

/// One row of the selection as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub id: FileId,
    pub name: String,
}

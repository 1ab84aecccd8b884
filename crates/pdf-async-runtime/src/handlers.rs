use crate::{PdfUpdate, SelectionEntry};
use pdf_images::{FileId, ImageFile, ImagesError, ImagesOptions, SelectedFile, Selection};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub fn send_selection(selection: &Selection, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    let entries = selection
        .entries()
        .iter()
        .map(|(id, file)| SelectionEntry {
            id: *id,
            name: file.name().to_string(),
        })
        .collect();
    let _ = update_tx.send(PdfUpdate::ImagesSelectionChanged { entries });
}

pub fn handle_add(
    paths: Vec<PathBuf>,
    selection: &Selection,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) -> Selection {
    let mut files = Vec::new();
    for path in paths {
        match SelectedFile::from_path(&path) {
            Ok(file) => files.push(file),
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                let _ = update_tx.send(PdfUpdate::Error {
                    message: format!("Cannot add {}: {e}", path.display()),
                });
            }
        }
    }

    if files.is_empty() {
        return selection.clone();
    }

    let (next, ids) = selection.with_files(files);
    log::debug!("Added {} files to selection", ids.len());
    send_selection(&next, update_tx);
    next
}

pub fn handle_remove(
    id: FileId,
    selection: &Selection,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) -> Selection {
    if !selection.contains(id) {
        let _ = update_tx.send(PdfUpdate::Error {
            message: format!("No selected file with id {}", id.0),
        });
        return selection.clone();
    }

    let next = selection.without(id);
    send_selection(&next, update_tx);
    next
}

pub async fn handle_build(
    selection: &Selection,
    options: ImagesOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    if selection.is_empty() {
        let _ = update_tx.send(PdfUpdate::Error {
            message: ImagesError::EmptySelection.to_string(),
        });
        return;
    }

    let files = selection.files();
    let total = files.len();
    let _ = update_tx.send(PdfUpdate::Progress {
        operation: "Building PDF".to_string(),
        current: 0,
        total,
    });

    match pdf_images::generate_pdf(&files, &options, &output_path).await {
        Ok(page_count) => {
            let _ = update_tx.send(PdfUpdate::Progress {
                operation: "Building PDF".to_string(),
                current: total,
                total,
            });
            let _ = update_tx.send(PdfUpdate::ImagesComplete {
                path: output_path,
                page_count,
            });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to generate PDF: {e}"),
            });
        }
    }
}

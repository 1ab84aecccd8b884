use crate::{PdfCommand, PdfUpdate, handlers};
use pdf_images::Selection;
use tokio::sync::mpsc;

/// Async worker task that owns the selection, processes commands and sends updates.
///
/// Runs until every command sender is dropped.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    let mut selection = Selection::new();

    while let Some(cmd) = command_rx.recv().await {
        selection = process_command(cmd, selection, &update_tx).await;
    }

    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: PdfCommand,
    selection: Selection,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) -> Selection {
    match cmd {
        PdfCommand::ImagesAdd { paths } => handlers::handle_add(paths, &selection, update_tx),
        PdfCommand::ImagesRemove { id } => handlers::handle_remove(id, &selection, update_tx),
        PdfCommand::ImagesClear => {
            let cleared = selection.cleared();
            handlers::send_selection(&cleared, update_tx);
            cleared
        }
        PdfCommand::ImagesBuild {
            options,
            output_path,
        } => {
            // Builds read the selection but never change it
            handlers::handle_build(&selection, options, output_path, update_tx).await;
            selection
        }
    }
}

//! Document output and the one-shot build-and-save entry point

use crate::assemble::{ImageDocument, build};
use crate::decode::ImageFile;
use crate::options::ImagesOptions;
use crate::types::*;
use std::path::Path;

/// Render a document to PDF and write it to `path`
pub async fn save_pdf(document: ImageDocument, title: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let title = title.to_owned();

    // PNG decoding and PDF serialization are CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || document.to_pdf_bytes(&title)).await??;

    tokio::fs::write(&path, &bytes).await?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());

    Ok(())
}

/// Build a document from `files` and save it, returning the page count
pub async fn generate_pdf<F: ImageFile>(
    files: &[F],
    options: &ImagesOptions,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    options.validate()?;

    let document = build(files, options.page_size()).await?;
    let page_count = document.len();

    save_pdf(document, &options.title, output_path).await?;

    Ok(page_count)
}

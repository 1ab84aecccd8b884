//! PDF rendering for assembled documents
//!
//! - `PageRenderer`: the page-based drawing contract documents are rendered through
//! - `PdfRenderer`: lopdf implementation of that contract
//! - Image XObject creation for PNG and JPEG payloads

mod pdf;
mod xobject;

pub use pdf::PdfRenderer;
pub use xobject::create_image_xobject;

use crate::types::{MediaType, PageSize, Result};

/// A page-based document being drawn.
///
/// Coordinates are millimeters from the top-left corner of the current page.
pub trait PageRenderer {
    /// Start a new page. Later images are drawn onto it.
    fn add_page(&mut self, size: PageSize) -> Result<()>;

    /// Draw an encoded image onto the current page.
    fn add_image(
        &mut self,
        payload: &[u8],
        media_type: MediaType,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()>;
}

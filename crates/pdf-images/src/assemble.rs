//! Document assembly: one centered image per page, in selection order

use crate::decode::{ImageFile, decode_image};
use crate::layout::{PlacedImage, fit_to_page};
use crate::render::{PageRenderer, PdfRenderer};
use crate::types::{ImagesError, MediaType, PageSize, PixelSize, Result};
use futures::future::try_join_all;

/// One finished page holding a single placed image
#[derive(Debug, Clone)]
pub struct Page {
    name: String,
    media_type: MediaType,
    pixel_size: PixelSize,
    data: Vec<u8>,
    placement: PlacedImage,
}

impl Page {
    /// Name of the file the image came from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn pixel_size(&self) -> PixelSize {
        self.pixel_size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn placement(&self) -> PlacedImage {
        self.placement
    }
}

/// The ordered pages produced by one `build`
#[derive(Debug, Clone)]
pub struct ImageDocument {
    page_size: PageSize,
    pages: Vec<Page>,
}

impl ImageDocument {
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Draw every page, in order, through `renderer`.
    pub fn render<R: PageRenderer>(&self, renderer: &mut R) -> Result<()> {
        for page in &self.pages {
            let placed = page.placement;
            renderer.add_page(self.page_size)?;
            renderer.add_image(
                &page.data,
                page.media_type,
                placed.offset_x,
                placed.offset_y,
                placed.width,
                placed.height,
            )?;
        }
        Ok(())
    }

    pub fn to_pdf(&self, title: &str) -> Result<lopdf::Document> {
        let mut renderer = PdfRenderer::new();
        self.render(&mut renderer)?;
        Ok(renderer.finish(title))
    }

    pub fn to_pdf_bytes(&self, title: &str) -> Result<Vec<u8>> {
        let mut doc = self.to_pdf(title)?;
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Decode every file and lay each one out on its own page.
///
/// Files are decoded concurrently. Pages follow the order of `files`, not
/// the order decodes finish in. The first failure aborts the build and no
/// document is produced.
pub async fn build<F: ImageFile>(files: &[F], page_size: PageSize) -> Result<ImageDocument> {
    if files.is_empty() {
        return Err(ImagesError::EmptySelection);
    }
    page_size.validate()?;

    log::info!(
        "Building document from {} images ({} x {} mm)",
        files.len(),
        page_size.width_mm,
        page_size.height_mm
    );

    let decoded = try_join_all(files.iter().map(decode_image)).await?;

    let pages = decoded
        .into_iter()
        .map(|image| {
            let (name, pixel_size, data, media_type) = image.into_parts();
            let placement = fit_to_page(pixel_size, page_size)?;
            Ok(Page {
                name,
                media_type,
                pixel_size,
                data,
                placement,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ImageDocument { page_size, pages })
}

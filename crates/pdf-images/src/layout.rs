//! Fit-to-page geometry
//!
//! Computes where an image lands on its page: the scaled size in
//! millimeters and the offsets that center it. Offsets use a top-left
//! origin with y growing downward, matching `PageRenderer::add_image`.

use crate::types::{ImagesError, PageSize, PixelSize, Result};

/// Geometry of one image on one page, in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedImage {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Scale an image to the page without distortion and center it.
///
/// Images at least as wide as they are tall always take the full page
/// width. Their height is not clamped to the page, so a near-square image
/// on a page wider than it is tall can overflow vertically and get a
/// negative `offset_y`.
///
/// Portrait images are limited by whichever page side they hit first.
///
/// Arithmetic is single precision like the rest of the millimeter
/// geometry, so results agree with a double-precision evaluation of the
/// same formula to about six significant digits.
pub fn fit_to_page(image: PixelSize, page: PageSize) -> Result<PlacedImage> {
    if image.width == 0 || image.height == 0 {
        return Err(ImagesError::InvalidDimensions {
            width: image.width as f32,
            height: image.height as f32,
        });
    }
    page.validate()?;

    let img_w = image.width as f32;
    let img_h = image.height as f32;
    let page_ratio = page.ratio();

    let (width, height) = if img_w >= img_h {
        (page.width_mm, page.width_mm / (img_w / img_h))
    } else {
        let image_ratio = img_w / img_h;

        if image_ratio > page_ratio {
            // Relatively wider than the page
            let scale_factor = (page_ratio * img_h) / img_w;
            let height = page.height_mm * scale_factor;
            (height * image_ratio, height)
        } else {
            (page.height_mm / (img_h / img_w), page.height_mm)
        }
    };

    Ok(PlacedImage {
        width,
        height,
        offset_x: (page.width_mm - width) / 2.0,
        offset_y: (page.height_mm - height) / 2.0,
    })
}

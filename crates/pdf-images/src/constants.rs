//! Shared constants for PDF output

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Document
// =============================================================================

/// PDF version written by the renderer
pub const PDF_VERSION: &str = "1.7";

/// Value of the `Producer` entry in the document info dictionary
pub const PRODUCER: &str = concat!("pdf-images ", env!("CARGO_PKG_VERSION"));

/// Default document title
pub const DEFAULT_TITLE: &str = "Images";

/// Prefix for image XObject resource names (`Im0`, `Im1`, ...)
pub const IMAGE_RESOURCE_PREFIX: &str = "Im";

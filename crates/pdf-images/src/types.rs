use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagesError {
    #[error("Failed to decode image '{name}': {reason}")]
    Decode { name: String, reason: String },
    #[error("Invalid dimensions: {width} x {height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("No images selected")]
    EmptySelection,
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ImagesError {
    pub(crate) fn decode(name: &str, reason: impl ToString) -> Self {
        ImagesError::Decode {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImagesError>;

/// Media types accepted for embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaType {
    Png,
    Jpeg,
}

impl MediaType {
    /// Parse a MIME type such as `image/png`
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(MediaType::Png),
            "image/jpeg" | "image/jpg" => Ok(MediaType::Jpeg),
            _ => Err(ImagesError::UnsupportedMediaType(mime.to_string())),
        }
    }

    /// Infer the media type from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(MediaType::Png),
            Some("jpg") | Some("jpeg") => Ok(MediaType::Jpeg),
            _ => Err(ImagesError::UnsupportedMediaType(
                path.display().to_string(),
            )),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            MediaType::Png => image::ImageFormat::Png,
            MediaType::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Image size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Output page size in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Default for PageSize {
    fn default() -> Self {
        let (width_mm, height_mm) = PaperSize::A4.dimensions_mm();
        Self {
            width_mm,
            height_mm,
        }
    }
}

impl PageSize {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Width divided by height
    pub fn ratio(&self) -> f32 {
        self.width_mm / self.height_mm
    }

    /// Both sides must be finite and positive
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(self.width_mm) && valid(self.height_mm) {
            Ok(())
        } else {
            Err(ImagesError::InvalidDimensions {
                width: self.width_mm,
                height: self.height_mm,
            })
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Page size with orientation applied
    pub fn page_size(self, orientation: Orientation) -> PageSize {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => PageSize::new(w, h),
            Orientation::Landscape => PageSize::new(h, w),
        }
    }
}

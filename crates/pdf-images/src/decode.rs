//! Image ingestion: reading selected files and learning their pixel size

use crate::types::{ImagesError, MediaType, PixelSize, Result};
use std::future::Future;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file picked by the user.
///
/// The payload is read asynchronously. Implementations must not change
/// the declared media type between calls.
pub trait ImageFile: Send + Sync {
    fn name(&self) -> &str;

    fn media_type(&self) -> MediaType;

    fn read(&self) -> impl Future<Output = std::io::Result<Vec<u8>>> + Send;
}

#[derive(Debug, Clone)]
enum FileSource {
    Memory(Arc<[u8]>),
    Path(PathBuf),
}

/// Standard `ImageFile` backed by either memory or a path on disk
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    media_type: MediaType,
    source: FileSource,
}

impl SelectedFile {
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: MediaType,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type,
            source: FileSource::Memory(bytes.into()),
        }
    }

    /// Like `from_bytes`, with the media type given as a MIME string
    pub fn from_bytes_with_mime(
        name: impl Into<String>,
        mime: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self> {
        let media_type = MediaType::from_mime(mime)?;
        Ok(Self::from_bytes(name, media_type, bytes))
    }

    /// Reference a file on disk, taking the media type from its extension.
    /// The file itself is not touched until it is read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = MediaType::from_path(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            media_type,
            source: FileSource::Path(path.to_owned()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }
}

impl ImageFile for SelectedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn media_type(&self) -> MediaType {
        self.media_type
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
            FileSource::Path(path) => tokio::fs::read(path).await,
        }
    }
}

/// An image whose payload is loaded and whose pixel size is known
#[derive(Debug, Clone)]
pub struct DecodedImage {
    name: String,
    size: PixelSize,
    data: Vec<u8>,
    media_type: MediaType,
}

impl DecodedImage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// The encoded payload exactly as read from the file
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The media type declared by the file, not sniffed from the payload
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub(crate) fn into_parts(self) -> (String, PixelSize, Vec<u8>, MediaType) {
        (self.name, self.size, self.data, self.media_type)
    }
}

/// Read one file and parse just enough of it to learn its pixel size.
///
/// Read failures and payloads that do not parse as the declared format
/// both surface as `ImagesError::Decode`.
pub async fn decode_image<F: ImageFile>(file: &F) -> Result<DecodedImage> {
    let name = file.name().to_owned();
    let media_type = file.media_type();

    let data = file
        .read()
        .await
        .map_err(|e| ImagesError::decode(&name, e))?;

    // Header parsing is CPU-bound, spawn blocking
    let (data, size) = tokio::task::spawn_blocking(move || {
        let size = read_dimensions(&data, media_type);
        (data, size)
    })
    .await?;
    let size = size.map_err(|e| ImagesError::decode(&name, e))?;

    log::debug!(
        "Decoded '{}' ({}, {}x{}, {} bytes)",
        name,
        media_type.mime(),
        size.width,
        size.height,
        data.len()
    );

    Ok(DecodedImage {
        name,
        size,
        data,
        media_type,
    })
}

fn read_dimensions(data: &[u8], media_type: MediaType) -> image::ImageResult<PixelSize> {
    let reader = image::ImageReader::with_format(Cursor::new(data), media_type.image_format());
    let (width, height) = reader.into_dimensions()?;
    Ok(PixelSize::new(width, height))
}

//! Image XObject creation
//!
//! JPEG payloads are embedded as-is behind a `DCTDecode` filter. CMYK
//! JPEGs written by Adobe software store inverted samples, so those get a
//! `Decode` array that flips them back. PNG payloads have no PDF filter of their own, so they are decoded to 8-bit
//! samples and stored Flate-compressed, with any alpha channel split off
//! into a soft mask.

use crate::types::{ImagesError, MediaType, Result};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::codecs::jpeg::JpegDecoder;
use image::{ExtendedColorType, ImageDecoder, ImageFormat};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::{Cursor, Write};

/// Add an image XObject for `payload` to `output` and return its ID.
pub fn create_image_xobject(
    output: &mut Document,
    payload: &[u8],
    media_type: MediaType,
) -> Result<ObjectId> {
    match media_type {
        MediaType::Jpeg => {
            let stream = jpeg_stream(payload)?;
            Ok(output.add_object(stream))
        }
        MediaType::Png => png_xobject(output, payload),
    }
}

// =============================================================================
// JPEG
// =============================================================================

fn jpeg_stream(payload: &[u8]) -> Result<Stream> {
    let decoder = JpegDecoder::new(Cursor::new(payload)).map_err(render_error)?;
    let (width, height) = decoder.dimensions();

    let color_space = match decoder.original_color_type() {
        ExtendedColorType::L8 => "DeviceGray",
        ExtendedColorType::Cmyk8 => "DeviceCMYK",
        _ => "DeviceRGB",
    };

    let mut dict = image_dictionary(width, height, color_space);
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    if color_space == "DeviceCMYK" && has_adobe_marker(payload) {
        let decode = [1, 0, 1, 0, 1, 0, 1, 0].map(Object::Integer).to_vec();
        dict.set("Decode", Object::Array(decode));
    }

    Ok(Stream::new(dict, payload.to_vec()).with_compression(false))
}

/// Whether the JPEG carries an Adobe APP14 segment before its scan data
fn has_adobe_marker(payload: &[u8]) -> bool {
    if !payload.starts_with(&[0xFF, 0xD8]) {
        return false;
    }

    let mut pos = 2;
    while pos + 4 <= payload.len() {
        if payload[pos] != 0xFF {
            return false;
        }
        let marker = payload[pos + 1];
        match marker {
            // Fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            // Start of scan, no more header segments
            0xDA => return false,
            _ => {}
        }

        let length = u16::from_be_bytes([payload[pos + 2], payload[pos + 3]]) as usize;
        let body_start = pos + 4;
        let body_end = pos + 2 + length;
        if length < 2 || body_end > payload.len() {
            return false;
        }
        if marker == 0xEE && payload[body_start..body_end].starts_with(b"Adobe") {
            return true;
        }
        pos = body_end;
    }
    false
}

// =============================================================================
// PNG
// =============================================================================

fn png_xobject(output: &mut Document, payload: &[u8]) -> Result<ObjectId> {
    let img = image::load_from_memory_with_format(payload, ImageFormat::Png)
        .map_err(render_error)?;
    let (width, height) = (img.width(), img.height());
    let color = img.color();

    let (color_space, samples, alpha) = match (color.has_color(), color.has_alpha()) {
        (false, false) => ("DeviceGray", img.into_luma8().into_raw(), None),
        (false, true) => {
            let (gray, alpha) = split_alpha(img.into_luma_alpha8().as_raw(), 2);
            ("DeviceGray", gray, alpha)
        }
        (true, false) => ("DeviceRGB", img.into_rgb8().into_raw(), None),
        (true, true) => {
            let (rgb, alpha) = split_alpha(img.into_rgba8().as_raw(), 4);
            ("DeviceRGB", rgb, alpha)
        }
    };

    let mut dict = image_dictionary(width, height, color_space);

    if let Some(alpha) = alpha {
        let smask = flate_stream(image_dictionary(width, height, "DeviceGray"), &alpha)?;
        let smask_id = output.add_object(smask);
        dict.set("SMask", Object::Reference(smask_id));
    }

    let stream = flate_stream(dict, &samples)?;
    Ok(output.add_object(stream))
}

/// Separate interleaved samples into color and alpha planes.
///
/// Returns `None` for the alpha plane when every pixel is fully opaque.
fn split_alpha(raw: &[u8], channels: usize) -> (Vec<u8>, Option<Vec<u8>>) {
    let pixels = raw.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);

    for px in raw.chunks_exact(channels) {
        color.extend_from_slice(&px[..channels - 1]);
        alpha.push(px[channels - 1]);
    }

    let opaque = alpha.iter().all(|&a| a == u8::MAX);
    (color, if opaque { None } else { Some(alpha) })
}

fn flate_stream(mut dict: Dictionary, data: &[u8]) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    Ok(Stream::new(dict, compressed).with_compression(false))
}

// =============================================================================
// Helpers
// =============================================================================

fn image_dictionary(width: u32, height: u32, color_space: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

fn render_error(e: image::ImageError) -> ImagesError {
    ImagesError::Render(format!("Failed to read image for embedding: {}", e))
}

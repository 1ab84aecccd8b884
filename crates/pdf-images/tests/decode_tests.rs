use image::{ImageFormat, Rgb, RgbImage};
use pdf_images::*;
use std::io::Cursor;

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_decode_png_from_memory() {
    let bytes = encode(64, 48, ImageFormat::Png);
    let file = SelectedFile::from_bytes("a.png", MediaType::Png, bytes.clone());

    let decoded = decode_image(&file).await.unwrap();
    assert_eq!(decoded.name(), "a.png");
    assert_eq!(decoded.size(), PixelSize::new(64, 48));
    assert_eq!(decoded.media_type(), MediaType::Png);
    // Payload is passed through untouched
    assert_eq!(decoded.data(), bytes.as_slice());
}

#[tokio::test]
async fn test_decode_jpeg_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    std::fs::write(&path, encode(30, 70, ImageFormat::Jpeg)).unwrap();

    let file = SelectedFile::from_path(&path).unwrap();
    assert_eq!(file.name(), "photo.jpg");
    assert_eq!(file.path(), Some(path.as_path()));

    let decoded = decode_image(&file).await.unwrap();
    assert_eq!(decoded.size(), PixelSize::new(30, 70));
    assert_eq!(decoded.media_type(), MediaType::Jpeg);
}

#[tokio::test]
async fn test_decode_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = SelectedFile::from_path(dir.path().join("gone.png")).unwrap();

    match decode_image(&file).await {
        Err(ImagesError::Decode { name, .. }) => assert_eq!(name, "gone.png"),
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_decode_garbage_payload() {
    let file = SelectedFile::from_bytes("junk.png", MediaType::Png, b"not an image".to_vec());
    let result = decode_image(&file).await;
    assert!(matches!(result, Err(ImagesError::Decode { .. })));
}

#[tokio::test]
async fn test_decode_uses_declared_type() {
    // A PNG payload labelled as JPEG is rejected rather than re-detected
    let bytes = encode(10, 10, ImageFormat::Png);
    let file = SelectedFile::from_bytes("fake.jpg", MediaType::Jpeg, bytes);
    let result = decode_image(&file).await;
    assert!(matches!(result, Err(ImagesError::Decode { .. })));
}

#[test]
fn test_from_path_rejects_unsupported_extension() {
    let result = SelectedFile::from_path("drawing.gif");
    assert!(matches!(result, Err(ImagesError::UnsupportedMediaType(_))));
}

#[tokio::test]
async fn test_from_bytes_with_mime() {
    let bytes = encode(12, 8, ImageFormat::Jpeg);
    let file = SelectedFile::from_bytes_with_mime("cam.jpg", "image/jpeg", bytes).unwrap();
    assert_eq!(file.media_type(), MediaType::Jpeg);

    let decoded = decode_image(&file).await.unwrap();
    assert_eq!(decoded.size(), PixelSize::new(12, 8));

    let result = SelectedFile::from_bytes_with_mime("anim.gif", "image/gif", vec![0u8; 4]);
    assert!(matches!(result, Err(ImagesError::UnsupportedMediaType(_))));
}

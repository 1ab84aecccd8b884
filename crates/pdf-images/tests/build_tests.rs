use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::{Dictionary, Document, ObjectId};
use pdf_images::*;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([20, 120, 220]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn encode_translucent_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// File whose read finishes after a delay and records when it did
struct DelayedFile {
    name: &'static str,
    delay: Duration,
    bytes: Vec<u8>,
    completed: Arc<Mutex<Vec<&'static str>>>,
}

impl ImageFile for DelayedFile {
    fn name(&self) -> &str {
        self.name
    }

    fn media_type(&self) -> MediaType {
        MediaType::Png
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::time::sleep(self.delay).await;
        self.completed.lock().unwrap().push(self.name);
        Ok(self.bytes.clone())
    }
}

/// File whose read always fails
struct UnreadableFile;

impl ImageFile for UnreadableFile {
    fn name(&self) -> &str {
        "unreadable.png"
    }

    fn media_type(&self) -> MediaType {
        MediaType::Png
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::other("permission denied"))
    }
}

/// Renderer that records every call
#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<String>,
}

impl PageRenderer for RecordingRenderer {
    fn add_page(&mut self, size: PageSize) -> Result<()> {
        self.calls
            .push(format!("page {}x{}", size.width_mm, size.height_mm));
        Ok(())
    }

    fn add_image(
        &mut self,
        payload: &[u8],
        media_type: MediaType,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        self.calls.push(format!(
            "image {} {} bytes at {},{} size {}x{}",
            media_type.mime(),
            payload.len(),
            x,
            y,
            width,
            height
        ));
        Ok(())
    }
}

fn page_image(doc: &Document, page_id: ObjectId) -> Dictionary {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
    doc.get_object(image_id)
        .unwrap()
        .as_stream()
        .unwrap()
        .dict
        .clone()
}

#[tokio::test]
async fn test_build_empty_selection() {
    let files: Vec<SelectedFile> = Vec::new();
    let result = build(&files, PageSize::default()).await;
    assert!(matches!(result, Err(ImagesError::EmptySelection)));
}

#[tokio::test]
async fn test_build_invalid_page_size() {
    let files = vec![SelectedFile::from_bytes(
        "a.png",
        MediaType::Png,
        encode(10, 10, ImageFormat::Png),
    )];
    let result = build(&files, PageSize::new(210.0, 0.0)).await;
    assert!(matches!(result, Err(ImagesError::InvalidDimensions { .. })));
}

#[tokio::test]
async fn test_build_places_each_image() {
    let files = vec![
        SelectedFile::from_bytes("wide.png", MediaType::Png, encode(800, 600, ImageFormat::Png)),
        SelectedFile::from_bytes("tall.jpg", MediaType::Jpeg, encode(600, 800, ImageFormat::Jpeg)),
    ];

    let doc = build(&files, PageSize::default()).await.unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.page_size(), PageSize::new(210.0, 297.0));

    let wide = &doc.pages()[0];
    assert_eq!(wide.name(), "wide.png");
    assert_eq!(wide.media_type(), MediaType::Png);
    assert_eq!(wide.pixel_size(), PixelSize::new(800, 600));
    assert_eq!(wide.placement().width, 210.0);
    assert!((wide.placement().offset_y - 69.75).abs() < 0.001);

    let tall = &doc.pages()[1];
    assert_eq!(tall.media_type(), MediaType::Jpeg);
    assert!((tall.placement().height - 280.0).abs() < 0.01);
    assert!((tall.placement().width - 210.0).abs() < 0.01);
}

#[tokio::test]
async fn test_build_preserves_selection_order() {
    let completed = Arc::new(Mutex::new(Vec::new()));
    let file = |name, millis, width| DelayedFile {
        name,
        delay: Duration::from_millis(millis),
        bytes: encode(width, 50, ImageFormat::Png),
        completed: completed.clone(),
    };

    let files = vec![file("a", 80, 10), file("b", 0, 20), file("c", 40, 30)];
    let doc = build(&files, PageSize::default()).await.unwrap();

    // Reads finished out of order...
    assert_eq!(*completed.lock().unwrap(), vec!["b", "c", "a"]);

    // ...but pages follow the selection
    let names: Vec<&str> = doc.pages().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    let widths: Vec<u32> = doc.pages().iter().map(|p| p.pixel_size().width).collect();
    assert_eq!(widths, vec![10, 20, 30]);
}

#[tokio::test]
async fn test_build_fails_if_any_decode_fails() {
    let good = encode(10, 10, ImageFormat::Png);
    let files = vec![
        SelectedFile::from_bytes("a.png", MediaType::Png, good.clone()),
        SelectedFile::from_bytes("b.png", MediaType::Png, b"corrupt".to_vec()),
        SelectedFile::from_bytes("c.png", MediaType::Png, good),
    ];

    match build(&files, PageSize::default()).await {
        Err(ImagesError::Decode { name, .. }) => assert_eq!(name, "b.png"),
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_build_fails_on_unreadable_file() {
    let files = vec![UnreadableFile];
    match build(&files, PageSize::default()).await {
        Err(ImagesError::Decode { name, reason }) => {
            assert_eq!(name, "unreadable.png");
            assert!(reason.contains("permission denied"));
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_render_drives_renderer_in_order() {
    let files = vec![
        SelectedFile::from_bytes("a.png", MediaType::Png, encode(800, 600, ImageFormat::Png)),
        SelectedFile::from_bytes("b.jpg", MediaType::Jpeg, encode(100, 400, ImageFormat::Jpeg)),
    ];
    let doc = build(&files, PageSize::default()).await.unwrap();

    let mut renderer = RecordingRenderer::default();
    doc.render(&mut renderer).unwrap();

    assert_eq!(renderer.calls.len(), 4);
    assert_eq!(renderer.calls[0], "page 210x297");
    assert!(renderer.calls[1].starts_with("image image/png"));
    assert_eq!(renderer.calls[2], "page 210x297");
    assert!(renderer.calls[3].starts_with("image image/jpeg"));
    assert!(renderer.calls[3].ends_with("size 74.25x297"));
}

#[tokio::test]
async fn test_pdf_output_structure() {
    let files = vec![
        SelectedFile::from_bytes("wide.png", MediaType::Png, encode(800, 600, ImageFormat::Png)),
        SelectedFile::from_bytes("tall.jpg", MediaType::Jpeg, encode(600, 800, ImageFormat::Jpeg)),
        SelectedFile::from_bytes("glass.png", MediaType::Png, encode_translucent_png(50, 50)),
    ];
    let doc = build(&files, PageSize::default()).await.unwrap();
    let bytes = doc.to_pdf_bytes("Holiday").unwrap();

    let pdf = Document::load_mem(&bytes).unwrap();
    let pages: Vec<ObjectId> = pdf.get_pages().values().copied().collect();
    assert_eq!(pages.len(), 3);

    // A4 in points
    let media_box = pdf
        .get_dictionary(pages[0])
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    assert!((media_box[2].as_float().unwrap() - 595.28).abs() < 0.1);
    assert!((media_box[3].as_float().unwrap() - 841.89).abs() < 0.1);

    let wide = page_image(&pdf, pages[0]);
    assert_eq!(wide.get(b"Width").unwrap().as_i64().unwrap(), 800);
    assert_eq!(
        wide.get(b"Filter").unwrap().as_name().unwrap(),
        b"FlateDecode".as_slice()
    );
    assert!(wide.get(b"SMask").is_err());

    let tall = page_image(&pdf, pages[1]);
    assert_eq!(tall.get(b"Height").unwrap().as_i64().unwrap(), 800);
    assert_eq!(
        tall.get(b"Filter").unwrap().as_name().unwrap(),
        b"DCTDecode".as_slice()
    );
    assert_eq!(
        tall.get(b"ColorSpace").unwrap().as_name().unwrap(),
        b"DeviceRGB".as_slice()
    );

    let glass = page_image(&pdf, pages[2]);
    assert!(glass.get(b"SMask").is_ok());

    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let title = pdf
        .get_dictionary(info_id)
        .unwrap()
        .get(b"Title")
        .unwrap()
        .as_str()
        .unwrap()
        .to_vec();
    assert_eq!(title, b"Holiday".to_vec());
}

#[tokio::test]
async fn test_generate_pdf_from_paths() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = Vec::new();
    for (name, format) in [
        ("one.png", ImageFormat::Png),
        ("two.jpeg", ImageFormat::Jpeg),
        ("three.PNG", ImageFormat::Png),
    ] {
        let path = dir.path().join(name);
        std::fs::write(&path, encode(40, 30, format)).unwrap();
        files.push(SelectedFile::from_path(&path).unwrap());
    }

    let output = dir.path().join("out.pdf");
    let options = ImagesOptions {
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    let page_count = generate_pdf(&files, &options, &output).await.unwrap();
    assert_eq!(page_count, 3);

    let pdf = Document::load(&output).unwrap();
    assert_eq!(pdf.get_pages().len(), 3);
}

#[tokio::test]
async fn test_generate_pdf_writes_nothing_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![SelectedFile::from_path(dir.path().join("missing.jpg")).unwrap()];
    let output = dir.path().join("out.pdf");

    let result = generate_pdf(&files, &ImagesOptions::default(), &output).await;
    assert!(matches!(result, Err(ImagesError::Decode { .. })));
    assert!(!output.exists());
}

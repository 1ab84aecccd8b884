//! `PageRenderer` backed by an `lopdf` document

use super::PageRenderer;
use super::xobject::create_image_xobject;
use crate::constants::{IMAGE_RESOURCE_PREFIX, PDF_VERSION, PRODUCER, mm_to_pt};
use crate::types::{ImagesError, MediaType, PageSize, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Page that is still accepting images
struct OpenPage {
    size: PageSize,
    content: String,
    xobjects: Dictionary,
    image_count: usize,
}

/// Builds a PDF one page at a time.
///
/// Call `finish` once all pages are added to get the `Document`.
pub struct PdfRenderer {
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    current: Option<OpenPage>,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer {
    pub fn new() -> Self {
        let mut output = Document::with_version(PDF_VERSION);
        let pages_tree_id = output.new_object_id();
        Self {
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            current: None,
        }
    }

    /// Number of pages added so far, including the open one
    pub fn page_count(&self) -> usize {
        self.page_refs.len() + usize::from(self.current.is_some())
    }

    /// Close the last page and write the page tree, catalog and info.
    pub fn finish(mut self, title: &str) -> Document {
        self.close_page();

        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        let info_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Title", Object::string_literal(title)),
            ("Producer", Object::string_literal(PRODUCER)),
        ]));
        self.output.trailer.set("Info", info_id);

        self.output
    }

    fn close_page(&mut self) {
        let Some(page) = self.current.take() else {
            return;
        };

        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), page.content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(page.xobjects));

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_tree_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(mm_to_pt(page.size.width_mm)),
                    Object::Real(mm_to_pt(page.size.height_mm)),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]);

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
    }
}

impl PageRenderer for PdfRenderer {
    fn add_page(&mut self, size: PageSize) -> Result<()> {
        size.validate()?;
        self.close_page();
        self.current = Some(OpenPage {
            size,
            content: String::new(),
            xobjects: Dictionary::new(),
            image_count: 0,
        });
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
        let Some(page) = self.current.as_mut() else {
            return Err(ImagesError::Render(
                "Cannot add an image before adding a page".to_string(),
            ));
        };

        let xobject_id = create_image_xobject(&mut self.output, payload, media_type)?;
        let name = format!("{}{}", IMAGE_RESOURCE_PREFIX, page.image_count);
        page.image_count += 1;

        page.xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        page.content.push_str(&placement_command(
            &name, page.size, x, y, width, height,
        ));

        Ok(())
    }
}

/// Content stream command drawing an image XObject.
///
/// Input is in millimeters from the top-left corner; PDF user space is
/// points from the bottom-left, so y is flipped against the page height.
fn placement_command(
    xobject_name: &str,
    page: PageSize,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> String {
    let left = mm_to_pt(x);
    let bottom = mm_to_pt(page.height_mm - y - height);
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        mm_to_pt(width),
        mm_to_pt(height),
        left,
        bottom,
        xobject_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_flips_y() {
        let page = PageSize::new(100.0, 200.0);
        let cmd = placement_command("Im0", page, 0.0, 0.0, 100.0, 50.0);
        // Top of the page in PDF space is 150mm above the bottom edge
        let expected_bottom = mm_to_pt(150.0);
        assert!(cmd.contains(&format!(" {} cm", expected_bottom)));
        assert!(cmd.ends_with("/Im0 Do Q\n"));
    }

    #[test]
    fn test_add_image_without_page_fails() {
        let mut renderer = PdfRenderer::new();
        let result = renderer.add_image(&[], MediaType::Png, 0.0, 0.0, 1.0, 1.0);
        assert!(matches!(result, Err(ImagesError::Render(_))));
    }

    #[test]
    fn test_empty_renderer_finishes() {
        let renderer = PdfRenderer::new();
        assert_eq!(renderer.page_count(), 0);
        let doc = renderer.finish("Empty");
        assert!(doc.get_pages().is_empty());
    }

    #[test]
    fn test_add_page_rejects_invalid_size() {
        let mut renderer = PdfRenderer::new();
        assert!(renderer.add_page(PageSize::new(0.0, 297.0)).is_err());
        assert_eq!(renderer.page_count(), 0);
    }
}

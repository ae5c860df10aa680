use crate::{
    font::Font,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use log::debug;
use pdf_writer::{Finish, Pdf, Ref};
use std::{fs::File, io::BufWriter, io::Write, path::Path};

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the document, returning the index of that page within the document.
    /// This index can be used to refer to the page if needed, provided that you don't
    /// remove or reorder the pages in the document. The page will be added to the end
    /// of the document.
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Add a font to the document structure. Note that fonts are stored "globally" within
    /// the document, such that any page can access it by referring to it by its index /
    /// reference. The returned value is the index of the font, which is valid so long as
    /// you don't ever remove or reorder fonts from / in the document.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Note that images are stored "globally"
    /// within the document, such that any page can access and re-use images by referring
    /// to it by its its / reference. The returned value is the index of the image, which
    /// is valid so long as you don't ever remove or reorder images from / in the document.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Number of pages currently in the page order
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Create (or truncate) the file at `path` and write the document into it
    pub fn write_to_path<P: AsRef<Path>>(self, path: P) -> Result<(), PDFError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        self.write(&mut w)?;
        w.flush()?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first. If you have a very large
    /// document, this could allocate a significant amount of memory. This limitation is due
    /// to the underlying pdf-writer implementation, which may be removed in the future.
    ///
    /// Until `write` is called, all references are un-resolved, so pages, fonts, images, etc
    /// can be added / edited / reordered / removed as you like, provided you keep track of
    /// references in your page contents yourself (i.e., if you have 2 fonts and decided to
    /// change the order of them before writing, then you should update all font_index
    /// references on all pages to reflect the change). Calling `write` will automatically
    /// generate PDF objects and corresponding references to those objects.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the page order, not arena index
        let page_refs: Vec<Ref> = page_order
            .iter()
            .enumerate()
            .map(|(i, _id)| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (i, font) in fonts.iter() {
            font.write(&mut refs, i.index(), &mut writer);
        }

        for (i, image) in images.iter() {
            image.write(&mut refs, i.index(), &mut writer)?;
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing(page_index))?;
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{colours, pagesize, BuiltinFace, Pt, SpanFont, SpanLayout};

    fn page_with_text(document: &mut Document, text: &str) -> Page {
        let font = document.add_font(Font::builtin(BuiltinFace::Helvetica));
        let mut page = Page::new(pagesize::A4, None);
        page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: font,
                size: Pt(12.0),
            },
            colour: colours::BLACK,
            coords: (Pt(72.0), Pt(700.0)),
        });
        page
    }

    #[test]
    fn writes_a_pdf() {
        let mut document = Document::default();
        let page = page_with_text(&mut document, "Hello");
        document.add_page(page);
        document.set_info(Info::new().title("Hello").clone());

        let mut out = Vec::new();
        document.write(&mut out).expect("can write document");

        assert!(out.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn writes_to_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.pdf");
        let mut document = Document::default();
        let page = page_with_text(&mut document, "File");
        document.add_page(page);

        document.write_to_path(&path).expect("can write file");
        let bytes = std::fs::read(&path).expect("file exists");
        assert!(bytes.starts_with(b"%PDF-"));
    }
}

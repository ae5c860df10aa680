use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Finish, Name, Pdf, Ref, Str};

/// The font (and size) a span of text is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text, drawn starting at `coords` (the left end of the baseline)
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// An image drawn scaled into `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A stroked straight line
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub width: Pt,
    pub colour: Colour,
}

/// A clickable area on the page that opens `uri`
#[derive(Clone, PartialEq, Debug)]
pub struct LinkAnnotation {
    pub rect: Rect,
    pub uri: String,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Line(LineLayout),
    RawContent(Vec<u8>),
}

/// A single page in a document. Contents are drawn in the order they were added.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out contents
    pub contents: Vec<PageContents>,
    /// Link annotations, written after the contents
    pub links: Vec<LinkAnnotation>,
}

impl Page {
    /// Create a new page of the given size. Without margins, the content box covers the
    /// entire page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect::from_origin(Pt(0.0), Pt(0.0), width, height),
            content_box: margins.content_box(size),
            contents: Vec::default(),
            links: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    /// Add several spans at once; they share one text state block in the content stream
    pub fn add_spans(&mut self, spans: Vec<SpanLayout>) {
        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    pub fn add_link(&mut self, link: LinkAnnotation) {
        self.links.push(link);
    }

    /// Add arbitrary [pdf_writer::Content] to the page
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty() && self.links.is_empty()
    }

    fn render(&self, fonts: &Arena<Font>) -> Result<Vec<u8>, std::io::Error> {
        render_contents(&self.contents, fonts)
    }

    fn write_links(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        writer: &mut Pdf,
    ) -> Vec<Ref> {
        let ids: Vec<Ref> = (0..self.links.len())
            .map(|i| refs.gen(RefType::LinkAnnotation(page_index, i)))
            .collect();

        for (link, &id) in self.links.iter().zip(ids.iter()) {
            let mut annotation = writer.annotation(id);
            annotation.subtype(AnnotationType::Link);
            annotation.rect(link.rect.into());
            annotation.border(0.0, 0.0, 0.0, None);
            annotation
                .action()
                .action_type(ActionType::Uri)
                .uri(Str(link.uri.as_bytes()));
        }

        ids
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(PDFError::PageMissing(page_index))?;
        let page_tree_id = refs
            .get(RefType::PageTree)
            .ok_or(PDFError::PageMissing(page_index))?;

        let annotation_ids = self.write_links(refs, page_index, writer);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);
        if !annotation_ids.is_empty() {
            page.annotations(annotation_ids);
        }

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();

        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(
                    Name(format!("I{}", image_id.index()).as_bytes()),
                    image_ref,
                );
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = self.render(fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pagesize;

    #[test]
    fn margins_shrink_the_content_box() {
        let page = Page::new(pagesize::A4, Some(Margins::academic()));
        assert!((page.content_box.x1.0 - mm(25.0).0).abs() < 0.001);
        assert!((page.content_box.y2.0 - (pagesize::A4.1 - mm(30.0)).0).abs() < 0.001);
        assert_eq!(page.width(), pagesize::A4.0);
    }

    #[test]
    fn pages_without_margins_use_the_whole_page() {
        let page = Page::new(pagesize::LETTER, None);
        assert_eq!(page.content_box, page.media_box);
        assert!(page.is_empty());
    }

    #[test]
    fn raw_content_is_wrapped_in_its_own_graphics_state() {
        let mut page = Page::new(pagesize::A4, None);
        let mut content = Content::new();
        content.rect(10.0, 10.0, 50.0, 20.0).fill_nonzero();
        page.add_content(content);

        let rendered = page.render(&Arena::new()).expect("can render");
        let rendered = String::from_utf8(rendered).expect("ascii content");
        assert!(rendered.starts_with("q\n"));
        assert!(rendered.contains("10 10 50 20 re"));
        assert!(rendered.trim_end().ends_with('Q'));
    }
}

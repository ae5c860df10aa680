//! Drawing at absolute coordinates, for documents that place every string themselves
//! rather than pouring paragraphs through a [Story](crate::Story).
//!
//! Coordinates are PDF points with the origin at the bottom left of the page. The canvas
//! keeps a current font and fill colour like a PDF graphics state does, and knows the
//! page margins only so that [Canvas::ensure_space] and [Canvas::draw_wrapped_text] can
//! break pages.

use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::{Font, FontSet, FontStyle};
use crate::layout::{wrap, Margins};
use crate::page::{LineLayout, LinkAnnotation, Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use id_arena::Id;
use log::debug;

pub struct Canvas<'d> {
    document: &'d mut Document,
    fonts: FontSet,
    page_size: PageSize,
    margins: Margins,
    page: Page,
    pages: Vec<Id<Page>>,
    font: FontStyle,
    size: Pt,
    fill: Colour,
    stroke: Colour,
}

impl<'d> Canvas<'d> {
    /// Start drawing on a fresh page of `page_size`. The current font is the regular face of
    /// `fonts` at 12pt, and both colours are black.
    pub fn new(
        document: &'d mut Document,
        fonts: FontSet,
        page_size: PageSize,
        margins: Margins,
    ) -> Canvas<'d> {
        let page = Page::new(page_size, Some(margins.clone()));
        Canvas {
            document,
            fonts,
            page_size,
            margins,
            page,
            pages: Vec::new(),
            font: FontStyle::Regular,
            size: Pt(12.0),
            fill: colours::BLACK,
            stroke: colours::BLACK,
        }
    }

    fn face(&self, style: FontStyle) -> Result<&Font, PDFError> {
        self.document
            .fonts
            .get(self.fonts.get(style))
            .ok_or_else(|| PDFError::UnknownFace(format!("{style:?}")))
    }

    pub fn set_font(&mut self, style: FontStyle, size: Pt) {
        self.font = style;
        self.size = size;
    }

    pub fn set_fill_colour(&mut self, colour: Colour) {
        self.fill = colour;
    }

    pub fn set_stroke_colour(&mut self, colour: Colour) {
        self.stroke = colour;
    }

    /// Top of the content area; where drawing continues after a page break
    pub fn top(&self) -> Pt {
        self.page.content_box.y2
    }

    pub fn bottom(&self) -> Pt {
        self.page.content_box.y1
    }

    pub fn left(&self) -> Pt {
        self.page.content_box.x1
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> Pt {
        self.page.content_box.width()
    }

    /// Width of `text` set in `style` at `size`
    pub fn string_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, PDFError> {
        Ok(self.face(style)?.width_of_text(text, size))
    }

    /// Draw `text` in the current font and fill colour with its baseline starting at (x, y)
    pub fn draw_string(&mut self, x: Pt, y: Pt, text: &str) -> Result<(), PDFError> {
        self.face(self.font)?;
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: self.fonts.get(self.font),
                size: self.size,
            },
            colour: self.fill,
            coords: (x, y),
        });
        Ok(())
    }

    /// Stroke a straight line `width` thick in the current stroke colour
    pub fn line(&mut self, from: (Pt, Pt), to: (Pt, Pt), width: Pt) {
        self.page.add_line(LineLayout {
            from,
            to,
            width,
            colour: self.stroke,
        });
    }

    /// Make `rect` a clickable link to `uri`
    pub fn link_url<S: ToString>(&mut self, uri: S, rect: Rect) {
        self.page.add_link(LinkAnnotation {
            rect,
            uri: uri.to_string(),
        });
    }

    /// Finish the current page and start drawing on a new one
    pub fn show_page(&mut self) {
        let page = std::mem::replace(
            &mut self.page,
            Page::new(self.page_size, Some(self.margins.clone())),
        );
        self.pages.push(self.document.add_page(page));
    }

    /// Returns `y` when `needed` fits between it and the bottom margin; otherwise shows the
    /// page and returns the top of the next one
    pub fn ensure_space(&mut self, y: Pt, needed: Pt) -> Pt {
        if y - needed < self.bottom() {
            self.show_page();
            self.top()
        } else {
            y
        }
    }

    /// Wrap `text` to `max_width` in the current font and draw it line by line, the first
    /// baseline at `y` and each following one `leading` lower. Continues on a new page when
    /// a line would drop below the bottom margin. Returns the baseline after the last line.
    pub fn draw_wrapped_text(
        &mut self,
        text: &str,
        x: Pt,
        y: Pt,
        max_width: Pt,
        leading: Pt,
    ) -> Result<Pt, PDFError> {
        let font = self.face(self.font)?;
        let size = self.size;
        let lines = wrap(text, max_width, |line| font.width_of_text(line, size));

        let mut y = y;
        for line in lines.iter() {
            if y < self.bottom() {
                self.show_page();
                y = self.top();
            }
            self.draw_string(x, y, line)?;
            y -= leading;
        }
        Ok(y)
    }

    /// Add the page being drawn to the document and return every page drawn, in order
    pub fn finish(mut self) -> Vec<Id<Page>> {
        self.show_page();
        debug!("canvas drew {} pages", self.pages.len());
        self.pages
    }
}

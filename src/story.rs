//! Flowing content down pages: paragraphs, spacers, link lines, figures and explicit page
//! breaks, paginated into the margin box of each page.
//!
//! ```
//! use letterpress::{BuiltinFamily, Document, FontRegistry, Paragraph, Story, StyleSheet};
//! use letterpress::{pagesize, resolve, Margins};
//!
//! let mut registry = FontRegistry::default();
//! let font = resolve(&mut registry, &[], BuiltinFamily::Times).into_font();
//!
//! let mut document = Document::default();
//! let fonts = registry.install(&mut document, &font).unwrap();
//!
//! let styles = StyleSheet::academic();
//! let mut story = Story::new(pagesize::A4, Margins::academic());
//! story.push(Paragraph::new("Jane Doe", styles.title.clone()));
//! story.extend(Paragraph::blocks("First paragraph.\n\nSecond one.", &styles.body));
//! story.build(&mut document, &fonts).unwrap();
//!
//! assert_eq!(document.page_count(), 1);
//! ```

use crate::colour::colours;
use crate::document::Document;
use crate::figure::{Figure, Placeholder};
use crate::font::{Font, FontSet, FontStyle};
use crate::layout::{layout_line, wrap, Alignment, Margins};
use crate::links::{Link, LINK_SEPARATOR};
use crate::page::{ImageLayout, LineLayout, LinkAnnotation, Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::style::ParagraphStyle;
use crate::text::Normalizer;
use crate::units::{mm, Pt};
use crate::PDFError;
use id_arena::Id;
use log::debug;
use std::path::Path;

/// A run of text set in a single style
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: ParagraphStyle,
}

impl Paragraph {
    pub fn new<S: ToString>(text: S, style: ParagraphStyle) -> Paragraph {
        Paragraph {
            text: text.to_string(),
            style,
        }
    }

    /// One paragraph per block of `text`, where blocks are separated by blank lines
    pub fn blocks(text: &str, style: &ParagraphStyle) -> Vec<Flowable> {
        let text = text.replace("\r\n", "\n");
        text.split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(|block| Flowable::Paragraph(Paragraph::new(block, style.clone())))
            .collect()
    }
}

/// Links on a line, separated by [LINK_SEPARATOR]. Lines only break between links.
#[derive(Debug, Clone, PartialEq)]
pub struct Links {
    pub links: Vec<Link>,
    pub style: ParagraphStyle,
    pub underline: bool,
    /// Plain text set in front of the first link, e.g. `Portfolio: `
    pub lead: Option<String>,
}

impl Links {
    pub fn new(links: Vec<Link>, style: ParagraphStyle) -> Links {
        Links {
            links,
            style,
            underline: true,
            lead: None,
        }
    }

    pub fn with_lead<S: ToString>(mut self, lead: S) -> Links {
        self.lead = Some(lead.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    /// Vertical space; discarded when it runs past the bottom of a page
    Spacer(Pt),
    Links(Links),
    Figure(Figure),
    /// Continue on a fresh page, unless the current one is still empty
    PageBreak,
}

impl From<Paragraph> for Flowable {
    fn from(p: Paragraph) -> Self {
        Flowable::Paragraph(p)
    }
}

impl From<Links> for Flowable {
    fn from(l: Links) -> Self {
        Flowable::Links(l)
    }
}

impl From<Figure> for Flowable {
    fn from(f: Figure) -> Self {
        Flowable::Figure(f)
    }
}

/// A sequence of flowables and the page geometry to pour them into
pub struct Story {
    page_size: PageSize,
    margins: Margins,
    normalizer: Normalizer,
    flowables: Vec<Flowable>,
    /// placeholder images drawn so far; their files live as long as the story
    placeholders: Vec<Placeholder>,
}

/// Where the next flowable goes
struct Frame {
    page: Page,
    /// top of the free space on the page
    y: Pt,
    empty: bool,
}

impl Frame {
    fn new(page_size: PageSize, margins: &Margins) -> Frame {
        let page = Page::new(page_size, Some(margins.clone()));
        let y = page.content_box.y2;
        Frame {
            page,
            y,
            empty: true,
        }
    }

    fn left(&self) -> Pt {
        self.page.content_box.x1
    }

    fn width(&self) -> Pt {
        self.page.content_box.width()
    }

    fn bottom(&self) -> Pt {
        self.page.content_box.y1
    }

    fn fits(&self, height: Pt) -> bool {
        self.y - height >= self.bottom()
    }
}

struct Builder<'a> {
    document: &'a mut Document,
    fonts: &'a FontSet,
    page_size: PageSize,
    margins: &'a Margins,
    frame: Frame,
    pages: Vec<Id<Page>>,
}

impl<'a> Builder<'a> {
    fn font(&self, style: FontStyle, size: Pt) -> Result<(SpanFont, &Font), PDFError> {
        let id = self.fonts.get(style);
        let font = self
            .document
            .fonts
            .get(id)
            .ok_or_else(|| PDFError::UnknownFace(format!("{style:?}")))?;
        Ok((SpanFont { id, size }, font))
    }

    fn new_page(&mut self) {
        let frame = std::mem::replace(&mut self.frame, Frame::new(self.page_size, self.margins));
        self.pages.push(self.document.add_page(frame.page));
    }

    /// Move down by `space`, unless that would start the page with blank space
    fn space(&mut self, space: Pt) {
        if self.frame.empty {
            return;
        }
        if self.frame.fits(space) {
            self.frame.y -= space;
        } else {
            self.frame.y = self.frame.bottom();
        }
    }

    /// Make sure `height` fits below the current position, breaking the page if it doesn't.
    /// Something taller than a whole page is placed at the top of a fresh page regardless.
    fn reserve(&mut self, height: Pt) {
        if !self.frame.fits(height) && !self.frame.empty {
            self.new_page();
        }
        self.frame.empty = false;
    }

    fn paragraph(&mut self, paragraph: &Paragraph) -> Result<(), PDFError> {
        let style = &paragraph.style;
        let width = self.frame.width();
        let (_, font) = self.font(style.font, style.size)?;
        let lines = wrap(&paragraph.text, width, |line| {
            font.width_of_text(line, style.size)
        });
        if lines.is_empty() {
            return Ok(());
        }
        let ascent = font.ascent(style.size);

        self.space(style.space_before);
        let count = lines.len();
        for (i, line) in lines.iter().enumerate() {
            self.reserve(style.leading);
            let (span_font, font) = self.font(style.font, style.size)?;
            let baseline = self.frame.y - ascent;
            let spans = layout_line(
                font,
                span_font,
                style.colour,
                line,
                (self.frame.left(), baseline),
                width,
                style.alignment,
                i + 1 == count,
            );
            self.frame.page.add_spans(spans);
            self.frame.y -= style.leading;
        }
        self.space(style.space_after);
        Ok(())
    }

    fn links(&mut self, links: &Links) -> Result<(), PDFError> {
        if links.links.is_empty() {
            return Ok(());
        }
        let style = &links.style;
        let width = self.frame.width();
        let (_, font) = self.font(style.font, style.size)?;
        let separator_width = font.width_of_text(LINK_SEPARATOR, style.size);
        let lead_width = links
            .lead
            .as_deref()
            .map_or(Pt(0.0), |lead| font.width_of_text(lead, style.size));

        // break into lines between links; each line remembers the width of its links
        let mut lines: Vec<(Vec<(&Link, Pt)>, Pt)> = Vec::new();
        let mut current: Vec<(&Link, Pt)> = Vec::new();
        let mut current_width = lead_width;
        for link in links.links.iter() {
            let link_width = font.width_of_text(&link.label, style.size);
            let needed = match current.is_empty() {
                true => link_width,
                false => separator_width + link_width,
            };
            if !current.is_empty() && current_width + needed > width {
                lines.push((std::mem::take(&mut current), current_width));
                current_width = link_width;
            } else {
                current_width += needed;
            }
            current.push((link, link_width));
        }
        lines.push((current, current_width));

        let ascent = font.ascent(style.size);
        let descent = font.descent(style.size);

        self.space(style.space_before);
        for (line_index, (line, line_width)) in lines.into_iter().enumerate() {
            self.reserve(style.leading);
            let (span_font, _) = self.font(style.font, style.size)?;
            let baseline = self.frame.y - ascent;
            let mut x = match style.alignment {
                Alignment::Centre => self.frame.left() + (width - line_width) / 2.0,
                Alignment::Right => self.frame.left() + width - line_width,
                Alignment::Left | Alignment::Justify => self.frame.left(),
            };

            let mut spans = Vec::with_capacity(line.len() * 2 + 1);
            if let (0, Some(lead)) = (line_index, &links.lead) {
                spans.push(SpanLayout {
                    text: lead.clone(),
                    font: span_font,
                    colour: style.colour,
                    coords: (x, baseline),
                });
                x += lead_width;
            }
            for (i, (link, link_width)) in line.into_iter().enumerate() {
                if i > 0 {
                    spans.push(SpanLayout {
                        text: LINK_SEPARATOR.to_string(),
                        font: span_font,
                        colour: style.colour,
                        coords: (x, baseline),
                    });
                    x += separator_width;
                }
                spans.push(SpanLayout {
                    text: link.label.clone(),
                    font: span_font,
                    colour: style.colour,
                    coords: (x, baseline),
                });
                self.frame.page.add_link(LinkAnnotation {
                    rect: Rect {
                        x1: x,
                        y1: baseline + descent,
                        x2: x + link_width,
                        y2: baseline + ascent,
                    },
                    uri: link.uri.clone(),
                });
                if links.underline {
                    let underline_y = baseline - style.size * 0.12;
                    self.frame.page.add_line(LineLayout {
                        from: (x, underline_y),
                        to: (x + link_width, underline_y),
                        width: style.size * 0.05,
                        colour: style.colour,
                    });
                }
                x += link_width;
            }
            self.frame.page.add_spans(spans);
            self.frame.y -= style.leading;
        }
        self.space(style.space_after);
        Ok(())
    }

    fn figure(
        &mut self,
        figure: &Figure,
        placeholders: &mut Vec<Placeholder>,
    ) -> Result<(), PDFError> {
        let available = self.frame.width();
        let width = figure.max_width.min(available);
        let Some(prepared) = figure.prepare(width) else {
            return Ok(());
        };

        // never taller than a page, shrinking the width to keep the proportions
        let frame_height = self.frame.page.content_box.height();
        let (width, height) = if prepared.height > frame_height {
            (width * (frame_height / prepared.height).0, frame_height)
        } else {
            (width, prepared.height)
        };

        self.space(mm(4.0));
        self.reserve(height);
        let x = self.frame.left() + (available - width) / 2.0;
        let y = self.frame.y - height;
        let image_id = self.document.add_image(prepared.image);
        self.frame.page.add_image(ImageLayout {
            image_id,
            position: Rect::from_origin(x, y, width, height),
        });

        if let Some(placeholder) = prepared.placeholder {
            let size = Pt(14.0);
            let (span_font, font) = self.font(FontStyle::Regular, size)?;
            let label_width = font.width_of_text(placeholder.label(), size);
            let centre_baseline = y + height / 2.0 - font.ascent(size) / 2.0;
            self.frame.page.add_span(SpanLayout {
                text: placeholder.label().to_string(),
                font: span_font,
                colour: colours::SILVER,
                coords: (x + (width - label_width) / 2.0, centre_baseline),
            });
            placeholders.push(placeholder);
        }
        self.frame.y = y;

        self.space(mm(2.0));
        let caption = Paragraph::new(figure.caption.clone(), figure.caption_style.clone());
        self.paragraph(&caption)?;
        self.space(mm(4.0));
        Ok(())
    }
}

impl Story {
    pub fn new(page_size: PageSize, margins: Margins) -> Story {
        Story {
            page_size,
            margins,
            normalizer: Normalizer::default(),
            flowables: Vec::new(),
            placeholders: Vec::new(),
        }
    }

    /// Normalize every paragraph, caption and link label with `normalizer` instead of the
    /// default [Normalizer]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Story {
        self.normalizer = normalizer;
        self
    }

    pub fn push<F: Into<Flowable>>(&mut self, flowable: F) {
        self.flowables.push(flowable.into());
    }

    pub fn extend<I: IntoIterator<Item = Flowable>>(&mut self, flowables: I) {
        self.flowables.extend(flowables);
    }

    pub fn spacer(&mut self, height: Pt) {
        self.flowables.push(Flowable::Spacer(height));
    }

    pub fn page_break(&mut self) {
        self.flowables.push(Flowable::PageBreak);
    }

    pub fn flowables(&self) -> &[Flowable] {
        &self.flowables
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Number of placeholder images whose files are currently on disk
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Files of the placeholder images drawn by the last build
    pub fn placeholder_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.placeholders.iter().map(Placeholder::path)
    }

    fn normalized(&self, flowable: &Flowable) -> Flowable {
        let n = &self.normalizer;
        match flowable {
            Flowable::Paragraph(p) => Flowable::Paragraph(Paragraph {
                text: n.normalize(&p.text),
                style: p.style.clone(),
            }),
            Flowable::Links(l) => Flowable::Links(Links {
                links: l
                    .links
                    .iter()
                    .map(|link| Link {
                        label: n.normalize(&link.label),
                        uri: link.uri.clone(),
                    })
                    .collect(),
                lead: l.lead.as_deref().map(|lead| n.normalize(lead)),
                ..l.clone()
            }),
            Flowable::Figure(f) => Flowable::Figure(Figure {
                caption: n.normalize(&f.caption),
                ..f.clone()
            }),
            other => other.clone(),
        }
    }

    /// Lay the story out onto new pages appended to `document`, set in the faces of `fonts`.
    /// Always adds at least one page. Placeholder images drawn for figures stay on disk until
    /// the story is dropped or built again, so write the document before either.
    pub fn build(
        &mut self,
        document: &mut Document,
        fonts: &FontSet,
    ) -> Result<Vec<Id<Page>>, PDFError> {
        self.placeholders.clear();
        let flowables: Vec<Flowable> = self.flowables.iter().map(|f| self.normalized(f)).collect();
        let mut placeholders = Vec::new();

        let mut builder = Builder {
            document,
            fonts,
            page_size: self.page_size,
            margins: &self.margins,
            frame: Frame::new(self.page_size, &self.margins),
            pages: Vec::new(),
        };

        let result = flowables.iter().try_for_each(|flowable| match flowable {
            Flowable::Paragraph(paragraph) => builder.paragraph(paragraph),
            Flowable::Spacer(height) => {
                builder.space(*height);
                Ok(())
            }
            Flowable::Links(links) => builder.links(links),
            Flowable::Figure(figure) => builder.figure(figure, &mut placeholders),
            Flowable::PageBreak => {
                if !builder.frame.empty {
                    builder.new_page();
                }
                Ok(())
            }
        });

        // placeholders are kept even if assembly failed part way, they are cleaned up on drop
        self.placeholders.extend(placeholders);
        result?;

        builder.new_page();
        debug!(
            "story of {} flowables laid out on {} pages",
            flowables.len(),
            builder.pages.len()
        );
        Ok(builder.pages)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::PageContents;
    use crate::{pagesize, resolve, BuiltinFamily, FontRegistry, StyleSheet};

    fn setup() -> (Document, FontSet) {
        let mut registry = FontRegistry::default();
        let font = resolve(&mut registry, &[], BuiltinFamily::Times).into_font();
        let mut document = Document::default();
        let fonts = registry.install(&mut document, &font).expect("can install");
        (document, fonts)
    }

    fn page_text(document: &Document, page: Id<Page>) -> Vec<String> {
        document.pages[page]
            .contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(
                    spans
                        .iter()
                        .map(|s| s.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                ),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_story_is_one_blank_page() {
        let (mut document, fonts) = setup();
        let mut story = Story::new(pagesize::A4, Margins::academic());
        let pages = story.build(&mut document, &fonts).expect("can build");
        assert_eq!(pages.len(), 1);
        assert!(document.pages[pages[0]].is_empty());
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let style = StyleSheet::academic().body;
        let blocks = Paragraph::blocks("\n\nHi,\r\n\r\nfirst\nline\n\n\n\nBest,\n\nJane\n", &style);
        let texts: Vec<&str> = blocks
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph(p) => Some(p.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Hi,", "first\nline", "Best,", "Jane"]);
    }

    #[test]
    fn long_text_flows_onto_more_pages() {
        let (mut document, fonts) = setup();
        let styles = StyleSheet::academic();
        let mut story = Story::new(pagesize::A5, Margins::academic());
        for _ in 0..12 {
            story.push(Paragraph::new(lipsum::lipsum(120), styles.body.clone()));
        }
        let pages = story.build(&mut document, &fonts).expect("can build");

        assert!(pages.len() > 2);
        for &page in pages.iter() {
            let page = &document.pages[page];
            for content in page.contents.iter() {
                if let PageContents::Text(spans) = content {
                    for span in spans {
                        assert!(span.coords.1 >= page.content_box.y1);
                        assert!(span.coords.1 < page.content_box.y2);
                    }
                }
            }
        }
    }

    #[test]
    fn page_breaks_start_new_pages_but_not_blank_ones() {
        let (mut document, fonts) = setup();
        let styles = StyleSheet::academic();
        let mut story = Story::new(pagesize::A4, Margins::academic());
        story.page_break();
        story.push(Paragraph::new("one", styles.body.clone()));
        story.page_break();
        story.page_break();
        story.push(Paragraph::new("two", styles.body.clone()));
        let pages = story.build(&mut document, &fonts).expect("can build");

        assert_eq!(pages.len(), 2);
        assert_eq!(page_text(&document, pages[0]), vec!["one"]);
        assert_eq!(page_text(&document, pages[1]), vec!["two"]);
    }

    #[test]
    fn links_get_annotations_and_separators() {
        let (mut document, fonts) = setup();
        let styles = StyleSheet::academic();
        let mut story = Story::new(pagesize::A4, Margins::academic());
        story.push(Links::new(
            vec![
                Link::email("jane@example.com"),
                Link::url("Portfolio", "jane.dev"),
            ],
            styles.meta.clone(),
        ));
        let pages = story.build(&mut document, &fonts).expect("can build");

        let page = &document.pages[pages[0]];
        assert_eq!(page.links.len(), 2);
        assert_eq!(page.links[1].uri, "https://jane.dev");
        assert_eq!(
            page_text(&document, pages[0]),
            vec!["jane@example.com  ·  Portfolio"]
        );
    }

    #[test]
    fn text_is_normalized() {
        let (mut document, fonts) = setup();
        let mut story = Story::new(pagesize::A4, Margins::academic());
        story.push(Paragraph::new("Cafe\u{301}\u{a0}au\u{a0}lait", ParagraphStyle::default()));
        let pages = story.build(&mut document, &fonts).expect("can build");
        assert_eq!(page_text(&document, pages[0]), vec!["Café au lait"]);
    }

    #[test]
    fn placeholders_live_until_the_story_is_dropped() {
        let (mut document, fonts) = setup();
        let mut story = Story::new(pagesize::A4, Margins::academic());
        story.push(Figure::placeholder("Figure 1. Nothing yet."));
        let pages = story.build(&mut document, &fonts).expect("can build");

        assert_eq!(story.placeholder_count(), 1);
        let path = story.placeholders[0].path().to_owned();
        assert!(path.exists());
        assert_eq!(document.images.len(), 1);
        let text = page_text(&document, pages[0]);
        assert!(text.iter().any(|t| t.contains('×')));
        assert!(text.iter().any(|t| t == "Figure 1. Nothing yet."));

        let mut out = Vec::new();
        document.write(&mut out).expect("can write");
        drop(story);
        assert!(!path.exists());
    }

    #[test]
    fn narrow_figures_are_centred() {
        let (mut document, fonts) = setup();
        let margins = Margins::academic();
        let mut story = Story::new(pagesize::A4, margins.clone());
        story.push(Figure::placeholder("Figure 1. Small.").with_max_width(mm(80.0)));
        let pages = story.build(&mut document, &fonts).expect("can build");

        let image = document.pages[pages[0]]
            .contents
            .iter()
            .find_map(|c| match c {
                PageContents::Image(image) => Some(image.position),
                _ => None,
            })
            .expect("figure has an image");
        assert!((image.width().0 - mm(80.0).0).abs() < 0.001);
        assert!((image.height().0 - mm(48.0).0).abs() < 0.001);
        let left_gap = image.x1 - margins.left;
        let right_gap = (pagesize::A4.0 - margins.right) - image.x2;
        assert!((left_gap.0 - right_gap.0).abs() < 0.001);
    }

    #[test]
    fn leads_are_set_before_the_first_link() {
        let (mut document, fonts) = setup();
        let mut story = Story::new(pagesize::A4, Margins::academic());
        story.push(
            Links::new(
                vec![Link::bare("https://example.com")],
                ParagraphStyle::default(),
            )
            .with_lead("Portfolio\u{a0}& case studies: "),
        );
        let pages = story.build(&mut document, &fonts).expect("can build");

        let page = &document.pages[pages[0]];
        assert_eq!(
            page_text(&document, pages[0]),
            vec!["Portfolio & case studies:  https://example.com"]
        );
        assert_eq!(page.links.len(), 1);
        // only the link itself is clickable
        assert!(page.links[0].rect.x1 > Margins::academic().left + Pt(50.0));
    }

    #[test]
    fn building_again_releases_earlier_placeholders() {
        let (mut document, fonts) = setup();
        let mut story = Story::new(pagesize::A4, Margins::academic());
        story.push(Figure::placeholder("Figure 1."));
        story.push(Figure::placeholder("Figure 2."));

        story.build(&mut document, &fonts).expect("can build");
        let first: Vec<_> = story.placeholders.iter().map(|p| p.path().to_owned()).collect();
        story.build(&mut document, &fonts).expect("can build again");

        assert_eq!(story.placeholder_count(), 2);
        assert!(first.iter().all(|path| !path.exists()));
    }
}

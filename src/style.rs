//! Paragraph styles for the [Story](crate::Story) flowables

use crate::colour::{colours, Colour};
use crate::font::FontStyle;
use crate::layout::Alignment;
use crate::units::{mm, Pt};

/// How a paragraph is set: which face of the document's font family, at what size and
/// leading, and the space kept clear above and below it
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub font: FontStyle,
    pub size: Pt,
    /// Distance between consecutive baselines
    pub leading: Pt,
    pub colour: Colour,
    pub alignment: Alignment,
    pub space_before: Pt,
    pub space_after: Pt,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        ParagraphStyle {
            font: FontStyle::Regular,
            size: Pt(10.0),
            leading: Pt(12.0),
            colour: colours::BLACK,
            alignment: Alignment::Left,
            space_before: Pt(0.0),
            space_after: Pt(0.0),
        }
    }
}

impl ParagraphStyle {
    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    pub fn with_size(mut self, size: Pt, leading: Pt) -> Self {
        self.size = size;
        self.leading = leading;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_space_before(mut self, space: Pt) -> Self {
        self.space_before = space;
        self
    }

    pub fn with_space_after(mut self, space: Pt) -> Self {
        self.space_after = space;
        self
    }
}

/// The named styles shared by the letter, CV and case study templates
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub title: ParagraphStyle,
    /// Contact and link lines under the title
    pub meta: ParagraphStyle,
    pub date: ParagraphStyle,
    /// Justified running text
    pub body: ParagraphStyle,
    /// Running text for list-like lines, flush left
    pub body_left: ParagraphStyle,
    pub signature: ParagraphStyle,
    pub section: ParagraphStyle,
    /// Job titles, company names and subtitles
    pub subsection: ParagraphStyle,
    /// Dates and locations
    pub meta_text: ParagraphStyle,
    pub caption: ParagraphStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet::academic()
    }
}

impl StyleSheet {
    /// Formal serif styles: tight leading, justified body, near-black text with grey metadata
    pub fn academic() -> StyleSheet {
        let text = ParagraphStyle::default().with_colour(colours::INK);
        let meta = text
            .clone()
            .with_size(Pt(9.5), Pt(12.0))
            .with_colour(colours::SLATE);
        let body = text.clone().with_size(Pt(10.5), Pt(13.0));

        StyleSheet {
            title: text
                .clone()
                .with_font(FontStyle::Bold)
                .with_size(Pt(13.0), Pt(16.0))
                .with_space_after(mm(4.0)),
            meta: meta.clone().with_space_after(mm(8.0)),
            date: text
                .clone()
                .with_size(Pt(10.0), Pt(13.0))
                .with_space_after(mm(10.0)),
            body: body
                .clone()
                .with_alignment(Alignment::Justify)
                .with_space_after(mm(3.0)),
            body_left: body.clone().with_space_after(mm(1.5)),
            signature: text
                .clone()
                .with_size(Pt(11.0), Pt(16.0))
                .with_space_before(mm(8.0)),
            section: body
                .clone()
                .with_font(FontStyle::Bold)
                .with_space_before(mm(6.0))
                .with_space_after(mm(2.5)),
            subsection: body
                .clone()
                .with_font(FontStyle::Bold)
                .with_space_after(mm(1.0)),
            meta_text: meta.clone().with_space_after(mm(2.0)),
            caption: meta
                .with_font(FontStyle::Italic)
                .with_size(Pt(9.0), Pt(11.0))
                .with_alignment(Alignment::Centre)
                .with_space_after(mm(2.0)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn academic_sheet() {
        let sheet = StyleSheet::academic();
        assert_eq!(sheet.body.alignment, Alignment::Justify);
        assert_eq!(sheet.body.size, Pt(10.5));
        assert_eq!(sheet.title.font, FontStyle::Bold);
        assert_eq!(sheet.caption.font, FontStyle::Italic);
        assert_eq!(sheet.caption.alignment, Alignment::Centre);
        assert_eq!(sheet.meta.colour, colours::SLATE);
        assert_eq!(sheet.section.space_before, mm(6.0));
    }
}

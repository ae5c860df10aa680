use crate::colour::Colour;
use crate::font::Font;
use crate::page::*;
use crate::units::Pt;

/// Horizontal placement of the lines of a paragraph
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Centre,
    Right,
    /// Stretch the spaces between words so lines span the full width. The last line of a
    /// paragraph, and lines of a single word, are set flush left.
    Justify,
}

/// Place one already-wrapped line of text with its baseline starting at `origin` and
/// `width` available. Returns the spans; a justified line gets one span per word.
#[allow(clippy::too_many_arguments)]
pub fn layout_line(
    font: &Font,
    span_font: SpanFont,
    colour: Colour,
    line: &str,
    origin: (Pt, Pt),
    width: Pt,
    alignment: Alignment,
    last_line: bool,
) -> Vec<SpanLayout> {
    let (x, y) = origin;
    let span = |text: &str, x: Pt| SpanLayout {
        text: text.to_string(),
        font: span_font,
        colour,
        coords: (x, y),
    };

    let line_width = || font.width_of_text(line, span_font.size);
    match alignment {
        Alignment::Left => vec![span(line, x)],
        Alignment::Centre => vec![span(line, x + (width - line_width()) / 2.0)],
        Alignment::Right => vec![span(line, x + width - line_width())],
        Alignment::Justify => {
            struct Word<'a> {
                word: &'a str,
                width: Pt,
            }

            let words: Vec<Word> = line
                .split_whitespace()
                .map(|word| Word {
                    word,
                    width: font.width_of_text(word, span_font.size),
                })
                .collect();
            if last_line || words.len() < 2 {
                return vec![span(line, x)];
            }

            let words_width: Pt = words.iter().map(|w| w.width).sum();
            let space_width = (width - words_width) / ((words.len() - 1) as f32);

            let mut x = x;
            let mut spans = Vec::with_capacity(words.len());
            for word in words {
                spans.push(span(word.word, x));
                x += word.width + space_width;
            }
            spans
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{colours, BuiltinFace, Document};

    fn setup() -> (Document, SpanFont) {
        let mut document = Document::default();
        let id = document.add_font(Font::builtin(BuiltinFace::Helvetica));
        (document, SpanFont { id, size: Pt(10.0) })
    }

    #[test]
    fn centred_lines_are_offset_by_half_the_slack() {
        let (document, font) = setup();
        let f = &document.fonts[font.id];
        let spans = layout_line(
            f,
            font,
            colours::BLACK,
            "Hello",
            (Pt(0.0), Pt(0.0)),
            Pt(100.0),
            Alignment::Centre,
            false,
        );
        assert_eq!(spans.len(), 1);
        assert!((spans[0].coords.0 .0 - (100.0 - 22.78) / 2.0).abs() < 0.001);
    }

    #[test]
    fn justified_lines_fill_the_width() {
        let (document, font) = setup();
        let f = &document.fonts[font.id];
        let spans = layout_line(
            f,
            font,
            colours::BLACK,
            "one two three",
            (Pt(10.0), Pt(0.0)),
            Pt(200.0),
            Alignment::Justify,
            false,
        );
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].coords.0, Pt(10.0));
        let last = spans.last().expect("three spans");
        let right_edge = last.coords.0 + f.width_of_text(&last.text, font.size);
        assert!((right_edge.0 - 210.0).abs() < 0.01);
    }

    #[test]
    fn last_justified_line_is_flush_left() {
        let (document, font) = setup();
        let spans = layout_line(
            &document.fonts[font.id],
            font,
            colours::BLACK,
            "the end",
            (Pt(10.0), Pt(0.0)),
            Pt(200.0),
            Alignment::Justify,
            true,
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "the end");
    }
}

//! Utilities to position text on pages.
//!
//! - [`wrap`](crate::layout::wrap) breaks text into lines greedily against any width measure
//! - [`layout_line`](crate::layout::layout_line) places one line with an [`Alignment`]
//!
//! [`Story`](crate::Story) and [`Canvas`](crate::Canvas) build on both.
//!
//! # Example
//!
//! ```
//! use letterpress::{BuiltinFace, Colour, Document, Font, Page, Pt, SpanFont};
//! use letterpress::layout::{layout_line, wrap, Alignment, Margins};
//! use letterpress::pagesize;
//!
//! let mut doc = Document::default();
//! let font_id = doc.add_font(Font::builtin(BuiltinFace::TimesRoman));
//! let font = &doc.fonts[font_id];
//! let span_font = SpanFont { id: font_id, size: Pt(10.5) };
//!
//! let mut page = Page::new(pagesize::A4, Some(Margins::academic()));
//! let width = page.content_box.width();
//! let (x, mut y) = (page.content_box.x1, page.content_box.y2 - font.ascent(Pt(10.5)));
//!
//! let text = "Hello, world! This paragraph is justified.";
//! let lines = wrap(text, width, |line| font.width_of_text(line, Pt(10.5)));
//! for (i, line) in lines.iter().enumerate() {
//!     let last = i + 1 == lines.len();
//!     let spans = layout_line(
//!         font,
//!         span_font,
//!         Colour::Grey { g: 0.1 },
//!         line,
//!         (x, y),
//!         width,
//!         Alignment::Justify,
//!         last,
//!     );
//!     page.add_spans(spans);
//!     y -= Pt(13.0);
//! }
//! doc.add_page(page);
//! ```

mod margins;
mod text;
mod wrap;

pub use margins::*;
pub use text::*;
pub use wrap::*;

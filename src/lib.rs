mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;
pub use layout::{Alignment, Margins};

/// Standard paper sizes
pub mod pagesize;

mod page;
pub use page::*;

mod content;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Text clean-up applied before layout
pub mod text;
pub use text::{Normalizer, ReplacementTable};

mod links;
pub use links::*;

mod style;
pub use style::*;

mod figure;
pub use figure::*;

mod story;
pub use story::*;

mod canvas;
pub use canvas::*;

/// Letters, CVs and case studies built from sample configuration
pub mod templates;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;

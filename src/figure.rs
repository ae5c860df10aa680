//! Figures with captions, and the placeholder graphic drawn when a figure has no image yet

use crate::colour::Colour;
use crate::image::Image;
use crate::style::{ParagraphStyle, StyleSheet};
use crate::units::{mm, Pt};
use crate::PDFError;
use image::{ImageFormat, Rgb, RgbImage};
use log::warn;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Placeholder height as a fraction of its width
pub const PLACEHOLDER_ASPECT: f32 = 0.6;

const PLACEHOLDER_FILL: &str = "#f5f5f5";
const PLACEHOLDER_BORDER: &str = "#cccccc";
const PLACEHOLDER_BORDER_WIDTH: u32 = 2;

/// An image scaled to the column width with a caption centred beneath it. Without a
/// path (or when the path doesn't exist) a placeholder is drawn instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub path: Option<PathBuf>,
    pub caption: String,
    pub caption_style: ParagraphStyle,
    pub max_width: Pt,
}

impl Figure {
    pub fn new<S: ToString>(path: Option<PathBuf>, caption: S) -> Figure {
        Figure {
            path,
            caption: caption.to_string(),
            caption_style: StyleSheet::academic().caption,
            max_width: mm(160.0),
        }
    }

    /// A figure that is always drawn as a placeholder
    pub fn placeholder<S: ToString>(caption: S) -> Figure {
        Figure::new(None, caption)
    }

    pub fn with_max_width(mut self, max_width: Pt) -> Figure {
        self.max_width = max_width;
        self
    }

    pub fn with_caption_style(mut self, style: ParagraphStyle) -> Figure {
        self.caption_style = style;
        self
    }

    /// Load the image to draw for this figure, `width` wide. Returns [None] when neither the
    /// image nor a placeholder could be produced, in which case the figure is left out.
    pub(crate) fn prepare(&self, width: Pt) -> Option<PreparedFigure> {
        if let Some(path) = self.path.as_ref().filter(|path| path.exists()) {
            match Image::new_from_disk(path) {
                Ok(image) => {
                    return Some(PreparedFigure {
                        height: width * image.aspect_ratio(),
                        image,
                        placeholder: None,
                    })
                }
                Err(e) => warn!(
                    "could not load image {}: {e}; drawing a placeholder",
                    path.display()
                ),
            }
        }

        let height = width * PLACEHOLDER_ASPECT;
        match Placeholder::create(width, height) {
            Ok(placeholder) => match Image::new_from_disk(placeholder.file.path()) {
                Ok(image) => Some(PreparedFigure {
                    image,
                    height,
                    placeholder: Some(placeholder),
                }),
                Err(e) => {
                    warn!("could not load placeholder image: {e}; skipping figure");
                    None
                }
            },
            Err(e) => {
                warn!("could not create placeholder image: {e}; skipping figure");
                None
            }
        }
    }
}

pub(crate) struct PreparedFigure {
    pub image: Image,
    pub height: Pt,
    pub placeholder: Option<Placeholder>,
}

/// A generated placeholder PNG on disk. The file is deleted when this is dropped.
pub struct Placeholder {
    file: NamedTempFile,
    label: String,
}

impl Placeholder {
    /// Write a `width` by `height` placeholder (one pixel per point) to a temporary file
    pub fn create(width: Pt, height: Pt) -> Result<Placeholder, PDFError> {
        let (w, h) = (width.0.max(1.0) as u32, height.0.max(1.0) as u32);
        let file = tempfile::Builder::new()
            .prefix("placeholder_")
            .suffix(".png")
            .tempfile()?;

        placeholder_image(w, h).save_with_format(file.path(), ImageFormat::Png)?;

        Ok(Placeholder {
            file,
            label: format!("{w}×{h}"),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Dimensions printed in the middle of the placeholder, e.g. `453×272`
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn rgb(hex: &str) -> Rgb<u8> {
    Rgb(Colour::from_hex(hex)
        .map(Colour::to_rgb_bytes)
        .unwrap_or([0; 3]))
}

fn placeholder_image(width: u32, height: u32) -> RgbImage {
    let fill = rgb(PLACEHOLDER_FILL);
    let border = rgb(PLACEHOLDER_BORDER);
    RgbImage::from_fn(width, height, |x, y| {
        let edge = x < PLACEHOLDER_BORDER_WIDTH
            || y < PLACEHOLDER_BORDER_WIDTH
            || x + PLACEHOLDER_BORDER_WIDTH >= width
            || y + PLACEHOLDER_BORDER_WIDTH >= height;
        if edge {
            border
        } else {
            fill
        }
    })
}

use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode or encode an image
    Image(#[from] image::ImageError),

    #[error("font face {0:?} is not registered")]
    /// A face was requested from the [FontRegistry](crate::FontRegistry) that was never committed to it
    UnknownFace(String),

    #[error("page {0} is listed in the page order but missing from the document")]
    /// The page order refers to a page that no longer exists
    PageMissing(usize),
}

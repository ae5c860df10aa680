use letterpress::templates::{Letter, LetterKind};
use letterpress::{FontRegistry, PDFError};
use std::path::PathBuf;

/// Renders a sample of every letter kind into the directory given as the first argument
/// (default: the working directory). The font family is resolved once and shared.
fn main() -> Result<(), PDFError> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let mut registry = FontRegistry::default();
    for kind in LetterKind::ALL {
        let path = out_dir.join(kind.default_file_name());
        let font = Letter::sample(kind).build_to(&path, &mut registry)?;
        println!("Generated: {} (font={})", path.display(), font.family);
    }
    Ok(())
}

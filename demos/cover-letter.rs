use letterpress::templates::Letter;
use letterpress::{FontRegistry, PDFError};

fn main() -> Result<(), PDFError> {
    env_logger::init();

    // the sample cover letter; fill in `name`, `links` and `body` with your own
    let letter = Letter::default();
    let path = letter.kind.default_file_name();

    let mut registry = FontRegistry::default();
    let font = letter.build_to(path, &mut registry)?;

    println!("Generated: {path} (font={})", font.family);
    if font.builtin_family().is_some() {
        println!(
            "Using built-in {}. Add DejaVuSerif fonts to ./fonts/ (or point LETTERPRESS_FONTS_DIR at them) for embedded fonts",
            font.family
        );
    }
    Ok(())
}

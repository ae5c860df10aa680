use letterpress::templates::{CaseFigure, CaseStudy, CASE_STUDY_FILE_NAME};
use letterpress::{FontRegistry, PDFError};

/// Image paths given as arguments replace the placeholder figures, in order
fn main() -> Result<(), PDFError> {
    env_logger::init();

    let mut study = CaseStudy::default();
    for (figure, path) in study.figures.iter_mut().zip(std::env::args().skip(1)) {
        *figure = CaseFigure {
            path: Some(path.into()),
            caption: figure.caption.clone(),
        };
    }

    let mut registry = FontRegistry::default();
    let font = study.build_to(CASE_STUDY_FILE_NAME, &mut registry)?;
    println!("Generated: {CASE_STUDY_FILE_NAME} (font={})", font.family);
    Ok(())
}

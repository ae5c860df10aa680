use letterpress::templates::{build_academic_cv_to, CvData, CV_FILE_NAME};
use letterpress::{FontRegistry, PDFError};

fn main() -> Result<(), PDFError> {
    env_logger::init();

    let mut registry = FontRegistry::default();
    let font = build_academic_cv_to(&CvData::default(), CV_FILE_NAME, &mut registry)?;
    println!("Generated: {CV_FILE_NAME} (font={}, academic style)", font.family);
    Ok(())
}

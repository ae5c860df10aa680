use letterpress::templates::{build_cv_to, CvData, CV_FILE_NAME};
use letterpress::PDFError;

fn main() -> Result<(), PDFError> {
    env_logger::init();

    let cv = CvData::default();
    let font = build_cv_to(&cv, CV_FILE_NAME)?;
    println!("Generated: {CV_FILE_NAME} (font={})", font.family);
    Ok(())
}

use letterpress::templates::{
    build_academic_cv_to, build_cv_to, CaseFigure, CaseStudy, CvData, Letter, LetterKind,
};
use letterpress::{resolve, BuiltinFamily, Document, FontRegistry, StyleSheet};
use std::path::{Path, PathBuf};

fn assert_pdf(path: &Path) -> Vec<u8> {
    let bytes = std::fs::read(path).expect("output exists");
    assert!(bytes.starts_with(b"%PDF-"), "{} is not a pdf", path.display());
    bytes
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn every_letter_kind_renders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut registry = FontRegistry::default();

    for kind in LetterKind::ALL {
        let path = dir.path().join(kind.default_file_name());
        let font = Letter::sample(kind)
            .build_to(&path, &mut registry)
            .expect("letter builds");
        assert!(!font.family.is_empty());
        let bytes = assert_pdf(&path);
        assert!(contains(&bytes, b"/URI"));
    }
}

#[test]
fn letters_share_the_resolved_family() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut registry = FontRegistry::default();

    let first = Letter::sample(LetterKind::CoverLetter)
        .build_to(dir.path().join("a.pdf"), &mut registry)
        .expect("builds");
    let second = Letter::sample(LetterKind::ThankYou)
        .build_to(dir.path().join("b.pdf"), &mut registry)
        .expect("builds");
    assert_eq!(first, second);
}

#[test]
fn compact_cv_is_set_in_helvetica() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cv.pdf");
    let font = build_cv_to(&CvData::default(), &path).expect("cv builds");

    assert_eq!(font.builtin_family(), Some(BuiltinFamily::Helvetica));
    let bytes = assert_pdf(&path);
    assert!(contains(&bytes, b"/Helvetica-Bold"));
    assert!(contains(&bytes, b"mailto:john.doe@example.com"));
}

#[test]
fn academic_cv_renders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cv-academic.pdf");
    let mut registry = FontRegistry::default();
    build_academic_cv_to(&CvData::default(), &path, &mut registry).expect("cv builds");
    assert_pdf(&path);
}

#[test]
fn case_study_embeds_figures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("flow.png");
    image::RgbImage::from_pixel(320, 160, image::Rgb([40, 90, 200]))
        .save(&image_path)
        .expect("can write image");

    let mut study = CaseStudy::default();
    study.figures[0] = CaseFigure {
        path: Some(image_path),
        caption: "Figure 1. A real image.".to_string(),
    };
    study.figures[1].path = Some(dir.path().join("missing.png"));

    let path = dir.path().join("case.pdf");
    let mut registry = FontRegistry::default();
    study.build_to(&path, &mut registry).expect("case study builds");

    let bytes = assert_pdf(&path);
    let images = bytes
        .windows(b"/Subtype /Image".len())
        .filter(|w| *w == b"/Subtype /Image")
        .count();
    assert_eq!(images, 3);
}

#[test]
fn failed_writes_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no-such-dir").join("letter.pdf");
    let mut registry = FontRegistry::default();
    assert!(Letter::default().build_to(&path, &mut registry).is_err());
}

#[test]
fn placeholders_are_removed_when_writing_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no-such-dir").join("case.pdf");

    let mut registry = FontRegistry::default();
    let font = resolve(&mut registry, &[], BuiltinFamily::Times).into_font();
    let mut document = Document::default();
    let fonts = registry.install(&mut document, &font).expect("can install");

    let mut story = CaseStudy::default().story(&StyleSheet::academic());
    story.build(&mut document, &fonts).expect("case study lays out");
    let placeholders: Vec<PathBuf> = story.placeholder_paths().map(Path::to_path_buf).collect();
    assert_eq!(placeholders.len(), 3);
    assert!(placeholders.iter().all(|p| p.exists()));

    let written = document.write_to_path(&path);
    drop(story);
    assert!(written.is_err());
    assert!(placeholders.iter().all(|p| !p.exists()));

    let mut registry = FontRegistry::default();
    assert!(CaseStudy::default().build_to(&path, &mut registry).is_err());
}

#[test]
fn portfolio_lines_are_clickable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cover.pdf");
    let mut registry = FontRegistry::default();
    Letter::sample(LetterKind::CoverLetter)
        .build_to(&path, &mut registry)
        .expect("letter builds");

    let bytes = assert_pdf(&path);
    assert!(contains(&bytes, b"(https://example.com)"));
}

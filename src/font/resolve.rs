//! Font fallback: pick the first candidate family whose files exist and parse, register its
//! faces in a caller-owned [FontRegistry], and fall back to a built-in family otherwise.
//!
//! ```
//! use letterpress::{resolve, BuiltinFamily, FontCandidate, FontRegistry, Resolution};
//!
//! let mut registry = FontRegistry::default();
//! let candidates = [FontCandidate::in_dir("NoSuchFamily", "/definitely/not/here")];
//!
//! let resolution = resolve(&mut registry, &candidates, BuiltinFamily::Times);
//! assert!(matches!(resolution, Resolution::Fallback { .. }));
//! assert_eq!(resolution.font().family, "Times-Roman");
//! ```

use super::{BuiltinFace, BuiltinFamily, Font, FontStyle};
use crate::{Document, PDFError};
use id_arena::Id;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming the directory searched for bundled font files
pub const FONTS_DIR_ENV: &str = "LETTERPRESS_FONTS_DIR";

/// The directory bundled fonts are looked up in: `$LETTERPRESS_FONTS_DIR` if set and
/// non-empty, else `fonts` relative to the working directory
pub fn fonts_dir() -> PathBuf {
    std::env::var_os(FONTS_DIR_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("fonts"))
}

/// One candidate family with a file for each style slot. Only the regular file has to
/// exist for the candidate to be usable.
#[derive(Debug, Clone, PartialEq)]
pub struct FontCandidate {
    pub family: String,
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub bold_italic: PathBuf,
}

impl FontCandidate {
    pub fn new<S, P>(family: S, regular: P, bold: P, italic: P, bold_italic: P) -> FontCandidate
    where
        S: ToString,
        P: Into<PathBuf>,
    {
        FontCandidate {
            family: family.to_string(),
            regular: regular.into(),
            bold: bold.into(),
            italic: italic.into(),
            bold_italic: bold_italic.into(),
        }
    }

    /// A candidate laid out the usual way in a directory: `Family.ttf`, `Family-Bold.ttf`,
    /// `Family-Italic.ttf` and `Family-BoldItalic.ttf`
    pub fn in_dir<P: AsRef<Path>>(family: &str, dir: P) -> FontCandidate {
        let dir = dir.as_ref();
        let file = |style: FontStyle| dir.join(format!("{family}{}.ttf", style.suffix()));
        FontCandidate {
            family: family.to_string(),
            regular: file(FontStyle::Regular),
            bold: file(FontStyle::Bold),
            italic: file(FontStyle::Italic),
            bold_italic: file(FontStyle::BoldItalic),
        }
    }

    pub fn path(&self, style: FontStyle) -> &Path {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
            FontStyle::BoldItalic => &self.bold_italic,
        }
    }
}

/// `candidates`, preceded by a copy of each relocated into `$LETTERPRESS_FONTS_DIR`
/// when that variable is set, so fonts dropped there win over system installs
pub fn candidates_from_env(candidates: &[FontCandidate]) -> Vec<FontCandidate> {
    let dir = std::env::var_os(FONTS_DIR_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty());
    let Some(dir) = dir else {
        return candidates.to_vec();
    };

    candidates
        .iter()
        .map(|candidate| FontCandidate::in_dir(&candidate.family, &dir))
        .chain(candidates.iter().cloned())
        .collect()
}

/// Serif candidates used by the academic templates: the macOS Times New Roman files, then
/// DejaVu Serif from the [fonts_dir]. Resolve these with [BuiltinFamily::Times] as default.
pub fn academic_candidates() -> Vec<FontCandidate> {
    const SUPPLEMENTAL: &str = "/System/Library/Fonts/Supplemental";
    vec![
        FontCandidate::new(
            "TimesCustom",
            format!("{SUPPLEMENTAL}/Times New Roman.ttf"),
            format!("{SUPPLEMENTAL}/Times New Roman Bold.ttf"),
            format!("{SUPPLEMENTAL}/Times New Roman Italic.ttf"),
            format!("{SUPPLEMENTAL}/Times New Roman Bold Italic.ttf"),
        ),
        FontCandidate::in_dir("DejaVuSerif", fonts_dir()),
    ]
}

/// The family chosen by [resolve], naming the face to use for each style slot
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    /// Name of the family; for built-in families this is the name of the regular face
    pub family: String,
    faces: [String; 4],
    registered: [bool; 4],
    builtin: Option<BuiltinFamily>,
}

fn slot(style: FontStyle) -> usize {
    match style {
        FontStyle::Regular => 0,
        FontStyle::Bold => 1,
        FontStyle::Italic => 2,
        FontStyle::BoldItalic => 3,
    }
}

impl ResolvedFont {
    /// Every slot maps to the built-in family's own face for that style
    pub fn builtin(family: BuiltinFamily) -> ResolvedFont {
        ResolvedFont {
            family: family.name().to_string(),
            faces: FontStyle::ALL.map(|style| family.face(style).base_font().to_string()),
            registered: [false; 4],
            builtin: Some(family),
        }
    }

    /// Name of the face drawn for `style`. Slots without their own file map to the regular face.
    pub fn face_name(&self, style: FontStyle) -> &str {
        &self.faces[slot(style)]
    }

    /// Whether `style` got its own face from a font file
    pub fn is_registered(&self, style: FontStyle) -> bool {
        self.registered[slot(style)]
    }

    /// The built-in family in use, if no candidate could be registered
    pub fn builtin_family(&self) -> Option<BuiltinFamily> {
        self.builtin
    }
}

/// Why a candidate was passed over
#[derive(Debug)]
pub enum FailureReason {
    /// The regular file does not exist
    Missing(PathBuf),
    /// A file exists but could not be read
    Unreadable { path: PathBuf, error: PDFError },
    /// A file was read but is not a usable font
    Invalid { path: PathBuf, error: PDFError },
}

#[derive(Debug)]
pub struct CandidateFailure {
    pub family: String,
    pub reason: FailureReason,
}

/// Outcome of [resolve]. Every branch carries a usable [ResolvedFont].
#[derive(Debug)]
pub enum Resolution {
    /// The candidate at `candidate` was registered by this call
    Registered {
        font: ResolvedFont,
        candidate: usize,
    },
    /// A candidate family had already been registered by an earlier call
    AlreadyRegistered { font: ResolvedFont },
    /// No candidate could be used, `font` is the built-in default
    Fallback {
        font: ResolvedFont,
        failures: Vec<CandidateFailure>,
    },
}

impl Resolution {
    pub fn font(&self) -> &ResolvedFont {
        match self {
            Resolution::Registered { font, .. }
            | Resolution::AlreadyRegistered { font }
            | Resolution::Fallback { font, .. } => font,
        }
    }

    pub fn into_font(self) -> ResolvedFont {
        match self {
            Resolution::Registered { font, .. }
            | Resolution::AlreadyRegistered { font }
            | Resolution::Fallback { font, .. } => font,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback { .. })
    }
}

/// Checks that a file's bytes are a usable font
pub type FaceValidator = fn(&[u8]) -> Result<(), PDFError>;

fn parse_face(data: &[u8]) -> Result<(), PDFError> {
    owned_ttf_parser::Face::parse(data, 0)?;
    Ok(())
}

struct RegisteredFace {
    path: PathBuf,
    data: Vec<u8>,
}

/// Faces registered by [resolve], keyed by face name (`Family`, `Family-Bold`, ...).
/// The registry is owned by the caller and shared by every document it builds, so each
/// family is read from disk at most once.
pub struct FontRegistry {
    faces: HashMap<String, RegisteredFace>,
    families: HashMap<String, ResolvedFont>,
    validator: FaceValidator,
}

impl Default for FontRegistry {
    fn default() -> Self {
        FontRegistry::with_validator(parse_face)
    }
}

/// Document ids of the four faces of a resolved family. Slots that share a face share an id.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontSet {
    pub regular: Id<Font>,
    pub bold: Id<Font>,
    pub italic: Id<Font>,
    pub bold_italic: Id<Font>,
}

impl FontSet {
    pub fn get(&self, style: FontStyle) -> Id<Font> {
        match style {
            FontStyle::Regular => self.regular,
            FontStyle::Bold => self.bold,
            FontStyle::Italic => self.italic,
            FontStyle::BoldItalic => self.bold_italic,
        }
    }
}

impl FontRegistry {
    /// A registry that accepts a font file when `validator` does, instead of parsing it
    pub fn with_validator(validator: FaceValidator) -> FontRegistry {
        FontRegistry {
            faces: HashMap::new(),
            families: HashMap::new(),
            validator,
        }
    }

    pub fn is_registered(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    pub fn contains_face(&self, face: &str) -> bool {
        self.faces.contains_key(face)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn load(&self, path: &Path) -> Result<Vec<u8>, FailureReason> {
        let data = std::fs::read(path).map_err(|error| FailureReason::Unreadable {
            path: path.to_owned(),
            error: error.into(),
        })?;
        (self.validator)(&data).map_err(|error| FailureReason::Invalid {
            path: path.to_owned(),
            error,
        })?;
        Ok(data)
    }

    /// Read and validate every available file of `candidate` without touching the registry
    fn stage(
        &self,
        candidate: &FontCandidate,
    ) -> Result<Vec<(FontStyle, RegisteredFace)>, FailureReason> {
        if !candidate.regular.exists() {
            return Err(FailureReason::Missing(candidate.regular.clone()));
        }

        let mut staged = Vec::with_capacity(4);
        for style in FontStyle::ALL {
            let path = candidate.path(style);
            if style != FontStyle::Regular && !path.exists() {
                continue;
            }
            let data = self.load(path)?;
            staged.push((
                style,
                RegisteredFace {
                    path: path.to_owned(),
                    data,
                },
            ));
        }
        Ok(staged)
    }

    fn commit(&mut self, family: &str, staged: Vec<(FontStyle, RegisteredFace)>) -> ResolvedFont {
        let mut resolved = ResolvedFont {
            family: family.to_string(),
            faces: [(); 4].map(|_| family.to_string()),
            registered: [false; 4],
            builtin: None,
        };
        for (style, face) in staged {
            let name = format!("{family}{}", style.suffix());
            resolved.faces[slot(style)] = name.clone();
            resolved.registered[slot(style)] = true;
            debug!("registered {name} from {}", face.path.display());
            self.faces.insert(name, face);
        }
        self.families.insert(family.to_string(), resolved.clone());
        resolved
    }

    /// Add the faces of `font` to `document`. Registered faces are parsed from the bytes held
    /// by the registry, built-in faces are referenced by name.
    pub fn install(&self, document: &mut Document, font: &ResolvedFont) -> Result<FontSet, PDFError> {
        let mut installed: HashMap<&str, Id<Font>> = HashMap::new();
        let mut ids = Vec::with_capacity(4);
        for style in FontStyle::ALL {
            let name = font.face_name(style);
            let id = match installed.get(name) {
                Some(&id) => id,
                None => {
                    let loaded = match BuiltinFace::from_name(name) {
                        Some(face) if font.builtin.is_some() => Font::builtin(face),
                        _ => {
                            let face = self
                                .faces
                                .get(name)
                                .ok_or_else(|| PDFError::UnknownFace(name.to_string()))?;
                            Font::load(face.data.clone())?
                        }
                    };
                    let id = document.add_font(loaded);
                    installed.insert(name, id);
                    id
                }
            };
            ids.push(id);
        }

        Ok(FontSet {
            regular: ids[0],
            bold: ids[1],
            italic: ids[2],
            bold_italic: ids[3],
        })
    }
}

/// Pick the first usable family from `candidates` (in priority order) and register it in
/// `registry`; fall back to `default` when none is usable. Never fails: missing, unreadable
/// and malformed files just disqualify their candidate, and a disqualified candidate leaves
/// nothing behind in the registry. Resolving a list again returns the family registered the
/// first time without touching the filesystem.
pub fn resolve(
    registry: &mut FontRegistry,
    candidates: &[FontCandidate],
    default: BuiltinFamily,
) -> Resolution {
    let mut failures = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        if let Some(font) = registry.families.get(&candidate.family) {
            return Resolution::AlreadyRegistered { font: font.clone() };
        }

        match registry.stage(candidate) {
            Ok(staged) => {
                let font = registry.commit(&candidate.family, staged);
                info!(
                    "registered font family {} from {}",
                    font.family,
                    candidate.regular.display()
                );
                return Resolution::Registered {
                    font,
                    candidate: index,
                };
            }
            Err(reason) => {
                debug!("skipping font candidate {}: {reason:?}", candidate.family);
                failures.push(CandidateFailure {
                    family: candidate.family.clone(),
                    reason,
                });
            }
        }
    }

    warn!(
        "no font candidate usable ({} tried); falling back to built-in {}",
        candidates.len(),
        default.name()
    );
    Resolution::Fallback {
        font: ResolvedFont::builtin(default),
        failures,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    /// Accepts anything that starts with the fake font magic
    fn accept_fake(data: &[u8]) -> Result<(), PDFError> {
        if data.starts_with(b"FAKEFONT") {
            Ok(())
        } else {
            Err(PDFError::UnknownFace("not a fake font".to_string()))
        }
    }

    fn write_face(dir: &Path, family: &str, style: FontStyle, contents: &[u8]) {
        fs::write(dir.join(format!("{family}{}.ttf", style.suffix())), contents)
            .expect("can write fixture");
    }

    #[test]
    fn no_files_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = FontRegistry::with_validator(accept_fake);
        let candidates = [
            FontCandidate::in_dir("First", dir.path()),
            FontCandidate::in_dir("Second", dir.path()),
        ];

        let resolution = resolve(&mut registry, &candidates, BuiltinFamily::Times);

        let Resolution::Fallback { font, failures } = resolution else {
            panic!("expected a fallback");
        };
        assert_eq!(font.family, "Times-Roman");
        assert_eq!(font.face_name(FontStyle::Bold), "Times-Bold");
        assert_eq!(font.face_name(FontStyle::Italic), "Times-Italic");
        assert_eq!(font.face_name(FontStyle::BoldItalic), "Times-BoldItalic");
        assert_eq!(font.builtin_family(), Some(BuiltinFamily::Times));
        assert_eq!(failures.len(), 2);
        assert!(matches!(failures[0].reason, FailureReason::Missing(_)));
        assert_eq!(registry.face_count(), 0);
    }

    #[test]
    fn empty_candidate_list_falls_back() {
        let mut registry = FontRegistry::default();
        let resolution = resolve(&mut registry, &[], BuiltinFamily::Helvetica);
        assert!(resolution.is_fallback());
        assert_eq!(resolution.font().family, "Helvetica");
    }

    #[test]
    fn second_candidate_wins_with_missing_slots_mapped_to_regular() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_face(dir.path(), "Second", FontStyle::Regular, b"FAKEFONT regular");
        write_face(dir.path(), "Second", FontStyle::Italic, b"FAKEFONT italic");

        let mut registry = FontRegistry::with_validator(accept_fake);
        let candidates = [
            FontCandidate::in_dir("First", dir.path()),
            FontCandidate::in_dir("Second", dir.path()),
        ];

        let resolution = resolve(&mut registry, &candidates, BuiltinFamily::Times);

        let Resolution::Registered { font, candidate } = resolution else {
            panic!("expected a registration");
        };
        assert_eq!(candidate, 1);
        assert_eq!(font.family, "Second");
        assert_eq!(font.face_name(FontStyle::Regular), "Second");
        assert_eq!(font.face_name(FontStyle::Bold), "Second");
        assert_eq!(font.face_name(FontStyle::Italic), "Second-Italic");
        assert_eq!(font.face_name(FontStyle::BoldItalic), "Second");
        assert!(font.is_registered(FontStyle::Italic));
        assert!(!font.is_registered(FontStyle::Bold));
        assert!(registry.contains_face("Second-Italic"));
        assert!(!registry.contains_face("Second-Bold"));
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_face(dir.path(), "Family", FontStyle::Regular, b"FAKEFONT");

        let mut registry = FontRegistry::with_validator(accept_fake);
        let candidates = [FontCandidate::in_dir("Family", dir.path())];

        let first = resolve(&mut registry, &candidates, BuiltinFamily::Times);
        let second = resolve(&mut registry, &candidates, BuiltinFamily::Times);

        assert_eq!(first.font(), second.font());
        assert!(matches!(second, Resolution::AlreadyRegistered { .. }));
        assert_eq!(registry.face_count(), 1);
    }

    #[test]
    fn fallback_is_idempotent_too() {
        let mut registry = FontRegistry::default();
        let candidates = [FontCandidate::in_dir("Nope", "/no/such/dir")];
        let first = resolve(&mut registry, &candidates, BuiltinFamily::Times);
        let second = resolve(&mut registry, &candidates, BuiltinFamily::Times);
        assert_eq!(first.font(), second.font());
    }

    #[test]
    fn broken_variant_disqualifies_candidate_without_partial_commit() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_face(dir.path(), "Broken", FontStyle::Regular, b"FAKEFONT");
        write_face(dir.path(), "Broken", FontStyle::Bold, b"garbage");
        write_face(dir.path(), "Good", FontStyle::Regular, b"FAKEFONT");

        let mut registry = FontRegistry::with_validator(accept_fake);
        let candidates = [
            FontCandidate::in_dir("Broken", dir.path()),
            FontCandidate::in_dir("Good", dir.path()),
        ];

        let resolution = resolve(&mut registry, &candidates, BuiltinFamily::Times);

        assert_eq!(resolution.font().family, "Good");
        assert!(!registry.contains_face("Broken"));
        assert!(!registry.contains_face("Broken-Bold"));
        assert!(!registry.is_registered("Broken"));
    }

    #[test]
    fn real_parser_rejects_garbage_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_face(dir.path(), "Garbage", FontStyle::Regular, b"not a font at all");

        let mut registry = FontRegistry::default();
        let candidates = [FontCandidate::in_dir("Garbage", dir.path())];
        let resolution = resolve(&mut registry, &candidates, BuiltinFamily::Courier);

        let Resolution::Fallback { font, failures } = resolution else {
            panic!("expected a fallback");
        };
        assert_eq!(font.family, "Courier");
        assert!(matches!(failures[0].reason, FailureReason::Invalid { .. }));
    }

    #[test]
    fn installs_builtin_faces_into_a_document() {
        let mut registry = FontRegistry::default();
        let font = resolve(&mut registry, &[], BuiltinFamily::Times).into_font();

        let mut document = Document::default();
        let set = registry.install(&mut document, &font).expect("can install");

        assert_eq!(document.fonts.len(), 4);
        assert_eq!(document.fonts[set.bold].name(), "Times-Bold");
        assert_eq!(document.fonts[set.get(FontStyle::Italic)].name(), "Times-Italic");
    }

    #[test]
    fn unknown_faces_fail_to_install() {
        let registry = FontRegistry::default();
        let dir = tempfile::tempdir().expect("tempdir");
        let mut other = FontRegistry::with_validator(accept_fake);
        write_face(dir.path(), "Elsewhere", FontStyle::Regular, b"FAKEFONT");
        let font = resolve(
            &mut other,
            &[FontCandidate::in_dir("Elsewhere", dir.path())],
            BuiltinFamily::Times,
        )
        .into_font();

        let mut document = Document::default();
        let result = registry.install(&mut document, &font);
        assert!(matches!(result, Err(PDFError::UnknownFace(_))));
    }

    #[test]
    fn env_dir_candidates_come_first() {
        let base = [FontCandidate::in_dir("DejaVuSerif", "fonts")];
        std::env::set_var(FONTS_DIR_ENV, "/opt/letterpress-fonts");
        let candidates = candidates_from_env(&base);
        std::env::remove_var(FONTS_DIR_ENV);

        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0].regular,
            PathBuf::from("/opt/letterpress-fonts/DejaVuSerif.ttf")
        );
        assert_eq!(candidates[1], base[0]);
    }

    #[test]
    fn candidates_in_dir_follow_naming_convention() {
        let candidate = FontCandidate::in_dir("DejaVuSerif", "fonts");
        assert_eq!(candidate.regular, PathBuf::from("fonts/DejaVuSerif.ttf"));
        assert_eq!(
            candidate.path(FontStyle::BoldItalic),
            Path::new("fonts/DejaVuSerif-BoldItalic.ttf")
        );
    }
}

//! Ready-made documents: letters, CVs and a portfolio case study. Each template is plain
//! configuration with sample content in its [Default] impl and a `build_to` that renders it.
//!
//! ```no_run
//! use letterpress::templates::{Letter, LetterKind};
//! use letterpress::FontRegistry;
//!
//! let mut registry = FontRegistry::default();
//! let letter = Letter::sample(LetterKind::ThankYou);
//! let font = letter.build_to(letter.kind.default_file_name(), &mut registry).unwrap();
//! println!("set in {}", font.family);
//! ```

mod case_study;
pub use case_study::*;

mod cv;
pub use cv::*;

mod letter;
pub use letter::*;

use crate::document::Document;
use crate::info::Info;
use crate::links::Link;
use crate::story::Story;
use crate::{academic_candidates, candidates_from_env, resolve};
use crate::{BuiltinFamily, FontRegistry, PDFError, ResolvedFont};
use log::info;
use std::path::Path;

/// How to reach the author, shown as links under their name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contacts {
    pub email: Option<String>,
    /// Profile url, with or without scheme
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

impl Contacts {
    pub fn sample() -> Contacts {
        Contacts {
            email: Some("john.doe@example.com".to_string()),
            linkedin: Some("linkedin.com/in/johndoe".to_string()),
            portfolio: Some("johndoe.dev".to_string()),
        }
    }

    /// LinkedIn and portfolio, labelled by name
    pub fn profile_links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        if let Some(linkedin) = &self.linkedin {
            links.push(Link::url("LinkedIn", linkedin));
        }
        if let Some(portfolio) = &self.portfolio {
            links.push(Link::url("Portfolio", portfolio));
        }
        links
    }

    /// Email followed by the labelled profile links
    pub fn labelled_links(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self.email.iter().map(|e| Link::email(e)).collect();
        links.extend(self.profile_links());
        links
    }

    /// Email and profiles shown as the addresses themselves
    pub fn bare_links(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self.email.iter().map(|e| Link::email(e)).collect();
        links.extend(self.linkedin.iter().map(|l| Link::bare(l)));
        links.extend(self.portfolio.iter().map(|p| Link::bare(p)));
        links
    }
}

/// Resolve the serif family the academic templates are set in
pub fn academic_font(registry: &mut FontRegistry) -> ResolvedFont {
    let candidates = candidates_from_env(&academic_candidates());
    resolve(registry, &candidates, BuiltinFamily::Times).into_font()
}

/// Lay `story` out in `font` and write the result to `path`
pub(crate) fn write_story<P: AsRef<Path>>(
    mut story: Story,
    info: Info,
    font: &ResolvedFont,
    registry: &FontRegistry,
    path: P,
) -> Result<(), PDFError> {
    let mut document = Document::default();
    document.set_info(info);
    let fonts = registry.install(&mut document, font)?;
    story.build(&mut document, &fonts)?;
    document.write_to_path(path.as_ref())?;
    info!("wrote {} in {}", path.as_ref().display(), font.family);
    // placeholder files go with the story, now that the document is on disk
    drop(story);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contacts_become_links() {
        let contacts = Contacts::sample();

        let labelled = contacts.labelled_links();
        let labels: Vec<&str> = labelled.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["john.doe@example.com", "LinkedIn", "Portfolio"]);
        assert_eq!(labelled[2].uri, "https://johndoe.dev");

        let bare = contacts.bare_links();
        assert_eq!(bare[1].label, "linkedin.com/in/johndoe");
        assert_eq!(bare[1].uri, "https://linkedin.com/in/johndoe");
    }

    #[test]
    fn missing_contacts_are_left_out() {
        let contacts = Contacts {
            portfolio: Some("https://example.com".to_string()),
            ..Contacts::default()
        };
        assert_eq!(contacts.labelled_links().len(), 1);
        assert_eq!(contacts.bare_links()[0].uri, "https://example.com");
    }
}

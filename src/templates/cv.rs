use super::{academic_font, write_story, Contacts};
use crate::canvas::Canvas;
use crate::colour::colours;
use crate::document::Document;
use crate::info::Info;
use crate::layout::Margins;
use crate::links::LINK_SEPARATOR;
use crate::pagesize;
use crate::rect::Rect;
use crate::story::{Links, Paragraph, Story};
use crate::style::StyleSheet;
use crate::text::Normalizer;
use crate::units::{mm, Pt};
use crate::{BuiltinFamily, FontRegistry, FontStyle, PDFError, ResolvedFont};
use log::info;
use std::path::Path;

pub const CV_FILE_NAME: &str = "CV_Resume.pdf";

/// One position held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub company: String,
    pub role: String,
    pub dates: String,
    pub location: String,
    pub bullets: Vec<String>,
}

impl Job {
    /// `company — role`
    pub fn header(&self) -> String {
        format!("{} \u{2014} {}", self.company, self.role)
    }

    /// `dates | location`
    pub fn meta(&self) -> String {
        format!("{} | {}", self.dates, self.location)
    }
}

/// Everything that goes on a CV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvData {
    pub name: String,
    pub title: String,
    pub contacts: Contacts,
    pub summary: String,
    pub impact: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<Job>,
    pub education: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CvData {
    fn default() -> Self {
        CvData {
            name: "John Doe".to_string(),
            title: "Senior Product Designer".to_string(),
            contacts: Contacts::sample(),
            summary: "Product designer with 8+ years of experience designing complex software \
                      products. Focus on data-driven platforms, conversion flows, and scalable \
                      design systems. Experience with fintech, AI-driven tools, and B2B interfaces."
                .to_string(),
            impact: strings(&[
                "Improved task efficiency in AI-assisted flows by ~25-30%",
                "Increased onboarding activation by ~30% through user research and A/B testing",
                "Reduced design-to-dev inconsistencies by ~20% via unified design systems",
            ]),
            skills: strings(&[
                "Product Design & UX Strategy",
                "Design Systems & Component Libraries",
                "User Research & Usability Testing",
                "Prototyping & Interaction Design",
                "Figma, Sketch, Principle",
            ]),
            experience: vec![
                Job {
                    company: "Example Company".to_string(),
                    role: "Senior Product Designer".to_string(),
                    dates: "2022 - Present".to_string(),
                    location: "Remote".to_string(),
                    bullets: strings(&[
                        "Designed AI-powered internal service integrated into product workflows",
                        "Built scalable design system used across multiple tools and teams",
                        "Improved user efficiency by ~25% through workflow optimization",
                    ]),
                },
                Job {
                    company: "Another Company".to_string(),
                    role: "Product Designer".to_string(),
                    dates: "2020 - 2022".to_string(),
                    location: "New York".to_string(),
                    bullets: strings(&[
                        "Redesigned trading experiences and onboarding flows",
                        "Improved activation by ~30% through iterative UX research",
                        "Collaborated with growth teams on A/B testing and conversion optimization",
                    ]),
                },
            ],
            education: strings(&["Bachelor's Degree in Design, Example University (2015-2019)"]),
        }
    }
}

impl CvData {
    fn info(&self) -> Info {
        let mut info = Info::new();
        info.title(format!("{} CV", self.name))
            .author(&self.name)
            .subject(&self.title)
            .keywords(["CV", "resume", self.title.as_str()]);
        info
    }
}

/// Separator between contacts on the compact CV
pub const CONTACT_SEPARATOR: &str = "  \u{2022}  ";
const CONTACT_SIZE: Pt = Pt(9.0);
const CONTACT_LINE_HEIGHT: Pt = Pt(11.0);
const BODY_SIZE: Pt = Pt(10.0);
const BODY_LEADING: Pt = Pt(13.0);

/// Bulleted, sans-serif CV drawn directly on a [Canvas], in Helvetica
pub fn draw_cv(canvas: &mut Canvas, cv: &CvData) -> Result<(), PDFError> {
    let normalizer = Normalizer::default();
    let nz = |s: &str| normalizer.normalize(s);
    let x = canvas.left();
    let w = canvas.content_width();
    let mut y = canvas.top();

    canvas.set_font(FontStyle::Bold, Pt(20.0));
    canvas.draw_string(x, y, &nz(&cv.name))?;
    y -= mm(8.0);
    canvas.set_font(FontStyle::Regular, Pt(11.0));
    canvas.draw_string(x, y, &nz(&cv.title))?;
    y -= mm(5.0);

    y = draw_contacts(canvas, cv, x, y, w)?;
    y -= CONTACT_LINE_HEIGHT + mm(2.0);
    canvas.line((x, y), (x + w, y), Pt(0.6));
    y -= mm(4.0) + mm(1.4);

    let section = |canvas: &mut Canvas, y: Pt, needed: Pt, title: &str| -> Result<Pt, PDFError> {
        let y = canvas.ensure_space(y, needed);
        canvas.set_font(FontStyle::Bold, Pt(11.0));
        canvas.draw_string(x, y, &title.to_uppercase())?;
        canvas.set_font(FontStyle::Regular, BODY_SIZE);
        Ok(y - mm(6.0))
    };
    let bullets = |canvas: &mut Canvas,
                   mut y: Pt,
                   items: &[String],
                   indent: Pt|
     -> Result<Pt, PDFError> {
        for item in items {
            let text = format!("\u{2022} {}", nz(item));
            y = canvas.draw_wrapped_text(&text, x + indent, y, w - indent, BODY_LEADING)?;
        }
        Ok(y)
    };

    y = section(canvas, y, mm(40.0), "Summary")?;
    y = canvas.draw_wrapped_text(&nz(&cv.summary), x, y, w, BODY_LEADING)?;
    y -= mm(2.0);

    y = section(canvas, y, mm(30.0), "AI & Product Impact")?;
    y = bullets(canvas, y, &cv.impact, Pt(0.0))?;
    y -= mm(2.0);

    y = section(canvas, y, mm(30.0), "Core Skills")?;
    y = bullets(canvas, y, &cv.skills, Pt(0.0))?;
    y -= mm(2.0);

    y = section(canvas, y, mm(50.0), "Experience")?;
    for job in cv.experience.iter() {
        y = canvas.ensure_space(y, mm(35.0));
        canvas.set_font(FontStyle::Bold, Pt(11.0));
        canvas.draw_string(x, y, &nz(&job.header()))?;
        y -= mm(5.0);
        canvas.set_font(FontStyle::Regular, CONTACT_SIZE);
        canvas.draw_string(x, y, &nz(&job.meta()))?;
        y -= mm(4.0);
        canvas.set_font(FontStyle::Regular, BODY_SIZE);
        y = bullets(canvas, y, &job.bullets, mm(4.0))?;
        y -= mm(2.0);
    }

    y = section(canvas, y, mm(25.0), "Education")?;
    bullets(canvas, y, &cv.education, Pt(0.0))?;
    Ok(())
}

/// Contacts in blue, each a link, wrapping onto further lines. Returns the baseline of the
/// last line.
fn draw_contacts(canvas: &mut Canvas, cv: &CvData, x: Pt, y: Pt, w: Pt) -> Result<Pt, PDFError> {
    let separator_width =
        canvas.string_width(CONTACT_SEPARATOR, FontStyle::Regular, CONTACT_SIZE)?;
    canvas.set_font(FontStyle::Regular, CONTACT_SIZE);

    let (mut cx, mut cy) = (x, y);
    for (i, link) in cv.contacts.bare_links().into_iter().enumerate() {
        if i > 0 {
            if cx + separator_width > x + w {
                cx = x;
                cy -= CONTACT_LINE_HEIGHT;
            }
            canvas.set_fill_colour(colours::BLACK);
            canvas.draw_string(cx, cy, CONTACT_SEPARATOR)?;
            cx += separator_width;
        }

        let width = canvas.string_width(&link.label, FontStyle::Regular, CONTACT_SIZE)?;
        if cx + width > x + w {
            cx = x;
            cy -= CONTACT_LINE_HEIGHT;
        }
        canvas.set_fill_colour(colours::BLUE);
        canvas.draw_string(cx, cy, &link.label)?;
        canvas.link_url(
            &link.uri,
            Rect {
                x1: cx,
                y1: cy - CONTACT_SIZE * 0.7,
                x2: cx + width,
                y2: cy + CONTACT_SIZE * 0.3,
            },
        );
        cx += width;
    }
    canvas.set_fill_colour(colours::BLACK);
    Ok(cy)
}

/// Draw the compact CV to `path` in the built-in Helvetica family
pub fn build_cv_to<P: AsRef<Path>>(cv: &CvData, path: P) -> Result<ResolvedFont, PDFError> {
    let font = ResolvedFont::builtin(BuiltinFamily::Helvetica);
    let mut document = Document::default();
    document.set_info(cv.info());
    let fonts = FontRegistry::default().install(&mut document, &font)?;

    let mut canvas = Canvas::new(&mut document, fonts, pagesize::A4, Margins::compact());
    draw_cv(&mut canvas, cv)?;
    canvas.finish();

    document.write_to_path(path.as_ref())?;
    info!("wrote {} in {}", path.as_ref().display(), font.family);
    Ok(font)
}

/// Flowing, serif CV in the academic style: no bullets, skills on one line
pub fn academic_cv_story(cv: &CvData, styles: &StyleSheet) -> Story {
    let mut story = Story::new(pagesize::A4, Margins::academic());

    story.push(Paragraph::new(&cv.name, styles.title.clone()));
    story.push(Paragraph::new(&cv.title, styles.subsection.clone()));
    story.spacer(mm(2.0));
    let contacts = cv.contacts.labelled_links();
    if !contacts.is_empty() {
        story.push(Links::new(contacts, styles.meta.clone()));
        story.spacer(mm(6.0));
    }

    let section = |story: &mut Story, title: &str| {
        story.push(Paragraph::new(title, styles.section.clone()));
    };
    let lines = |story: &mut Story, items: &[String]| {
        for item in items {
            story.push(Paragraph::new(item, styles.body_left.clone()));
        }
    };

    section(&mut story, "SUMMARY");
    story.push(Paragraph::new(&cv.summary, styles.body.clone()));

    section(&mut story, "AI & PRODUCT IMPACT");
    lines(&mut story, &cv.impact);

    section(&mut story, "CORE SKILLS");
    story.push(Paragraph::new(
        cv.skills.join(LINK_SEPARATOR),
        styles.body_left.clone(),
    ));

    section(&mut story, "EXPERIENCE");
    for job in cv.experience.iter() {
        story.push(Paragraph::new(job.header(), styles.subsection.clone()));
        story.push(Paragraph::new(job.meta(), styles.meta_text.clone()));
        lines(&mut story, &job.bullets);
        story.spacer(mm(2.0));
    }

    section(&mut story, "EDUCATION");
    lines(&mut story, &cv.education);
    story
}

/// Render the academic CV to `path`, resolving its font through `registry`
pub fn build_academic_cv_to<P: AsRef<Path>>(
    cv: &CvData,
    path: P,
    registry: &mut FontRegistry,
) -> Result<ResolvedFont, PDFError> {
    let font = academic_font(registry);
    let story = academic_cv_story(cv, &StyleSheet::academic());
    write_story(story, cv.info(), &font, registry, path)?;
    Ok(font)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::PageContents;
    use crate::story::Flowable;

    #[test]
    fn job_lines() {
        let job = &CvData::default().experience[0];
        assert_eq!(job.header(), "Example Company \u{2014} Senior Product Designer");
        assert_eq!(job.meta(), "2022 - Present | Remote");
    }

    #[test]
    fn compact_cv_links_every_contact() {
        let mut document = Document::default();
        let fonts = FontRegistry::default()
            .install(&mut document, &ResolvedFont::builtin(BuiltinFamily::Helvetica))
            .expect("can install");
        let mut canvas = Canvas::new(&mut document, fonts, pagesize::A4, Margins::compact());
        draw_cv(&mut canvas, &CvData::default()).expect("can draw");
        let pages = canvas.finish();

        assert_eq!(pages.len(), 1);
        let page = &document.pages[pages[0]];
        let uris: Vec<&str> = page.links.iter().map(|l| l.uri.as_str()).collect();
        assert_eq!(
            uris,
            vec![
                "mailto:john.doe@example.com",
                "https://linkedin.com/in/johndoe",
                "https://johndoe.dev"
            ]
        );

        let texts: Vec<&str> = page
            .contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans[0].text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"SUMMARY"));
        assert!(texts.contains(&"\u{2022} Figma, Sketch, Principle"));
        assert_eq!(
            page.contents
                .iter()
                .filter(|c| matches!(c, PageContents::Line(_)))
                .count(),
            1
        );
    }

    #[test]
    fn academic_cv_has_every_section() {
        let story = academic_cv_story(&CvData::default(), &StyleSheet::academic());
        let headings: Vec<&str> = story
            .flowables()
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph(p) if p.style == StyleSheet::academic().section => {
                    Some(p.text.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec!["SUMMARY", "AI & PRODUCT IMPACT", "CORE SKILLS", "EXPERIENCE", "EDUCATION"]
        );
    }

    #[test]
    fn academic_cv_skips_empty_contacts() {
        let cv = CvData {
            contacts: Contacts::default(),
            ..CvData::default()
        };
        let story = academic_cv_story(&cv, &StyleSheet::academic());
        assert!(!story
            .flowables()
            .iter()
            .any(|f| matches!(f, Flowable::Links(_))));
    }
}

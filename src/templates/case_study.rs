use super::{academic_font, write_story, Contacts};
use crate::figure::Figure;
use crate::info::Info;
use crate::layout::Margins;
use crate::pagesize;
use crate::story::{Links, Paragraph, Story};
use crate::style::StyleSheet;
use crate::units::mm;
use crate::{FontRegistry, PDFError, ResolvedFont};
use std::path::{Path, PathBuf};

pub const CASE_STUDY_FILE_NAME: &str = "Portfolio_Case_Study.pdf";

/// An image to show in the case study, by path, or [None] for a placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFigure {
    pub path: Option<PathBuf>,
    pub caption: String,
}

impl CaseFigure {
    pub fn placeholder<S: ToString>(caption: S) -> CaseFigure {
        CaseFigure {
            path: None,
            caption: caption.to_string(),
        }
    }
}

/// A product design case study laid out like a short paper: abstract, numbered sections and
/// a figure after each of the first three sections
#[derive(Debug, Clone, PartialEq)]
pub struct CaseStudy {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub company: String,
    pub timeline: String,
    pub role: String,
    pub contacts: Contacts,
    pub abstract_text: String,
    pub introduction: String,
    pub methods: String,
    pub results: String,
    pub discussion: String,
    pub figures: Vec<CaseFigure>,
}

impl Default for CaseStudy {
    fn default() -> Self {
        CaseStudy {
            title: "AI-Powered Trading Assistant: Improving User Efficiency by 40%".to_string(),
            subtitle: "Product Design Case Study".to_string(),
            author: "John Doe".to_string(),
            company: "Example Company".to_string(),
            timeline: "March 2023 \u{2013} December 2024".to_string(),
            role: "Senior Product Designer".to_string(),
            contacts: Contacts {
                email: None,
                ..Contacts::sample()
            },
            abstract_text: "This case study presents the design process and outcomes of an \
                AI-powered trading assistant feature that improved user trading efficiency by \
                40% and reduced support requests by 35%. The project involved end-to-end \
                product design, from user research and problem definition to iterative \
                prototyping and data-driven validation."
                .to_string(),
            introduction: "Trading platforms face a common challenge: users struggle to make \
                informed decisions quickly, leading to missed opportunities and increased \
                support workload. This case study documents the design and implementation of \
                an AI-powered trading assistant that addresses these pain points through \
                intelligent automation and contextual guidance."
                .to_string(),
            methods: "The design process followed a structured approach combining quantitative \
                analysis, qualitative research, and iterative prototyping. User interviews with \
                15 active traders revealed key pain points: decision paralysis, lack of \
                contextual information, and time-consuming manual research. Competitive \
                analysis of 8 leading trading platforms informed the initial feature set.\n\n\
                Prototyping was conducted in three phases: low-fidelity wireframes for concept \
                validation, high-fidelity interactive prototypes for usability testing, and a \
                limited beta release for real-world validation. A/B testing was used to compare \
                different interaction patterns and information architectures."
                .to_string(),
            results: "The final design resulted in measurable improvements across key \
                metrics:\n\n\
                \u{2022} Trading efficiency increased by 40% (measured by time-to-decision)\n\n\
                \u{2022} Support ticket volume decreased by 35%\n\n\
                \u{2022} User activation rate improved by 22% in the first month\n\n\
                \u{2022} 78% of beta users reported increased confidence in trading decisions\n\n\
                Qualitative feedback highlighted the value of contextual AI suggestions and the \
                streamlined interface that reduced cognitive load during decision-making."
                .to_string(),
            discussion: "The success of this feature demonstrates the importance of combining \
                AI capabilities with thoughtful UX design. Key learnings include the need for \
                transparent AI decision-making, the value of progressive disclosure for complex \
                information, and the critical role of user trust in AI-assisted features.\n\n\
                Future iterations will focus on personalization, expanding the AI's contextual \
                understanding, and exploring voice-based interactions for mobile users."
                .to_string(),
            figures: vec![
                CaseFigure::placeholder(
                    "Figure 1. Initial user flow diagram showing the AI assistant integration \
                     points.",
                ),
                CaseFigure::placeholder(
                    "Figure 2. High-fidelity prototype of the trading assistant interface with \
                     contextual suggestions.",
                ),
                CaseFigure::placeholder(
                    "Figure 3. A/B test results comparing different interaction patterns \
                     (n=1,247 users).",
                ),
            ],
        }
    }
}

impl CaseStudy {
    pub fn story(&self, styles: &StyleSheet) -> Story {
        let mut story = Story::new(pagesize::A4, Margins::academic());

        story.push(Paragraph::new(&self.title, styles.title.clone()));
        story.spacer(mm(2.0));
        story.push(Paragraph::new(&self.subtitle, styles.subsection.clone()));
        story.spacer(mm(4.0));

        let meta = &styles.meta;
        story.push(Paragraph::new(&self.author, meta.clone()));
        story.push(Paragraph::new(
            format!("{} \u{2022} {} \u{2022} {}", self.company, self.timeline, self.role),
            meta.clone(),
        ));
        story.push(Links::new(self.contacts.labelled_links(), meta.clone()));
        story.spacer(mm(8.0));

        let sections = [
            ("Abstract", &self.abstract_text, mm(6.0)),
            ("1. Introduction", &self.introduction, mm(4.0)),
            ("2. Methods", &self.methods, mm(4.0)),
            ("3. Results", &self.results, mm(4.0)),
            ("4. Discussion", &self.discussion, mm(0.0)),
        ];
        for (i, (heading, text, after)) in sections.into_iter().enumerate() {
            story.push(Paragraph::new(heading, styles.section.clone()));
            story.extend(Paragraph::blocks(text, &styles.body));
            story.spacer(after);
            // figures follow the introduction, methods and results
            let figure = match i {
                1..=3 => self.figures.get(i - 1),
                _ => None,
            };
            if let Some(figure) = figure {
                story.push(
                    Figure::new(figure.path.clone(), &figure.caption)
                        .with_caption_style(styles.caption.clone()),
                );
            }
        }
        story
    }

    /// Render the case study to `path`, resolving its font through `registry`. Placeholder
    /// images are removed once the file is written, whether or not that succeeded.
    pub fn build_to<P: AsRef<Path>>(
        &self,
        path: P,
        registry: &mut FontRegistry,
    ) -> Result<ResolvedFont, PDFError> {
        let font = academic_font(registry);
        let mut info = Info::new();
        info.title(&self.title)
            .author(&self.author)
            .subject(&self.subtitle)
            .keywords(["case study", self.role.as_str(), self.company.as_str()]);
        write_story(
            self.story(&StyleSheet::academic()),
            info,
            &font,
            registry,
            path,
        )?;
        Ok(font)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::story::Flowable;

    fn headings_and_figures(story: &Story) -> Vec<String> {
        let section = StyleSheet::academic().section;
        story
            .flowables()
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph(p) if p.style == section => Some(p.text.clone()),
                Flowable::Figure(f) => Some(f.caption[..9].to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn figures_follow_the_first_three_sections() {
        let story = CaseStudy::default().story(&StyleSheet::academic());
        assert_eq!(
            headings_and_figures(&story),
            vec![
                "Abstract",
                "1. Introduction",
                "Figure 1.",
                "2. Methods",
                "Figure 2.",
                "3. Results",
                "Figure 3.",
                "4. Discussion"
            ]
        );
    }

    #[test]
    fn fewer_figures_leave_sections_without_one() {
        let study = CaseStudy {
            figures: vec![CaseFigure::placeholder("Figure 1. Only one.")],
            ..CaseStudy::default()
        };
        let story = study.story(&StyleSheet::academic());
        let figures = story
            .flowables()
            .iter()
            .filter(|f| matches!(f, Flowable::Figure(_)))
            .count();
        assert_eq!(figures, 1);
    }

    #[test]
    fn results_bullets_are_separate_paragraphs() {
        let study = CaseStudy::default();
        let story = study.story(&StyleSheet::academic());
        let bullets = story
            .flowables()
            .iter()
            .filter(|f| matches!(f, Flowable::Paragraph(p) if p.text.starts_with('\u{2022}')))
            .count();
        assert_eq!(bullets, 4);
    }
}

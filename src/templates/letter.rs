use super::{academic_font, write_story, Contacts};
use crate::info::Info;
use crate::layout::{Alignment, Margins};
use crate::links::Link;
use crate::pagesize;
use crate::story::{Flowable, Links, Paragraph, Story};
use crate::style::StyleSheet;
use crate::text::{Normalizer, ReplacementTable};
use crate::units::{mm, Pt};
use crate::{FontRegistry, PDFError, ResolvedFont};
use std::path::Path;

/// The kinds of letter there are templates for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LetterKind {
    AcademicStyle,
    ApplicationWithdrawal,
    CareerBreak,
    CounterOfferResponse,
    CoverLetter,
    FollowUp,
    InformationalInterview,
    LinkedInConnection,
    NetworkingEmail,
    PortfolioProject,
    RecommendationRequest,
    RecruiterEmail,
    ReferenceCheck,
    RejectionResponse,
    Resignation,
    SalaryNegotiation,
    ThankYou,
}

impl LetterKind {
    pub const ALL: [LetterKind; 17] = [
        LetterKind::AcademicStyle,
        LetterKind::ApplicationWithdrawal,
        LetterKind::CareerBreak,
        LetterKind::CounterOfferResponse,
        LetterKind::CoverLetter,
        LetterKind::FollowUp,
        LetterKind::InformationalInterview,
        LetterKind::LinkedInConnection,
        LetterKind::NetworkingEmail,
        LetterKind::PortfolioProject,
        LetterKind::RecommendationRequest,
        LetterKind::RecruiterEmail,
        LetterKind::ReferenceCheck,
        LetterKind::RejectionResponse,
        LetterKind::Resignation,
        LetterKind::SalaryNegotiation,
        LetterKind::ThankYou,
    ];

    pub fn default_file_name(self) -> &'static str {
        match self {
            LetterKind::AcademicStyle => "Academic_Style_Document.pdf",
            LetterKind::ApplicationWithdrawal => "Application_Withdrawal.pdf",
            LetterKind::CareerBreak => "Career_Break_Explanation.pdf",
            LetterKind::CounterOfferResponse => "Counter_Offer_Response.pdf",
            LetterKind::CoverLetter => "Cover_Letter.pdf",
            LetterKind::FollowUp => "Follow_Up_Letter.pdf",
            LetterKind::InformationalInterview => "Informational_Interview_Request.pdf",
            LetterKind::LinkedInConnection => "LinkedIn_Connection_Request.pdf",
            LetterKind::NetworkingEmail => "Networking_Email.pdf",
            LetterKind::PortfolioProject => "Portfolio_Project_Description.pdf",
            LetterKind::RecommendationRequest => "Recommendation_Request.pdf",
            LetterKind::RecruiterEmail => "Recruiter_Email.pdf",
            LetterKind::ReferenceCheck => "Reference_Check_Preparation.pdf",
            LetterKind::RejectionResponse => "Rejection_Response.pdf",
            LetterKind::Resignation => "Resignation_Letter.pdf",
            LetterKind::SalaryNegotiation => "Salary_Negotiation_Letter.pdf",
            LetterKind::ThankYou => "Thank_You_Letter.pdf",
        }
    }

    /// Document title written to the PDF metadata
    pub fn title(self) -> &'static str {
        match self {
            LetterKind::AcademicStyle => "Academic Style Document",
            LetterKind::ApplicationWithdrawal => "Application Withdrawal",
            LetterKind::CareerBreak => "Career Break Explanation",
            LetterKind::CounterOfferResponse => "Counter Offer Response",
            LetterKind::CoverLetter => "Cover Letter",
            LetterKind::FollowUp => "Follow Up Letter",
            LetterKind::InformationalInterview => "Informational Interview Request",
            LetterKind::LinkedInConnection => "LinkedIn Connection Request",
            LetterKind::NetworkingEmail => "Networking Email",
            LetterKind::PortfolioProject => "Portfolio Project Description",
            LetterKind::RecommendationRequest => "Recommendation Request",
            LetterKind::RecruiterEmail => "Recruiter Email",
            LetterKind::ReferenceCheck => "Reference Check Preparation",
            LetterKind::RejectionResponse => "Rejection Response",
            LetterKind::Resignation => "Resignation Letter",
            LetterKind::SalaryNegotiation => "Salary Negotiation Letter",
            LetterKind::ThankYou => "Thank You Letter",
        }
    }

    /// How dashes and the minus sign are written in this kind of letter. The letters don't
    /// agree with each other, so each kind keeps its own.
    pub fn replacement_table(self) -> ReplacementTable {
        match self {
            LetterKind::AcademicStyle
            | LetterKind::CoverLetter
            | LetterKind::LinkedInConnection
            | LetterKind::PortfolioProject
            | LetterKind::RecruiterEmail
            | LetterKind::SalaryNegotiation
            | LetterKind::ThankYou => ReplacementTable::typographic(),
            LetterKind::RecommendationRequest => ReplacementTable::ascii(),
            LetterKind::ApplicationWithdrawal
            | LetterKind::CareerBreak
            | LetterKind::CounterOfferResponse
            | LetterKind::FollowUp
            | LetterKind::InformationalInterview
            | LetterKind::NetworkingEmail
            | LetterKind::ReferenceCheck
            | LetterKind::RejectionResponse
            | LetterKind::Resignation => ReplacementTable::ascii_minus(),
        }
    }

    /// Clickable lines that follow a paragraph of the sample body
    pub fn sample_body_links(self) -> Vec<BodyLink> {
        let portfolio = |after| BodyLink {
            after,
            lead: "Portfolio & case studies: ".to_string(),
            link: Link::bare("https://example.com"),
        };
        match self {
            LetterKind::CoverLetter => vec![portfolio(4)],
            LetterKind::RecruiterEmail => vec![portfolio(2)],
            _ => Vec::new(),
        }
    }

    /// Sample body text filled in from `details`. Paragraphs are separated by blank lines.
    pub fn sample_body(self, details: &LetterDetails) -> String {
        let LetterDetails {
            name,
            recipient,
            company,
            position,
        } = details;
        let paragraphs: Vec<String> = match self {
            LetterKind::AcademicStyle => vec![
                "This document follows a formal academic layout: a serif face, justified \
                 paragraphs and restrained metadata under the author's name."
                    .into(),
                "Replace this text with your own content. Paragraphs are separated by blank \
                 lines and flow onto further pages as needed."
                    .into(),
            ],
            LetterKind::ApplicationWithdrawal => vec![
                format!("Hi {recipient},"),
                format!(
                    "I hope this email finds you well. I'm writing to withdraw my application \
                     for the {position} position at {company}."
                ),
                format!(
                    "I want to thank you and the team at {company} for your time and \
                     consideration throughout this process, and I wish you the best in finding \
                     the right candidate for this role."
                ),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::CareerBreak => vec![
                "I wanted to address the gap in my employment history from January 2023 to \
                 January 2024."
                    .into(),
                "I took this time for professional development: structured courses, personal \
                 projects and deliberate practice in the areas I want to grow in."
                    .into(),
                format!(
                    "I'm now ready to return to full-time work and excited to bring fresh \
                     perspectives and renewed energy to the {position} role."
                ),
                "Thank you for your understanding and consideration.".into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::CounterOfferResponse => vec![
                format!("Dear {recipient},"),
                format!(
                    "Thank you for the counter offer and for the trust it shows. I have \
                     valued my time at {company} and the support I've had from you and the team."
                ),
                "After careful consideration, I have decided to proceed with my resignation. \
                 I'm committed to a smooth handover during my notice period."
                    .into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::CoverLetter => vec![
                "Hi,".into(),
                "I'm reaching out because I'm currently open to new opportunities after a \
                 recent company-wide layoff."
                    .into(),
                "For the past 8+ years, I've been working as a product designer in fintech and \
                 AI-driven products, focusing on areas where design decisions have a direct \
                 impact on metrics \u{2014} activation, retention, efficiency, and revenue. I \
                 usually work end to end: from research and UX strategy to hands-on execution \
                 and close collaboration with engineering and product."
                    .into(),
                "In my recent roles, I've designed AI-assisted flows, trading tools, onboarding \
                 experiences, and scalable design systems. The work resulted in outcomes like \
                 improved efficiency, higher conversion during onboarding, reduced support load, \
                 and stronger early retention. I care less about \u{201c}polished screens\u{201d} \
                 and more about making complex systems feel clear, predictable, and useful in \
                 real product contexts."
                    .into(),
                "Alongside my professional work, I actively build and maintain my personal \
                 project, where I explore AI-assisted UX, product thinking, and practical \
                 execution."
                    .into(),
                "I'm looking for a team where design is treated as part of product \
                 decision-making \u{2014} not just delivery \u{2014} and where clarity, ownership, \
                 and outcomes matter. If that sounds aligned, I'd be glad to talk."
                    .into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::FollowUp => vec![
                format!("Hi {recipient},"),
                format!(
                    "I'm following up on my application for the {position} role at {company}, \
                     submitted two weeks ago. I remain very interested in the position."
                ),
                "If there is anything else I can share to help with your decision, please let \
                 me know."
                    .into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::InformationalInterview => vec![
                format!("Hi {recipient},"),
                format!(
                    "I came across your profile and I'm impressed by your work at {company}. \
                     Would you be open to a brief informational chat (15\u{2013}20 minutes) over \
                     coffee or a video call?"
                ),
                "I completely understand if you're busy, and I'd be happy to work around your \
                 schedule."
                    .into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::LinkedInConnection => vec![
                format!("Hi {recipient},"),
                format!(
                    "Thank you again for the conversation about the {position} role at \
                     {company}. I'd love to stay connected here."
                ),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::NetworkingEmail => vec![
                format!("Hi {recipient},"),
                format!(
                    "I've been following your work at {company} and would value your advice \
                     on growing as a {position}. Could we find 20 minutes for a call?"
                ),
                "Thank you for considering it.".into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::PortfolioProject => vec![
                format!("Project: Product Design at {company}, Q1 2024, team of 3."),
                "Problem: describe the user and business problem the project addressed."
                    .into(),
                "Approach: research, exploration and the key decisions that shaped the result."
                    .into(),
                "Outcome: the measurable results and what you learned.".into(),
            ],
            LetterKind::RecommendationRequest => vec![
                format!("Dear {recipient},"),
                format!(
                    "I'm applying for {position} roles and would be grateful if you could \
                     write a short recommendation based on our work together at {company}."
                ),
                "I'm happy to send a summary of the projects we worked on to make it easier."
                    .into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::RecruiterEmail => vec![
                format!("Hi {recipient},"),
                format!(
                    "I hope this email finds you well. I'm reaching out because I'm interested \
                     in exploring opportunities at {company}."
                ),
                "I've attached my CV for your review. Would you be available for a brief call \
                 or coffee chat?"
                    .into(),
                "Thank you for your time and consideration.".into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::ReferenceCheck => vec![
                format!("Hi {recipient},"),
                format!(
                    "I've listed you as a reference for a {position} role, and you may be \
                     contacted soon. Here is a short reminder of our work together at {company}."
                ),
                "Thank you again for your support.".into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::RejectionResponse => vec![
                format!("Dear {recipient},"),
                format!(
                    "Thank you so much for extending the offer for the {position} role at \
                     {company}. After careful consideration, I've decided to decline the offer."
                ),
                format!(
                    "I have a great deal of respect for {company} and would love to stay in \
                     touch for potential future opportunities."
                ),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::Resignation => vec![
                format!("Dear {recipient},"),
                format!(
                    "Please accept this letter as formal notification that I am resigning from \
                     my position as {position} at {company}. My last day of work will be \
                     February 15, 2026, which provides 2 weeks notice as required."
                ),
                "I'm committed to ensuring a smooth transition, and happy to help train my \
                 replacement and document my current projects."
                    .into(),
                format!("Thank you again for everything. I wish {company} continued success."),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::SalaryNegotiation => vec![
                format!("Dear {recipient},"),
                format!(
                    "Thank you for extending the offer for the {position} role at {company}. \
                     I'm very excited about this opportunity."
                ),
                format!(
                    "Based on market rates for similar roles and my experience, I believe a \
                     salary of $115,000 would better reflect the value I can bring to {company}."
                ),
                "Would you be available for a call this week to discuss?".into(),
                "Best regards,".into(),
                name.clone(),
            ],
            LetterKind::ThankYou => vec![
                format!("Dear {recipient},"),
                format!(
                    "Thank you for taking the time to meet with me to discuss the {position} \
                     role at {company}. I really enjoyed our conversation and learning more \
                     about the team and the product vision."
                ),
                "Thank you again for your time and consideration. I look forward to hearing \
                 from you about the next steps."
                    .into(),
                "Best regards,".into(),
                name.clone(),
            ],
        };
        paragraphs.join("\n\n")
    }
}

/// The names sample letter bodies are filled in with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDetails {
    pub name: String,
    pub recipient: String,
    pub company: String,
    pub position: String,
}

impl Default for LetterDetails {
    fn default() -> Self {
        LetterDetails {
            name: "John Doe".to_string(),
            recipient: "Name Last Name".to_string(),
            company: "Example Company".to_string(),
            position: "Senior Product Designer".to_string(),
        }
    }
}

/// A link on a line of its own inside a letter body, after the paragraph numbered `after`
/// (counting from zero)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLink {
    pub after: usize,
    pub lead: String,
    pub link: Link,
}

/// A one-off letter: the author's name as a title, their links, an optional date line and
/// a justified body
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    pub kind: LetterKind,
    pub name: String,
    pub links: Vec<Link>,
    pub date: Option<String>,
    /// Paragraphs separated by blank lines
    pub body: String,
    pub body_links: Vec<BodyLink>,
    /// Applied to all text of the letter
    pub normalizer: Normalizer,
}

impl Default for Letter {
    fn default() -> Self {
        Letter::sample(LetterKind::CoverLetter)
    }
}

impl Letter {
    /// A `kind` letter filled with sample content
    pub fn sample(kind: LetterKind) -> Letter {
        let details = LetterDetails::default();
        Letter {
            kind,
            name: details.name.clone(),
            links: Contacts::sample().profile_links(),
            date: None,
            body: kind.sample_body(&details),
            body_links: kind.sample_body_links(),
            normalizer: Normalizer::new(kind.replacement_table()),
        }
    }

    /// Show today's date, e.g. `March 04, 2026`, above the body
    pub fn dated_today(mut self) -> Letter {
        self.date = Some(chrono::Local::now().format("%B %d, %Y").to_string());
        self
    }

    pub fn story(&self, styles: &StyleSheet) -> Story {
        let mut story =
            Story::new(pagesize::A4, Margins::academic()).with_normalizer(self.normalizer.clone());

        story.push(Paragraph::new(&self.name, styles.title.clone()));
        let header_gap = match self.kind {
            LetterKind::PortfolioProject => mm(2.0),
            _ => mm(3.0),
        };
        story.spacer(header_gap);
        story.push(Links::new(self.links.clone(), styles.meta.clone()));
        story.spacer(mm(8.0));
        if let Some(date) = &self.date {
            story.push(Paragraph::new(date, styles.date.clone()));
        }
        let link_style = styles
            .body
            .clone()
            .with_alignment(Alignment::Left)
            .with_space_before(Pt(0.0));
        for (i, block) in Paragraph::blocks(&self.body, &styles.body)
            .into_iter()
            .enumerate()
        {
            let mut links = self.body_links.iter().filter(|l| l.after == i).peekable();
            match (block, links.peek().is_some()) {
                // the link line takes over the spacing below the paragraph
                (Flowable::Paragraph(mut paragraph), true) => {
                    paragraph.style.space_after = Pt(0.0);
                    story.push(paragraph);
                }
                (block, _) => story.push(block),
            }
            for body_link in links {
                story.push(
                    Links::new(vec![body_link.link.clone()], link_style.clone())
                        .with_lead(&body_link.lead),
                );
            }
        }
        story
    }

    /// Render the letter to `path`, resolving its font through `registry`. Returns the font
    /// the letter was set in.
    pub fn build_to<P: AsRef<Path>>(
        &self,
        path: P,
        registry: &mut FontRegistry,
    ) -> Result<ResolvedFont, PDFError> {
        let font = academic_font(registry);
        let mut info = Info::new();
        info.title(self.kind.title())
            .author(&self.name)
            .keywords(["letter", self.kind.title()]);
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

    #[test]
    fn every_kind_has_a_pdf_file_name() {
        for kind in LetterKind::ALL {
            assert!(kind.default_file_name().ends_with(".pdf"));
        }
        assert_eq!(LetterKind::CoverLetter.default_file_name(), "Cover_Letter.pdf");
    }

    #[test]
    fn sample_bodies_are_filled_in() {
        let details = LetterDetails {
            company: "Acme".to_string(),
            ..LetterDetails::default()
        };
        for kind in LetterKind::ALL {
            let body = kind.sample_body(&details);
            assert!(!body.contains('{'), "{kind:?} has an unfilled placeholder");
        }
        assert!(LetterKind::Resignation.sample_body(&details).contains("at Acme"));
    }

    #[test]
    fn letters_are_title_links_then_body() {
        let letter = Letter::sample(LetterKind::ThankYou);
        let story = letter.story(&StyleSheet::academic());
        let flowables = story.flowables();

        assert!(matches!(&flowables[0], Flowable::Paragraph(p) if p.text == "John Doe"));
        assert_eq!(flowables[1], Flowable::Spacer(mm(3.0)));
        assert!(matches!(&flowables[2], Flowable::Links(l) if l.links.len() == 2));
        assert_eq!(flowables[3], Flowable::Spacer(mm(8.0)));
        let paragraphs = flowables[4..]
            .iter()
            .filter(|f| matches!(f, Flowable::Paragraph(_)))
            .count();
        assert_eq!(paragraphs, 5);
    }

    #[test]
    fn dated_letters_show_the_date() {
        let letter = Letter::default().dated_today();
        let story = letter.story(&StyleSheet::academic());
        let Flowable::Paragraph(date) = &story.flowables()[4] else {
            panic!("expected the date after the links");
        };
        assert_eq!(Some(&date.text), letter.date.as_ref());
    }

    fn body_text(letter: &Letter) -> Vec<String> {
        let story = letter.story(&StyleSheet::academic());
        story
            .flowables()
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph(p) => Some(story.normalizer().normalize(&p.text)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn each_kind_keeps_its_own_dashes() {
        let mut letter = Letter::sample(LetterKind::CoverLetter);
        letter.body = "\u{2212}5% \u{2014} 3\u{2013}4".to_string();
        assert!(body_text(&letter).contains(&"\u{2212}5% \u{2014} 3\u{2013}4".to_string()));

        let mut letter = Letter::sample(LetterKind::RecommendationRequest);
        letter.body = "\u{2212}5% \u{2014} 3\u{2013}4".to_string();
        assert!(body_text(&letter).contains(&"-5% -- 3-4".to_string()));

        let mut letter = Letter::sample(LetterKind::Resignation);
        letter.body = "\u{2212}5% \u{2014} 3\u{2013}4".to_string();
        assert!(body_text(&letter).contains(&"-5% \u{2014} 3\u{2013}4".to_string()));
    }

    #[test]
    fn the_normalizer_can_be_swapped() {
        let letter = Letter {
            body: "a \u{2014} b".to_string(),
            normalizer: Normalizer::new(ReplacementTable::ascii()),
            ..Letter::sample(LetterKind::ThankYou)
        };
        assert!(body_text(&letter).contains(&"a -- b".to_string()));
    }

    #[test]
    fn portfolio_links_follow_their_paragraph() {
        let letter = Letter::sample(LetterKind::CoverLetter);
        let story = letter.story(&StyleSheet::academic());
        let flowables = story.flowables();

        let at = flowables
            .iter()
            .position(|f| matches!(f, Flowable::Links(l) if l.lead.is_some()))
            .expect("cover letter has a portfolio line");
        let Flowable::Paragraph(before) = &flowables[at - 1] else {
            panic!("expected a paragraph before the portfolio line");
        };
        assert!(before.text.starts_with("Alongside my professional work"));
        assert_eq!(before.style.space_after, Pt(0.0));
        let Flowable::Links(line) = &flowables[at] else {
            unreachable!()
        };
        assert_eq!(line.links[0].uri, "https://example.com");
        assert_eq!(line.lead.as_deref(), Some("Portfolio & case studies: "));

        let recruiter = Letter::sample(LetterKind::RecruiterEmail);
        let story = recruiter.story(&StyleSheet::academic());
        let lines = story
            .flowables()
            .iter()
            .filter(|f| matches!(f, Flowable::Links(_)))
            .count();
        assert_eq!(lines, 2);
    }
}

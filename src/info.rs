use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// The document information dictionary. Unset entries are left out of the PDF; the
/// producer is always this crate.
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Free text, usually comma separated
    pub keywords: Option<String>,
    /// Creation timestamp. The time of writing when not set.
    pub created: Option<DateTime<FixedOffset>>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Join `keywords` into the comma separated keywords entry
    pub fn keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        self.keywords = (!joined.is_empty()).then_some(joined);
        self
    }

    /// Pin the creation date, for output that doesn't change between runs
    pub fn created(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords));
        }

        let producer = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
        info.producer(TextStr(producer));
        info.creator(TextStr(producer));

        let created = self.created.unwrap_or_else(|| Local::now().fixed_offset());
        info.creation_date(pdf_date(created));
    }
}

fn pdf_date(at: DateTime<FixedOffset>) -> Date {
    let offset = at.offset().local_minus_utc();
    let hours = offset / 3600;
    let minutes = (offset % 3600 / 60).abs();
    Date::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(hours as i8)
        .utc_offset_minute(minutes as u8)
}

//! Cleaning up template text before it is laid out

use unicode_normalization::UnicodeNormalization;

/// Characters to swap out of text after composition. A replacement may only contain
/// characters the table leaves alone, or the character it replaces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplacementTable {
    entries: Vec<(char, String)>,
}

const NBSP: char = '\u{00A0}';
const THIN_SPACE: char = '\u{2009}';
const EN_DASH: char = '\u{2013}';
const EM_DASH: char = '\u{2014}';
const MINUS: char = '\u{2212}';

impl ReplacementTable {
    pub fn new() -> ReplacementTable {
        ReplacementTable::default()
    }

    /// Add (or override) the replacement for `from`
    pub fn with<S: ToString>(mut self, from: char, to: S) -> ReplacementTable {
        let to = to.to_string();
        match self.entries.iter_mut().find(|(c, _)| *c == from) {
            Some(entry) => entry.1 = to,
            None => self.entries.push((from, to)),
        }
        self
    }

    /// Odd spaces become plain spaces, dashes are kept as they are
    pub fn typographic() -> ReplacementTable {
        ReplacementTable::new()
            .with(NBSP, ' ')
            .with(THIN_SPACE, ' ')
            .with(EN_DASH, EN_DASH)
            .with(EM_DASH, EM_DASH)
            .with(MINUS, MINUS)
    }

    /// [ReplacementTable::typographic] with the minus sign written as a hyphen
    pub fn ascii_minus() -> ReplacementTable {
        ReplacementTable::typographic().with(MINUS, '-')
    }

    /// Only ASCII spaces and dashes, for text set in fonts without the typographic dashes
    pub fn ascii() -> ReplacementTable {
        ReplacementTable::typographic()
            .with(EN_DASH, '-')
            .with(EM_DASH, "--")
            .with(MINUS, '-')
    }

    pub fn entries(&self) -> impl Iterator<Item = (char, &str)> {
        self.entries.iter().map(|(c, s)| (*c, s.as_str()))
    }

    fn lookup(&self, ch: char) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, s)| s.as_str())
    }
}

/// Composes text to NFC and applies a [ReplacementTable]
///
/// ```
/// use letterpress::text::Normalizer;
///
/// let normalizer = Normalizer::default();
/// assert_eq!(normalizer.normalize("Cafe\u{301}\u{a0}Central"), "Café Central");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    table: ReplacementTable,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(ReplacementTable::typographic())
    }
}

impl Normalizer {
    pub fn new(table: ReplacementTable) -> Normalizer {
        Normalizer { table }
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// NFC-compose `text`, swap characters per the table, then compose again so that
    /// replacements next to combining marks end up composed too. Normalizing the output a
    /// second time returns it unchanged.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.nfc() {
            match self.table.lookup(ch) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(ch),
            }
        }
        out.nfc().collect()
    }
}

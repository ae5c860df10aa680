//! The PDF standard 14 faces that every viewer ships with. These need no font file, which
//! makes them the guaranteed last resort of the [font resolver](crate::resolve). Text in
//! them is encoded with `WinAnsiEncoding` and measured with the Adobe AFM advance widths.

use unicode_normalization::UnicodeNormalization;

/// A family of standard faces, each with regular, bold, italic and bold-italic members
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinFamily {
    Helvetica,
    Times,
    Courier,
}

/// Style slot within a family
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Regular,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    /// Suffix appended to a family name to name the registered face, e.g. `DejaVuSerif-Bold`
    pub fn suffix(self) -> &'static str {
        match self {
            FontStyle::Regular => "",
            FontStyle::Bold => "-Bold",
            FontStyle::Italic => "-Italic",
            FontStyle::BoldItalic => "-BoldItalic",
        }
    }
}

/// One of the standard 14 faces (the Symbol and ZapfDingbats faces are not supported)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinFace {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl BuiltinFamily {
    /// The conventional name of the family, which is also the name of its regular face
    pub fn name(self) -> &'static str {
        self.face(FontStyle::Regular).base_font()
    }

    pub fn face(self, style: FontStyle) -> BuiltinFace {
        use BuiltinFace::*;
        match (self, style) {
            (BuiltinFamily::Helvetica, FontStyle::Regular) => Helvetica,
            (BuiltinFamily::Helvetica, FontStyle::Bold) => HelveticaBold,
            (BuiltinFamily::Helvetica, FontStyle::Italic) => HelveticaOblique,
            (BuiltinFamily::Helvetica, FontStyle::BoldItalic) => HelveticaBoldOblique,
            (BuiltinFamily::Times, FontStyle::Regular) => TimesRoman,
            (BuiltinFamily::Times, FontStyle::Bold) => TimesBold,
            (BuiltinFamily::Times, FontStyle::Italic) => TimesItalic,
            (BuiltinFamily::Times, FontStyle::BoldItalic) => TimesBoldItalic,
            (BuiltinFamily::Courier, FontStyle::Regular) => Courier,
            (BuiltinFamily::Courier, FontStyle::Bold) => CourierBold,
            (BuiltinFamily::Courier, FontStyle::Italic) => CourierOblique,
            (BuiltinFamily::Courier, FontStyle::BoldItalic) => CourierBoldOblique,
        }
    }
}

impl BuiltinFace {
    const ALL: [BuiltinFace; 12] = [
        BuiltinFace::Helvetica,
        BuiltinFace::HelveticaBold,
        BuiltinFace::HelveticaOblique,
        BuiltinFace::HelveticaBoldOblique,
        BuiltinFace::TimesRoman,
        BuiltinFace::TimesBold,
        BuiltinFace::TimesItalic,
        BuiltinFace::TimesBoldItalic,
        BuiltinFace::Courier,
        BuiltinFace::CourierBold,
        BuiltinFace::CourierOblique,
        BuiltinFace::CourierBoldOblique,
    ];

    /// The `BaseFont` name written into the PDF
    pub fn base_font(self) -> &'static str {
        match self {
            BuiltinFace::Helvetica => "Helvetica",
            BuiltinFace::HelveticaBold => "Helvetica-Bold",
            BuiltinFace::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFace::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFace::TimesRoman => "Times-Roman",
            BuiltinFace::TimesBold => "Times-Bold",
            BuiltinFace::TimesItalic => "Times-Italic",
            BuiltinFace::TimesBoldItalic => "Times-BoldItalic",
            BuiltinFace::Courier => "Courier",
            BuiltinFace::CourierBold => "Courier-Bold",
            BuiltinFace::CourierOblique => "Courier-Oblique",
            BuiltinFace::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Look a face up by its `BaseFont` name
    pub fn from_name(name: &str) -> Option<BuiltinFace> {
        BuiltinFace::ALL
            .into_iter()
            .find(|face| face.base_font() == name)
    }

    pub fn family(self) -> BuiltinFamily {
        match self {
            BuiltinFace::Helvetica
            | BuiltinFace::HelveticaBold
            | BuiltinFace::HelveticaOblique
            | BuiltinFace::HelveticaBoldOblique => BuiltinFamily::Helvetica,
            BuiltinFace::TimesRoman
            | BuiltinFace::TimesBold
            | BuiltinFace::TimesItalic
            | BuiltinFace::TimesBoldItalic => BuiltinFamily::Times,
            BuiltinFace::Courier
            | BuiltinFace::CourierBold
            | BuiltinFace::CourierOblique
            | BuiltinFace::CourierBoldOblique => BuiltinFamily::Courier,
        }
    }

    pub fn is_italic(self) -> bool {
        matches!(
            self,
            BuiltinFace::HelveticaOblique
                | BuiltinFace::HelveticaBoldOblique
                | BuiltinFace::TimesItalic
                | BuiltinFace::TimesBoldItalic
                | BuiltinFace::CourierOblique
                | BuiltinFace::CourierBoldOblique
        )
    }

    /// Ascender in 1/1000 em
    pub fn ascender(self) -> i16 {
        match self.family() {
            BuiltinFamily::Helvetica => 718,
            BuiltinFamily::Times => 683,
            BuiltinFamily::Courier => 629,
        }
    }

    /// Descender in 1/1000 em (negative)
    pub fn descender(self) -> i16 {
        match self.family() {
            BuiltinFamily::Helvetica => -207,
            BuiltinFamily::Times => -217,
            BuiltinFamily::Courier => -157,
        }
    }

    /// Extra gap between lines in 1/1000 em, chosen so a line is 1.2 em tall
    pub fn line_gap(self) -> i16 {
        1200 - (self.ascender() - self.descender())
    }

    fn metrics(self) -> &'static Metrics {
        match self {
            BuiltinFace::Helvetica | BuiltinFace::HelveticaOblique => &HELVETICA,
            BuiltinFace::HelveticaBold | BuiltinFace::HelveticaBoldOblique => &HELVETICA_BOLD,
            BuiltinFace::TimesRoman => &TIMES_ROMAN,
            BuiltinFace::TimesBold => &TIMES_BOLD,
            BuiltinFace::TimesItalic => &TIMES_ITALIC,
            BuiltinFace::TimesBoldItalic => &TIMES_BOLD_ITALIC,
            BuiltinFace::Courier
            | BuiltinFace::CourierBold
            | BuiltinFace::CourierOblique
            | BuiltinFace::CourierBoldOblique => &COURIER,
        }
    }

    /// Horizontal advance of `ch` in 1/1000 em. Characters outside the table are measured by
    /// their canonical base letter (so `é` measures like `e`), then as `?`, which is what
    /// [winansi] substitutes for them.
    pub fn advance(self, ch: char) -> u16 {
        let metrics = self.metrics();
        if let Some(width) = metrics.width(ch) {
            return width;
        }
        ch.nfd()
            .next()
            .filter(|base| *base != ch)
            .and_then(|base| metrics.width(base))
            .or_else(|| metrics.width('?'))
            .unwrap_or(500)
    }
}

/// Map a character to its `WinAnsiEncoding` byte. Unencodable characters are encoded as their
/// canonical base letter if it is encodable, else as `?`. The minus sign is set as a hyphen.
pub fn winansi(ch: char) -> u8 {
    if ch == '\u{2212}' {
        return b'-';
    }
    winansi_exact(ch)
        .or_else(|| ch.nfd().next().and_then(winansi_exact))
        .unwrap_or(b'?')
}

fn winansi_exact(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => Some(code as u8),
        _ => match ch {
            '\u{20ac}' => Some(0x80),
            '\u{201a}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201e}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02c6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8a),
            '\u{2039}' => Some(0x8b),
            '\u{0152}' => Some(0x8c),
            '\u{017d}' => Some(0x8e),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201c}' => Some(0x93),
            '\u{201d}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02dc}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9a),
            '\u{203a}' => Some(0x9b),
            '\u{0153}' => Some(0x9c),
            '\u{017e}' => Some(0x9e),
            '\u{0178}' => Some(0x9f),
            _ => None,
        },
    }
}

struct Metrics {
    /// advances for U+0020 through U+007E
    ascii: [u16; 95],
    bullet: u16,
    endash: u16,
    emdash: u16,
    middot: u16,
    multiply: u16,
    quote: u16,
    dblquote: u16,
    ellipsis: u16,
}

impl Metrics {
    fn width(&self, ch: char) -> Option<u16> {
        let code = ch as u32;
        match ch {
            ' '..='~' => Some(self.ascii[(code - 0x20) as usize]),
            '\u{a0}' => Some(self.ascii[0]),
            '\u{2212}' => Some(self.ascii[(b'-' - 0x20) as usize]),
            '\u{2022}' => Some(self.bullet),
            '\u{2013}' => Some(self.endash),
            '\u{2014}' => Some(self.emdash),
            '\u{b7}' => Some(self.middot),
            '\u{d7}' => Some(self.multiply),
            '\u{2018}' | '\u{2019}' => Some(self.quote),
            '\u{201c}' | '\u{201d}' => Some(self.dblquote),
            '\u{2026}' => Some(self.ellipsis),
            _ => None,
        }
    }
}

#[rustfmt::skip]
const HELVETICA: Metrics = Metrics {
    ascii: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        278, 278, 584, 584, 584, 556, 1015,
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        278, 278, 278, 469, 556, 333,
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        334, 260, 334, 584,
    ],
    bullet: 350, endash: 556, emdash: 1000, middot: 278, multiply: 584,
    quote: 222, dblquote: 333, ellipsis: 1000,
};

#[rustfmt::skip]
const HELVETICA_BOLD: Metrics = Metrics {
    ascii: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        333, 333, 584, 584, 584, 611, 975,
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        333, 278, 333, 584, 556, 333,
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        389, 280, 389, 584,
    ],
    bullet: 350, endash: 556, emdash: 1000, middot: 278, multiply: 584,
    quote: 278, dblquote: 500, ellipsis: 1000,
};

#[rustfmt::skip]
const TIMES_ROMAN: Metrics = Metrics {
    ascii: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        278, 278, 564, 564, 564, 444, 921,
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        333, 278, 333, 469, 500, 333,
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        480, 200, 480, 541,
    ],
    bullet: 350, endash: 500, emdash: 1000, middot: 250, multiply: 564,
    quote: 333, dblquote: 444, ellipsis: 1000,
};

#[rustfmt::skip]
const TIMES_BOLD: Metrics = Metrics {
    ascii: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 930,
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        333, 278, 333, 581, 500, 333,
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        394, 220, 394, 520,
    ],
    bullet: 350, endash: 500, emdash: 1000, middot: 250, multiply: 570,
    quote: 333, dblquote: 500, ellipsis: 1000,
};

#[rustfmt::skip]
const TIMES_ITALIC: Metrics = Metrics {
    ascii: [
        250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 675, 675, 675, 500, 920,
        611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833,
        667, 722, 611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556,
        389, 278, 389, 422, 500, 333,
        500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722,
        500, 500, 500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389,
        400, 275, 400, 541,
    ],
    bullet: 350, endash: 500, emdash: 889, middot: 250, multiply: 675,
    quote: 333, dblquote: 556, ellipsis: 889,
};

#[rustfmt::skip]
const TIMES_BOLD_ITALIC: Metrics = Metrics {
    ascii: [
        250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 832,
        667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889,
        722, 722, 611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611,
        333, 278, 333, 570, 500, 333,
        500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778,
        556, 500, 500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389,
        348, 220, 348, 570,
    ],
    bullet: 350, endash: 500, emdash: 1000, middot: 250, multiply: 570,
    quote: 333, dblquote: 500, ellipsis: 1000,
};

const COURIER: Metrics = Metrics {
    ascii: [600; 95],
    bullet: 600,
    endash: 600,
    emdash: 600,
    middot: 600,
    multiply: 600,
    quote: 600,
    dblquote: 600,
    ellipsis: 600,
};

//! Fonts: parsed TrueType/OpenType faces that get embedded, and the built-in standard faces
//! that every PDF viewer provides.

mod builtin;
pub use builtin::*;

mod resolve;
pub use resolve::*;

use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

enum FontSource {
    Embedded(OwnedFace),
    Builtin(BuiltinFace),
}

/// A font usable on pages. Embedded fonts are TTF or OTF fonts that are written into the
/// generated PDF in their entirety, so large fonts may dramatically increase the size of the
/// file. Built-in fonts are one of the standard faces and cost nothing.
///
/// Fonts are referred to throughout layout code by their [id_arena::Id] within the
/// [Document](crate::Document) that owns them.
pub struct Font {
    source: FontSource,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font {
            source: FontSource::Embedded(face),
        })
    }

    /// One of the standard faces, which needs no font data
    pub fn builtin(face: BuiltinFace) -> Font {
        Font {
            source: FontSource::Builtin(face),
        }
    }

    /// The standard face this font refers to, if it is not an embedded font
    pub fn builtin_face(&self) -> Option<BuiltinFace> {
        match self.source {
            FontSource::Builtin(face) => Some(face),
            FontSource::Embedded(_) => None,
        }
    }

    fn face(&self) -> Option<&Face<'_>> {
        match &self.source {
            FontSource::Embedded(face) => Some(face.as_face_ref()),
            FontSource::Builtin(_) => None,
        }
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face()?
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the full name of the font, e.g. `DejaVu Serif Bold` or `Times-Bold`
    pub fn name(&self) -> String {
        match self.source {
            FontSource::Builtin(face) => face.base_font().to_string(),
            FontSource::Embedded(_) => self
                .name_entry(owned_ttf_parser::name_id::FULL_NAME)
                .or_else(|| self.name_entry(owned_ttf_parser::name_id::POST_SCRIPT_NAME))
                .unwrap_or_else(|| "Unnamed".to_string()),
        }
    }

    /// Obtain the family name of the font
    pub fn family(&self) -> String {
        match self.source {
            FontSource::Builtin(face) => face.family().name().to_string(),
            FontSource::Embedded(_) => self
                .name_entry(owned_ttf_parser::name_id::FAMILY)
                .unwrap_or_else(|| self.name()),
        }
    }

    fn units_per_em(&self) -> f32 {
        match self.face() {
            Some(face) => face.units_per_em() as f32,
            None => 1000.0,
        }
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.units_per_em()
    }

    fn ascender(&self) -> f32 {
        match &self.source {
            FontSource::Embedded(face) => face.as_face_ref().ascender() as f32,
            FontSource::Builtin(face) => face.ascender() as f32,
        }
    }

    fn descender(&self) -> f32 {
        match &self.source {
            FontSource::Embedded(face) => face.as_face_ref().descender() as f32,
            FontSource::Builtin(face) => face.descender() as f32,
        }
    }

    fn line_gap(&self) -> f32 {
        match &self.source {
            FontSource::Embedded(face) => face.as_face_ref().line_gap() as f32,
            FontSource::Builtin(face) => face.line_gap() as f32,
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.ascender()
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.descender()
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.line_gap()
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// Obtain the weight of the font (400 is normal, 700 is bold)
    pub fn weight(&self) -> u16 {
        match &self.source {
            FontSource::Embedded(face) => face.as_face_ref().weight().to_number(),
            FontSource::Builtin(face) => match face.base_font().contains("Bold") {
                true => 700,
                false => 400,
            },
        }
    }

    /// Glyph used to draw `ch`, falling back to the replacement character, then `?`, then
    /// `.notdef`
    fn glyph(face: &Face<'_>, ch: char) -> GlyphId {
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .unwrap_or(GlyphId(0))
    }

    /// Horizontal advance of a single character, in font units
    fn advance(&self, ch: char) -> f32 {
        match &self.source {
            FontSource::Embedded(face) => {
                let face = face.as_face_ref();
                face.glyph_hor_advance(Self::glyph(face, ch))
                    .unwrap_or_default() as f32
            }
            FontSource::Builtin(face) => face.advance(ch) as f32,
        }
    }

    /// Calculate the width of a string of text at the given font size. Newlines and other
    /// control characters are measured like any other character, so callers should split
    /// lines first.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let units: f32 = text.chars().map(|ch| self.advance(ch)).sum();
        self.scaling(size) * units
    }

    /// Encode text the way the content stream expects it for this font: two-byte glyph ids
    /// for embedded fonts (`Identity-H`), single `WinAnsiEncoding` bytes for built-in fonts
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match &self.source {
            FontSource::Embedded(face) => {
                let face = face.as_face_ref();
                text.chars()
                    .flat_map(|ch| Self::glyph(face, ch).0.to_be_bytes())
                    .collect()
            }
            FontSource::Builtin(_) => text.chars().map(winansi).collect(),
        }
    }

    fn write_cid(
        &self,
        owned: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(owned, refs, font_index, writer);
        let face = owned.as_face_ref();

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let ids_augmented = Self::glyphs_sizing(face, &Self::glyph_ids(face));

        let scaling = 1000.0 / face.units_per_em() as f32;

        // find the most popular width to use as the default
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for (_, (width, _)) in ids_augmented.values() {
            *widths_counts.entry(*width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&sz, _)| sz as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = ids_augmented
            .iter()
            .map(|(&cid, &(_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);

        // runs of consecutive glyph ids share one width array
        let mut run: Option<(u16, Vec<f32>)> = None;
        for (cid, width) in id_widths {
            match run.as_mut() {
                Some((start, ws)) if (cid - *start) as usize == ws.len() => ws.push(width),
                _ => {
                    if let Some((start, ws)) = run.take() {
                        widths.consecutive(start, ws);
                    }
                    run = Some((cid, vec![width]));
                }
            }
        }
        if let Some((start, ws)) = run {
            widths.consecutive(start, ws);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            face.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);
        stream.pair(Name(b"Length1"), face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        owned: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = Self::write_font_data(owned, refs, font_index, writer);
        let face = owned.as_face_ref();

        let gids_augmented = Self::glyphs_sizing(face, &Self::glyph_ids(face));

        let max_width = gids_augmented
            .values()
            .map(|&(_, (w, _))| w)
            .max()
            .unwrap_or_default();
        let max_height = gids_augmented
            .values()
            .map(|&(_, (_, h))| h)
            .max()
            .unwrap_or_default();
        let sum_width: usize = gids_augmented.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / gids_augmented.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));

        let name = self.name();
        let family = self.family();
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: face.descender() as f32 * scaling,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        // ttf_parser doesn't expose stem widths; 80 is what most writers use
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn glyph_ids(face: &Face<'_>) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = face.tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    fn glyphs_sizing(
        face: &Face<'_>,
        ids: &HashMap<u16, char>,
    ) -> HashMap<u16, (char, (u16, i16))> {
        let mut ids_augmented: HashMap<u16, (char, (u16, i16))> = HashMap::new();
        for (&id, &ch) in ids.iter() {
            if let Some(h_advance) = face.glyph_hor_advance(GlyphId(id)) {
                let height = face
                    .glyph_bounding_box(GlyphId(id))
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                ids_augmented.insert(id, (ch, (h_advance, height)));
            }
        }
        ids_augmented
    }

    fn write_to_unicode(
        face: &Face<'_>,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let mut ids: Vec<(u16, char)> = Self::glyph_ids(face).into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries and share a high byte
        for block in ids.chunk_by(|a, b| a.0 >> 8 == b.0 >> 8) {
            for block in block.chunks(100) {
                map.push_str(&format!("{} beginbfchar\n", block.len()));
                for &(id, ch) in block {
                    let ch: u32 = ch.into();
                    map.push_str(&format!("<{id:04x}> <{ch:04x}>\n"));
                }
                map.push_str("endbfchar\n");
            }
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));

        match &self.source {
            FontSource::Builtin(face) => {
                let mut font = writer.type1_font(font_id);
                font.base_font(Name(face.base_font().as_bytes()));
                font.encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontSource::Embedded(owned) => {
                let cid_font_id = self.write_cid(owned, refs, font_index, writer);
                let to_unicode_id =
                    Self::write_to_unicode(owned.as_face_ref(), refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_fonts_measure_in_points() {
        let font = Font::builtin(BuiltinFace::Helvetica);
        let width = font.width_of_text("Hello", Pt(10.0));
        assert!((width.0 - 22.78).abs() < 0.001);
        assert_eq!(font.name(), "Helvetica");
        assert_eq!(font.family(), "Helvetica");
    }

    #[test]
    fn builtin_line_height_is_1_2_em() {
        let font = Font::builtin(BuiltinFace::TimesRoman);
        assert!((font.line_height(Pt(10.0)).0 - 12.0).abs() < 0.001);
        assert!(font.descent(Pt(10.0)) < Pt(0.0));
    }

    #[test]
    fn builtin_fonts_encode_winansi() {
        let font = Font::builtin(BuiltinFace::TimesBold);
        assert_eq!(font.encode("A\u{2013}é"), vec![b'A', 0x96, 0xe9]);
        assert_eq!(font.weight(), 700);
    }

    #[test]
    fn garbage_is_not_a_font() {
        assert!(Font::load(b"definitely not a font".to_vec()).is_err());
    }
}

use crate::{
    codepoint::BmpCodepoints,
    font::{CharacterMatch, Font},
};

/// Result of [`Font::layout`]: one entry per decoded BMP codepoint.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout<'a> {
    pub scale: f32,
    /// Cursor position after the last codepoint.
    pub total_width: f32,
    pub glyphs: Vec<GlyphPosition<'a>>,
}

/// A codepoint placed on the line.
///
/// `x` is the cursor before this codepoint's advance was applied. Codepoints
/// without a match are kept with a zero advance so callers can see them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPosition<'a> {
    pub codepoint: u16,
    /// Offset of the codepoint's first byte in the input.
    pub byte_offset: usize,
    pub x: f32,
    pub matched: CharacterMatch<'a>,
}

impl Font {
    /// Walks `text` left to right, resolving each codepoint and advancing a
    /// horizontal cursor.
    ///
    /// Glyph matches advance by `glyph.width * scale`, space matches by
    /// `advance * scale`, misses by nothing. Malformed UTF-8 is skipped a byte
    /// at a time. Codepoints above the BMP are skipped as well, since no
    /// provider can hold them.
    pub fn layout(&self, text: impl AsRef<[u8]>, scale: f32) -> TextLayout<'_> {
        let mut glyphs = Vec::new();
        let mut cursor = 0.0;

        for (byte_offset, code) in BmpCodepoints::new(text.as_ref()) {
            let matched = self.resolve(code);
            glyphs.push(GlyphPosition {
                codepoint: code,
                byte_offset,
                x: cursor,
                matched,
            });
            cursor += matched.advance(scale);
        }

        TextLayout {
            scale,
            total_width: cursor,
            glyphs,
        }
    }

    /// Width of `text` at `scale`, without keeping the positions.
    pub fn measure(&self, text: impl AsRef<[u8]>, scale: f32) -> f32 {
        self.layout(text, scale).total_width
    }
}

use crate::image_loader::DecodedImage;

use super::{Glyph, GlyphMap};

/// Trailing padding added after the trimmed glyph width.
pub const GLYPH_PADDING: u32 = 1;

/// Computes per-codepoint glyph metrics for a fixed grid atlas.
///
/// The atlas is split into rows of `row_height` pixels and columns of equal
/// width. Column width comes from the codepoint count of the *first* row and
/// is applied to every row, even when later rows are longer or shorter. Each
/// glyph is then trimmed to its rightmost column containing a pixel with
/// nonzero alpha.
pub struct GlyphAtlasBuilder<'a> {
    image: &'a DecodedImage,
    row_height: u32,
}

impl<'a> GlyphAtlasBuilder<'a> {
    pub fn new(image: &'a DecodedImage, row_height: u32) -> Self {
        Self { image, row_height }
    }

    /// Cell width for the given grid, or `None` when the first row is
    /// missing or empty.
    ///
    /// The width may be `0` for an atlas narrower than the first row; such
    /// cells still produce glyphs, each two pixels wide at `u = 0`.
    pub fn cell_width(&self, rows: &[Vec<u16>]) -> Option<u32> {
        let per_row = rows.first().map(Vec::len)?;
        let per_row = u32::try_from(per_row).ok().filter(|&n| n > 0)?;
        Some(self.image.width() / per_row)
    }

    /// Builds the glyph table for `rows`, scanned row-major.
    ///
    /// Codepoint `0` marks an unused cell. A codepoint appearing in several
    /// cells keeps the last one.
    pub fn build(&self, rows: &[Vec<u16>]) -> GlyphMap {
        let mut glyphs = GlyphMap::default();

        let Some(cell_width) = self.cell_width(rows) else {
            if !rows.is_empty() {
                log::warn!("atlas grid has an empty first row, no glyphs built");
            }
            return glyphs;
        };
        if cell_width == 0 {
            log::warn!(
                "atlas {}x{} is narrower than its first row of {} codepoints",
                self.image.width(),
                self.image.height(),
                rows[0].len()
            );
        }

        let texture_width = self.image.width() as f32;
        let texture_height = self.image.height() as f32;

        for (row, codes) in rows.iter().enumerate() {
            let start_y = row as u64 * u64::from(self.row_height);
            for (col, &code) in codes.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let start_x = col as u64 * u64::from(cell_width);
                let width = self.trimmed_width(start_x, start_y, cell_width) + GLYPH_PADDING;

                glyphs.insert(
                    code,
                    Glyph {
                        u: start_x as f32 / texture_width,
                        v: start_y as f32 / texture_height,
                        width,
                    },
                );
            }
        }

        glyphs
    }

    /// Width of the cell at `(start_x, start_y)` up to and including its
    /// rightmost column with an opaque pixel.
    ///
    /// Columns are scanned from the right edge of the cell toward the left;
    /// the first one holding any pixel with nonzero alpha decides the width.
    /// Rows past the image bottom and columns past its right edge count as
    /// transparent. A fully transparent cell is one pixel wide.
    pub fn trimmed_width(&self, start_x: u64, start_y: u64, cell_width: u32) -> u32 {
        let end_y = (start_y + u64::from(self.row_height)).min(u64::from(self.image.height()));

        for offset in (0..cell_width).rev() {
            let x = start_x + u64::from(offset);
            let opaque = (start_y..end_y).any(|y| self.alpha(x, y) > 0);
            if opaque {
                return offset + 1;
            }
        }

        1
    }

    fn alpha(&self, x: u64, y: u64) -> u8 {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.image.alpha(x, y).unwrap_or(0),
            _ => 0,
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::rgba_image;

    const CELL: u32 = 8;

    fn rows(chars: &[&str]) -> Vec<Vec<u16>> {
        chars
            .iter()
            .map(|row| crate::codepoint::decode_bmp(row.as_bytes()))
            .collect()
    }

    #[test]
    fn test_transparent_cell_has_width_two() {
        let image = rgba_image(CELL * 2, CELL, &[]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["AB"]));
        assert_eq!(glyphs[&('A' as u16)].width, 2);
        assert_eq!(glyphs[&('B' as u16)].width, 2);
    }

    #[test]
    fn test_rightmost_column_gives_full_width() {
        // only the last column of the second cell is opaque
        let image = rgba_image(CELL * 2, CELL, &[(CELL * 2 - 1, 3)]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["AB"]));
        assert_eq!(glyphs[&('A' as u16)].width, 2);
        assert_eq!(glyphs[&('B' as u16)].width, CELL + 1);
    }

    #[test]
    fn test_rightmost_opaque_column_wins() {
        // columns 1 and 4 of the first cell are opaque; 4 is scanned first
        let image = rgba_image(CELL * 2, CELL, &[(1, 0), (4, 7)]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["AB"]));
        assert_eq!(glyphs[&('A' as u16)].width, 4 + 1 + 1);
    }

    #[test]
    fn test_leftmost_column_only() {
        let image = rgba_image(CELL, CELL, &[(0, 5)]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["A"]));
        assert_eq!(glyphs[&('A' as u16)].width, 2);
    }

    #[test]
    fn test_width_bounds_hold_for_every_column() {
        for column in 0..CELL {
            let image = rgba_image(CELL, CELL, &[(column, 0)]);
            let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["A"]));
            let width = glyphs[&('A' as u16)].width;
            assert_eq!(width, column + 2);
            assert!((2..=CELL + 1).contains(&width));
        }
    }

    #[test]
    fn test_scan_stays_inside_row() {
        // opaque pixel in row 1 must not widen the glyph in row 0
        let image = rgba_image(CELL, CELL * 2, &[(6, CELL)]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["A", "B"]));
        assert_eq!(glyphs[&('A' as u16)].width, 2);
        assert_eq!(glyphs[&('B' as u16)].width, 8);
    }

    #[test]
    fn test_uv_origin() {
        let image = rgba_image(CELL * 4, CELL * 2, &[]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["ABCD", "EFGH"]));
        let g = glyphs[&('G' as u16)];
        assert_eq!(g.u, 0.5);
        assert_eq!(g.v, 0.5);
        let a = glyphs[&('A' as u16)];
        assert_eq!((a.u, a.v), (0.0, 0.0));
    }

    #[test]
    fn test_first_row_drives_cell_width() {
        // first row has 2 codepoints, so cells are 8 wide even for the 4-wide row
        let image = rgba_image(CELL * 2, CELL * 2, &[]);
        let builder = GlyphAtlasBuilder::new(&image, CELL);
        let grid = rows(&["AB", "CDEF"]);
        assert_eq!(builder.cell_width(&grid), Some(CELL));
        let glyphs = builder.build(&grid);
        // cells beyond the atlas edge still get an entry, placed past u = 1
        assert_eq!(glyphs[&('F' as u16)].u, 1.5);
        assert_eq!(glyphs[&('F' as u16)].width, 2);
    }

    #[test]
    fn test_null_cells_skipped_and_duplicates_overwrite() {
        let image = rgba_image(CELL * 2, CELL * 2, &[(CELL + 2, CELL)]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["A\u{0}", "BA"]));
        assert!(!glyphs.contains_key(&0));
        let a = glyphs[&('A' as u16)];
        assert_eq!((a.u, a.v), (0.5, 0.5));
        assert_eq!(a.width, 4);
    }

    #[test]
    fn test_rows_below_image_are_transparent() {
        let image = rgba_image(CELL, CELL, &[(7, 7)]);
        let glyphs = GlyphAtlasBuilder::new(&image, CELL).build(&rows(&["A", "B"]));
        assert_eq!(glyphs[&('B' as u16)].v, 1.0);
        assert_eq!(glyphs[&('B' as u16)].width, 2);
    }

    #[test]
    fn test_empty_first_row_builds_nothing() {
        let image = rgba_image(4, CELL, &[]);
        let builder = GlyphAtlasBuilder::new(&image, CELL);
        assert!(builder.build(&[]).is_empty());
        assert!(builder.build(&rows(&["", "AB"])).is_empty());
    }

    #[test]
    fn test_zero_cell_width_still_builds_glyphs() {
        // 5 columns in 4 pixels: cells collapse to width 0
        let image = rgba_image(4, CELL, &[(0, 0), (3, 3)]);
        let builder = GlyphAtlasBuilder::new(&image, CELL);
        let grid = rows(&["ABCDE"]);
        assert_eq!(builder.cell_width(&grid), Some(0));

        let glyphs = builder.build(&grid);
        assert_eq!(glyphs.len(), 5);
        for glyph in glyphs.values() {
            assert_eq!((glyph.u, glyph.v, glyph.width), (0.0, 0.0, 2));
        }
    }

    #[test]
    fn test_zero_cell_width_glyphs_win_over_later_providers() {
        use crate::{
            font::{CharacterMatch, Font},
            provider::{BitmapProvider, FontProvider, SpaceProvider},
            resource_location::ResourceLocation,
        };

        let image = rgba_image(4, CELL, &[]);
        let bitmap = BitmapProvider::from_image(7, CELL, &rows(&["ABCDE"]), image);
        let font = Font::new(
            ResourceLocation::parse("narrow").unwrap(),
            vec![
                FontProvider::Bitmap(bitmap),
                FontProvider::Space(SpaceProvider::new([('A' as u16, 9)])),
            ],
        );
        let m = font.resolve('A' as u16);
        assert!(matches!(m, CharacterMatch::Glyph { .. }));
        assert_eq!(m.glyph().unwrap().width, 2);
    }
}

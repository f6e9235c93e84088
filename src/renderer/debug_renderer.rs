use crate::font::CharacterMatch;
use crate::provider::{BitmapProvider, Glyph};
use crate::renderer::Bitmap;
use crate::text::TextLayout;

/// Renders an existing `TextLayout` into a coverage bitmap.
///
/// Each bitmap glyph is copied from its atlas cell using the atlas alpha as
/// coverage, scaled by nearest neighbour with the layout's scale. All glyphs
/// share one baseline, placed at the largest ascent among the drawn providers.
/// Advance-only and unmatched entries draw nothing.
pub fn render_layout_to_bitmap(layout: &TextLayout<'_>, image_size: [usize; 2]) -> Bitmap {
    let width = image_size[0];
    let height = image_size[1];

    if width == 0 || height == 0 {
        return Bitmap::new(0, 0);
    }

    let mut bitmap = Bitmap::new(width, height);
    let scale = layout.scale;
    if !scale.is_finite() || scale <= 0.0 {
        return bitmap;
    }

    let baseline = layout
        .glyphs
        .iter()
        .filter_map(|position| match position.matched {
            CharacterMatch::Glyph { provider, .. } => Some(provider.ascent()),
            _ => None,
        })
        .max()
        .unwrap_or(0) as f32
        * scale;

    for position in &layout.glyphs {
        if let CharacterMatch::Glyph { provider, glyph } = position.matched {
            let top = baseline - provider.ascent() as f32 * scale;
            render_glyph_into_bitmap(&mut bitmap, provider, glyph, position.x, top, scale);
        }
    }

    bitmap
}

/// Copies one glyph cell into the target bitmap.
///
/// Only the trimmed columns are drawn; the trailing padding column is left
/// empty.
fn render_glyph_into_bitmap(
    bitmap: &mut Bitmap,
    provider: &BitmapProvider,
    glyph: Glyph,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
) {
    let src_x = (glyph.u * provider.texture_width() as f32).round() as u32;
    let src_y = (glyph.v * provider.texture_height() as f32).round() as u32;
    let src_width = glyph.width.saturating_sub(1);
    let src_height = provider.height();

    let dst_width = (src_width as f32 * scale).ceil() as usize;
    let dst_height = (src_height as f32 * scale).ceil() as usize;

    for row in 0..dst_height {
        let y = origin_y + row as f32;
        if y < 0.0 {
            continue;
        }
        let iy = y.floor() as usize;
        if iy >= bitmap.height {
            break;
        }

        let sy = ((row as f32 / scale) as u32).min(src_height.saturating_sub(1));

        for col in 0..dst_width {
            let x = origin_x + col as f32;
            if x < 0.0 {
                continue;
            }

            let sx = ((col as f32 / scale) as u32).min(src_width.saturating_sub(1));
            let Some(alpha) = provider.alpha(src_x + sx, src_y + sy) else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            // accumulate handles the right and bottom edges
            bitmap.accumulate(x.floor() as usize, iy, alpha);
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codepoint,
        font::Font,
        provider::{FontProvider, SpaceProvider},
        resource_location::ResourceLocation,
        test_fixtures::rgba_image,
    };

    /// 'A' has a vertical bar in column 1, 'B' a dot at (2, 3) of its cell.
    fn font() -> Font {
        let rows = vec![codepoint::decode_bmp(b"AB")];
        let mut opaque: Vec<_> = (0..8).map(|y| (1, y)).collect();
        opaque.push((8 + 2, 3));
        let image = rgba_image(16, 8, &opaque);
        Font::new(
            ResourceLocation::parse("default").unwrap(),
            vec![
                FontProvider::Space(SpaceProvider::new([(' ' as u16, 2)])),
                FontProvider::Bitmap(BitmapProvider::from_image(7, 8, &rows, image)),
            ],
        )
    }

    #[test]
    fn test_glyphs_copied_at_cursor() {
        let font = font();
        let layout = font.layout("A B", 1.0);
        let bitmap = render_layout_to_bitmap(&layout, [16, 8]);

        for y in 0..8 {
            assert_eq!(bitmap.get(1, y), Some(255), "bar row {y}");
            assert_eq!(bitmap.get(0, y), Some(0));
        }
        // 'A' advances 3, space 2, so 'B' starts at x = 5
        assert_eq!(bitmap.get(5 + 2, 3), Some(255));
        let lit = bitmap.data.iter().filter(|&&v| v > 0).count();
        assert_eq!(lit, 9);
    }

    #[test]
    fn test_scaled_glyph() {
        let font = font();
        let layout = font.layout("A", 2.0);
        let bitmap = render_layout_to_bitmap(&layout, [8, 16]);
        assert_eq!(bitmap.get(2, 0), Some(255));
        assert_eq!(bitmap.get(3, 15), Some(255));
        assert_eq!(bitmap.get(1, 0), Some(0));
        assert_eq!(bitmap.get(4, 0), Some(0));
    }

    #[test]
    fn test_empty_inputs() {
        let font = font();
        let layout = font.layout("A", 1.0);
        assert_eq!(render_layout_to_bitmap(&layout, [0, 8]), Bitmap::new(0, 0));

        let layout = font.layout("   Z", 1.0);
        let bitmap = render_layout_to_bitmap(&layout, [8, 8]);
        assert!(bitmap.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_non_finite_scale_draws_nothing() {
        let font = font();
        for scale in [f32::INFINITY, f32::NAN, -1.0] {
            let layout = font.layout("A", scale);
            let bitmap = render_layout_to_bitmap(&layout, [8, 8]);
            assert_eq!(bitmap, Bitmap::new(8, 8));
        }
    }
}

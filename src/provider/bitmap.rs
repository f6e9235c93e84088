use crate::{
    codepoint,
    descriptor::BitmapSpec,
    error::FontError,
    image_loader::DecodedImage,
    resource_location::ResourceLocation,
    texture_id::TextureId,
};

use super::{BuildContext, Glyph, GlyphAtlasBuilder, GlyphMap};

/// Category under which atlas images are stored.
pub const TEXTURE_CATEGORY: &str = "textures";

/// Glyphs cut from a single grid atlas.
///
/// The decoded RGBA8 atlas is kept alongside the glyph table so a rendering
/// backend can upload it once under [`Self::texture_id`].
#[derive(Debug)]
pub struct BitmapProvider {
    ascent: i32,
    height: u32,
    glyphs: GlyphMap,
    texture_id: TextureId,
    image: DecodedImage,
}

impl BitmapProvider {
    /// Builds a provider from an already decoded atlas.
    ///
    /// `rows` are the grid rows as BMP codepoints, top to bottom.
    pub fn from_image(ascent: i32, height: u32, rows: &[Vec<u16>], image: DecodedImage) -> Self {
        let glyphs = GlyphAtlasBuilder::new(&image, height).build(rows);

        Self {
            ascent,
            height,
            glyphs,
            texture_id: TextureId::next(),
            image,
        }
    }

    pub(crate) fn from_spec(ctx: &BuildContext<'_>, spec: &BitmapSpec) -> Result<Self, FontError> {
        let height = spec.height.unwrap_or(ctx.default_bitmap_height);
        let height = u32::try_from(height)
            .ok()
            .filter(|&h| h > 0)
            .ok_or_else(|| {
                FontError::malformed(
                    ctx.location,
                    format!("bitmap height must be positive, got {height}"),
                )
            })?;

        let file = ResourceLocation::parse(&spec.file).map_err(|source| {
            FontError::InvalidLocation {
                location: ctx.location.clone(),
                source,
            }
        })?;
        let path = ctx.assets_root.join(file.to_path(TEXTURE_CATEGORY));

        let image = ctx
            .image_loader
            .load(&path)
            .map_err(|e| FontError::image(ctx.location, e))?;
        log::debug!(
            "loaded atlas {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        let rows: Vec<Vec<u16>> = spec
            .chars
            .iter()
            .map(|row| codepoint::decode_bmp(row.as_bytes()))
            .collect();

        let provider = Self::from_image(spec.ascent, height, &rows, image);
        log::trace!(
            "font {}: bitmap provider from {} with {} glyphs",
            ctx.location,
            file,
            provider.glyphs.len()
        );

        Ok(provider)
    }

    pub fn glyph(&self, code: u16) -> Option<Glyph> {
        self.glyphs.get(&code).copied()
    }

    pub fn glyphs(&self) -> &GlyphMap {
        &self.glyphs
    }

    pub fn ascent(&self) -> i32 {
        self.ascent
    }

    /// Height of one grid row in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texture_id(&self) -> TextureId {
        self.texture_id
    }

    pub fn texture_width(&self) -> u32 {
        self.image.width()
    }

    pub fn texture_height(&self) -> u32 {
        self.image.height()
    }

    /// Atlas pixels, RGBA8, top-left origin.
    pub fn pixels(&self) -> &[u8] {
        self.image.pixels()
    }

    /// Atlas alpha at `(x, y)`, or `None` outside the atlas.
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.image.alpha(x, y)
    }
}

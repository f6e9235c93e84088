//! Concrete glyph providers.
//!
//! A font is an ordered list of [`FontProvider`]s. The set of provider kinds is
//! closed; adding one means adding a variant here and handling it in every
//! `match`, which the compiler enforces.

use std::{collections::HashMap, path::Path};

use crate::{font::CharacterMatch, image_loader::ImageLoader, resource_location::ResourceLocation};

/// Bitmap providers backed by a grid atlas.
pub mod bitmap;
/// Alpha-trimmed glyph metrics for grid atlases.
pub mod glyph_atlas;
/// Providers delegating to another font.
pub mod reference;
/// Advance-only providers.
pub mod space;

pub use bitmap::BitmapProvider;
pub use glyph_atlas::GlyphAtlasBuilder;
pub use reference::ReferenceProvider;
pub use space::SpaceProvider;

/// Atlas placement of one bitmap glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Left edge of the glyph cell, normalized to the atlas width.
    pub u: f32,
    /// Top edge of the glyph cell, normalized to the atlas height.
    pub v: f32,
    /// Trimmed pixel width plus one pixel of trailing padding.
    pub width: u32,
}

pub type GlyphMap = HashMap<u16, Glyph, fxhash::FxBuildHasher>;
pub type AdvanceMap = HashMap<u16, i32, fxhash::FxBuildHasher>;

#[derive(Debug)]
pub enum FontProvider {
    Bitmap(BitmapProvider),
    Space(SpaceProvider),
    Reference(ReferenceProvider),
}

impl FontProvider {
    /// Whether this provider claims `code`.
    pub fn handles(&self, code: u16) -> bool {
        match self {
            Self::Bitmap(bitmap) => bitmap.glyph(code).is_some(),
            Self::Space(space) => space.advance(code).is_some(),
            Self::Reference(reference) => reference.font().handles(code),
        }
    }

    /// Resolves `code` against this provider alone.
    ///
    /// A reference resolves through its sub-font with the same first-match
    /// rule the parent font applies.
    pub fn resolve(&self, code: u16) -> Option<CharacterMatch<'_>> {
        match self {
            Self::Bitmap(bitmap) => bitmap
                .glyph(code)
                .map(|glyph| CharacterMatch::Glyph {
                    provider: bitmap,
                    glyph,
                }),
            Self::Space(space) => space.advance(code).map(CharacterMatch::Advance),
            Self::Reference(reference) => match reference.font().resolve(code) {
                CharacterMatch::NoMatch => None,
                found => Some(found),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bitmap(_) => "bitmap",
            Self::Space(_) => "space",
            Self::Reference(_) => "reference",
        }
    }
}

/// Everything a provider needs from the enclosing load.
pub(crate) struct BuildContext<'a> {
    /// Font currently being built; used for error reporting.
    pub location: &'a ResourceLocation,
    pub assets_root: &'a Path,
    pub image_loader: &'a dyn ImageLoader,
    pub default_bitmap_height: i32,
}

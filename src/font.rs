use crate::{
    codepoint,
    provider::{BitmapProvider, FontProvider, Glyph},
    resource_location::ResourceLocation,
};

/// Result of resolving one codepoint against a [`Font`].
#[derive(Clone, Copy, Debug)]
pub enum CharacterMatch<'a> {
    /// Drawn from a bitmap atlas.
    Glyph {
        provider: &'a BitmapProvider,
        glyph: Glyph,
    },
    /// Moves the cursor without drawing.
    Advance(i32),
    /// No provider claims the codepoint.
    NoMatch,
}

impl CharacterMatch<'_> {
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }

    /// Horizontal cursor displacement at `scale`.
    pub fn advance(&self, scale: f32) -> f32 {
        match self {
            Self::Glyph { glyph, .. } => glyph.width as f32 * scale,
            Self::Advance(value) => *value as f32 * scale,
            Self::NoMatch => 0.0,
        }
    }

    pub fn glyph(&self) -> Option<Glyph> {
        match self {
            Self::Glyph { glyph, .. } => Some(*glyph),
            _ => None,
        }
    }
}

impl PartialEq for CharacterMatch<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Glyph {
                    provider: a,
                    glyph: ga,
                },
                Self::Glyph {
                    provider: b,
                    glyph: gb,
                },
            ) => std::ptr::eq(*a, *b) && ga == gb,
            (Self::Advance(a), Self::Advance(b)) => a == b,
            (Self::NoMatch, Self::NoMatch) => true,
            _ => false,
        }
    }
}

/// An ordered list of providers, queried first-match.
///
/// Fonts are immutable once built. Referenced sub-fonts are owned through
/// their [`crate::provider::ReferenceProvider`], so a font is a tree and can be
/// shared across threads for reading without coordination.
#[derive(Debug)]
pub struct Font {
    location: ResourceLocation,
    providers: Vec<FontProvider>,
}

impl Font {
    pub fn new(location: ResourceLocation, providers: Vec<FontProvider>) -> Self {
        Self {
            location,
            providers,
        }
    }

    /// The location this font was loaded from.
    pub fn location(&self) -> &ResourceLocation {
        &self.location
    }

    pub fn providers(&self) -> &[FontProvider] {
        &self.providers
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolves `code` to the first provider, in declared order, that claims it.
    ///
    /// Later providers only ever act as fallbacks. A reference provider is
    /// searched depth-first at its own position in the list.
    pub fn resolve(&self, code: u16) -> CharacterMatch<'_> {
        self.providers
            .iter()
            .find_map(|provider| provider.resolve(code))
            .unwrap_or(CharacterMatch::NoMatch)
    }

    /// Like [`Self::resolve`], for a `char`. Codepoints above the BMP never match.
    pub fn resolve_char(&self, ch: char) -> CharacterMatch<'_> {
        match codepoint::to_bmp(ch) {
            Some(code) => self.resolve(code),
            None => CharacterMatch::NoMatch,
        }
    }

    pub fn handles(&self, code: u16) -> bool {
        self.providers.iter().any(|provider| provider.handles(code))
    }
}

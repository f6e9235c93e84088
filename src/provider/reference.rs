use crate::{font::Font, resource_location::ResourceLocation};

/// Delegates every lookup to a separately loaded font.
///
/// The sub-font is owned outright; it is never shared with other references,
/// even ones naming the same id, so dropping the parent drops the whole tree.
#[derive(Debug)]
pub struct ReferenceProvider {
    id: ResourceLocation,
    font: Box<Font>,
}

impl ReferenceProvider {
    pub fn new(id: ResourceLocation, font: Font) -> Self {
        Self {
            id,
            font: Box::new(font),
        }
    }

    /// The referenced id, as written in the descriptor.
    pub fn id(&self) -> &ResourceLocation {
        &self.id
    }

    pub fn font(&self) -> &Font {
        &self.font
    }
}

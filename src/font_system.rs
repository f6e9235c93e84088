use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    error::FontError,
    font::{CharacterMatch, Font},
    font_storage::{FontStorage, FontStorageConfig},
    resource_location::ResourceLocation,
    text::TextLayout,
};

/// High-level entry point: a registry of loaded fonts.
///
/// Loading happens through the wrapped [`FontStorage`]; finished fonts are
/// published as `Arc<Font>` so any number of readers can query them while a
/// reload builds a replacement. Only top-level fonts live in the registry;
/// sub-fonts behind reference providers stay owned by their parent.
pub struct FontSystem {
    /// The loader used for every load and reload.
    pub font_storage: FontStorage,
    fonts: RwLock<HashMap<ResourceLocation, Arc<Font>, fxhash::FxBuildHasher>>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new(FontStorage::default())
    }
}

impl FontSystem {
    pub fn new(font_storage: FontStorage) -> Self {
        Self {
            font_storage,
            fonts: RwLock::new(HashMap::default()),
        }
    }

    /// Shorthand for a system loading from disk with `config`.
    pub fn with_config(config: FontStorageConfig) -> Self {
        Self::new(FontStorage::new(config))
    }
}

/// font loading
impl FontSystem {
    /// Returns the registered font for `location`, loading it first if needed.
    pub fn load(&self, location: &ResourceLocation) -> Result<Arc<Font>, FontError> {
        if let Some(font) = self.font(location) {
            return Ok(font);
        }
        self.reload(location)
    }

    /// Rebuilds `location` from disk and replaces the registered font.
    ///
    /// On failure nothing is replaced; readers keep seeing the previous font.
    pub fn reload(&self, location: &ResourceLocation) -> Result<Arc<Font>, FontError> {
        // built outside the lock so readers are never blocked on file I/O
        let font = match self.font_storage.load(location) {
            Ok(font) => Arc::new(font),
            Err(e) => {
                if self.fonts.read().contains_key(location) {
                    log::warn!("reload of {location} failed, keeping previous font: {e}");
                }
                return Err(e);
            }
        };

        log::info!("font {location} loaded with {} providers", font.providers().len());
        self.fonts.write().insert(location.clone(), Arc::clone(&font));
        Ok(font)
    }

    /// Reloads every registered font, stopping at the first failure.
    pub fn reload_all(&self) -> Result<(), FontError> {
        let mut locations: Vec<_> = self.fonts.read().keys().cloned().collect();
        locations.sort();
        for location in &locations {
            self.reload(location)?;
        }
        Ok(())
    }

    /// Drops the registry's handle to `location`.
    pub fn unload(&self, location: &ResourceLocation) -> Option<Arc<Font>> {
        self.fonts.write().remove(location)
    }

    pub fn font(&self, location: &ResourceLocation) -> Option<Arc<Font>> {
        self.fonts.read().get(location).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fonts.read().len()
    }
}

/// queries
impl FontSystem {
    /// Resolves `code` against a registered font and maps the result.
    ///
    /// Returns `None` when `location` is not registered.
    pub fn resolve<R>(
        &self,
        location: &ResourceLocation,
        code: u16,
        f: impl FnOnce(CharacterMatch<'_>) -> R,
    ) -> Option<R> {
        let font = self.font(location)?;
        Some(f(font.resolve(code)))
    }

    /// Lays out `text` with a registered font and hands the layout to `f`.
    pub fn layout_text<R>(
        &self,
        location: &ResourceLocation,
        text: impl AsRef<[u8]>,
        scale: f32,
        f: impl FnOnce(&TextLayout<'_>) -> R,
    ) -> Option<R> {
        let font = self.font(location)?;
        let layout = font.layout(text, scale);
        Some(f(&layout))
    }
}

use std::path::PathBuf;

use crate::{
    descriptor::{self, ProviderSpec},
    error::FontError,
    font::Font,
    image_loader::{FileImageLoader, ImageLoader},
    provider::{BitmapProvider, BuildContext, FontProvider, ReferenceProvider, SpaceProvider},
    resource_location::ResourceLocation,
};

/// Settings shared by every load performed through a [`FontStorage`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontStorageConfig {
    /// Directory holding the `font/` and `textures/` trees.
    pub assets_root: PathBuf,
    /// Deepest allowed chain of nested references, the root font included.
    pub max_reference_depth: usize,
    /// Row height for bitmap providers that omit `height`.
    pub default_bitmap_height: i32,
}

impl Default for FontStorageConfig {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("assets"),
            max_reference_depth: 32,
            default_bitmap_height: 8,
        }
    }
}

/// Loads fonts from descriptor files.
///
/// Every [`Self::load`] call builds a fresh, fully owned [`Font`] tree.
/// Reference providers are resolved eagerly at load time into sub-fonts owned
/// by the referencing provider; lookups then recurse into them at query time.
pub struct FontStorage {
    config: FontStorageConfig,
    image_loader: Box<dyn ImageLoader>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new(FontStorageConfig::default())
    }
}

impl FontStorage {
    /// Creates a storage that decodes atlases from disk.
    pub fn new(config: FontStorageConfig) -> Self {
        Self::with_image_loader(config, Box::new(FileImageLoader))
    }

    /// Creates a storage with a custom atlas source.
    pub fn with_image_loader(
        config: FontStorageConfig,
        image_loader: Box<dyn ImageLoader>,
    ) -> Self {
        Self {
            config,
            image_loader,
        }
    }

    pub fn config(&self) -> &FontStorageConfig {
        &self.config
    }

    /// Loads the font at `location` together with everything it references.
    ///
    /// Any failure anywhere in the tree aborts the whole load.
    pub fn load(&self, location: &ResourceLocation) -> Result<Font, FontError> {
        let mut loading = Vec::new();
        self.load_nested(location, &mut loading)
    }

    /// `loading` holds the ids currently being built, outermost first.
    fn load_nested(
        &self,
        location: &ResourceLocation,
        loading: &mut Vec<ResourceLocation>,
    ) -> Result<Font, FontError> {
        if let Some(start) = loading.iter().position(|id| id == location) {
            let mut chain = loading[start..].to_vec();
            chain.push(location.clone());
            return Err(FontError::CyclicReference { chain });
        }
        if loading.len() >= self.config.max_reference_depth {
            return Err(FontError::ReferenceDepthExceeded {
                location: location.clone(),
                limit: self.config.max_reference_depth,
            });
        }

        loading.push(location.clone());
        let result = self.build_font(location, loading);
        loading.pop();
        result
    }

    fn build_font(
        &self,
        location: &ResourceLocation,
        loading: &mut Vec<ResourceLocation>,
    ) -> Result<Font, FontError> {
        let specs = self.read_descriptor(location)?;

        let ctx = BuildContext {
            location,
            assets_root: &self.config.assets_root,
            image_loader: self.image_loader.as_ref(),
            default_bitmap_height: self.config.default_bitmap_height,
        };

        let mut providers = Vec::with_capacity(specs.len());
        for spec in &specs {
            let provider = match spec {
                ProviderSpec::Bitmap(spec) => {
                    FontProvider::Bitmap(BitmapProvider::from_spec(&ctx, spec)?)
                }
                ProviderSpec::Space(spec) => {
                    FontProvider::Space(SpaceProvider::from_spec(&ctx, spec)?)
                }
                ProviderSpec::Reference(spec) => {
                    let id = ResourceLocation::parse(&spec.id).map_err(|source| {
                        FontError::InvalidLocation {
                            location: location.clone(),
                            source,
                        }
                    })?;
                    log::trace!("font {location}: resolving reference {id}");
                    let font = self.load_nested(&id, loading)?;
                    FontProvider::Reference(ReferenceProvider::new(id, font))
                }
                ProviderSpec::Unihex => {
                    log::warn!("font {location}: unihex providers are not supported, skipping");
                    continue;
                }
            };
            log::trace!(
                "font {location}: provider {} is {}",
                providers.len(),
                provider.type_name()
            );
            providers.push(provider);
        }

        Ok(Font::new(location.clone(), providers))
    }

    fn read_descriptor(&self, location: &ResourceLocation) -> Result<Vec<ProviderSpec>, FontError> {
        let path = self
            .config
            .assets_root
            .join(descriptor::descriptor_path(location));
        log::debug!("reading font descriptor {}", path.display());

        let bytes = std::fs::read(&path).map_err(|source| FontError::ResourceNotFound {
            location: location.clone(),
            path: path.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes)
            .map_err(|e| FontError::malformed(location, format!("descriptor is not UTF-8: {e}")))?;

        descriptor::parse_descriptor(location, &text)
    }
}

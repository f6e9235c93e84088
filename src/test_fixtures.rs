//! Shared helpers for unit tests: throwaway asset trees and in-memory atlases.

#![allow(clippy::unwrap_used)]

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    descriptor,
    image_loader::{DecodedImage, ImageError, ImageLoader},
    provider::bitmap::TEXTURE_CATEGORY,
    resource_location::ResourceLocation,
};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A temporary asset root, removed on drop.
pub struct AssetDir {
    path: PathBuf,
}

impl AssetDir {
    pub fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "blockfont_{tag}_{}_{}",
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `json` as the descriptor of `location`.
    pub fn write_font(&self, location: &str, json: &str) {
        let location = ResourceLocation::parse(location).unwrap();
        let path = self.path.join(descriptor::descriptor_path(&location));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
    }

    /// Absolute path an atlas id resolves to under this root.
    pub fn texture_path(&self, file: &str) -> PathBuf {
        self.path
            .join(ResourceLocation::parse(file).unwrap().to_path(TEXTURE_CATEGORY))
    }
}

impl Drop for AssetDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Serves atlases from memory, keyed by the path the loader is asked for.
#[derive(Default)]
pub struct MemoryImageLoader {
    images: HashMap<PathBuf, DecodedImage>,
}

impl MemoryImageLoader {
    pub fn insert(&mut self, path: PathBuf, image: DecodedImage) {
        self.images.insert(path, image);
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage, ImageError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| ImageError::Load {
                path: path.to_path_buf(),
                source: std::io::ErrorKind::NotFound.into(),
            })
    }
}

/// A fully transparent white image with the listed pixels made opaque.
pub fn rgba_image(width: u32, height: u32, opaque: &[(u32, u32)]) -> DecodedImage {
    let mut pixels = vec![255; width as usize * height as usize * 4];
    for alpha in pixels.iter_mut().skip(3).step_by(4) {
        *alpha = 0;
    }
    for &(x, y) in opaque {
        pixels[(y as usize * width as usize + x as usize) * 4 + 3] = 255;
    }
    DecodedImage::new(width, height, pixels).unwrap()
}

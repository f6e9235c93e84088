//! # blockfont
//!
//! Loads resource-pack style bitmap fonts and answers "how do I draw this
//! character" for a renderer.
//!
//! ## Overview
//!
//! A font is described by a JSON descriptor at
//! `<assets>/font/<namespace>/<path>.json` holding an ordered `providers` list.
//! [`FontStorage`] turns a descriptor into a [`Font`]: bitmap providers get
//! per-glyph atlas metrics trimmed from the atlas alpha, space providers map
//! codepoints to plain advances, and reference providers pull in another font
//! as an owned sub-font. [`Font::resolve`] then picks the first provider, in
//! declared order, that claims a codepoint.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use blockfont::{FontStorage, FontStorageConfig, ResourceLocation};
//!
//! let storage = FontStorage::new(FontStorageConfig {
//!     assets_root: "assets".into(),
//!     ..Default::default()
//! });
//!
//! let location = ResourceLocation::parse("minecraft:default")?;
//! let font = storage.load(&location)?;
//!
//! let layout = font.layout("Hello", 2.0);
//! println!("width: {}", layout.total_width);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Limitations
//!
//! *   Only codepoints in the Basic Multilingual Plane (U+0000 to U+FFFF) are
//!     supported. Scalars above it are dropped while decoding descriptor rows
//!     and laid-out text, and rejected as `space` advance keys.
//! *   `unihex` providers are accepted but contribute nothing.
//! *   Grid cell width always comes from the first `chars` row.

pub mod codepoint;
pub mod descriptor;
pub mod error;
pub mod font;
pub mod font_storage;
pub mod font_system;
pub mod image_loader;
pub mod provider;
pub mod renderer;
pub mod resource_location;
pub mod text;
pub mod texture_id;

#[cfg(test)]
mod test_fixtures;

// common re-exports
pub use error::FontError;
pub use font::{CharacterMatch, Font};
pub use font_storage::{FontStorage, FontStorageConfig};
pub use font_system::FontSystem;
pub use image_loader::{DecodedImage, FileImageLoader, ImageError, ImageLoader};
pub use provider::{FontProvider, Glyph};
pub use resource_location::ResourceLocation;
pub use text::TextLayout;
pub use texture_id::TextureId;

// re-export dependencies
pub use image;
pub use parking_lot;

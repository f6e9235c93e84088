/// Cursor walk over UTF-8 text against a resolved font.
pub mod layout;

pub use layout::{GlyphPosition, TextLayout};

use std::path::{Path, PathBuf};

/// Failure reported by an [`ImageLoader`].
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The file could not be read.
    #[error("cannot read image {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bytes were read but do not form a usable RGBA8 image.
    #[error("cannot decode image {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },
}

/// A decoded RGBA8 image, rows stored top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wraps a raw RGBA8 buffer. The buffer length must be `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(format!(
                "expected {expected} bytes for {width}x{height} RGBA8, got {}",
                pixels.len()
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Alpha of the pixel at `(x, y)`, or `None` outside the image.
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.pixels.get(index).copied()
    }
}

/// Source of atlas images for bitmap providers.
///
/// The font pipeline never touches image formats directly; it only needs
/// width, height and top-left-origin RGBA8 pixels.
pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<DecodedImage, ImageError>;
}

/// Decodes images from disk with the `image` crate.
///
/// The format is sniffed from the file content, so atlas files may omit their
/// extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage, ImageError> {
        let to_error = |e: image::ImageError| match e {
            image::ImageError::IoError(source) => ImageError::Load {
                path: path.to_path_buf(),
                source,
            },
            other => ImageError::Format {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        };

        let reader = image::ImageReader::open(path)
            .map_err(|source| ImageError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .with_guessed_format()
            .map_err(|source| ImageError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        let rgba = reader.decode().map_err(to_error)?.into_rgba8();
        let (width, height) = rgba.dimensions();

        DecodedImage::new(width, height, rgba.into_raw()).map_err(|reason| ImageError::Format {
            path: path.to_path_buf(),
            reason,
        })
    }
}

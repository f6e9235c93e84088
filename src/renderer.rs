/// CPU rasterization of a layout, for tests and debugging.
pub mod debug_renderer;

pub use debug_renderer::render_layout_to_bitmap;

/// 8-bit coverage canvas, row-major, top-left origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Adds `value` to the pixel at `(x, y)`, saturating at 255.
    /// Out-of-bounds writes are ignored.
    pub fn accumulate(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let pixel = &mut self.data[y * self.width + x];
        *pixel = pixel.saturating_add(value);
    }
}

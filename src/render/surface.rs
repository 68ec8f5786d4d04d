use crate::foundation::core::{Dimensions, PixelBuffer, Rgb8};

/// Host paint primitive: the drawing surface the scheduler's instructions land on.
pub trait PaintSurface {
    /// Mark `(x, y)` with `rgb`. Out-of-bounds coordinates are ignored.
    fn paint(&mut self, x: u32, y: u32, rgb: Rgb8);
    /// Blank the whole surface.
    fn clear(&mut self);
}

/// In-memory straight-alpha RGBA8 surface.
///
/// Painted pixels are opaque; cleared pixels are transparent black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaSurface {
    dims: Dimensions,
    data: Vec<u8>,
}

impl RgbaSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let dims = Dimensions { width, height };
        Self {
            dims,
            data: vec![0; dims.pixel_count() * 4],
        }
    }

    /// Surface pre-filled with the source image, as a preview before printing starts.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            dims: buffer.dims(),
            data: buffer.as_bytes().to_vec(),
        }
    }

    /// Surface dimensions.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let o = self.offset(x, y)?;
        Some([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the surface and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        Some((y as usize * self.dims.width as usize + x as usize) * 4)
    }
}

impl PaintSurface for RgbaSurface {
    fn paint(&mut self, x: u32, y: u32, rgb: Rgb8) {
        let Some(o) = self.offset(x, y) else {
            return;
        };
        self.data[o..o + 4].copy_from_slice(&[rgb.r, rgb.g, rgb.b, 255]);
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

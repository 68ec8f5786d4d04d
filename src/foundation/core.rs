use crate::foundation::error::{PixelprintError, PixelprintResult};

/// 0-based pixel index in row-major scan order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelIndex(pub u32);

impl PixelIndex {
    /// Byte offset of this pixel inside an RGBA8 buffer.
    pub fn byte_offset(self) -> usize {
        self.0 as usize * 4
    }
}

/// Straight (non-premultiplied) RGB8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Channels as an array in `[r, g, b]` order.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Total pixel count.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Map a pixel index to `(x, y)` coordinates.
    pub fn coords(self, idx: PixelIndex) -> (u32, u32) {
        if self.width == 0 {
            return (0, 0);
        }
        (idx.0 % self.width, idx.0 / self.width)
    }
}

/// Decoded RGBA8 pixels supplied by the host, tightly packed and row-major.
///
/// Immutable once constructed; sessions share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    dims: Dimensions,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, validating `data.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> PixelprintResult<Self> {
        let dims = Dimensions { width, height };
        let expected = dims
            .pixel_count()
            .checked_mul(4)
            .ok_or_else(|| PixelprintError::validation("pixel buffer size overflows usize"))?;
        if data.len() != expected {
            return Err(PixelprintError::validation(format!(
                "pixel buffer has {} bytes, expected {expected} for {width}x{height} RGBA8",
                data.len()
            )));
        }
        if u32::try_from(dims.pixel_count()).is_err() {
            return Err(PixelprintError::validation(
                "pixel count exceeds u32 index space",
            ));
        }
        Ok(Self { dims, data })
    }

    /// Build a buffer from straight RGBA pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> PixelprintResult<Self> {
        Self::new(width, height, pixels.iter().flatten().copied().collect())
    }

    /// Canvas dimensions.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// `true` when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGB color at `idx`; alpha is ignored.
    ///
    /// Panics if `idx` is out of range.
    pub fn rgb(&self, idx: PixelIndex) -> Rgb8 {
        let o = idx.byte_offset();
        Rgb8::new(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// `(x, y)` coordinates of `idx`.
    pub fn coords(&self, idx: PixelIndex) -> (u32, u32) {
        self.dims.coords(idx)
    }

    /// Iterate RGB colors in scan order.
    pub fn colors(&self) -> impl ExactSizeIterator<Item = Rgb8> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| Rgb8::new(px[0], px[1], px[2]))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

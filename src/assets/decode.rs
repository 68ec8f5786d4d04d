use std::path::Path;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{PixelprintError, PixelprintResult};

/// Decode encoded image bytes into a straight-alpha RGBA8 [`PixelBuffer`].
pub fn decode_pixels(bytes: &[u8]) -> PixelprintResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PixelprintError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_pixels_from_path(path: impl AsRef<Path>) -> PixelprintResult<PixelBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        PixelprintError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
    })?;
    decode_pixels(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

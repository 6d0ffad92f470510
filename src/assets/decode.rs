use std::sync::Arc;

/// Raster image decoded once and shared by every texture that references it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight (non-premultiplied) RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// RGBA of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba8.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode encoded image bytes (format sniffed from content) into RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, image::ImageError> {
    let dyn_img = image::load_from_memory(bytes)?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

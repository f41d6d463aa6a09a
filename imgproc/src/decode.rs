use crate::{ImgprocError, Result};
use image::RgbImage;

/// Decode raw image bytes into a dense RGB8 buffer.
///
/// The pipeline works on 3-channel 8-bit buffers throughout; alpha and wider
/// bit depths are collapsed here. An unrecognized or corrupt byte stream is
/// an explicit error, never a silently empty buffer.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes).map_err(|e| ImgprocError::Decode(e.to_string()))?;
    Ok(img.to_rgb8())
}

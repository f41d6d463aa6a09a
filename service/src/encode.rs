use crate::{Result, ServiceError};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

/// Output quality for delivered composites and sheets.
pub const JPEG_QUALITY: u8 = 92;

/// Serialize a buffer as JPEG. A serialization fault is an internal error
/// (500-class), not a caller problem.
pub fn encode_jpeg(img: &RgbImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder
        .encode_image(img)
        .map_err(|_| ServiceError::Encode)?;
    Ok(out)
}

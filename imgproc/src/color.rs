use image::{GrayImage, RgbImage};
use rayon::prelude::*;

/// Integer BT.601 luma approximation.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

/// Collapse an RGB buffer to single-channel intensity.
pub fn rgb_to_gray(rgb: &RgbImage) -> GrayImage {
    let (w, h) = rgb.dimensions();
    let rgb_data = rgb.as_raw();
    let mut gray_data = vec![0u8; (w * h) as usize];

    gray_data
        .par_iter_mut()
        .zip(rgb_data.par_chunks(3))
        .for_each(|(g, px)| {
            *g = luma(px[0], px[1], px[2]);
        });

    GrayImage::from_raw(w, h, gray_data).unwrap_or_else(|| GrayImage::new(w, h))
}

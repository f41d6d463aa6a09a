use image::RgbImage;
use rayon::prelude::*;

/// Bilinear RGB resize. Rows are computed in parallel; output is identical
/// regardless of thread count.
pub fn resize_rgb(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    if width == 0 || height == 0 {
        return RgbImage::new(0, 0);
    }

    let mut dst = RgbImage::new(width, height);
    let src_width = src.width() as f32 - 1.0;
    let src_height = src.height() as f32 - 1.0;
    let dst_width = (width.max(2) - 1) as f32;
    let dst_height = (height.max(2) - 1) as f32;

    if src_width < 0.0 || src_height < 0.0 {
        return dst;
    }

    dst.as_mut()
        .par_chunks_mut(width as usize * 3)
        .enumerate()
        .for_each(|(y, row)| {
            let fy = (y as f32 / dst_height) * src_height;
            let y0 = fy as u32;
            let y1 = (y0 + 1).min(src.height() - 1);
            let dy = fy - y0 as f32;

            for x in 0..width {
                let fx = (x as f32 / dst_width) * src_width;
                let x0 = fx as u32;
                let x1 = (x0 + 1).min(src.width() - 1);
                let dx = fx - x0 as f32;

                for c in 0..3 {
                    let v00 = src.get_pixel(x0, y0)[c] as f32;
                    let v10 = src.get_pixel(x1, y0)[c] as f32;
                    let v01 = src.get_pixel(x0, y1)[c] as f32;
                    let v11 = src.get_pixel(x1, y1)[c] as f32;

                    let v0 = v00 * (1.0 - dx) + v10 * dx;
                    let v1 = v01 * (1.0 - dx) + v11 * dx;
                    let v = v0 * (1.0 - dy) + v1 * dy;

                    row[x as usize * 3 + c] = v.clamp(0.0, 255.0) as u8;
                }
            }
        });

    dst
}

/// Width-driven downscale policy.
///
/// `max_width == 0` means unconstrained. A buffer wider than the constraint
/// is scaled so its width equals `max_width` and its height keeps the same
/// ratio (rounded to nearest); buffers at or under the constraint pass
/// through unchanged. Never upscales.
pub fn fit_width(src: &RgbImage, max_width: u32) -> RgbImage {
    if max_width == 0 || src.width() <= max_width {
        return src.clone();
    }
    let scale = max_width as f32 / src.width() as f32;
    let height = ((src.height() as f32 * scale).round() as u32).max(1);
    resize_rgb(src, max_width, height)
}

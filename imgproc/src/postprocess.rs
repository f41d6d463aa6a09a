//! Composite canvas refinement: black-border autocrop and 2:1 letterboxing.

use crate::color::rgb_to_gray;
use crate::contours::{external_contours, largest_contour, Rect};
use image::{imageops, GrayImage, RgbImage};

/// Uniform background margin added before content detection, so a composite
/// whose content already touches an edge still yields a closed boundary.
pub const AUTOCROP_MARGIN: u32 = 10;

/// Surround a buffer with a uniform black margin.
pub fn pad_border(src: &RgbImage, margin: u32) -> RgbImage {
    let mut dst = RgbImage::new(src.width() + 2 * margin, src.height() + 2 * margin);
    imageops::replace(&mut dst, src, margin as i64, margin as i64);
    dst
}

/// Any non-black pixel becomes foreground (255).
pub fn binarize_nonzero(gray: &GrayImage) -> GrayImage {
    let mut out = gray.clone();
    for px in out.as_mut().iter_mut() {
        *px = if *px > 0 { 255 } else { 0 };
    }
    out
}

pub fn crop(src: &RgbImage, rect: Rect) -> RgbImage {
    imageops::crop_imm(src, rect.x, rect.y, rect.width, rect.height).to_image()
}

/// Remove the uniform black border a warped composite carries.
///
/// The canvas is padded by [`AUTOCROP_MARGIN`], binarized, and cropped to
/// the bounding box of the largest-area outer contour. A degenerate
/// all-background canvas comes back padded but otherwise unchanged; this
/// never fails.
pub fn autocrop(canvas: &RgbImage) -> RgbImage {
    let padded = pad_border(canvas, AUTOCROP_MARGIN);
    let binary = binarize_nonzero(&rgb_to_gray(&padded));
    let contours = external_contours(&binary);

    match largest_contour(&contours).and_then(|c| c.bounding_box()) {
        Some(rect) => crop(&padded, rect),
        None => padded,
    }
}

/// Force a 2:1 width:height aspect for equirectangular delivery.
///
/// Taller buffers are cropped vertically around the center; shorter buffers
/// are padded with black above and below (extra row goes to the bottom).
/// Idempotent when the buffer is already 2:1.
pub fn letterbox_2to1(buffer: &RgbImage) -> RgbImage {
    let (width, height) = buffer.dimensions();
    let target = width / 2;
    if target == 0 || height == target {
        return buffer.clone();
    }

    if height > target {
        let top = (height - target) / 2;
        crop(
            buffer,
            Rect {
                x: 0,
                y: top,
                width,
                height: target,
            },
        )
    } else {
        let top = (target - height) / 2;
        let mut out = RgbImage::new(width, target);
        imageops::replace(&mut out, buffer, 0, top as i64);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(color))
    }

    #[test]
    fn autocrop_removes_black_frame() {
        // 40x30 content centered in a 100x80 black canvas.
        let mut canvas = RgbImage::new(100, 80);
        let content = solid(40, 30, [180, 180, 180]);
        imageops::replace(&mut canvas, &content, 30, 25);

        let cropped = autocrop(&canvas);
        assert_eq!(cropped.dimensions(), (40, 30));
        assert_eq!(cropped.get_pixel(0, 0), &Rgb([180, 180, 180]));
    }

    #[test]
    fn autocrop_pure_foreground_keeps_full_content() {
        let canvas = solid(60, 40, [200, 10, 10]);
        let cropped = autocrop(&canvas);
        // Content touched every edge; after padding, the crop spans it all.
        assert_eq!(cropped.dimensions(), (60, 40));
    }

    #[test]
    fn autocrop_all_background_returns_padded_canvas() {
        let canvas = RgbImage::new(20, 10);
        let out = autocrop(&canvas);
        assert_eq!(
            out.dimensions(),
            (20 + 2 * AUTOCROP_MARGIN, 10 + 2 * AUTOCROP_MARGIN)
        );
    }

    #[test]
    fn letterbox_exact_ratio_is_a_copy() {
        let img = solid(100, 50, [1, 2, 3]);
        let out = letterbox_2to1(&img);
        assert_eq!(out.dimensions(), (100, 50));
        assert_eq!(out.as_raw(), img.as_raw());
    }

    #[test]
    fn letterbox_crops_tall_buffers_centered() {
        let mut img = RgbImage::new(100, 80);
        // Mark the row that should become the top of the crop: (80-50)/2 = 15.
        for x in 0..100 {
            img.put_pixel(x, 15, Rgb([9, 9, 9]));
        }
        let out = letterbox_2to1(&img);
        assert_eq!(out.dimensions(), (100, 50));
        assert_eq!(out.get_pixel(0, 0), &Rgb([9, 9, 9]));
    }

    #[test]
    fn letterbox_pads_short_buffers_centered() {
        let img = solid(100, 30, [7, 7, 7]);
        let out = letterbox_2to1(&img);
        assert_eq!(out.dimensions(), (100, 50));
        // (50-30)/2 = 10 rows of padding on top.
        assert_eq!(out.get_pixel(0, 9), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(0, 10), &Rgb([7, 7, 7]));
        assert_eq!(out.get_pixel(0, 39), &Rgb([7, 7, 7]));
        assert_eq!(out.get_pixel(0, 40), &Rgb([0, 0, 0]));
    }

    #[test]
    fn letterbox_is_idempotent() {
        let img = solid(120, 90, [5, 6, 7]);
        let once = letterbox_2to1(&img);
        let twice = letterbox_2to1(&once);
        assert_eq!(once.dimensions(), (120, 60));
        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn letterbox_odd_width_uses_integer_target() {
        let img = solid(101, 80, [3, 3, 3]);
        let out = letterbox_2to1(&img);
        assert_eq!(out.dimensions(), (101, 50));
    }
}

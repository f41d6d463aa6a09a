//! Minimal embedded 5x7 bitmap glyphs for panel labels.
//!
//! The sheet only ever writes labels of the form "Pair N", so the glyph set
//! covers exactly that alphabet; no font asset is shipped.

use image::{Rgb, RgbImage};

const GLYPH_WIDTH: u32 = 5;

fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        _ => return None,
    };
    Some(rows)
}

/// Stamp `text` onto the image at (x, y), scaled up by `scale`. Characters
/// outside the glyph set render as blanks; pixels off the image are clipped.
pub fn draw_label(img: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let scale = scale.max(1);
    let mut cursor_x = x;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row_idx, row) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if row & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let px = cursor_x + col * scale + sx;
                            let py = y + row_idx as u32 * scale + sy;
                            if px < img.width() && py < img.height() {
                                img.put_pixel(px, py, color);
                            }
                        }
                    }
                }
            }
        }
        cursor_x += (GLYPH_WIDTH + 1) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_marks_pixels_in_color() {
        let mut img = RgbImage::new(120, 30);
        draw_label(&mut img, "Pair 1", 2, 2, 2, Rgb([255, 55, 0]));
        let painted = img.pixels().filter(|p| p.0 == [255, 55, 0]).count();
        assert!(painted > 0);
    }

    #[test]
    fn label_clips_at_image_edge() {
        let mut img = RgbImage::new(10, 10);
        // Must not panic even though the text runs off the right edge.
        draw_label(&mut img, "Pair 42", 6, 6, 3, Rgb([255, 255, 255]));
    }

    #[test]
    fn unknown_characters_are_blank() {
        let mut img = RgbImage::new(40, 20);
        draw_label(&mut img, "??", 0, 0, 1, Rgb([255, 255, 255]));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}

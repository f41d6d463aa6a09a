//! FAST segment-test corner detection.

use image::GrayImage;
use pano_core::KeyPoint;

// Bresenham circle of radius 3 around the candidate pixel.
const CIRCLE: [(i32, i32); 12] = [
    (-3, 0),
    (-2, 1),
    (-1, 2),
    (0, 3),
    (1, 2),
    (2, 1),
    (3, 0),
    (2, -1),
    (1, -2),
    (0, -3),
    (-1, -2),
    (-2, -1),
];

/// Corner score: how many circle pixels are uniformly brighter or darker
/// than the center by at least `threshold`.
pub fn fast_score(image: &GrayImage, x: i32, y: i32, threshold: u8) -> u32 {
    let p = image.get_pixel(x as u32, y as u32)[0];
    let mut brighter = 0u32;
    let mut darker = 0u32;

    for &(dx, dy) in &CIRCLE {
        let px = x + dx;
        let py = y + dy;
        if px < 0 || px >= image.width() as i32 || py < 0 || py >= image.height() as i32 {
            continue;
        }
        let val = image.get_pixel(px as u32, py as u32)[0];
        if val > p.saturating_add(threshold) {
            brighter += 1;
        } else if val < p.saturating_sub(threshold) {
            darker += 1;
        }
    }

    brighter.max(darker)
}

/// Detect corners where at least 9 of the 12 circle pixels are consistently
/// brighter or darker than the center. Keeps the strongest `max_keypoints`
/// by score.
pub fn fast_detect(image: &GrayImage, threshold: u8, max_keypoints: usize) -> Vec<KeyPoint> {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let mut keypoints = Vec::new();

    if width <= 6 || height <= 6 {
        return keypoints;
    }

    for y in 3..height - 3 {
        for x in 3..width - 3 {
            let score = fast_score(image, x, y, threshold);
            if score >= 9 {
                keypoints.push(KeyPoint::new(x as f32, y as f32).with_response(score as f32));
            }
        }
    }

    if keypoints.len() > max_keypoints {
        keypoints.sort_by(|a, b| {
            b.response
                .partial_cmp(&a.response)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        keypoints.truncate(max_keypoints);
    }

    keypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn checkerboard(size: u32, square: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            if ((x / square) + (y / square)) % 2 == 0 {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }

    #[test]
    fn detects_corners_on_checkerboard() {
        let img = checkerboard(64, 16);
        let kps = fast_detect(&img, 20, 500);
        assert!(!kps.is_empty());
    }

    #[test]
    fn flat_image_has_no_corners() {
        let img = GrayImage::from_pixel(64, 64, Luma([128]));
        assert!(fast_detect(&img, 20, 500).is_empty());
    }

    #[test]
    fn cap_keeps_strongest() {
        let img = checkerboard(128, 8);
        let all = fast_detect(&img, 20, usize::MAX);
        let capped = fast_detect(&img, 20, 10);
        assert!(all.len() > 10);
        assert_eq!(capped.len(), 10);
        let min_kept = capped.iter().map(|k| k.response as u32).min().unwrap();
        // Every kept keypoint scores at least as high as the detector's
        // weakest accepted corner.
        assert!(min_kept >= 9);
    }

    #[test]
    fn tiny_image_is_empty() {
        let img = GrayImage::new(5, 5);
        assert!(fast_detect(&img, 20, 100).is_empty());
    }
}

//! Oriented FAST + rotation-steered BRIEF descriptors.
//!
//! Detection runs FAST over a small image pyramid, orients each keypoint by
//! its intensity centroid, and samples a fixed 256-pair BRIEF pattern
//! rotated into the keypoint frame. The pattern is generated once from a
//! fixed seed so extraction is deterministic across runs.

use crate::fast::fast_detect;
use image::GrayImage;
use pano_core::{Descriptor, Descriptors, KeyPoint, DESCRIPTOR_BYTES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

const BRIEF_PAIRS: usize = DESCRIPTOR_BYTES * 8;
const PATTERN_SEED: u64 = 0x5EED_0B1F;

/// ORB-style detector and descriptor extractor.
#[derive(Debug, Clone)]
pub struct Orb {
    n_features: usize,
    scale_factor: f32,
    n_levels: usize,
    patch_size: i32,
    fast_threshold: u8,
}

impl Default for Orb {
    fn default() -> Self {
        Self {
            n_features: 1500,
            scale_factor: 1.2,
            n_levels: 8,
            patch_size: 31,
            fast_threshold: 20,
        }
    }
}

impl Orb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_features(mut self, n: usize) -> Self {
        self.n_features = n;
        self
    }

    pub fn with_n_levels(mut self, n: usize) -> Self {
        self.n_levels = n.max(1);
        self
    }

    pub fn with_fast_threshold(mut self, threshold: u8) -> Self {
        self.fast_threshold = threshold;
        self
    }

    /// FAST keypoints across the pyramid, strongest `n_features` kept.
    pub fn detect(&self, image: &GrayImage) -> Vec<KeyPoint> {
        let mut all = Vec::new();
        let mut scale = 1.0f32;

        for level in 0..self.n_levels {
            let scaled = if level == 0 {
                image.clone()
            } else {
                let w = (image.width() as f32 / scale) as u32;
                let h = (image.height() as f32 / scale) as u32;
                if w < 8 || h < 8 {
                    break;
                }
                image::imageops::resize(image, w, h, image::imageops::FilterType::Triangle)
            };

            for kp in fast_detect(&scaled, self.fast_threshold, self.n_features * 2) {
                all.push(
                    KeyPoint::new(kp.x * scale, kp.y * scale)
                        .with_response(kp.response)
                        .with_octave(level as u32),
                );
            }

            scale *= self.scale_factor;
        }

        all.sort_by(|a, b| {
            b.response
                .partial_cmp(&a.response)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        all.truncate(self.n_features);
        all
    }

    /// Intensity-centroid orientation over the descriptor patch.
    pub fn orientation(&self, image: &GrayImage, kp: &KeyPoint) -> f32 {
        let half = self.patch_size / 2;
        let cx = kp.x as i32;
        let cy = kp.y as i32;
        let mut m01 = 0.0f64;
        let mut m10 = 0.0f64;

        for dy in -half..half {
            for dx in -half..half {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && px < image.width() as i32 && py >= 0 && py < image.height() as i32 {
                    let intensity = image.get_pixel(px as u32, py as u32)[0] as f64;
                    m01 += intensity * dy as f64;
                    m10 += intensity * dx as f64;
                }
            }
        }

        m01.atan2(m10).to_degrees() as f32
    }

    /// Detect, orient, and describe in one pass.
    ///
    /// Keypoints whose patch leaves the image are dropped, so the result can
    /// be empty on small or featureless inputs; callers must treat an empty
    /// set as a degrade signal, not an error.
    pub fn detect_and_compute(&self, image: &GrayImage) -> Descriptors {
        let keypoints = self.detect(image);
        let pattern = brief_pattern();
        let mut descriptors = Descriptors::with_capacity(keypoints.len());

        for kp in keypoints {
            let oriented = kp.with_angle(self.orientation(image, &kp));
            if let Some(desc) = steered_brief(image, &oriented, pattern, self.patch_size) {
                descriptors.push(desc);
            }
        }

        descriptors
    }
}

/// The shared BRIEF sampling pattern, generated once from a fixed seed.
fn brief_pattern() -> &'static [(f32, f32, f32, f32); BRIEF_PAIRS] {
    static PATTERN: OnceLock<[(f32, f32, f32, f32); BRIEF_PAIRS]> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(PATTERN_SEED);
        let half = Orb::default().patch_size as f32 / 2.0;
        let mut pairs = [(0.0f32, 0.0f32, 0.0f32, 0.0f32); BRIEF_PAIRS];
        for pair in pairs.iter_mut() {
            *pair = (
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            );
        }
        pairs
    })
}

/// Sample the pattern rotated by the keypoint angle. `None` when the patch
/// does not fit inside the image.
fn steered_brief(
    image: &GrayImage,
    kp: &KeyPoint,
    pattern: &[(f32, f32, f32, f32); BRIEF_PAIRS],
    patch_size: i32,
) -> Option<Descriptor> {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let cx = kp.x as i32;
    let cy = kp.y as i32;
    let half = patch_size / 2;

    if cx < half || cx >= width - half || cy < half || cy >= height - half {
        return None;
    }

    let angle = kp.angle.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let mut bits = [0u8; DESCRIPTOR_BYTES];
    for (i, &(x1, y1, x2, y2)) in pattern.iter().enumerate() {
        let rx1 = cos_a * x1 - sin_a * y1;
        let ry1 = sin_a * x1 + cos_a * y1;
        let rx2 = cos_a * x2 - sin_a * y2;
        let ry2 = sin_a * x2 + cos_a * y2;

        let px1 = (cx as f32 + rx1) as i32;
        let py1 = (cy as f32 + ry1) as i32;
        let px2 = (cx as f32 + rx2) as i32;
        let py2 = (cy as f32 + ry2) as i32;

        if px1 < 0 || px1 >= width || py1 < 0 || py1 >= height {
            continue;
        }
        if px2 < 0 || px2 >= width || py2 < 0 || py2 >= height {
            continue;
        }

        let v1 = image.get_pixel(px1 as u32, py1 as u32)[0];
        let v2 = image.get_pixel(px2 as u32, py2 as u32)[0];
        if v1 < v2 {
            bits[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    Some(Descriptor::new(bits, *kp))
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
    fn extracts_descriptors_on_textured_image() {
        let img = checkerboard(128, 16);
        let descs = Orb::new().with_n_features(200).detect_and_compute(&img);
        assert!(!descs.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let img = checkerboard(128, 16);
        let orb = Orb::new().with_n_features(100);
        let a = orb.detect_and_compute(&img);
        let b = orb.detect_and_compute(&img);
        assert_eq!(a.len(), b.len());
        for (da, db) in a.iter().zip(b.iter()) {
            assert_eq!(da.bits, db.bits);
        }
    }

    #[test]
    fn flat_image_yields_no_descriptors() {
        let img = GrayImage::from_pixel(96, 96, Luma([100]));
        let descs = Orb::new().detect_and_compute(&img);
        assert!(descs.is_empty());
    }

    #[test]
    fn identical_images_produce_identical_descriptors() {
        let img = checkerboard(96, 12);
        let a = Orb::new().detect_and_compute(&img);
        let b = Orb::new().detect_and_compute(&img.clone());
        assert_eq!(a.len(), b.len());
        if let (Some(da), Some(db)) = (a.iter().next(), b.iter().next()) {
            assert_eq!(da.hamming_distance(db), 0);
        };
    }
}

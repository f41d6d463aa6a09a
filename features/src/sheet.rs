//! Diagnostic match sheet: one stacked panel per consecutive image pair.

use crate::font::draw_label;
use crate::matcher::mutual_best_matches;
use crate::orb::Orb;
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use pano_imgproc::{fit_width, rgb_to_gray};
use rayon::prelude::*;

const LABEL_POS: (u32, u32) = (10, 8);
const LABEL_SCALE: u32 = 2;
const LABEL_COLOR: Rgb<u8> = Rgb([255, 55, 0]);
const MATCH_COLOR: Rgb<u8> = Rgb([0, 220, 60]);

/// Knobs for sheet assembly. The defaults mirror the production service;
/// none of the pipeline's invariants depend on their exact values.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Per-image width bound inside a panel (downscale only).
    pub max_panel_width: u32,
    /// How many leading consecutive pairs to render.
    pub max_pairs: usize,
    /// Keep at most this many lowest-distance matches per pair.
    pub max_matches: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            max_panel_width: 600,
            max_pairs: 4,
            max_matches: 100,
        }
    }
}

/// Compose the diagnostic sheet for an ordered image sequence.
///
/// The first `min(len - 1, max_pairs)` consecutive pairs each become one
/// labeled panel; panels are padded with background to a common width and
/// height and stacked top-to-bottom. Returns `None` when no pair can be
/// formed (fewer than 2 images).
pub fn build_sheet(images: &[RgbImage], config: &SheetConfig) -> Option<RgbImage> {
    let pair_count = images.len().saturating_sub(1).min(config.max_pairs);
    if pair_count == 0 {
        return None;
    }

    let panels: Vec<RgbImage> = (0..pair_count)
        .into_par_iter()
        .map(|i| render_pair_panel(&images[i], &images[i + 1], i, config))
        .collect();

    let sheet_width = panels.iter().map(|p| p.width()).max()?;
    let panel_height = panels.iter().map(|p| p.height()).max()?;

    let mut sheet = RgbImage::new(sheet_width, panel_height * pair_count as u32);
    for (i, panel) in panels.iter().enumerate() {
        // Right/bottom background fill comes from the sheet allocation;
        // panels are placed, never cropped.
        imageops::replace(&mut sheet, panel, 0, (i as u32 * panel_height) as i64);
    }

    Some(sheet)
}

/// Render one pair: side-by-side composition, match annotations when both
/// sides produced descriptors, and the 1-indexed label.
fn render_pair_panel(left: &RgbImage, right: &RgbImage, index: usize, config: &SheetConfig) -> RgbImage {
    let left = fit_width(left, config.max_panel_width);
    let right = fit_width(right, config.max_panel_width);

    let mut panel = side_by_side(&left, &right);

    let orb = Orb::new();
    let desc_left = orb.detect_and_compute(&rgb_to_gray(&left));
    let desc_right = orb.detect_and_compute(&rgb_to_gray(&right));

    // Either side failing to describe degrades to the bare composition;
    // the sheet as a whole never fails over one weak pair.
    if !desc_left.is_empty() && !desc_right.is_empty() {
        let mut matches = mutual_best_matches(&desc_left, &desc_right);
        matches.truncate(config.max_matches);

        let offset = left.width() as f32;
        for m in &matches {
            let from = desc_left.descriptors[m.query_idx].keypoint.pt();
            let to = desc_right.descriptors[m.train_idx].keypoint.shifted_pt(offset);
            draw_line_segment_mut(&mut panel, (from.x, from.y), (to.x, to.y), MATCH_COLOR);
            draw_hollow_circle_mut(&mut panel, (from.x as i32, from.y as i32), 3, MATCH_COLOR);
            draw_hollow_circle_mut(&mut panel, (to.x as i32, to.y as i32), 3, MATCH_COLOR);
        }
    }

    let label = format!("Pair {}", index + 1);
    draw_label(&mut panel, &label, LABEL_POS.0, LABEL_POS.1, LABEL_SCALE, LABEL_COLOR);
    panel
}

/// Horizontal composition with black fill under the shorter image.
fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut out = RgbImage::new(width, height);
    imageops::replace(&mut out, left, 0, 0);
    imageops::replace(&mut out, right, left.width() as i64, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured(w: u32, h: u32, square: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            if ((x / square) + (y / square)) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    fn flat(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([128, 128, 128]))
    }

    #[test]
    fn sheet_has_min_of_pairs_and_cap() {
        let images = vec![textured(96, 64, 8); 6];
        let config = SheetConfig {
            max_pairs: 4,
            ..SheetConfig::default()
        };
        let sheet = build_sheet(&images, &config).unwrap();
        // 5 candidate pairs capped at 4, each panel 96+96 wide, 64 tall.
        assert_eq!(sheet.dimensions(), (192, 64 * 4));

        let short = build_sheet(&images[..3], &config).unwrap();
        assert_eq!(short.height(), 64 * 2);
    }

    #[test]
    fn single_image_yields_no_sheet() {
        let images = vec![textured(64, 64, 8)];
        assert!(build_sheet(&images, &SheetConfig::default()).is_none());
        assert!(build_sheet(&[], &SheetConfig::default()).is_none());
    }

    #[test]
    fn featureless_pair_degrades_without_failing() {
        let images = vec![flat(80, 60), flat(80, 60)];
        let sheet = build_sheet(&images, &SheetConfig::default()).unwrap();
        assert_eq!(sheet.dimensions(), (160, 60));
    }

    #[test]
    fn panel_images_are_downscaled_to_panel_width() {
        let images = vec![textured(1200, 300, 16), textured(1200, 300, 16)];
        let config = SheetConfig {
            max_panel_width: 300,
            ..SheetConfig::default()
        };
        let sheet = build_sheet(&images, &config).unwrap();
        assert_eq!(sheet.width(), 600);
        assert_eq!(sheet.height(), 75);
    }

    #[test]
    fn mixed_sizes_pad_to_widest_panel() {
        let images = vec![textured(100, 50, 10), textured(200, 80, 10), textured(50, 40, 10)];
        let sheet = build_sheet(&images, &SheetConfig::default()).unwrap();
        // Panel 1: 100+200 wide, Panel 2: 200+50 wide; sheet takes the max.
        assert_eq!(sheet.width(), 300);
        assert_eq!(sheet.height(), 80 * 2);
    }

    #[test]
    fn label_is_painted_on_each_panel() {
        let images = vec![flat(120, 60), flat(120, 60), flat(120, 60)];
        let sheet = build_sheet(&images, &SheetConfig::default()).unwrap();
        let label_pixels = sheet.pixels().filter(|p| p.0 == [255, 55, 0]).count();
        assert!(label_pixels > 0);
    }
}

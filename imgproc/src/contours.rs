use image::GrayImage;

/// Axis-aligned region in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// An ordered outer boundary of one connected foreground region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<(i32, i32)>,
}

impl Contour {
    /// Enclosed area by the shoelace formula.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0f64;
        for i in 0..n {
            let (x0, y0) = self.points[i];
            let (x1, y1) = self.points[(i + 1) % n];
            area += x0 as f64 * y1 as f64 - x1 as f64 * y0 as f64;
        }
        area.abs() * 0.5
    }

    /// Axis-aligned bounding box, `None` for an empty contour.
    pub fn bounding_box(&self) -> Option<Rect> {
        let (first_x, first_y) = *self.points.first()?;
        let mut min_x = first_x;
        let mut min_y = first_y;
        let mut max_x = first_x;
        let mut max_y = first_y;
        for &(x, y) in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Rect {
            x: min_x.max(0) as u32,
            y: min_y.max(0) as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }
}

// Clockwise 8-neighborhood starting east.
const DIRS_8: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

#[inline]
fn in_bounds(x: i32, y: i32, w: i32, h: i32) -> bool {
    x >= 0 && y >= 0 && x < w && y < h
}

#[inline]
fn is_foreground(data: &[u8], w: i32, h: i32, x: i32, y: i32) -> bool {
    in_bounds(x, y, w, h) && data[(y * w + x) as usize] > 0
}

fn is_boundary(data: &[u8], w: i32, h: i32, x: i32, y: i32) -> bool {
    if !is_foreground(data, w, h, x, y) {
        return false;
    }
    DIRS_8.iter().any(|&(dx, dy)| {
        let nx = x + dx;
        let ny = y + dy;
        !in_bounds(nx, ny, w, h) || !is_foreground(data, w, h, nx, ny)
    })
}

/// Moore boundary trace from a starting boundary pixel.
fn trace_boundary(data: &[u8], w: i32, h: i32, sx: i32, sy: i32) -> Vec<(i32, i32)> {
    let mut contour = Vec::new();
    let mut current = (sx, sy);
    let mut prev_dir = 4usize; // as if we arrived from the west
    let start = current;
    let start_prev_dir = prev_dir;
    let max_steps = (w as usize * h as usize).saturating_mul(8).max(32);

    for _ in 0..max_steps {
        contour.push(current);

        let mut found = None;
        for step in 1..=8 {
            let k = (prev_dir + step) % 8;
            let nx = current.0 + DIRS_8[k].0;
            let ny = current.1 + DIRS_8[k].1;
            if is_foreground(data, w, h, nx, ny) {
                prev_dir = (k + 6) % 8;
                found = Some((nx, ny));
                break;
            }
        }

        let Some(next) = found else { break };
        if next == start && prev_dir == start_prev_dir && contour.len() > 1 {
            break;
        }
        current = next;
    }

    if contour.len() > 1 && contour.first() == contour.last() {
        contour.pop();
    }
    contour
}

/// Outer contours of the connected foreground regions of a binary image
/// (any non-zero pixel is foreground).
pub fn external_contours(binary: &GrayImage) -> Vec<Contour> {
    let w = binary.width() as i32;
    let h = binary.height() as i32;
    let data = binary.as_raw();
    let mut visited = vec![false; (w * h).max(0) as usize];
    let mut contours = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if visited[idx] || !is_boundary(data, w, h, x, y) {
                continue;
            }
            let points = trace_boundary(data, w, h, x, y);
            if points.len() >= 3 {
                for &(px, py) in &points {
                    visited[(py * w + px) as usize] = true;
                }
                contours.push(Contour { points });
            } else {
                visited[idx] = true;
            }
        }
    }

    contours
}

/// The contour enclosing the largest area, if any.
pub fn largest_contour(contours: &[Contour]) -> Option<&Contour> {
    contours
        .iter()
        .max_by(|a, b| a.area().partial_cmp(&b.area()).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn filled_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn rectangle_contour_bounding_box() {
        let mut img = GrayImage::new(32, 24);
        filled_rect(&mut img, 8, 6, 22, 18);

        let contours = external_contours(&img);
        assert!(!contours.is_empty());
        let rect = contours[0].bounding_box().unwrap();
        assert_eq!(rect, Rect { x: 8, y: 6, width: 14, height: 12 });
        assert!(contours[0].area() > 0.0);
    }

    #[test]
    fn largest_contour_wins_by_area() {
        let mut img = GrayImage::new(64, 64);
        filled_rect(&mut img, 2, 2, 6, 6);
        filled_rect(&mut img, 20, 20, 50, 50);

        let contours = external_contours(&img);
        assert_eq!(contours.len(), 2);
        let big = largest_contour(&contours).unwrap();
        let rect = big.bounding_box().unwrap();
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 30);
    }

    #[test]
    fn all_background_has_no_contours() {
        let img = GrayImage::new(16, 16);
        assert!(external_contours(&img).is_empty());
        assert!(largest_contour(&[]).is_none());
    }
}

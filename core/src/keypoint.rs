use nalgebra::Point2;

/// A detected image feature location.
///
/// Coordinates are in pixels of the image the keypoint was detected on.
/// `angle` is the intensity-centroid orientation in degrees; a keypoint that
/// has not been oriented yet carries `angle = 0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPoint {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub response: f32,
    pub octave: u32,
}

impl KeyPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            angle: 0.0,
            response: 0.0,
            octave: 0,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_response(mut self, response: f32) -> Self {
        self.response = response;
        self
    }

    pub fn with_octave(mut self, octave: u32) -> Self {
        self.octave = octave;
        self
    }

    pub fn pt(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Position shifted right by `dx` pixels, used when a keypoint from the
    /// right-hand image of a pair is drawn on a side-by-side panel.
    pub fn shifted_pt(&self, dx: f32) -> Point2<f32> {
        Point2::new(self.x + dx, self.y)
    }
}

/// A one-to-one correspondence between two descriptor sets.
///
/// `distance` is the Hamming distance between the two descriptors; lower is
/// a stronger match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureMatch {
    pub query_idx: usize,
    pub train_idx: usize,
    pub distance: u32,
}

impl FeatureMatch {
    pub fn new(query_idx: usize, train_idx: usize, distance: u32) -> Self {
        Self {
            query_idx,
            train_idx,
            distance,
        }
    }
}

//! Video-to-frame sampling.
//!
//! Walks a video stream at a configurable stride, applies the pipeline's
//! width constraint to every kept frame, and stops at a frame-count cap.
//! Decoder and stream handles are released on every exit path.

pub mod sampler;

pub use sampler::*;

pub type Result<T> = std::result::Result<T, VideoError>;

#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("cannot open video: {0}")]
    Open(String),

    #[error("video decoder error: {0}")]
    Decode(String),

    #[error("insufficient frames: need at least 2, sampled {got}")]
    InsufficientFrames { got: usize },
}

/// Stride/cap policy for one sampling run.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Keep every `frame_step`-th frame, starting at index 0.
    pub frame_step: u32,
    /// Stop once this many frames were kept.
    pub max_frames: usize,
    /// Width bound applied to each kept frame (0 = unconstrained).
    pub max_width: u32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            frame_step: 100,
            max_frames: 200,
            max_width: 1280,
        }
    }
}

impl SampleConfig {
    /// Whether the frame at `index` is kept under this stride.
    pub fn keeps(&self, index: u64) -> bool {
        index % self.frame_step.max(1) as u64 == 0
    }
}

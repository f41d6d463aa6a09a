//! External stitching engine contract.
//!
//! The multi-image correspondence, homography/bundle estimation, warping and
//! seam blending live behind this trait. The pipeline hands the engine an
//! ordered image sequence and a mode flag and gets back a composite canvas
//! or a status describing why stitching failed. The pipeline never retries.

use crate::StitchMode;
use image::RgbImage;

/// Why the engine declined to produce a composite.
///
/// The numeric codes mirror the status values reported by the engine in the
/// source system, so operators can correlate diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    NeedMoreImages,
    HomographyFailed,
    CameraParamsFailed,
    Other(i32),
}

impl EngineStatus {
    pub fn code(&self) -> i32 {
        match self {
            EngineStatus::NeedMoreImages => 1,
            EngineStatus::HomographyFailed => 2,
            EngineStatus::CameraParamsFailed => 3,
            EngineStatus::Other(code) => *code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            1 => EngineStatus::NeedMoreImages,
            2 => EngineStatus::HomographyFailed,
            3 => EngineStatus::CameraParamsFailed,
            other => EngineStatus::Other(other),
        }
    }
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("stitching failed (status={0})")]
    Failed(EngineStatus),

    /// The engine reported nominal success but produced no canvas. Treated
    /// identically to a failure status.
    #[error("stitching produced no canvas")]
    MissingCanvas,
}

impl EngineError {
    pub fn status(&self) -> EngineStatus {
        match self {
            EngineError::Failed(status) => *status,
            EngineError::MissingCanvas => EngineStatus::Other(-1),
        }
    }
}

/// Opaque stitching capability consumed by the pipeline.
pub trait StitchEngine {
    fn stitch(&self, images: &[RgbImage], mode: StitchMode) -> Result<RgbImage, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for code in [1, 2, 3, 7, -1] {
            assert_eq!(EngineStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn named_statuses() {
        assert_eq!(EngineStatus::from_code(1), EngineStatus::NeedMoreImages);
        assert_eq!(EngineStatus::from_code(2), EngineStatus::HomographyFailed);
        assert_eq!(EngineStatus::from_code(3), EngineStatus::CameraParamsFailed);
        assert_eq!(EngineStatus::from_code(42), EngineStatus::Other(42));
    }

    #[test]
    fn missing_canvas_maps_to_sentinel_status() {
        assert_eq!(EngineError::MissingCanvas.status(), EngineStatus::Other(-1));
    }
}

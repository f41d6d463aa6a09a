use pano_core::EngineStatus;
use pano_videoio::VideoError;

/// Everything a request can fail with, mapped onto HTTP-style status
/// classes. Failures are structured, user-facing values; internal faults
/// never leak as traces.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("at least {required} images are required")]
    TooFewImages { required: usize },

    #[error("could not read image: {name}")]
    UndecodableInput { name: String },

    #[error("could not read video upload")]
    UnreadableVideo,

    #[error("frame extraction failed: {0}")]
    Sample(#[from] VideoError),

    #[error("stitch failed (status={status})")]
    Engine { status: EngineStatus },

    #[error("could not produce a match sheet")]
    EmptySheet,

    #[error("failed to encode result image")]
    Encode,

    #[error("could not persist upload to temporary storage")]
    TempStorage(#[from] std::io::Error),
}

impl ServiceError {
    /// HTTP-style status class: 400 caller error, 422 pipeline/engine
    /// failure, 500 internal fault.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::TooFewImages { .. }
            | ServiceError::UndecodableInput { .. }
            | ServiceError::UnreadableVideo => 400,
            ServiceError::Sample(_) | ServiceError::Engine { .. } | ServiceError::EmptySheet => 422,
            ServiceError::Encode | ServiceError::TempStorage(_) => 500,
        }
    }

    /// Actionable remediation hints for failures the caller can influence.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            ServiceError::Engine { .. } => &[
                "increase overlap between neighboring shots to 30-60%",
                "avoid blurred inputs and strong exposure differences",
                "try the other mode (panorama/scans)",
                "set max_width=0 to keep full resolution",
            ],
            ServiceError::Sample(_) => &[
                "check that the video opens and plays",
                "raise max_frames or lower frame_step",
                "set max_width=0 if fine detail is needed",
            ],
            _ => &[],
        }
    }
}

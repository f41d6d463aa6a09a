use pano_core::StitchMode;
use pano_features::SheetConfig;

/// One uploaded image, kept with its client-side name so decode failures
/// can say which file was unreadable.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Image-batch stitch request. `max_width == 0` disables the width bound.
#[derive(Debug, Clone)]
pub struct BatchStitchRequest {
    pub files: Vec<InputFile>,
    pub mode: StitchMode,
    pub max_width: u32,
}

impl BatchStitchRequest {
    pub fn new(files: Vec<InputFile>) -> Self {
        Self {
            files,
            mode: StitchMode::Panorama,
            max_width: 2000,
        }
    }

    pub fn with_mode(mut self, mode: StitchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }
}

/// Video stitch request. Autocrop always runs; letterboxing to 2:1 runs only
/// when `force_equirect_2to1` is set.
#[derive(Debug, Clone)]
pub struct VideoStitchRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mode: StitchMode,
    pub frame_step: u32,
    pub max_frames: usize,
    pub max_width: u32,
    pub force_equirect_2to1: bool,
}

impl VideoStitchRequest {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mode: StitchMode::Panorama,
            frame_step: 100,
            max_frames: 200,
            max_width: 1280,
            force_equirect_2to1: true,
        }
    }

    pub fn with_mode(mut self, mode: StitchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_sampling(mut self, frame_step: u32, max_frames: usize) -> Self {
        self.frame_step = frame_step;
        self.max_frames = max_frames;
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_force_equirect(mut self, force: bool) -> Self {
        self.force_equirect_2to1 = force;
        self
    }
}

/// Match-diagnostic sheet request.
#[derive(Debug, Clone)]
pub struct MatchSheetRequest {
    pub files: Vec<InputFile>,
    pub max_width: u32,
    pub sheet: SheetConfig,
}

impl MatchSheetRequest {
    pub fn new(files: Vec<InputFile>) -> Self {
        Self {
            files,
            max_width: 1200,
            sheet: SheetConfig::default(),
        }
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_sheet_config(mut self, sheet: SheetConfig) -> Self {
        self.sheet = sheet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_defaults_match_the_boundary_contract() {
        let req = BatchStitchRequest::new(Vec::new());
        assert_eq!(req.mode, StitchMode::Panorama);
        assert_eq!(req.max_width, 2000);
    }

    #[test]
    fn video_defaults_match_the_boundary_contract() {
        let req = VideoStitchRequest::new("clip.mp4", Vec::new());
        assert_eq!(req.mode, StitchMode::Panorama);
        assert_eq!(req.frame_step, 100);
        assert_eq!(req.max_frames, 200);
        assert_eq!(req.max_width, 1280);
        assert!(req.force_equirect_2to1);
    }

    #[test]
    fn sheet_defaults_match_the_boundary_contract() {
        let req = MatchSheetRequest::new(Vec::new());
        assert_eq!(req.max_width, 1200);
        assert_eq!(req.sheet.max_panel_width, 600);
        assert_eq!(req.sheet.max_pairs, 4);
        assert_eq!(req.sheet.max_matches, 100);
    }
}

//! The three service operations.
//!
//! Stages within one request run sequentially (each stage's output is the
//! next stage's sole input); normalization fans out across the uploaded
//! images with rayon as a pure optimization that preserves order.

use crate::{
    encode_jpeg, BatchStitchRequest, InputFile, MatchSheetRequest, Result, ServiceError,
    VideoStitchRequest,
};
use image::RgbImage;
use pano_core::StitchEngine;
use pano_features::build_sheet;
use pano_imgproc::{autocrop, decode_rgb, fit_width, letterbox_2to1};
use pano_videoio::{sample_frames, SampleConfig};
use rayon::prelude::*;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Stitching and matching need at least one overlapping pair.
pub const MIN_IMAGES: usize = 2;

/// Decode and width-bound every upload, in input order. The first
/// unreadable file fails the batch, named.
fn normalize_batch(files: &[InputFile], max_width: u32) -> Result<Vec<RgbImage>> {
    files
        .par_iter()
        .map(|f| {
            decode_rgb(&f.bytes)
                .map(|img| fit_width(&img, max_width))
                .map_err(|_| ServiceError::UndecodableInput {
                    name: f.name.clone(),
                })
        })
        .collect()
}

/// Stitch an ordered image batch into one composite JPEG.
///
/// The composite is always autocropped; batch output is never letterboxed.
pub fn stitch_images<E: StitchEngine>(engine: &E, req: &BatchStitchRequest) -> Result<Vec<u8>> {
    if req.files.len() < MIN_IMAGES {
        return Err(ServiceError::TooFewImages {
            required: MIN_IMAGES,
        });
    }

    let images = normalize_batch(&req.files, req.max_width)?;
    debug!(count = images.len(), mode = req.mode.as_str(), "batch normalized");

    let canvas = engine
        .stitch(&images, req.mode)
        .map_err(|e| ServiceError::Engine { status: e.status() })?;

    let cropped = autocrop(&canvas);
    info!(
        width = cropped.width(),
        height = cropped.height(),
        "batch stitch complete"
    );
    encode_jpeg(&cropped)
}

/// Stitch frames sampled from one uploaded video.
///
/// The upload lives in a named temporary file for the duration of the
/// request; dropping the handle removes it on every exit path, including
/// sampler and engine failures.
pub fn stitch_video<E: StitchEngine>(engine: &E, req: &VideoStitchRequest) -> Result<Vec<u8>> {
    if req.bytes.is_empty() {
        return Err(ServiceError::UnreadableVideo);
    }

    let suffix = Path::new(&req.file_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let mut upload = tempfile::Builder::new()
        .prefix("pano-upload-")
        .suffix(&suffix)
        .tempfile()?;
    upload.write_all(&req.bytes)?;
    upload.flush()?;

    let config = SampleConfig {
        frame_step: req.frame_step,
        max_frames: req.max_frames,
        max_width: req.max_width,
    };
    let frames = sample_frames(upload.path(), &config)?;
    debug!(frames = frames.len(), mode = req.mode.as_str(), "video sampled");

    let canvas = engine
        .stitch(&frames, req.mode)
        .map_err(|e| ServiceError::Engine { status: e.status() })?;

    let mut out = autocrop(&canvas);
    if req.force_equirect_2to1 {
        out = letterbox_2to1(&out);
    }
    info!(
        width = out.width(),
        height = out.height(),
        equirect = req.force_equirect_2to1,
        "video stitch complete"
    );
    encode_jpeg(&out)
}

/// Render the pairwise match-diagnostic sheet for an ordered image batch.
pub fn render_matches(req: &MatchSheetRequest) -> Result<Vec<u8>> {
    if req.files.len() < MIN_IMAGES {
        return Err(ServiceError::TooFewImages {
            required: MIN_IMAGES,
        });
    }

    let images = normalize_batch(&req.files, req.max_width)?;
    let sheet = build_sheet(&images, &req.sheet).ok_or(ServiceError::EmptySheet)?;
    info!(
        width = sheet.width(),
        height = sheet.height(),
        "match sheet rendered"
    );
    encode_jpeg(&sheet)
}
